//! # Rumble Module
//!
//! Encoding of rumble descriptions into Joy-Con actuator packets.
//!
//! This module handles:
//! - The abstract (low frequency, high frequency, amplitude) rumble description
//! - Log-domain frequency/amplitude encoding required by the HD rumble hardware
//! - Assembly of the 8-byte actuator packet (two repeated 4-byte sub-reports)
//! - Fallback to the fixed "off" packet on any arithmetic failure

pub mod encoder;

pub use encoder::{encode, RumbleSpec, OFF_PACKET, RUMBLE_PACKET_LEN};
