//! # Simulation Module
//!
//! The typhoon simulation itself.
//!
//! This module handles:
//! - The fixed-rate control loop tying sampler, intensity model, linger state
//!   and energy accumulator together each tick
//! - Cooperative cancellation and single-path finalization (rumble off +
//!   final classification)
//! - Pre-run sequencing: start-button gate and the haptic countdown
//! - Status snapshot and final summary types

pub mod runner;
pub mod sequence;
pub mod status;

pub use runner::SimulationLoop;
pub use sequence::{countdown, wait_for_press};
pub use status::{SimulationSummary, StatusSnapshot};
