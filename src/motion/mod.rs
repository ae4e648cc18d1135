//! # Motion Module
//!
//! Gyroscope-driven rumble intensity.
//!
//! This module handles:
//! - Sampling raw motion axes and computing vector magnitudes
//! - Mapping instantaneous gyro magnitude to a target rumble intensity
//! - The "linger" state machine that fades a rumble burst out smoothly

pub mod sampler;
pub mod intensity;
pub mod linger;

pub use sampler::{sample, MotionSample};
pub use intensity::IntensityModel;
pub use linger::{final_intensity, LingerState};
