//! # Energy Module
//!
//! Windowed energy accumulation and typhoon classification.
//!
//! This module handles:
//! - A time-windowed rolling history of gyro magnitudes
//! - The smoothed, decay-limited energy level
//! - Mapping an energy level to a typhoon category scale
//! - The console energy bar

pub mod history;
pub mod accumulator;
pub mod classify;

pub use history::GyroHistory;
pub use accumulator::EnergyAccumulator;
pub use classify::{energy_bar, Classification, ClassificationTable};
