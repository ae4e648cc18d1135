//! # Status Types
//!
//! Per-tick status snapshots and the final simulation summary.

use std::fmt;

use crate::energy::Classification;

/// One tick's worth of simulation state, for display/telemetry
#[derive(Debug, Clone)]
pub struct StatusSnapshot {
    /// Seconds left before the simulation ends
    pub time_remaining_s: f32,

    /// Gyro magnitude of this tick's sample
    pub gyro_mag: f32,

    /// Rolling average over the history window
    pub window_average: f32,

    /// Current energy level
    pub energy: f32,

    /// Rendered energy bar
    pub energy_bar: String,

    /// Final rumble intensity sent to the actuator this tick
    pub intensity: f32,

    /// Classification of the current energy level
    pub classification: Classification,
}

impl fmt::Display for StatusSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Time Left: {:>4.1}s | Gyro Now:{:>8.1} Avg:{:>8.1} | Energy:{:>8.1} {} | Rumble: {:.2} | {}",
            self.time_remaining_s,
            self.gyro_mag,
            self.window_average,
            self.energy,
            self.energy_bar,
            self.intensity,
            self.classification
        )
    }
}

/// Result of a completed (or cancelled) simulation run
#[derive(Debug, Clone)]
pub struct SimulationSummary {
    /// Average gyro magnitude over the trailing history window
    pub average_gyro: f32,

    /// Final strength estimate, classified from the average
    pub classification: Classification,

    /// Number of ticks that produced a sample
    pub ticks: u64,
}

impl fmt::Display for SimulationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Average gyro magnitude: {:.1} | Final estimated strength: {}",
            self.average_gyro, self.classification
        )
    }
}
