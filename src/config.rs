//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.
//!
//! Every profile constant of the simulation (thresholds, scale ceilings,
//! decay rates, countdown feel) is a named configuration field rather than a
//! hard-coded value, so feel profiles can be tuned without rebuilding.

use serde::Deserialize;
use serde::de::Error;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::rumble::encoder::{HIGH_FREQ_MAX_HZ, HIGH_FREQ_MIN_HZ, LOW_FREQ_MAX_HZ, LOW_FREQ_MIN_HZ};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub motion: MotionConfig,

    #[serde(default)]
    pub rumble: RumbleConfig,

    #[serde(default)]
    pub energy: EnergyConfig,

    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub countdown: CountdownConfig,
}

/// Gyroscope-to-intensity mapping configuration
#[derive(Debug, Deserialize, Clone)]
pub struct MotionConfig {
    /// Minimum gyro magnitude required to start rumbling
    #[serde(default = "default_gyro_threshold")]
    pub gyro_threshold: f32,

    /// Gyro magnitude mapping to full intensity and the top typhoon category
    #[serde(default = "default_max_gyro_magnitude")]
    pub max_gyro_magnitude: f32,
}

/// Rumble feel configuration
#[derive(Debug, Deserialize, Clone)]
pub struct RumbleConfig {
    /// Low frequency component for the main rumble effect (Hz)
    #[serde(default = "default_low_freq_hz")]
    pub low_freq_hz: f32,

    /// High frequency component for the main rumble effect (Hz)
    #[serde(default = "default_high_freq_hz")]
    pub high_freq_hz: f32,

    /// Maximum linger duration after a full-intensity burst (seconds)
    #[serde(default = "default_max_linger_s")]
    pub max_linger_s: f32,
}

/// Energy accumulator configuration
#[derive(Debug, Deserialize, Clone)]
pub struct EnergyConfig {
    /// Seconds of gyro history considered for the rolling average
    #[serde(default = "default_history_window_s")]
    pub history_window_s: f32,

    /// Exponential smoothing factor alpha, in (0, 1]
    #[serde(default = "default_smoothing_factor")]
    pub smoothing_factor: f32,

    /// Fraction per second at which energy above the rolling average decays
    #[serde(default = "default_decay_rate")]
    pub decay_rate: f32,
}

/// Control loop timing configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SimulationConfig {
    /// Tick rate of the control loop (Hz)
    #[serde(default = "default_rate_hz")]
    pub rate_hz: u32,

    /// Total simulation duration (seconds)
    #[serde(default = "default_duration_s")]
    pub duration_s: f32,
}

/// Countdown haptic pulse configuration
#[derive(Debug, Deserialize, Clone)]
pub struct CountdownConfig {
    /// Starting high frequency for the "3" pulse (Hz)
    #[serde(default = "default_countdown_base_freq_hz")]
    pub base_freq_hz: f32,

    /// High frequency increase per countdown step (Hz)
    #[serde(default = "default_countdown_freq_step_hz")]
    pub freq_step_hz: f32,

    /// Starting intensity for the "3" pulse
    #[serde(default = "default_countdown_base_intensity")]
    pub base_intensity: f32,

    /// Intensity increase per countdown step
    #[serde(default = "default_countdown_intensity_step")]
    pub intensity_step: f32,

    /// Pulse duration for "3", "2", "1" (seconds)
    #[serde(default = "default_countdown_pulse_duration_s")]
    pub pulse_duration_s: f32,

    /// Pulse duration for "Start!" (seconds)
    #[serde(default = "default_countdown_start_pulse_duration_s")]
    pub start_pulse_duration_s: f32,
}

// Default value functions
fn default_gyro_threshold() -> f32 { 6000.0 }
fn default_max_gyro_magnitude() -> f32 { 25000.0 }

fn default_low_freq_hz() -> f32 { 300.0 }
fn default_high_freq_hz() -> f32 { 800.0 }
fn default_max_linger_s() -> f32 { 1.5 }

fn default_history_window_s() -> f32 { 10.0 }
fn default_smoothing_factor() -> f32 { 0.15 }
fn default_decay_rate() -> f32 { 0.6 }

fn default_rate_hz() -> u32 { 20 }
fn default_duration_s() -> f32 { 10.0 }

fn default_countdown_base_freq_hz() -> f32 { 90.0 }
fn default_countdown_freq_step_hz() -> f32 { 30.0 }
fn default_countdown_base_intensity() -> f32 { 0.3 }
fn default_countdown_intensity_step() -> f32 { 0.1 }
fn default_countdown_pulse_duration_s() -> f32 { 0.15 }
fn default_countdown_start_pulse_duration_s() -> f32 { 0.2 }

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            gyro_threshold: default_gyro_threshold(),
            max_gyro_magnitude: default_max_gyro_magnitude(),
        }
    }
}

impl Default for RumbleConfig {
    fn default() -> Self {
        Self {
            low_freq_hz: default_low_freq_hz(),
            high_freq_hz: default_high_freq_hz(),
            max_linger_s: default_max_linger_s(),
        }
    }
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            history_window_s: default_history_window_s(),
            smoothing_factor: default_smoothing_factor(),
            decay_rate: default_decay_rate(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rate_hz: default_rate_hz(),
            duration_s: default_duration_s(),
        }
    }
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            base_freq_hz: default_countdown_base_freq_hz(),
            freq_step_hz: default_countdown_freq_step_hz(),
            base_intensity: default_countdown_base_intensity(),
            intensity_step: default_countdown_intensity_step(),
            pulse_duration_s: default_countdown_pulse_duration_s(),
            start_pulse_duration_s: default_countdown_start_pulse_duration_s(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, TOML parsing fails, or
    /// validation fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use typhoon_rumble::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    pub fn validate(&self) -> Result<()> {
        if self.motion.gyro_threshold < 0.0 {
            return Err(crate::error::TyphoonError::Config(
                toml::de::Error::custom("gyro_threshold must not be negative")
            ));
        }

        if self.motion.max_gyro_magnitude <= self.motion.gyro_threshold {
            return Err(crate::error::TyphoonError::Config(
                toml::de::Error::custom("max_gyro_magnitude must be greater than gyro_threshold")
            ));
        }

        if self.rumble.low_freq_hz < LOW_FREQ_MIN_HZ || self.rumble.low_freq_hz > LOW_FREQ_MAX_HZ {
            return Err(crate::error::TyphoonError::Config(
                toml::de::Error::custom(format!(
                    "low_freq_hz must be between {} and {}",
                    LOW_FREQ_MIN_HZ, LOW_FREQ_MAX_HZ
                ))
            ));
        }

        if self.rumble.high_freq_hz < HIGH_FREQ_MIN_HZ || self.rumble.high_freq_hz > HIGH_FREQ_MAX_HZ {
            return Err(crate::error::TyphoonError::Config(
                toml::de::Error::custom(format!(
                    "high_freq_hz must be between {} and {}",
                    HIGH_FREQ_MIN_HZ, HIGH_FREQ_MAX_HZ
                ))
            ));
        }

        if self.rumble.max_linger_s <= 0.0 || self.rumble.max_linger_s > 30.0 {
            return Err(crate::error::TyphoonError::Config(
                toml::de::Error::custom("max_linger_s must be between 0 and 30 seconds")
            ));
        }

        if self.energy.history_window_s <= 0.0 {
            return Err(crate::error::TyphoonError::Config(
                toml::de::Error::custom("history_window_s must be greater than 0")
            ));
        }

        if self.energy.smoothing_factor <= 0.0 || self.energy.smoothing_factor > 1.0 {
            return Err(crate::error::TyphoonError::Config(
                toml::de::Error::custom("smoothing_factor must be in (0.0, 1.0]")
            ));
        }

        if self.energy.decay_rate < 0.0 {
            return Err(crate::error::TyphoonError::Config(
                toml::de::Error::custom("decay_rate must not be negative")
            ));
        }

        if self.simulation.rate_hz == 0 || self.simulation.rate_hz > 1000 {
            return Err(crate::error::TyphoonError::Config(
                toml::de::Error::custom("rate_hz must be between 1 and 1000")
            ));
        }

        if self.simulation.duration_s <= 0.0 {
            return Err(crate::error::TyphoonError::Config(
                toml::de::Error::custom("duration_s must be greater than 0")
            ));
        }

        if self.countdown.base_intensity < 0.0 || self.countdown.base_intensity > 1.0 {
            return Err(crate::error::TyphoonError::Config(
                toml::de::Error::custom("base_intensity must be between 0.0 and 1.0")
            ));
        }

        if self.countdown.pulse_duration_s <= 0.0 || self.countdown.start_pulse_duration_s <= 0.0 {
            return Err(crate::error::TyphoonError::Config(
                toml::de::Error::custom("countdown pulse durations must be greater than 0")
            ));
        }

        Ok(())
    }
}
