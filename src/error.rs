//! # Error Types
//!
//! Custom error types for Typhoon Rumble using `thiserror`.

use thiserror::Error;

/// Main error type for Typhoon Rumble
#[derive(Debug, Error)]
pub enum TyphoonError {
    /// No supported controller found on the system
    #[error("No Joy-Con found (is it paired and connected via Bluetooth?)")]
    DeviceNotFound,

    /// HID device communication errors
    #[error("Device error: {0}")]
    Device(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Typhoon Rumble
pub type Result<T> = std::result::Result<T, TyphoonError>;
