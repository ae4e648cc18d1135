//! # Device Module
//!
//! Controller-access boundary.
//!
//! This module handles:
//! - The [`MotionController`] capability trait consumed by the control loop
//! - Joy-Con discovery and HID transport (`joycon` submodule)
//! - A shared-state mock for tests

pub mod joycon;

use crate::error::Result;
use crate::rumble::RUMBLE_PACKET_LEN;

pub use joycon::JoyCon;

/// Raw 3-axis motion readings from one sensor sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionAxes {
    /// Accelerometer (x, y, z), raw sensor units
    pub accel: [f32; 3],

    /// Gyroscope (x, y, z), raw sensor units
    pub gyro: [f32; 3],
}

/// Buttons on the right Joy-Con
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    A,
    B,
    X,
    Y,
    /// Shoulder button
    R,
    /// Trigger button
    Zr,
    Plus,
    Home,
    /// Press down on the right stick
    RStick,
    /// Side button (when detached)
    Sl,
    /// Side button (when detached)
    Sr,
}

/// Capability interface over a motion-sensing, rumble-capable controller
///
/// The control loop owns the implementing handle exclusively; no locking is
/// required around it.
pub trait MotionController: Send {
    /// Read the most recent motion sample
    ///
    /// Returns `Ok(None)` when the device is not ready yet (transient);
    /// `Err` for read faults. Both are recoverable for the caller.
    fn read_motion(&mut self) -> Result<Option<MotionAxes>>;

    /// Read the current pressed state of a button
    fn read_button(&mut self, button: Button) -> Result<bool>;

    /// Transmit an 8-byte rumble packet to the actuator
    fn transmit_rumble(&mut self, packet: &[u8; RUMBLE_PACKET_LEN]) -> Result<()>;

    /// Enable or disable the vibration capability
    fn set_vibration_enabled(&mut self, enabled: bool) -> Result<()>;
}
