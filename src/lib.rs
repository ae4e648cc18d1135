//! # Typhoon Rumble Library
//!
//! Turn a Joy-Con into a motion-reactive typhoon simulator with haptic feedback.
//!
//! This library reads gyroscope telemetry from a right Joy-Con, converts it in
//! real time into rumble intensity (with a decaying "linger" tail), and
//! accumulates a smoothed energy level that is classified on a typhoon
//! category scale.

pub mod config;
pub mod error;
pub mod rumble;
pub mod motion;
pub mod energy;
pub mod device;
pub mod sim;
