//! # Motion Sampler
//!
//! Wraps raw sensor access and computes vector magnitudes.
//!
//! Sensor unavailability is expected during startup and brief disconnects;
//! it resolves to "no sample this tick" and is never fatal to the caller.

use tracing::{debug, warn};

use crate::device::MotionController;

/// One successful sensor read: raw axes plus Euclidean magnitudes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    /// Accelerometer axes (x, y, z), raw sensor units
    pub accel: [f32; 3],

    /// Gyroscope axes (x, y, z), raw sensor units
    pub gyro: [f32; 3],

    /// Euclidean magnitude of the acceleration vector (includes gravity)
    pub accel_mag: f32,

    /// Euclidean magnitude of the angular velocity vector
    pub gyro_mag: f32,
}

impl MotionSample {
    /// Build a sample from raw axes, computing both magnitudes
    pub fn from_axes(accel: [f32; 3], gyro: [f32; 3]) -> Self {
        Self {
            accel,
            gyro,
            accel_mag: magnitude(accel),
            gyro_mag: magnitude(gyro),
        }
    }
}

/// Euclidean norm of a 3-vector
fn magnitude(v: [f32; 3]) -> f32 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

/// Read one motion sample from the device
///
/// Returns `None` when the device is not ready yet (transient, retry after a
/// short pause) or when the read failed outright. The two cases are logged
/// distinctly but both degrade to "no sample"; the control loop never
/// terminates on this condition alone.
pub fn sample<D: MotionController>(device: &mut D) -> Option<MotionSample> {
    match device.read_motion() {
        Ok(Some(axes)) => Some(MotionSample::from_axes(axes.accel, axes.gyro)),
        Ok(None) => {
            debug!("Motion data not ready yet");
            None
        }
        Err(e) => {
            warn!("Sensor read failed: {}", e);
            None
        }
    }
}
