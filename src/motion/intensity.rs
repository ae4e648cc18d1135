//! # Intensity Model
//!
//! Maps instantaneous gyroscope magnitude to a target rumble intensity.

/// Threshold/scale mapping from gyro magnitude to rumble intensity
///
/// Below `threshold` the intensity is 0; between `threshold` and
/// `max_magnitude` it interpolates linearly to 1.0; above, it clamps to 1.0.
#[derive(Debug, Clone, Copy)]
pub struct IntensityModel {
    /// Minimum gyro magnitude required to start rumbling
    pub threshold: f32,

    /// Gyro magnitude that corresponds to full intensity
    pub max_magnitude: f32,
}

impl IntensityModel {
    /// Create a new intensity model
    pub fn new(threshold: f32, max_magnitude: f32) -> Self {
        Self {
            threshold,
            max_magnitude,
        }
    }

    /// Target rumble intensity (0.0 to 1.0) for the given gyro magnitude
    ///
    /// The degenerate configuration `max_magnitude <= threshold` is handled
    /// explicitly: any magnitude at or above the threshold maps to 1.0. This
    /// avoids a division by zero in the interpolation.
    pub fn target_intensity(&self, gyro_magnitude: f32) -> f32 {
        if gyro_magnitude < self.threshold {
            return 0.0;
        }

        let active_range = self.max_magnitude - self.threshold;
        if active_range <= 0.0 {
            return 1.0;
        }

        ((gyro_magnitude - self.threshold) / active_range).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> IntensityModel {
        IntensityModel::new(6000.0, 25000.0)
    }

    #[test]
    fn test_below_threshold_is_zero() {
        assert_eq!(model().target_intensity(0.0), 0.0);
        assert_eq!(model().target_intensity(5999.9), 0.0);
    }

    #[test]
    fn test_at_threshold_is_zero() {
        assert_eq!(model().target_intensity(6000.0), 0.0);
    }

    #[test]
    fn test_at_max_is_full() {
        assert_eq!(model().target_intensity(25000.0), 1.0);
    }

    #[test]
    fn test_above_max_clamps_to_full() {
        assert_eq!(model().target_intensity(100_000.0), 1.0);
    }

    #[test]
    fn test_midpoint_interpolates_linearly() {
        // Midpoint of [6000, 25000] is 15500
        let intensity = model().target_intensity(15500.0);
        assert!((intensity - 0.5).abs() < 1e-6, "expected 0.5, got {}", intensity);
    }

    #[test]
    fn test_monotonically_non_decreasing() {
        let m = model();
        let mut last = 0.0f32;
        for i in 0..=300 {
            let mag = i as f32 * 100.0;
            let intensity = m.target_intensity(mag);
            assert!(
                intensity >= last,
                "intensity decreased at magnitude {}: {} < {}",
                mag,
                intensity,
                last
            );
            assert!((0.0..=1.0).contains(&intensity));
            last = intensity;
        }
    }

    #[test]
    fn test_degenerate_range_steps_at_threshold() {
        // max <= threshold must not divide by zero
        let m = IntensityModel::new(6000.0, 6000.0);
        assert_eq!(m.target_intensity(5999.0), 0.0);
        assert_eq!(m.target_intensity(6000.0), 1.0);
        assert_eq!(m.target_intensity(7000.0), 1.0);

        let inverted = IntensityModel::new(6000.0, 5000.0);
        assert_eq!(inverted.target_intensity(6000.0), 1.0);
        assert_eq!(inverted.target_intensity(4000.0), 0.0);
    }
}
