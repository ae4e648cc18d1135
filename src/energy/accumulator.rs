//! # Energy Accumulator
//!
//! Smoothed, decay-limited rolling estimate of recent motion intensity,
//! distinct from the instantaneous rumble intensity. The level chases the
//! current gyro magnitude with exponential smoothing, and when it sits above
//! the window average it bleeds off towards that average so energy does not
//! stay high after motion stops.

/// Stateful energy level with smoothing and overshoot decay
#[derive(Debug, Clone, Copy)]
pub struct EnergyAccumulator {
    /// Exponential smoothing factor alpha, in (0, 1]
    smoothing_factor: f32,

    /// Fraction per second by which overshoot above the average decays
    decay_rate: f32,

    /// Upper clamp for the energy level (strict, no overshoot allowance)
    max_magnitude: f32,

    level: f32,
}

impl EnergyAccumulator {
    /// Create an accumulator starting at zero energy
    pub fn new(smoothing_factor: f32, decay_rate: f32, max_magnitude: f32) -> Self {
        Self {
            smoothing_factor,
            decay_rate,
            max_magnitude,
            level: 0.0,
        }
    }

    /// Current energy level, in `[0, max_magnitude]`
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Advance the energy level by one tick and return the new value
    ///
    /// 1. Exponential smoothing towards the current gyro magnitude.
    /// 2. If the result overshoots the window average, decay towards it by
    ///    `decay_rate * delta_time`, floored at the average so a single step
    ///    cannot oscillate past the target.
    /// 3. Strict clamp to `[0, max_magnitude]`.
    pub fn update(&mut self, current_gyro_mag: f32, window_average: f32, delta_time: f32) -> f32 {
        let mut next =
            self.smoothing_factor * current_gyro_mag + (1.0 - self.smoothing_factor) * self.level;

        if next > window_average {
            let decay_amount = (next - window_average) * self.decay_rate * delta_time;
            next = (next - decay_amount).max(window_average);
        }

        self.level = next.clamp(0.0, self.max_magnitude);
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: f32 = 25000.0;

    fn accumulator() -> EnergyAccumulator {
        EnergyAccumulator::new(0.15, 0.6, MAX)
    }

    #[test]
    fn test_starts_at_zero() {
        assert_eq!(accumulator().level(), 0.0);
    }

    #[test]
    fn test_smoothing_moves_fractionally_towards_target() {
        let mut acc = accumulator();
        // From 0 towards 10000 with alpha 0.15: one step lands at 1500.
        // Window average above the result, so no decay applies.
        let level = acc.update(10000.0, 10000.0, 0.05);
        assert!((level - 1500.0).abs() < 1e-3, "expected 1500, got {}", level);
    }

    #[test]
    fn test_steady_state_is_idempotent() {
        // current == average == level leaves the level unchanged
        let mut acc = accumulator();
        for _ in 0..100 {
            acc.update(8000.0, 8000.0, 0.05);
        }
        let settled = acc.level();
        let next = acc.update(settled, settled, 0.05);
        assert!(
            (next - settled).abs() < 1e-3,
            "steady state drifted from {} to {}",
            settled,
            next
        );
    }

    #[test]
    fn test_overshoot_decays_towards_average() {
        let mut acc = accumulator();
        // Drive the level up with strong motion against a low average
        for _ in 0..50 {
            acc.update(20000.0, 1000.0, 0.05);
        }
        let high = acc.level();
        assert!(high > 1000.0);

        // Motion stops: the level must fall tick over tick towards the average
        let mut last = high;
        for _ in 0..50 {
            let level = acc.update(0.0, 1000.0, 0.05);
            assert!(level <= last, "energy rose after motion stopped");
            last = level;
        }
        assert!(last < high);
    }

    #[test]
    fn test_decay_does_not_undershoot_average_in_one_step() {
        let mut acc = accumulator();
        acc.level = 20000.0;
        // Huge dt makes the raw decay amount overshoot; the floor catches it
        let level = acc.update(20000.0, 5000.0, 100.0);
        assert_eq!(level, 5000.0);
    }

    #[test]
    fn test_clamped_to_max_magnitude() {
        let mut acc = accumulator();
        acc.level = MAX;
        // Average above max would otherwise let smoothing push past the ceiling
        let level = acc.update(MAX * 2.0, MAX * 2.0, 0.05);
        assert_eq!(level, MAX);
    }

    #[test]
    fn test_never_negative() {
        let mut acc = accumulator();
        let level = acc.update(-5000.0, 0.0, 0.05);
        assert!(level >= 0.0);
    }

    #[test]
    fn test_monotonic_rise_under_constant_max_motion() {
        // Constant full-strength motion: energy approaches the max from below
        let mut acc = accumulator();
        let mut last = 0.0;
        for _ in 0..200 {
            let level = acc.update(MAX, MAX, 0.05);
            assert!(level >= last, "energy must rise monotonically");
            assert!(level <= MAX);
            last = level;
        }
        assert!(last > MAX * 0.99, "energy should approach max, got {}", last);
    }
}
