//! # Linger State Machine
//!
//! Decay/trigger logic producing a secondary, lingering rumble intensity that
//! fades out after a motion burst, so rumble does not cut off abruptly. A new
//! burst at least as strong as the current fade immediately overrides it,
//! preventing a strong motion from being masked by an old, weaker tail.

/// State of the rumble linger effect
///
/// An `Active` state can only be produced by [`LingerState::trigger`] with a
/// positive intensity, so `Active` always has `time_remaining > 0` and
/// `initial_duration > 0` by construction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LingerState {
    /// No linger in progress
    #[default]
    Inactive,

    /// A burst is fading out
    Active {
        /// The rumble intensity that triggered this linger
        peak_intensity: f32,

        /// Total duration calculated for this linger (scales with peak)
        initial_duration: f32,

        /// Seconds left before the linger ends
        time_remaining: f32,
    },
}

impl LingerState {
    /// Start a new linger for a motion burst of the given intensity
    ///
    /// The duration scales with the triggering burst's strength:
    /// `intensity * max_linger_s`. A non-positive intensity or duration
    /// yields `Inactive` rather than a degenerate active state.
    pub fn trigger(peak_intensity: f32, max_linger_s: f32) -> Self {
        let initial_duration = peak_intensity * max_linger_s;
        if peak_intensity <= 0.0 || initial_duration <= 0.0 {
            return Self::Inactive;
        }
        Self::Active {
            peak_intensity,
            initial_duration,
            time_remaining: initial_duration,
        }
    }

    /// Whether a linger is currently in progress
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    /// Current intensity contributed by the linger alone
    ///
    /// Linear decay from the peak over the initial duration, floored at 0.
    pub fn decaying_intensity(&self) -> f32 {
        match *self {
            Self::Inactive => 0.0,
            Self::Active {
                peak_intensity,
                initial_duration,
                time_remaining,
            } => {
                if initial_duration <= 0.0 {
                    return 0.0;
                }
                (peak_intensity * (time_remaining / initial_duration)).max(0.0)
            }
        }
    }

    /// Advance the state machine by one tick
    ///
    /// # Arguments
    ///
    /// * `target_intensity` - Intensity demanded by the current motion
    /// * `delta_time` - Seconds elapsed since the previous tick
    /// * `max_linger_s` - Maximum linger duration (at full intensity)
    ///
    /// # Transition rules
    ///
    /// 1. **Trigger/reset**: current motion is non-zero and at least as strong
    ///    as what the existing linger would read right now.
    /// 2. **Decay**: otherwise, an active linger loses `delta_time`; reaching
    ///    zero resets to `Inactive`.
    /// 3. **No-op**: inactive with no motion stays inactive.
    pub fn step(self, target_intensity: f32, delta_time: f32, max_linger_s: f32) -> Self {
        let potential = self.decaying_intensity();

        if target_intensity > 0.0 && target_intensity >= potential {
            return Self::trigger(target_intensity, max_linger_s);
        }

        match self {
            Self::Active {
                peak_intensity,
                initial_duration,
                time_remaining,
            } => {
                let time_remaining = time_remaining - delta_time;
                if time_remaining <= 0.0 {
                    Self::Inactive
                } else {
                    Self::Active {
                        peak_intensity,
                        initial_duration,
                        time_remaining,
                    }
                }
            }
            Self::Inactive => Self::Inactive,
        }
    }
}

/// Final rumble intensity sent to hardware each tick
///
/// The higher of the intensity demanded by current motion and the decaying
/// linger tail, so the rumble stays responsive to new motion during a fade.
pub fn final_intensity(target_intensity: f32, decaying_intensity: f32) -> f32 {
    target_intensity.max(decaying_intensity)
}
