//! # Control Loop
//!
//! Fixed-rate orchestrator: samples motion, drives the rumble pipeline and
//! the energy accumulator each tick, and converges every exit path on a
//! single finalization step that silences the actuator.

use tokio::time::{interval, Duration, Instant};
use tracing::{info, warn};

use crate::config::Config;
use crate::device::MotionController;
use crate::energy::{energy_bar, ClassificationTable, EnergyAccumulator, GyroHistory};
use crate::motion::{final_intensity, sample, IntensityModel, LingerState};
use crate::rumble::{RumbleSpec, OFF_PACKET};
use crate::sim::status::{SimulationSummary, StatusSnapshot};

/// Delta-time floor in seconds, avoids zero-division on pathological clocks
const MIN_DELTA_S: f32 = 0.001;

/// Width of the console energy bar
const ENERGY_BAR_WIDTH: usize = 30;

/// The typhoon simulation control loop
///
/// Owns the device handle and all mutable loop state exclusively; nothing
/// else reads or writes them concurrently, so no locking is involved.
pub struct SimulationLoop<D: MotionController> {
    device: D,
    intensity_model: IntensityModel,
    linger: LingerState,
    energy: EnergyAccumulator,
    history: GyroHistory,
    table: ClassificationTable,
    low_freq_hz: f32,
    high_freq_hz: f32,
    max_linger_s: f32,
    max_gyro_magnitude: f32,
    rate_hz: u32,
    duration_s: f32,
}

impl<D: MotionController> SimulationLoop<D> {
    /// Build a simulation loop from configuration, taking ownership of the
    /// device handle
    pub fn new(device: D, config: &Config) -> Self {
        Self {
            device,
            intensity_model: IntensityModel::new(
                config.motion.gyro_threshold,
                config.motion.max_gyro_magnitude,
            ),
            linger: LingerState::Inactive,
            energy: EnergyAccumulator::new(
                config.energy.smoothing_factor,
                config.energy.decay_rate,
                config.motion.max_gyro_magnitude,
            ),
            history: GyroHistory::new(config.energy.history_window_s),
            table: ClassificationTable::typhoon_scale(config.motion.max_gyro_magnitude),
            low_freq_hz: config.rumble.low_freq_hz,
            high_freq_hz: config.rumble.high_freq_hz,
            max_linger_s: config.rumble.max_linger_s,
            max_gyro_magnitude: config.motion.max_gyro_magnitude,
            rate_hz: config.simulation.rate_hz,
            duration_s: config.simulation.duration_s,
        }
    }

    /// Run the simulation for the configured duration
    ///
    /// Ticks at the configured rate. Each tick: sample motion (skipping the
    /// tick when the sensor is unavailable), map gyro magnitude to target
    /// intensity, step the linger state, transmit the encoded rumble packet,
    /// update history/energy/classification, and hand a [`StatusSnapshot`]
    /// to `on_tick`.
    ///
    /// The duration deadline is compared against a monotonic clock. Both exit
    /// paths (deadline reached, Ctrl+C) go through the same finalization:
    /// transmit the off packet and summarize the accumulated average. The
    /// actuator is never left rumbling.
    pub async fn run<F>(&mut self, mut on_tick: F) -> SimulationSummary
    where
        F: FnMut(&StatusSnapshot),
    {
        let period = Duration::from_millis((1000 / self.rate_hz.max(1)).max(1) as u64);
        let mut ticker = interval(period);

        let start = Instant::now();
        let deadline = start + Duration::from_secs_f32(self.duration_s);
        let mut last_tick = start;
        let mut ticks: u64 = 0;

        info!(
            "Starting typhoon simulation: {:.1}s at {} Hz (max gyro magnitude {})",
            self.duration_s, self.rate_hz, self.max_gyro_magnitude
        );

        loop {
            tokio::select! {
                tick_time = ticker.tick() => {
                    let now: Instant = tick_time;
                    if now >= deadline {
                        info!("Simulation time ended");
                        break;
                    }

                    let delta_time = (now - last_tick).as_secs_f32().max(MIN_DELTA_S);
                    last_tick = now;

                    // Sensor unavailable: retry next tick without advancing
                    // any other state
                    let Some(motion) = sample(&mut self.device) else {
                        continue;
                    };
                    let gyro_mag = motion.gyro_mag;

                    // Rumble pipeline
                    let target = self.intensity_model.target_intensity(gyro_mag);
                    self.linger = self.linger.step(target, delta_time, self.max_linger_s);
                    let intensity = final_intensity(target, self.linger.decaying_intensity());
                    let packet =
                        RumbleSpec::new(self.low_freq_hz, self.high_freq_hz, intensity).encode();
                    if let Err(e) = self.device.transmit_rumble(&packet) {
                        // Best-effort haptics: a missed rumble frame is not fatal
                        warn!("Failed to transmit rumble packet: {}", e);
                    }

                    // Energy accumulation
                    let elapsed = (now - start).as_secs_f32();
                    self.history.push(elapsed, gyro_mag);
                    let window_average = self.history.average();
                    let energy = self.energy.update(gyro_mag, window_average, delta_time);

                    ticks += 1;
                    on_tick(&StatusSnapshot {
                        time_remaining_s: (self.duration_s - elapsed).max(0.0),
                        gyro_mag,
                        window_average,
                        energy,
                        energy_bar: energy_bar(energy, self.max_gyro_magnitude, ENERGY_BAR_WIDTH),
                        intensity,
                        classification: self.table.classify(energy),
                    });
                }

                _ = tokio::signal::ctrl_c() => {
                    info!("Received Ctrl+C, stopping simulation...");
                    break;
                }
            }
        }

        self.finalize(ticks)
    }

    /// Single finalization step shared by all exit paths
    ///
    /// Stops actuation and derives the final classification from the
    /// accumulated window average.
    fn finalize(&mut self, ticks: u64) -> SimulationSummary {
        if let Err(e) = self.device.transmit_rumble(&OFF_PACKET) {
            warn!("Failed to stop rumble on exit: {}", e);
        }

        let average_gyro = self.history.average();
        let summary = SimulationSummary {
            average_gyro,
            classification: self.table.classify(average_gyro),
            ticks,
        };
        info!("Simulation finished after {} ticks", ticks);
        summary
    }

    /// Give the device handle back, e.g. for post-run cleanup
    pub fn into_device(self) -> D {
        self.device
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::mocks::MockController;

    fn test_config(duration_s: f32) -> Config {
        let mut config = Config::default();
        config.simulation.duration_s = duration_s;
        config
    }

    /// Gyro axes with magnitude exactly 25000 (= default max)
    const MAX_GYRO: [f32; 3] = [0.0, 15000.0, 20000.0];

    #[tokio::test(start_paused = true)]
    async fn test_constant_max_motion_saturates_intensity_and_energy() {
        let mut device = MockController::new();
        device.set_constant_motion([0.0, 0.0, 1000.0], MAX_GYRO);

        let mut sim = SimulationLoop::new(device.clone(), &test_config(2.0));
        let mut snapshots = Vec::new();
        let summary = sim.run(|s| snapshots.push(s.clone())).await;

        assert!(!snapshots.is_empty());
        // Full-strength motion every tick: intensity saturates at 1.0
        for snapshot in &snapshots {
            assert_eq!(snapshot.intensity, 1.0);
            assert_eq!(snapshot.gyro_mag, 25000.0);
        }

        // Energy rises monotonically towards the maximum
        let mut last = 0.0;
        for snapshot in &snapshots {
            assert!(snapshot.energy >= last, "energy must not decrease");
            last = snapshot.energy;
        }
        assert!(last > 0.0);

        // Summary classifies from the accumulated average
        assert!(summary.average_gyro > 24999.0);
        assert_eq!(summary.classification.label, "Super Typhoon");
        assert_eq!(summary.ticks, snapshots.len() as u64);
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_then_stillness_decays_linearly() {
        let mut device = MockController::new();
        // One full-strength burst, then stillness
        device.push_motion([0.0, 0.0, 0.0], MAX_GYRO);
        device.set_constant_motion([0.0, 0.0, 0.0], [0.0, 0.0, 0.0]);

        // 2.5s covers the full 1.5s linger window plus margin
        let mut sim = SimulationLoop::new(device.clone(), &test_config(2.5));
        let mut snapshots = Vec::new();
        sim.run(|s| snapshots.push(s.clone())).await;

        assert_eq!(snapshots[0].intensity, 1.0, "burst tick at full intensity");

        // During the linger window the intensity decays roughly linearly:
        // at 20 Hz, tick k sits at t = k * 0.05s, expecting 1 - t/1.5
        for (k, snapshot) in snapshots.iter().enumerate().skip(1) {
            let t = k as f32 * 0.05;
            if t < 1.5 {
                let expected = 1.0 - t / 1.5;
                assert!(
                    (snapshot.intensity - expected).abs() < 0.05,
                    "tick {}: expected ~{:.3}, got {:.3}",
                    k,
                    expected,
                    snapshot.intensity
                );
            } else {
                // Float accumulation can leave a sub-millisecond tail right
                // at the window edge; beyond it the linger must be silent
                assert!(
                    snapshot.intensity < 0.01,
                    "tick {}: linger should be over, got {}",
                    k,
                    snapshot.intensity
                );
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_final_packet_is_off() {
        let mut device = MockController::new();
        device.set_constant_motion([0.0, 0.0, 0.0], MAX_GYRO);

        let mut sim = SimulationLoop::new(device.clone(), &test_config(1.0));
        sim.run(|_| {}).await;

        let packets = device.sent_packets();
        assert!(!packets.is_empty());
        assert_eq!(
            *packets.last().unwrap(),
            OFF_PACKET,
            "actuator must be silenced on exit"
        );
        // The in-loop packets carried actual rumble
        assert_ne!(packets[0], OFF_PACKET);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unavailable_sensor_never_kills_the_loop() {
        // Mock with no motion queued and no constant: every read is not-ready
        let device = MockController::new();

        let mut sim = SimulationLoop::new(device.clone(), &test_config(1.0));
        let mut snapshots = 0;
        let summary = sim.run(|_| snapshots += 1).await;

        assert_eq!(snapshots, 0, "no samples means no snapshots");
        assert_eq!(summary.ticks, 0);
        assert_eq!(summary.classification.level, 0, "empty history is calm");
        // Finalization still silences the actuator
        assert_eq!(device.sent_packets(), vec![OFF_PACKET]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transmit_failures_degrade_gracefully() {
        let mut device = MockController::new();
        device.set_constant_motion([0.0, 0.0, 0.0], MAX_GYRO);
        device.fail_transmits("simulated write fault");

        let mut sim = SimulationLoop::new(device.clone(), &test_config(1.0));
        let mut snapshots = 0;
        let summary = sim.run(|_| snapshots += 1).await;

        // The loop keeps ticking and accumulating despite every send failing
        assert!(snapshots > 0);
        assert!(summary.average_gyro > 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_still_motion_stays_calm() {
        let mut device = MockController::new();
        device.set_constant_motion([0.0, 0.0, 1000.0], [100.0, 100.0, 100.0]);

        let mut sim = SimulationLoop::new(device.clone(), &test_config(1.0));
        let mut snapshots = Vec::new();
        let summary = sim.run(|s| snapshots.push(s.clone())).await;

        // Magnitude ~173 is far below the 6000 threshold: no rumble at all
        for snapshot in &snapshots {
            assert_eq!(snapshot.intensity, 0.0);
        }
        // All in-loop packets are the off packet (amplitude 0 encodes to off)
        for packet in device.sent_packets() {
            assert_eq!(packet, OFF_PACKET);
        }
        assert!(summary.classification.level >= 1, "non-zero average classifies above calm");
    }
}
