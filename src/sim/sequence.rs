//! # Pre-run Sequencing
//!
//! Start-button gating and the countdown-with-haptic-pulses sequence that
//! runs before the simulation loop.

use tokio::time::{sleep, Duration};
use tracing::{info, warn};

use crate::config::CountdownConfig;
use crate::device::{Button, MotionController};
use crate::rumble::{RumbleSpec, OFF_PACKET};

/// Button poll interval while waiting for the start press
const BUTTON_POLL_MS: u64 = 30;

/// Countdown labels for the "3", "2", "1" steps
const COUNTDOWN_STEPS: [&str; 3] = ["3", "2", "1"];

/// Wait until the given button registers a press (released-to-pressed edge)
///
/// Polls at ~30 ms. Returns `false` if the wait was cancelled with Ctrl+C.
/// Read faults are logged and retried; a flaky connection does not abort
/// the wait.
pub async fn wait_for_press<D: MotionController>(device: &mut D, button: Button) -> bool {
    info!("Waiting for {:?} press (Ctrl+C to cancel)", button);
    let mut previous = false;

    loop {
        tokio::select! {
            _ = sleep(Duration::from_millis(BUTTON_POLL_MS)) => {
                match device.read_button(button) {
                    Ok(pressed) => {
                        if pressed && !previous {
                            info!("{:?} pressed", button);
                            return true;
                        }
                        previous = pressed;
                    }
                    Err(e) => {
                        warn!("Error reading button state: {}", e);
                    }
                }
            }

            _ = tokio::signal::ctrl_c() => {
                info!("Button wait cancelled");
                return false;
            }
        }
    }
}

/// Run the 3-2-1-Start countdown with rising haptic pulses
///
/// Each step pulses the actuator at `base + i * step` frequency/intensity,
/// prints the label, and holds a roughly one-second cadence. Pulse transmit
/// faults are logged and the countdown continues.
pub async fn countdown<D: MotionController>(device: &mut D, config: &CountdownConfig) {
    println!("\nStarting simulation in...");
    sleep(Duration::from_millis(500)).await;

    for (index, label) in COUNTDOWN_STEPS.iter().enumerate() {
        let step = index as f32;
        pulse(
            device,
            config.base_freq_hz + step * config.freq_step_hz,
            config.base_intensity + step * config.intensity_step,
            config.pulse_duration_s,
        )
        .await;
        println!("{}", label);
        sleep(Duration::from_secs_f32(
            (1.0 - config.pulse_duration_s).max(0.0),
        ))
        .await;
    }

    let steps = COUNTDOWN_STEPS.len() as f32;
    pulse(
        device,
        config.base_freq_hz + steps * config.freq_step_hz,
        config.base_intensity + steps * config.intensity_step,
        config.start_pulse_duration_s,
    )
    .await;
    println!("Start!");
    sleep(Duration::from_secs_f32(
        (0.2 - config.start_pulse_duration_s).max(0.0),
    ))
    .await;
}

/// Send a single short rumble pulse, then stop the actuator
///
/// The low frequency tracks the high frequency at 60%, floored at the
/// hardware minimum.
async fn pulse<D: MotionController>(
    device: &mut D,
    high_freq_hz: f32,
    intensity: f32,
    duration_s: f32,
) {
    let low_freq_hz = (high_freq_hz * 0.6).max(41.0);
    let packet = RumbleSpec::new(low_freq_hz, high_freq_hz, intensity.clamp(0.0, 1.0)).encode();

    if let Err(e) = device.transmit_rumble(&packet) {
        warn!("Countdown pulse transmit failed: {}", e);
    }

    sleep(Duration::from_secs_f32(duration_s.max(0.01))).await;

    if let Err(e) = device.transmit_rumble(&OFF_PACKET) {
        warn!("Countdown pulse stop failed: {}", e);
    }
}
