//! # Typhoon Rumble
//!
//! Turn a Joy-Con into a motion-reactive typhoon simulator with haptic
//! feedback.
//!
//! Shake the right Joy-Con: rotational motion drives the rumble intensity in
//! real time (with a smooth fade-out after each burst), while a windowed
//! energy level climbs a typhoon category scale. After the configured
//! duration the run is scored from the average motion over the window.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

mod config;
mod error;
mod rumble;
mod motion;
mod energy;
mod device;
mod sim;

use config::Config;
use device::{Button, JoyCon, MotionController};
use sim::SimulationLoop;

/// Configuration file tried when present; defaults apply otherwise
const CONFIG_PATH: &str = "config/default.toml";

/// Main entry point for the typhoon simulator
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Set up logging with tracing subscriber
///    - Load configuration (falling back to built-in defaults)
///    - Discover and open the right Joy-Con; enable vibration
///
/// 2. **Pre-run sequencing**
///    - Wait for the A button to start (Ctrl+C cancels)
///    - Countdown with rising haptic pulses
///
/// 3. **Simulation loop**
///    - Fixed-rate gyro-to-rumble pipeline with live status line
///    - Ctrl+C stops early through the same finalization path
///
/// 4. **Finalization**
///    - Rumble off, final classification printed
///
/// # Errors
///
/// Returns error if no right Joy-Con is found or the configuration file is
/// invalid. Everything after startup degrades gracefully instead of failing.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Typhoon Rumble v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = if Path::new(CONFIG_PATH).exists() {
        Config::load(CONFIG_PATH)?
    } else {
        info!("No {} found, using built-in defaults", CONFIG_PATH);
        Config::default()
    };

    // Device-not-found is the one fatal startup error
    let mut joycon = JoyCon::open()?;
    info!("Joy-Con opened at: {}", joycon.device_path());

    if let Err(e) = joycon.set_vibration_enabled(true) {
        // Rumble may still work; individual transmits carry their own fallback
        warn!("Failed to enable vibration during init: {}", e);
    }

    println!("Press the A button on the right Joy-Con to start...");
    if !sim::wait_for_press(&mut joycon, Button::A).await {
        println!("Start signal not received. Exiting.");
        return Ok(());
    }

    sim::countdown(&mut joycon, &config.countdown).await;

    println!(
        "\n--- Typhoon simulation: {:.1}s, shake the Joy-Con! (Ctrl+C to stop) ---",
        config.simulation.duration_s
    );

    let mut simulation = SimulationLoop::new(joycon, &config);
    let summary = simulation
        .run(|snapshot| {
            print!("\r{}        ", snapshot);
            let _ = std::io::stdout().flush();
        })
        .await;

    // Clear the status line before the final report
    println!();
    println!("\n--- Final Results ---");
    println!("{}", summary);

    Ok(())
}
