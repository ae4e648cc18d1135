//! # Joy-Con HID Driver
//!
//! Right Joy-Con discovery and transport over hidapi.
//!
//! ## Report layout
//!
//! Output reports:
//! - `0x10`: rumble only (counter + 8-byte rumble data)
//! - `0x01`: rumble + subcommand (counter + 8-byte rumble data + subcommand id + args)
//!
//! Input report `0x30` (standard full mode, 60 Hz):
//! - bytes 3-5: button bitmask (byte 3 = right buttons, byte 4 = shared)
//! - bytes 13..25: first IMU frame, six little-endian i16 axes
//!   (accel x/y/z, gyro x/y/z)

use hidapi::{HidApi, HidDevice};
use tracing::{debug, info};

use super::{Button, MotionAxes, MotionController};
use crate::error::{Result, TyphoonError};
use crate::rumble::{OFF_PACKET, RUMBLE_PACKET_LEN};

/// Nintendo vendor ID
pub const NINTENDO_VENDOR_ID: u16 = 0x057e;

/// Right Joy-Con product ID
pub const JOYCON_R_PRODUCT_ID: u16 = 0x2007;

/// Output report: rumble data only
const REPORT_RUMBLE: u8 = 0x10;

/// Output report: rumble data + subcommand
const REPORT_SUBCOMMAND: u8 = 0x01;

/// Input report: standard full mode (buttons + IMU)
const REPORT_STANDARD_FULL: u8 = 0x30;

/// Subcommand: set input report mode
const SUBCMD_INPUT_REPORT_MODE: u8 = 0x03;

/// Subcommand: enable/disable the IMU
const SUBCMD_ENABLE_IMU: u8 = 0x40;

/// Subcommand: enable/disable vibration
const SUBCMD_ENABLE_VIBRATION: u8 = 0x48;

/// Input report buffer size (standard full reports are 49 bytes)
const INPUT_REPORT_LEN: usize = 49;

/// Right Joy-Con handle
///
/// Owns the HID device exclusively. Motion and button reads share one cached
/// input report: each read drains pending reports non-blockingly and parses
/// the newest standard-full report seen.
pub struct JoyCon {
    _api: HidApi,
    device: HidDevice,
    device_path: String,
    packet_counter: u8,
    last_report: Option<[u8; INPUT_REPORT_LEN]>,
}

impl std::fmt::Debug for JoyCon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JoyCon")
            .field("device_path", &self.device_path)
            .finish_non_exhaustive()
    }
}

impl JoyCon {
    /// Detect and open the first paired right Joy-Con
    ///
    /// Scans the HID device list for Nintendo vendor / right Joy-Con product
    /// IDs, opens the device non-blocking, and switches it to standard full
    /// input report mode with the IMU enabled.
    ///
    /// # Errors
    ///
    /// - `DeviceNotFound`: no right Joy-Con on the system
    /// - `Device`: the HID open or setup writes failed
    pub fn open() -> Result<Self> {
        let api = HidApi::new()
            .map_err(|e| TyphoonError::Device(format!("Failed to init hidapi: {}", e)))?;

        let mut found = None;
        for dev in api.device_list() {
            debug!(
                "Found HID device: vendor 0x{:04x}, product 0x{:04x}",
                dev.vendor_id(),
                dev.product_id()
            );
            if dev.vendor_id() == NINTENDO_VENDOR_ID && dev.product_id() == JOYCON_R_PRODUCT_ID {
                found = Some(dev.path().to_owned());
                break;
            }
        }

        let path = found.ok_or(TyphoonError::DeviceNotFound)?;
        let device = api
            .open_path(&path)
            .map_err(|e| TyphoonError::Device(format!("Failed to open Joy-Con: {}", e)))?;
        device
            .set_blocking_mode(false)
            .map_err(|e| TyphoonError::Device(format!("Failed to set non-blocking mode: {}", e)))?;

        let device_path = path.to_string_lossy().into_owned();
        info!("Found right Joy-Con at {}", device_path);

        let mut joycon = Self {
            _api: api,
            device,
            device_path,
            packet_counter: 0,
            last_report: None,
        };

        // Standard full reports at 60 Hz, IMU streaming on
        joycon.send_subcommand(SUBCMD_INPUT_REPORT_MODE, &[REPORT_STANDARD_FULL])?;
        joycon.send_subcommand(SUBCMD_ENABLE_IMU, &[0x01])?;

        Ok(joycon)
    }

    /// Get the HID path of the opened device
    pub fn device_path(&self) -> &str {
        &self.device_path
    }

    /// Rolling 4-bit packet counter required by the firmware
    fn next_counter(&mut self) -> u8 {
        let counter = self.packet_counter;
        self.packet_counter = (self.packet_counter + 1) & 0x0f;
        counter
    }

    /// Send a subcommand with neutral rumble data
    fn send_subcommand(&mut self, subcommand: u8, args: &[u8]) -> Result<()> {
        let mut report = Vec::with_capacity(11 + args.len());
        report.push(REPORT_SUBCOMMAND);
        report.push(self.next_counter());
        report.extend_from_slice(&OFF_PACKET);
        report.push(subcommand);
        report.extend_from_slice(args);

        self.device.write(&report).map_err(|e| {
            TyphoonError::Device(format!("Subcommand 0x{:02x} failed: {}", subcommand, e))
        })?;
        Ok(())
    }

    /// Drain pending input reports, caching the newest standard-full one
    fn poll(&mut self) -> Result<()> {
        let mut buf = [0u8; INPUT_REPORT_LEN];
        loop {
            let n = self
                .device
                .read_timeout(&mut buf, 0)
                .map_err(|e| TyphoonError::Device(format!("HID read failed: {}", e)))?;
            if n == 0 {
                return Ok(());
            }
            if buf[0] == REPORT_STANDARD_FULL {
                self.last_report = Some(buf);
            }
        }
    }

    /// Little-endian i16 at the given report offset
    fn axis(report: &[u8; INPUT_REPORT_LEN], offset: usize) -> f32 {
        i16::from_le_bytes([report[offset], report[offset + 1]]) as f32
    }
}

impl MotionController for JoyCon {
    fn read_motion(&mut self) -> Result<Option<MotionAxes>> {
        self.poll()?;

        let report = match &self.last_report {
            Some(report) => report,
            // No standard-full report received yet: not ready
            None => return Ok(None),
        };

        Ok(Some(MotionAxes {
            accel: [
                Self::axis(report, 13),
                Self::axis(report, 15),
                Self::axis(report, 17),
            ],
            gyro: [
                Self::axis(report, 19),
                Self::axis(report, 21),
                Self::axis(report, 23),
            ],
        }))
    }

    fn read_button(&mut self, button: Button) -> Result<bool> {
        self.poll()?;

        let report = match &self.last_report {
            Some(report) => report,
            None => return Ok(false),
        };

        let (byte, mask) = match button {
            Button::Y => (3, 0x01),
            Button::X => (3, 0x02),
            Button::B => (3, 0x04),
            Button::A => (3, 0x08),
            Button::Sr => (3, 0x10),
            Button::Sl => (3, 0x20),
            Button::R => (3, 0x40),
            Button::Zr => (3, 0x80),
            Button::Plus => (4, 0x02),
            Button::RStick => (4, 0x04),
            Button::Home => (4, 0x10),
        };
        Ok(report[byte] & mask != 0)
    }

    fn transmit_rumble(&mut self, packet: &[u8; RUMBLE_PACKET_LEN]) -> Result<()> {
        let mut report = [0u8; 2 + RUMBLE_PACKET_LEN];
        report[0] = REPORT_RUMBLE;
        report[1] = self.next_counter();
        report[2..].copy_from_slice(packet);

        self.device
            .write(&report)
            .map_err(|e| TyphoonError::Device(format!("Rumble transmit failed: {}", e)))?;
        Ok(())
    }

    fn set_vibration_enabled(&mut self, enabled: bool) -> Result<()> {
        self.send_subcommand(SUBCMD_ENABLE_VIBRATION, &[if enabled { 0x01 } else { 0x00 }])
    }
}
