//! # Rumble Packet Encoder
//!
//! Encodes rumble descriptions into Joy-Con HD rumble actuator packets.
//!
//! The device firmware expects frequencies and amplitude as specific
//! log-domain integers. The formulas here are a fixed hardware contract;
//! every constant is load-bearing.

/// Length of a complete rumble packet in bytes
pub const RUMBLE_PACKET_LEN: usize = 8;

/// The fixed "off" packet: neutral frequencies, zero amplitude
pub const OFF_PACKET: [u8; RUMBLE_PACKET_LEN] = [0x00, 0x01, 0x40, 0x40, 0x00, 0x01, 0x40, 0x40];

/// Low frequency clamp range in Hz (hardware limits)
pub const LOW_FREQ_MIN_HZ: f32 = 40.875_885;
pub const LOW_FREQ_MAX_HZ: f32 = 626.286_133;

/// High frequency clamp range in Hz (hardware limits)
pub const HIGH_FREQ_MIN_HZ: f32 = 81.751_77;
pub const HIGH_FREQ_MAX_HZ: f32 = 1252.572_266;

/// Abstract rumble description, constructed per tick and consumed immediately
/// by [`encode`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RumbleSpec {
    /// Low frequency component in Hz
    pub low_freq_hz: f32,

    /// High frequency component in Hz
    pub high_freq_hz: f32,

    /// Rumble amplitude (0.0 to 1.0)
    pub amplitude: f32,
}

impl RumbleSpec {
    /// Create a new rumble description
    pub fn new(low_freq_hz: f32, high_freq_hz: f32, amplitude: f32) -> Self {
        Self {
            low_freq_hz,
            high_freq_hz,
            amplitude,
        }
    }

    /// Encode this description into the 8-byte actuator packet
    pub fn encode(&self) -> [u8; RUMBLE_PACKET_LEN] {
        encode(self.low_freq_hz, self.high_freq_hz, self.amplitude)
    }
}

/// Encode a rumble description into the 8-byte Joy-Con actuator packet
///
/// Inputs are clamped before use: low frequency to [40.875885, 626.286133] Hz,
/// high frequency to [81.75177, 1252.572266] Hz, amplitude to [0.0, 1.0].
///
/// # Arguments
///
/// * `low_freq_hz` - Low frequency component in Hz
/// * `high_freq_hz` - High frequency component in Hz
/// * `amplitude` - Rumble amplitude (0.0 to 1.0); 0.0 yields the off packet
///
/// # Returns
///
/// * `[u8; 8]` - Complete actuator packet; bytes 4-7 duplicate bytes 0-3
///   (the hardware requires two repeated 4-byte sub-reports)
///
/// Never fails: any non-finite intermediate falls back to [`OFF_PACKET`].
///
/// # Examples
///
/// ```
/// use typhoon_rumble::rumble::{encode, OFF_PACKET};
///
/// let packet = encode(300.0, 800.0, 0.0);
/// assert_eq!(packet, OFF_PACKET);
///
/// let packet = encode(300.0, 800.0, 1.0);
/// assert_eq!(&packet[0..4], &packet[4..8]);
/// ```
pub fn encode(low_freq_hz: f32, high_freq_hz: f32, amplitude: f32) -> [u8; RUMBLE_PACKET_LEN] {
    // Non-finite inputs cannot be meaningfully clamped
    if !(low_freq_hz.is_finite() && high_freq_hz.is_finite() && amplitude.is_finite()) {
        return OFF_PACKET;
    }

    let amp = f64::from(amplitude.clamp(0.0, 1.0));
    if amp == 0.0 {
        return OFF_PACKET;
    }

    let l_f = f64::from(low_freq_hz.clamp(LOW_FREQ_MIN_HZ, LOW_FREQ_MAX_HZ));
    let h_f = f64::from(high_freq_hz.clamp(HIGH_FREQ_MIN_HZ, HIGH_FREQ_MAX_HZ));

    // Encoded frequency fields: 32*log2 of the frequency scaled by 0.1, offset
    // into the hardware's code space. The high-frequency code carries a x4
    // shift so its upper bits land in the second byte.
    let hf = (((32.0 * (h_f * 0.1).log2()).round() as i32) - 0x60) * 4;
    let lf = ((32.0 * (l_f * 0.1).log2()).round() as i32) - 0x40;

    // High-frequency amplitude code: three piecewise branches on amplitude.
    // Truncation toward zero is intentional and part of the contract.
    let log_amp = (amp * 1000.0).log2() * 32.0;
    if !log_amp.is_finite() {
        return OFF_PACKET;
    }
    let hf_amp_raw = if amp < 0.117 {
        (log_amp - 0x60 as f64) / (5.0 - amp * amp) - 1.0
    } else if amp < 0.23 {
        log_amp - 0x60 as f64 - 0x5c as f64
    } else {
        (log_amp - 0x60 as f64) * 2.0 - 0xf6 as f64
    };
    if !hf_amp_raw.is_finite() {
        return OFF_PACKET;
    }
    let hf_amp = (hf_amp_raw as i32).max(0);

    // Low-frequency amplitude code, derived from the high-frequency one:
    // halve, strip the odd-parity bit, shift, rebase at 0x40, and re-apply
    // the parity as a high-order flag.
    let mut lf_amp = (hf_amp as f64 * 0.5) as i32;
    let parity = lf_amp % 2;
    if parity > 0 {
        lf_amp -= 1;
    }
    lf_amp = lf_amp.max(0) >> 1;
    lf_amp += 0x40;
    if parity > 0 {
        lf_amp |= 0x8000;
    }

    // Assemble the 4-byte sub-report. Each combined byte is clamped to
    // [0, 255]; letting an overflow through is a correctness bug.
    let mut packet = [0u8; RUMBLE_PACKET_LEN];
    packet[0] = (hf & 0xff).clamp(0, 255) as u8;
    packet[1] = (((hf >> 8) & 0xff) + hf_amp).clamp(0, 255) as u8;
    packet[2] = (lf + ((lf_amp >> 8) & 0xff)).clamp(0, 255) as u8;
    packet[3] = (lf_amp & 0xff).clamp(0, 255) as u8;

    // Duplicate bytes 0-3 into 4-7
    for i in 0..4 {
        packet[4 + i] = packet[i];
    }

    packet
}
