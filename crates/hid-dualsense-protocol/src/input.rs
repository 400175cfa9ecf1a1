//! DualSense input report decoding.
//!
//! All functions are pure and allocation-free.
//!
//! ## Layout
//!
//! Offsets below are relative to the transport-normalized report: the USB
//! report as received, or the Bluetooth report with its leading byte dropped.
//!
//! | Offset | Field |
//! |--------|-------|
//! | 0      | report ID (USB `0x01`) |
//! | 1–4    | left X, left Y, right X, right Y |
//! | 5–6    | L2, R2 analog |
//! | 7      | report counter |
//! | 8      | face buttons (high nibble), d-pad code (low nibble) |
//! | 9      | L1, R1, left stick, right stick, create, options, L3, R3 (bit 0 → 7) |
//! | 10     | PS, touchpad click, mic (bit 0 → 2) |
//! | 16–21  | gyroscope X/Y/Z, `i16` LE |
//! | 22–27  | accelerometer X/Y/Z, `i16` LE |
//! | 33–36  | touch point 0 |
//! | 37–40  | touch point 1 |
//! | 53     | battery: state (high nibble), level (low nibble) |

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::transport::Transport;
use crate::types::BatteryState;
use crate::{DualSenseError, DualSenseResult};

/// Minimum transport-normalized length: one past the battery byte.
pub const INPUT_REPORT_MIN_LEN: usize = offsets::BATTERY + 1;

/// Raw motion counts per physical unit.
pub const MOTION_SCALE: f32 = 8192.0;

/// Field offsets in the transport-normalized input report.
pub mod offsets {
    pub const LEFT_STICK_X: usize = 1;
    pub const LEFT_STICK_Y: usize = 2;
    pub const RIGHT_STICK_X: usize = 3;
    pub const RIGHT_STICK_Y: usize = 4;
    pub const L2_AXIS: usize = 5;
    pub const R2_AXIS: usize = 6;
    pub const COUNTER: usize = 7;
    pub const BUTTONS_0: usize = 8;
    pub const BUTTONS_1: usize = 9;
    pub const BUTTONS_2: usize = 10;
    pub const GYRO: usize = 16;
    pub const ACCEL: usize = 22;
    pub const TOUCH_0: usize = 33;
    pub const TOUCH_1: usize = 37;
    pub const BATTERY: usize = 53;
}

/// Button bits in `BUTTONS_0`.
mod buttons_0 {
    pub const SQUARE: u8 = 1 << 4;
    pub const CROSS: u8 = 1 << 5;
    pub const CIRCLE: u8 = 1 << 6;
    pub const TRIANGLE: u8 = 1 << 7;
    pub const DPAD_MASK: u8 = 0x0F;
}

/// Button bits in `BUTTONS_1`.
mod buttons_1 {
    pub const L1: u8 = 1 << 0;
    pub const R1: u8 = 1 << 1;
    pub const LEFT_STICK: u8 = 1 << 2;
    pub const RIGHT_STICK: u8 = 1 << 3;
    pub const CREATE: u8 = 1 << 4;
    pub const OPTIONS: u8 = 1 << 5;
    pub const L3: u8 = 1 << 6;
    pub const R3: u8 = 1 << 7;
}

/// Button bits in `BUTTONS_2`.
mod buttons_2 {
    pub const PS: u8 = 1 << 0;
    pub const TOUCHPAD: u8 = 1 << 1;
    pub const MIC: u8 = 1 << 2;
}

/// One analog stick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StickState {
    /// `(raw - 127) / 127`; unclamped, so full left reads slightly below -1.0.
    pub x: f32,
    pub y: f32,
    /// Stick-pressed bit (bit 2 left, bit 3 right); distinct from L3/R3.
    pub pressed: bool,
}

impl StickState {
    fn from_raw(x: u8, y: u8, pressed: bool) -> Self {
        Self {
            x: normalize_axis(x),
            y: normalize_axis(y),
            pressed,
        }
    }
}

/// D-pad resolved to independent directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DpadState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DpadState {
    /// Resolve a hat code: 0 = N, clockwise through 7 = NW; 8 and above are neutral.
    pub fn from_code(code: u8) -> Self {
        let (up, right, down, left) = match code {
            0 => (true, false, false, false),
            1 => (true, true, false, false),
            2 => (false, true, false, false),
            3 => (false, true, true, false),
            4 => (false, false, true, false),
            5 => (false, false, true, true),
            6 => (false, false, false, true),
            7 => (true, false, false, true),
            _ => (false, false, false, false),
        };
        Self {
            up,
            down,
            left,
            right,
        }
    }

    pub fn is_neutral(&self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }
}

/// One touchpad contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TouchPoint {
    pub active: bool,
    /// Contact tracking ID (7 bits).
    pub id: u8,
    /// Horizontal position (12 bits).
    pub x: u16,
    /// Vertical position (12 bits).
    pub y: u16,
}

impl TouchPoint {
    /// Decode a 4-byte contact record.
    ///
    /// Byte 0 bit 7 is set when the finger is lifted. X takes byte 1 as its low
    /// byte and the low nibble of byte 2 as its high nibble; Y takes byte 3 as
    /// its high byte and the high nibble of byte 2 as its low nibble.
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        let [contact, x_lo, xy, y_hi] = bytes;
        Self {
            active: contact & 0x80 == 0,
            id: contact & 0x7F,
            x: (u16::from(xy & 0x0F) << 8) | u16::from(x_lo),
            y: (u16::from(y_hi) << 4) | u16::from(xy >> 4),
        }
    }
}

/// A 3-axis motion sample in physical units (raw / 8192).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MotionVector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl MotionVector {
    fn from_le_bytes(bytes: [u8; 6]) -> Self {
        let axis = |lo: u8, hi: u8| f32::from(i16::from_le_bytes([lo, hi])) / MOTION_SCALE;
        Self {
            x: axis(bytes[0], bytes[1]),
            y: axis(bytes[2], bytes[3]),
            z: axis(bytes[4], bytes[5]),
        }
    }
}

/// Battery state and charge level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BatteryStatus {
    pub state: BatteryState,
    /// Charge percentage, always within 0–100.
    pub level: u8,
}

impl BatteryStatus {
    /// Decode the battery byte: state in the high nibble, level `min(low * 10 + 5, 100)`.
    pub fn from_byte(byte: u8) -> Self {
        Self {
            state: BatteryState::from_code(byte >> 4),
            level: ((byte & 0x0F) * 10 + 5).min(100),
        }
    }
}

/// Decoded snapshot of every input field. Replaced wholesale on each report.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ControllerState {
    pub left_stick: StickState,
    pub right_stick: StickState,
    /// Raw analog L2 (0–255).
    pub l2: u8,
    /// Raw analog R2 (0–255).
    pub r2: u8,

    pub triangle: bool,
    pub circle: bool,
    pub cross: bool,
    pub square: bool,

    pub l1: bool,
    pub r1: bool,
    pub l3: bool,
    pub r3: bool,

    pub dpad: DpadState,

    pub options: bool,
    /// Create button (labelled "share" on older pads).
    pub share: bool,
    pub ps: bool,
    pub mic: bool,
    /// Touchpad click.
    pub touchpad: bool,

    pub gyroscope: MotionVector,
    pub accelerometer: MotionVector,

    pub touch0: TouchPoint,
    pub touch1: TouchPoint,

    pub battery: BatteryStatus,

    /// Free-running counter, incremented by the firmware every report.
    pub counter: u8,
}

impl ControllerState {
    /// Decode a transport-normalized report.
    ///
    /// Any buffer of at least [`INPUT_REPORT_MIN_LEN`] bytes decodes; trailing
    /// bytes are ignored.
    pub fn parse(data: &[u8]) -> DualSenseResult<Self> {
        let report: &[u8; INPUT_REPORT_MIN_LEN] = data
            .get(..INPUT_REPORT_MIN_LEN)
            .and_then(|head| head.try_into().ok())
            .ok_or(DualSenseError::MalformedReport {
                expected: INPUT_REPORT_MIN_LEN,
                actual: data.len(),
            })?;
        Ok(Self::from_report(report))
    }

    fn from_report(r: &[u8; INPUT_REPORT_MIN_LEN]) -> Self {
        use offsets::*;

        let b0 = r[BUTTONS_0];
        let b1 = r[BUTTONS_1];
        let b2 = r[BUTTONS_2];
        let bit = |byte: u8, mask: u8| byte & mask != 0;

        let left_pressed = bit(b1, buttons_1::LEFT_STICK);
        let right_pressed = bit(b1, buttons_1::RIGHT_STICK);

        Self {
            left_stick: StickState::from_raw(r[LEFT_STICK_X], r[LEFT_STICK_Y], left_pressed),
            right_stick: StickState::from_raw(r[RIGHT_STICK_X], r[RIGHT_STICK_Y], right_pressed),
            l2: r[L2_AXIS],
            r2: r[R2_AXIS],

            triangle: bit(b0, buttons_0::TRIANGLE),
            circle: bit(b0, buttons_0::CIRCLE),
            cross: bit(b0, buttons_0::CROSS),
            square: bit(b0, buttons_0::SQUARE),

            l1: bit(b1, buttons_1::L1),
            r1: bit(b1, buttons_1::R1),
            l3: bit(b1, buttons_1::L3),
            r3: bit(b1, buttons_1::R3),

            dpad: DpadState::from_code(b0 & buttons_0::DPAD_MASK),

            options: bit(b1, buttons_1::OPTIONS),
            share: bit(b1, buttons_1::CREATE),
            ps: bit(b2, buttons_2::PS),
            mic: bit(b2, buttons_2::MIC),
            touchpad: bit(b2, buttons_2::TOUCHPAD),

            gyroscope: MotionVector::from_le_bytes(field(r, GYRO)),
            accelerometer: MotionVector::from_le_bytes(field(r, ACCEL)),

            touch0: TouchPoint::from_bytes(field(r, TOUCH_0)),
            touch1: TouchPoint::from_bytes(field(r, TOUCH_1)),

            battery: BatteryStatus::from_byte(r[BATTERY]),

            counter: r[COUNTER],
        }
    }
}

/// Decode a raw input report as received over `transport`.
///
/// The Bluetooth leading byte is dropped before field extraction. Fails with
/// [`DualSenseError::MalformedReport`] only when the buffer is too short to
/// hold the battery byte.
pub fn decode_input_report(data: &[u8], transport: Transport) -> DualSenseResult<ControllerState> {
    let prefix = transport.input_prefix_len();
    let payload = data.get(prefix..).unwrap_or_default();
    match ControllerState::parse(payload) {
        Ok(state) => {
            trace!(%transport, len = data.len(), "decoded input report");
            Ok(state)
        }
        Err(_) => {
            warn!(%transport, len = data.len(), "dropping malformed input report");
            Err(DualSenseError::MalformedReport {
                expected: INPUT_REPORT_MIN_LEN + prefix,
                actual: data.len(),
            })
        }
    }
}

/// Stateless decoder bound to one transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputReportDecoder {
    transport: Transport,
}

impl InputReportDecoder {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> Transport {
        self.transport
    }

    pub fn decode(&self, data: &[u8]) -> DualSenseResult<ControllerState> {
        decode_input_report(data, self.transport)
    }
}

/// Copy `N` bytes starting at `start`; the caller guarantees `start + N <= LEN`.
fn field<const N: usize, const LEN: usize>(report: &[u8; LEN], start: usize) -> [u8; N] {
    let mut out = [0u8; N];
    if let Some(src) = report.get(start..start + N) {
        out.copy_from_slice(src);
    }
    out
}

/// Map a raw axis byte to `(raw - 127) / 127`.
fn normalize_axis(raw: u8) -> f32 {
    (f32::from(raw) - 127.0) / 127.0
}
