//! Physical transport variants and their per-transport constant tables.

use serde::{Deserialize, Serialize};

use crate::config;
use crate::ids::report_ids;
use crate::trigger::TRIGGER_PARAM_COUNT;

/// USB input/output report length.
pub const USB_REPORT_LEN: usize = 64;
/// Bluetooth input/output report length.
pub const BT_REPORT_LEN: usize = 78;

/// Byte offsets of every output-report field for one transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputLayout {
    /// Bluetooth-only tag byte following the report ID.
    pub tag: Option<usize>,
    pub valid_flag0: usize,
    pub valid_flag1: usize,
    pub right_motor: usize,
    pub left_motor: usize,
    pub mic_led: usize,
    pub mic_mute: usize,
    /// Right trigger mode byte; the 10 parameter bytes follow it.
    pub right_trigger: usize,
    /// Left trigger mode byte; the 10 parameter bytes follow it.
    pub left_trigger: usize,
    /// Where each trigger parameter lands, relative to the mode byte.
    /// `None` drops the parameter on this transport.
    pub trigger_params: [Option<usize>; TRIGGER_PARAM_COUNT],
    pub led_options: usize,
    pub pulse_options: usize,
    pub led_brightness: usize,
    pub player_id: usize,
    /// Red channel; green and blue follow.
    pub lightbar_rgb: usize,
    /// Little-endian CRC-32 trailer.
    pub crc: Option<usize>,
}

const USB_LAYOUT: OutputLayout = OutputLayout {
    tag: None,
    valid_flag0: 1,
    valid_flag1: 2,
    right_motor: 3,
    left_motor: 4,
    mic_led: 9,
    mic_mute: 10,
    right_trigger: 11,
    left_trigger: 22,
    trigger_params: [
        Some(1),
        Some(2),
        Some(3),
        Some(4),
        Some(5),
        Some(6),
        Some(7),
        Some(8),
        Some(9),
        Some(10),
    ],
    led_options: 39,
    pulse_options: 42,
    led_brightness: 43,
    player_id: 44,
    lightbar_rgb: 45,
    crc: None,
};

const BT_LAYOUT: OutputLayout = OutputLayout {
    tag: Some(1),
    valid_flag0: 2,
    valid_flag1: 3,
    right_motor: 4,
    left_motor: 5,
    mic_led: 10,
    mic_mute: 11,
    right_trigger: 12,
    left_trigger: 23,
    // Parameters 0-5 follow the mode byte, parameter 6 sits at +9, and 7-9
    // are not sent.
    trigger_params: [
        Some(1),
        Some(2),
        Some(3),
        Some(4),
        Some(5),
        Some(6),
        Some(9),
        None,
        None,
        None,
    ],
    led_options: 40,
    pulse_options: 43,
    led_brightness: 44,
    player_id: 45,
    lightbar_rgb: 46,
    crc: Some(74),
};

/// Physical link to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transport {
    Usb,
    Bluetooth,
}

impl Transport {
    /// Length of an input report received over this transport.
    pub const fn input_report_len(self) -> usize {
        match self {
            Self::Usb => USB_REPORT_LEN,
            Self::Bluetooth => BT_REPORT_LEN,
        }
    }

    /// Length of an output report sent over this transport.
    pub const fn output_report_len(self) -> usize {
        match self {
            Self::Usb => USB_REPORT_LEN,
            Self::Bluetooth => BT_REPORT_LEN,
        }
    }

    /// Report type byte written at output offset 0.
    pub const fn output_report_type(self) -> u8 {
        match self {
            Self::Usb => report_ids::USB_OUTPUT,
            Self::Bluetooth => report_ids::BT_OUTPUT,
        }
    }

    /// Leading input bytes to drop before the shared field layout applies.
    pub const fn input_prefix_len(self) -> usize {
        match self {
            Self::Usb => 0,
            Self::Bluetooth => 1,
        }
    }

    /// Whether output reports carry a CRC-32 trailer.
    pub const fn has_checksum(self) -> bool {
        matches!(self, Self::Bluetooth)
    }

    /// Output field offsets for this transport.
    pub const fn output_layout(self) -> &'static OutputLayout {
        match self {
            Self::Usb => &USB_LAYOUT,
            Self::Bluetooth => &BT_LAYOUT,
        }
    }

    /// Infer the transport from the length of a received input report.
    pub fn from_input_report_len(len: usize) -> Option<Self> {
        match len {
            USB_REPORT_LEN => Some(Self::Usb),
            BT_REPORT_LEN => Some(Self::Bluetooth),
            _ => None,
        }
    }

    /// Transport named by `DUALSENSE_TRANSPORT`, or `fallback` when unset or invalid.
    pub fn from_env_or(fallback: Self) -> Self {
        config::transport_override().unwrap_or(fallback)
    }
}

impl std::fmt::Display for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Usb => f.write_str("usb"),
            Self::Bluetooth => f.write_str("bluetooth"),
        }
    }
}
