//! Small protocol enums shared by the input and output reports.

use serde::{Deserialize, Serialize};

/// Battery charging state from the high nibble of the battery byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BatteryState {
    #[default]
    Discharging,
    Charging,
    Full,
    /// Charging paused: temperature or voltage out of range.
    TempOrVoltageOutOfRange,
    NotCharging,
    Error,
    /// Any code the firmware documents no meaning for.
    Unknown,
}

impl BatteryState {
    /// Map a 4-bit state code. Unlisted codes become [`BatteryState::Unknown`].
    pub fn from_code(code: u8) -> Self {
        match code & 0x0F {
            0x0 => Self::Discharging,
            0x1 => Self::Charging,
            0x2 => Self::Full,
            0xA => Self::TempOrVoltageOutOfRange,
            0xB => Self::NotCharging,
            0xF => Self::Error,
            _ => Self::Unknown,
        }
    }
}

/// Player-indicator LED brightness level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Brightness {
    High = 0x00,
    Medium = 0x01,
    Low = 0x02,
}

impl Brightness {
    /// Quantize a 0.0–1.0 brightness: `> 0.5` high, `> 0.2` medium, else low.
    pub fn from_level(level: f32) -> Self {
        if level > 0.5 {
            Self::High
        } else if level > 0.2 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Lit-LED bit patterns for the five player-indicator LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    /// Center LED.
    Player1 = 0x04,
    /// Inner pair.
    Player2 = 0x0A,
    /// Center plus outer pair.
    Player3 = 0x15,
    /// Outer and inner pairs.
    Player4 = 0x1B,
    /// All five LEDs.
    All = 0x1F,
}

impl PlayerId {
    pub fn from_player_count(count: u8) -> Option<Self> {
        match count {
            1 => Some(Self::Player1),
            2 => Some(Self::Player2),
            3 => Some(Self::Player3),
            4 => Some(Self::Player4),
            _ => None,
        }
    }
}

/// LED option byte of the output report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LedOptions {
    Off = 0x00,
    #[default]
    PlayerLedBrightness = 0x01,
    UninterruptibleLed = 0x02,
    Both = 0x03,
}

/// Lightbar pulse option byte of the output report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PulseOptions {
    #[default]
    Off = 0x00,
    FadeBlue = 0x01,
    FadeOut = 0x02,
}

/// Adaptive-trigger mode byte.
///
/// Several historical names share one byte value (`Rigid` and
/// `SimpleFeedback` are both `0x01`); the variants name each distinct byte
/// once and the legacy names are associated constants. Any other byte is
/// carried through untouched as [`TriggerMode::Raw`], and equality compares
/// the wire byte, so `Raw(0x21) == Feedback`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub enum TriggerMode {
    /// No resistance.
    #[default]
    Off,
    SimpleFeedback,
    SimpleWeapon,
    /// Force-feedback off (resets the trigger motor).
    FfbOff,
    SimpleVibration,
    LimitedFeedback,
    LimitedWeapon,
    Feedback,
    Bow,
    Galloping,
    Weapon,
    Vibration,
    Machine,
    Calibration,
    Raw(u8),
}

impl TriggerMode {
    /// Continuous resistance.
    pub const RIGID: Self = Self::SimpleFeedback;
    /// Section resistance.
    pub const PULSE: Self = Self::SimpleWeapon;
    pub const RIGID_A: Self = Self::Feedback;
    pub const RIGID_B: Self = Self::FfbOff;
    pub const RIGID_AB: Self = Self::Weapon;
    pub const PULSE_A: Self = Self::Bow;
    pub const PULSE_B: Self = Self::SimpleVibration;
    pub const PULSE_AB: Self = Self::Vibration;

    pub fn to_byte(self) -> u8 {
        match self {
            Self::Off => 0x00,
            Self::SimpleFeedback => 0x01,
            Self::SimpleWeapon => 0x02,
            Self::FfbOff => 0x05,
            Self::SimpleVibration => 0x06,
            Self::LimitedFeedback => 0x11,
            Self::LimitedWeapon => 0x12,
            Self::Feedback => 0x21,
            Self::Bow => 0x22,
            Self::Galloping => 0x23,
            Self::Weapon => 0x25,
            Self::Vibration => 0x26,
            Self::Machine => 0x27,
            Self::Calibration => 0xFC,
            Self::Raw(byte) => byte,
        }
    }

    /// Decode a mode byte. Total: unnamed bytes become [`TriggerMode::Raw`].
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0x00 => Self::Off,
            0x01 => Self::SimpleFeedback,
            0x02 => Self::SimpleWeapon,
            0x05 => Self::FfbOff,
            0x06 => Self::SimpleVibration,
            0x11 => Self::LimitedFeedback,
            0x12 => Self::LimitedWeapon,
            0x21 => Self::Feedback,
            0x22 => Self::Bow,
            0x23 => Self::Galloping,
            0x25 => Self::Weapon,
            0x26 => Self::Vibration,
            0x27 => Self::Machine,
            0xFC => Self::Calibration,
            other => Self::Raw(other),
        }
    }
}

impl PartialEq for TriggerMode {
    fn eq(&self, other: &Self) -> bool {
        self.to_byte() == other.to_byte()
    }
}

impl Eq for TriggerMode {}

impl std::hash::Hash for TriggerMode {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.to_byte().hash(state);
    }
}
