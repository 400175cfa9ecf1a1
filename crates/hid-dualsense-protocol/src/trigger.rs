//! Adaptive-trigger effect generation.
//!
//! All generators are pure and allocation-free. The trigger travel is split
//! into [`TRIGGER_ZONE_COUNT`] zones; effects describe which zones are active
//! and pack a 3-bit value per zone, zone 0 in the least-significant bits.
//!
//! ## Parameter layouts
//!
//! | Mode        | Bytes 0–1       | Bytes 2–5           | Bytes 6–7         | Byte 8    |
//! |-------------|-----------------|---------------------|-------------------|-----------|
//! | `Feedback`  | active-zone mask| 30-bit force field  | 0                 | 0         |
//! | `Weapon`    | start/end zones | byte 2: strength−1  | 0                 | 0         |
//! | `Vibration` | active-zone mask| amplitude field     | amplitude (hi, 0) | frequency |
//!
//! Multi-byte fields are little-endian.
//!
//! ## Parameter policy
//!
//! [`TriggerEffect::feedback`], [`TriggerEffect::weapon`], and
//! [`TriggerEffect::vibration`] clamp every argument into range. The
//! `try_*` variants return `None` for out-of-range arguments instead. Which
//! of the two the hardware expects has not been confirmed on real devices,
//! so both are offered and [`TriggerEffect::generate`] dispatches on a
//! [`TriggerPolicy`].

use serde::{Deserialize, Serialize};

use crate::config::TriggerPolicy;
use crate::types::TriggerMode;

/// Parameter bytes following the mode byte in each trigger block.
pub const TRIGGER_PARAM_COUNT: usize = 10;
/// Discrete positions along the trigger travel.
pub const TRIGGER_ZONE_COUNT: u8 = 10;

const MAX_ZONE: u8 = TRIGGER_ZONE_COUNT - 1;
const MIN_STRENGTH: u8 = 1;
const MAX_STRENGTH: u8 = 8;
const WEAPON_MIN_START: u8 = 2;
const WEAPON_MAX_START: u8 = 7;
const WEAPON_MAX_END: u8 = 8;

/// A trigger mode plus its 10 parameter bytes, copied verbatim into an output report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TriggerEffect {
    pub mode: TriggerMode,
    pub params: [u8; TRIGGER_PARAM_COUNT],
}

/// Declarative description of an effect, resolved by [`TriggerEffect::generate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerEffectSpec {
    Off,
    Feedback { position: u8, strength: u8 },
    Weapon { start: u8, end: u8, strength: u8 },
    Vibration { position: u8, amplitude: u8, frequency: u8 },
}

impl TriggerEffect {
    pub const fn new(mode: TriggerMode, params: [u8; TRIGGER_PARAM_COUNT]) -> Self {
        Self { mode, params }
    }

    /// Force-feedback off: releases any resistance with an all-zero parameter block.
    pub const fn off() -> Self {
        Self::new(TriggerMode::FfbOff, [0; TRIGGER_PARAM_COUNT])
    }

    /// Uniform resistance from `position` to the end of travel.
    ///
    /// `position` is clamped to 0–9 and `strength` to 1–8.
    pub fn feedback(position: u8, strength: u8) -> Self {
        let position = position.min(MAX_ZONE);
        let strength = strength.clamp(MIN_STRENGTH, MAX_STRENGTH);
        let (mask, forces) = pack_zones(position, strength - 1);

        let mut params = [0u8; TRIGGER_PARAM_COUNT];
        params[..2].copy_from_slice(&mask.to_le_bytes());
        params[2..6].copy_from_slice(&low_u32(forces).to_le_bytes());
        Self::new(TriggerMode::Feedback, params)
    }

    /// A resistance wall between `start` and `end` that snaps once passed.
    ///
    /// `start` is clamped to 2–7, `end` to `start + 1`–8, `strength` to 1–8,
    /// so exactly two zone bits are always set. `weapon(s, s, _)` therefore
    /// moves `end` to `s + 1`.
    pub fn weapon(start: u8, end: u8, strength: u8) -> Self {
        let start = start.clamp(WEAPON_MIN_START, WEAPON_MAX_START);
        let end = end.clamp(start + 1, WEAPON_MAX_END);
        let strength = strength.clamp(MIN_STRENGTH, MAX_STRENGTH);
        let zones: u16 = (1 << start) | (1 << end);

        let mut params = [0u8; TRIGGER_PARAM_COUNT];
        params[..2].copy_from_slice(&zones.to_le_bytes());
        params[2] = strength - 1;
        Self::new(TriggerMode::Weapon, params)
    }

    /// Vibration from `position` to the end of travel.
    ///
    /// `position` is clamped to 0–9, `amplitude` to 1–8, `frequency` (Hz)
    /// to 1–255.
    pub fn vibration(position: u8, amplitude: u8, frequency: u8) -> Self {
        let position = position.min(MAX_ZONE);
        let amplitude = amplitude.clamp(MIN_STRENGTH, MAX_STRENGTH);
        let frequency = frequency.max(1);
        let (mask, amplitudes) = pack_zones(position, (amplitude - 1) & 0x07);

        let mut params = [0u8; TRIGGER_PARAM_COUNT];
        params[..2].copy_from_slice(&mask.to_le_bytes());
        params[2..8].copy_from_slice(&amplitudes.to_le_bytes()[..6]);
        params[8] = frequency;
        Self::new(TriggerMode::Vibration, params)
    }

    /// [`TriggerEffect::feedback`] that rejects rather than clamps.
    pub fn try_feedback(position: u8, strength: u8) -> Option<Self> {
        if position > MAX_ZONE || !(MIN_STRENGTH..=MAX_STRENGTH).contains(&strength) {
            return None;
        }
        Some(Self::feedback(position, strength))
    }

    /// [`TriggerEffect::weapon`] that rejects rather than clamps.
    pub fn try_weapon(start: u8, end: u8, strength: u8) -> Option<Self> {
        if !(WEAPON_MIN_START..=WEAPON_MAX_START).contains(&start)
            || end > WEAPON_MAX_END
            || end <= start
            || !(MIN_STRENGTH..=MAX_STRENGTH).contains(&strength)
        {
            return None;
        }
        Some(Self::weapon(start, end, strength))
    }

    /// [`TriggerEffect::vibration`] that rejects rather than clamps.
    pub fn try_vibration(position: u8, amplitude: u8, frequency: u8) -> Option<Self> {
        if position > MAX_ZONE
            || !(MIN_STRENGTH..=MAX_STRENGTH).contains(&amplitude)
            || frequency == 0
        {
            return None;
        }
        Some(Self::vibration(position, amplitude, frequency))
    }

    /// Build `spec` under `policy`. Only [`TriggerPolicy::Strict`] can yield `None`.
    pub fn generate(policy: TriggerPolicy, spec: TriggerEffectSpec) -> Option<Self> {
        match (policy, spec) {
            (_, TriggerEffectSpec::Off) => Some(Self::off()),
            (TriggerPolicy::Clamp, TriggerEffectSpec::Feedback { position, strength }) => {
                Some(Self::feedback(position, strength))
            }
            (TriggerPolicy::Clamp, TriggerEffectSpec::Weapon { start, end, strength }) => {
                Some(Self::weapon(start, end, strength))
            }
            (
                TriggerPolicy::Clamp,
                TriggerEffectSpec::Vibration {
                    position,
                    amplitude,
                    frequency,
                },
            ) => Some(Self::vibration(position, amplitude, frequency)),
            (TriggerPolicy::Strict, TriggerEffectSpec::Feedback { position, strength }) => {
                Self::try_feedback(position, strength)
            }
            (TriggerPolicy::Strict, TriggerEffectSpec::Weapon { start, end, strength }) => {
                Self::try_weapon(start, end, strength)
            }
            (
                TriggerPolicy::Strict,
                TriggerEffectSpec::Vibration {
                    position,
                    amplitude,
                    frequency,
                },
            ) => Self::try_vibration(position, amplitude, frequency),
        }
    }

    /// Set a single parameter byte. Indexes past the block are ignored.
    pub fn with_force(mut self, index: usize, value: u8) -> Self {
        if let Some(slot) = self.params.get_mut(index) {
            *slot = value;
        }
        self
    }

    /// Active-zone mask of zone-based effects (feedback, vibration), or the
    /// start/end zone pair of a weapon effect.
    pub fn zone_mask(&self) -> u16 {
        u16::from_le_bytes([self.params[0], self.params[1]])
    }
}

/// Mark zones `first..=9` active and give each the 3-bit `value`.
fn pack_zones(first: u8, value: u8) -> (u16, u64) {
    let value = u64::from(value & 0x07);
    (first..TRIGGER_ZONE_COUNT).fold((0u16, 0u64), |(mask, packed), zone| {
        (mask | (1 << zone), packed | (value << (3 * u32::from(zone))))
    })
}

fn low_u32(value: u64) -> u32 {
    (value & u64::from(u32::MAX)) as u32
}
