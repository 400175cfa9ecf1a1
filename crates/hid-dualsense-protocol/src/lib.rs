//! DualSense HID protocol: input report decoding, output report encoding,
//! adaptive-trigger effect generation, and the Bluetooth CRC-32 trailer.
//!
//! This crate is intentionally I/O-free and allocation-free on hot paths.
//! Device discovery, the read/write loop, and subscriber setup for the
//! `tracing` events emitted here all belong to the caller.
//!
//! ## Transports
//!
//! | Transport | Input len | Output len | Output byte 0 | CRC trailer |
//! |-----------|-----------|------------|---------------|-------------|
//! | USB       | 64        | 64         | `0x02`        | no          |
//! | Bluetooth | 78        | 78         | `0x31`        | bytes 74–77 |
//!
//! Bluetooth input reports carry one extra leading byte; once it is dropped
//! both transports share the same input field layout (see [`input`]).
//! Output layouts share semantics but not offsets: Bluetooth scalar fields
//! sit one byte after their USB counterparts, and Bluetooth trigger blocks
//! carry only seven of the ten parameters (see [`transport::OutputLayout`]).
//!
//! ## Bluetooth LED block
//!
//! The first Bluetooth output packet of a connection must set the
//! LED-release bit in the second feature-flag byte; later packets must not.
//! That one-shot state lives in [`OutputSession`], one per connection.
//!
//! ## Trigger effects
//!
//! [`TriggerEffect`] generators pack the 10-zone trigger travel into the
//! 10-byte parameter block of the output report. The default generators
//! clamp out-of-range parameters; the `try_*` variants reject them instead
//! (see [`TriggerPolicy`]).
//!
//! ## Sources
//!
//! - Linux kernel `drivers/hid/hid-playstation.c` (report layouts, feature
//!   flags, Bluetooth CRC seeds `0xA1`/`0xA2`).
//! - Nielk1's `TriggerEffectGenerator` (adaptive-trigger zone packing).

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]
#![deny(static_mut_refs)]

pub mod config;
pub mod crc;
pub mod ids;
pub mod input;
pub mod output;
pub mod transport;
pub mod trigger;
pub mod types;

pub use config::{TriggerPolicy, default_trigger_policy, parse_transport, parse_trigger_policy};
pub use crc::{bluetooth_output_crc, verify_bluetooth_input_crc, write_bluetooth_crc};
pub use ids::{SONY_VENDOR_ID, is_dualsense_device, product_ids};
pub use input::{
    BatteryStatus, ControllerState, DpadState, INPUT_REPORT_MIN_LEN, InputReportDecoder,
    MotionVector, StickState, TouchPoint, decode_input_report,
};
pub use output::{
    LightbarColor, MAX_OUTPUT_REPORT_LEN, OutputCommand, OutputReport, OutputSession, PlayerLed,
    encode_output_report,
};
pub use transport::{OutputLayout, Transport};
pub use trigger::{TRIGGER_PARAM_COUNT, TRIGGER_ZONE_COUNT, TriggerEffect, TriggerEffectSpec};
pub use types::{BatteryState, Brightness, LedOptions, PlayerId, PulseOptions, TriggerMode};

use thiserror::Error;

/// Errors returned by DualSense codec operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DualSenseError {
    /// The input buffer is shorter than the last field the decoder reads.
    #[error("Malformed input report: expected at least {expected} bytes, got {actual}")]
    MalformedReport { expected: usize, actual: usize },

    /// The player-indicator descriptor names a player count outside 1–4.
    #[error("Invalid player count {0}: must be 1-4")]
    InvalidPlayerCount(u8),
}

/// Convenience result alias for DualSense operations.
pub type DualSenseResult<T> = Result<T, DualSenseError>;
