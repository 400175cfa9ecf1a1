//! DualSense output report encoding.
//!
//! All functions are pure and allocation-free; the only state is the
//! per-connection Bluetooth LED flag held by [`OutputSession`].
//!
//! ## Layout
//!
//! Both transports share one field order. Bluetooth inserts a tag byte after
//! the report ID, so its scalar fields sit one byte later. Trigger blocks
//! differ: Bluetooth carries parameters 0–5 after the mode byte and parameter
//! 6 at mode + 9, and drops parameters 7–9 (see
//! [`crate::transport::OutputLayout`]).
//!
//! | USB   | Bluetooth | Field |
//! |-------|-----------|-------|
//! | 0     | 0         | report type (`0x02` / `0x31`) |
//! | –     | 1         | tag `0x02` |
//! | 1     | 2         | valid flags 0 (`0xFF`) |
//! | 2     | 3         | valid flags 1 (`0x57`; `0x5F` on the first Bluetooth packet) |
//! | 3, 4  | 4, 5      | right, left rumble motor |
//! | 9     | 10        | mic mute LED |
//! | 10    | 11        | mute (`0x10` when muted) |
//! | 11–21 | 12–18, 21 | right trigger: mode + params (BT: 0–5, 6) |
//! | 22–32 | 23–29, 32 | left trigger: mode + params (BT: 0–5, 6) |
//! | 39    | 40        | LED options |
//! | 42    | 43        | pulse options |
//! | 43    | 44        | player LED brightness |
//! | 44    | 45        | player LED pattern |
//! | 45–47 | 46–48     | lightbar R, G, B |
//! | –     | 74–77     | CRC-32, little-endian |

use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

use crate::crc::write_bluetooth_crc;
use crate::ids::{MIC_MUTE_ON, valid_flag0, valid_flag1};
use crate::transport::{BT_REPORT_LEN, OutputLayout, Transport};
use crate::trigger::TriggerEffect;
use crate::types::{Brightness, LedOptions, PlayerId, PulseOptions};
use crate::{DualSenseError, DualSenseResult};

/// Largest output report over any transport.
pub const MAX_OUTPUT_REPORT_LEN: usize = BT_REPORT_LEN;

/// Lightbar color, each channel 0.0–1.0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LightbarColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl LightbarColor {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        )
    }

    /// Channels scaled by 255 and truncated.
    pub fn to_rgb8(self) -> [u8; 3] {
        [
            scale_channel(self.r),
            scale_channel(self.g),
            scale_channel(self.b),
        ]
    }
}

/// Player-indicator LED descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerLed {
    /// 0.0–1.0, quantized by [`Brightness::from_level`].
    pub brightness: f32,
    /// Player number to display, 1–4.
    pub player_count: u8,
}

impl Default for PlayerLed {
    fn default() -> Self {
        Self {
            brightness: 0.0,
            player_count: 1,
        }
    }
}

impl PlayerLed {
    pub fn new(brightness: f32, player_count: u8) -> Self {
        Self {
            brightness,
            player_count,
        }
    }

    /// Lit-LED pattern for the player count.
    pub fn player_id(&self) -> DualSenseResult<PlayerId> {
        PlayerId::from_player_count(self.player_count)
            .ok_or(DualSenseError::InvalidPlayerCount(self.player_count))
    }

    pub fn brightness_level(&self) -> Brightness {
        Brightness::from_level(self.brightness)
    }

    pub fn led_options(&self) -> LedOptions {
        LedOptions::PlayerLedBrightness
    }

    pub fn pulse_options(&self) -> PulseOptions {
        PulseOptions::Off
    }
}

/// Snapshot of every output field for one write cycle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OutputCommand {
    /// Right (high-frequency) rumble motor, 0–255; fractions truncate.
    pub right_motor: f32,
    /// Left (low-frequency) rumble motor, 0–255; fractions truncate.
    pub left_motor: f32,
    pub microphone_led: bool,
    pub microphone_mute: bool,
    pub right_trigger: TriggerEffect,
    pub left_trigger: TriggerEffect,
    pub lightbar: LightbarColor,
    pub player_led: PlayerLed,
}

impl OutputCommand {
    pub fn with_motors(mut self, left: f32, right: f32) -> Self {
        self.left_motor = left;
        self.right_motor = right;
        self
    }

    pub fn with_triggers(mut self, left: TriggerEffect, right: TriggerEffect) -> Self {
        self.left_trigger = left;
        self.right_trigger = right;
        self
    }

    pub fn with_lightbar(mut self, color: LightbarColor) -> Self {
        self.lightbar = color;
        self
    }

    pub fn with_player_led(mut self, player_led: PlayerLed) -> Self {
        self.player_led = player_led;
        self
    }

    pub fn with_microphone(mut self, led: bool, mute: bool) -> Self {
        self.microphone_led = led;
        self.microphone_mute = mute;
        self
    }
}

/// An encoded output report; only the first `len` bytes are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputReport {
    bytes: [u8; MAX_OUTPUT_REPORT_LEN],
    len: usize,
}

impl OutputReport {
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.get(..self.len).unwrap_or(&self.bytes)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl AsRef<[u8]> for OutputReport {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Encode `command` for `transport` into `out`, returning the report length.
///
/// `bt_leds_initialized` selects whether a Bluetooth packet omits the
/// LED-release bit; USB ignores it. `out` is zeroed first, and on error it is
/// left zeroed so no partial packet can be sent.
pub fn encode_output_report(
    command: &OutputCommand,
    transport: Transport,
    bt_leds_initialized: bool,
    out: &mut [u8; MAX_OUTPUT_REPORT_LEN],
) -> DualSenseResult<usize> {
    out.fill(0);
    let player_id = command.player_led.player_id().inspect_err(|_| {
        error!(
            player_count = command.player_led.player_count,
            "refusing to encode output report with invalid player count"
        );
    })?;

    let layout = transport.output_layout();
    out[0] = transport.output_report_type();
    if let Some(tag) = layout.tag {
        out[tag] = crate::ids::report_ids::BT_OUTPUT_TAG;
    }

    out[layout.valid_flag0] = valid_flag0::ALL;
    out[layout.valid_flag1] = match transport {
        Transport::Bluetooth if !bt_leds_initialized => valid_flag1::BT_FIRST_PACKET,
        _ => valid_flag1::STEADY,
    };

    out[layout.right_motor] = truncate_u8(command.right_motor);
    out[layout.left_motor] = truncate_u8(command.left_motor);

    out[layout.mic_led] = u8::from(command.microphone_led);
    out[layout.mic_mute] = if command.microphone_mute { MIC_MUTE_ON } else { 0 };

    write_trigger(out, layout, layout.right_trigger, &command.right_trigger);
    write_trigger(out, layout, layout.left_trigger, &command.left_trigger);

    out[layout.led_options] = command.player_led.led_options() as u8;
    out[layout.pulse_options] = command.player_led.pulse_options() as u8;
    out[layout.led_brightness] = command.player_led.brightness_level() as u8;
    out[layout.player_id] = player_id as u8;
    let [r, g, b] = command.lightbar.to_rgb8();
    out[layout.lightbar_rgb] = r;
    out[layout.lightbar_rgb + 1] = g;
    out[layout.lightbar_rgb + 2] = b;

    if transport.has_checksum() {
        write_bluetooth_crc(out);
    }

    let len = transport.output_report_len();
    trace!(%transport, len, "encoded output report");
    Ok(len)
}

/// Output encoder for one controller connection.
///
/// Owns the one-shot Bluetooth LED flag: it is set by the first successful
/// Bluetooth encode and stays set until [`OutputSession::reset`] (call it on
/// reconnection). Not synchronized; use one session per connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSession {
    transport: Transport,
    bt_leds_initialized: bool,
}

impl OutputSession {
    pub fn new(transport: Transport) -> Self {
        Self {
            transport,
            bt_leds_initialized: false,
        }
    }

    pub fn transport(&self) -> Transport {
        self.transport
    }

    /// Whether the LED-release packet has already been produced.
    pub fn leds_initialized(&self) -> bool {
        self.bt_leds_initialized
    }

    /// Forget the LED flag, e.g. after the controller reconnects.
    pub fn reset(&mut self) {
        self.bt_leds_initialized = false;
    }

    /// Encode into a caller-provided buffer, returning the report length.
    pub fn encode_into(
        &mut self,
        command: &OutputCommand,
        out: &mut [u8; MAX_OUTPUT_REPORT_LEN],
    ) -> DualSenseResult<usize> {
        let len = encode_output_report(command, self.transport, self.bt_leds_initialized, out)?;
        if self.transport == Transport::Bluetooth && !self.bt_leds_initialized {
            debug!("bluetooth LED block released for this connection");
            self.bt_leds_initialized = true;
        }
        Ok(len)
    }

    pub fn encode(&mut self, command: &OutputCommand) -> DualSenseResult<OutputReport> {
        let mut bytes = [0u8; MAX_OUTPUT_REPORT_LEN];
        let len = self.encode_into(command, &mut bytes)?;
        Ok(OutputReport { bytes, len })
    }
}

fn write_trigger(
    out: &mut [u8; MAX_OUTPUT_REPORT_LEN],
    layout: &OutputLayout,
    offset: usize,
    effect: &TriggerEffect,
) {
    out[offset] = effect.mode.to_byte();
    for (slot, &value) in layout.trigger_params.iter().zip(&effect.params) {
        if let Some(byte) = slot.and_then(|rel| out.get_mut(offset + rel)) {
            *byte = value;
        }
    }
}

/// Truncate toward zero and saturate to 0–255; NaN maps to 0.
fn truncate_u8(value: f32) -> u8 {
    value as u8
}

fn scale_channel(channel: f32) -> u8 {
    truncate_u8(channel * 255.0)
}
