//! DualSense USB IDs, report IDs, and output feature-flag bits.
//!
//! Cross-referenced against the Linux kernel driver
//! `drivers/hid/hid-playstation.c` (`DS_OUTPUT_VALID_FLAG*`,
//! `DS_INPUT_REPORT_*`, `DS_OUTPUT_REPORT_*`).

/// Sony Interactive Entertainment USB vendor ID.
pub const SONY_VENDOR_ID: u16 = 0x054C;

/// Product IDs for DualSense-family controllers.
pub mod product_ids {
    /// DualSense wireless controller (CFI-ZCT1).
    pub const DUALSENSE: u16 = 0x0CE6;
    /// DualSense Edge wireless controller (CFI-ZCP1).
    pub const DUALSENSE_EDGE: u16 = 0x0DF2;
}

/// Return `true` if the VID/PID pair identifies a DualSense-family controller.
pub fn is_dualsense_device(vendor_id: u16, product_id: u16) -> bool {
    vendor_id == SONY_VENDOR_ID
        && matches!(
            product_id,
            product_ids::DUALSENSE | product_ids::DUALSENSE_EDGE
        )
}

/// Report IDs on the wire.
pub mod report_ids {
    /// USB input report.
    pub const USB_INPUT: u8 = 0x01;
    /// Bluetooth full input report.
    pub const BT_INPUT: u8 = 0x31;
    /// USB output report.
    pub const USB_OUTPUT: u8 = 0x02;
    /// Bluetooth output report.
    pub const BT_OUTPUT: u8 = 0x31;
    /// Byte 1 of every Bluetooth output report (sequence 0, HID tag set).
    pub const BT_OUTPUT_TAG: u8 = 0x02;
}

/// First feature-flag byte: which motor/trigger/audio blocks this packet updates.
pub mod valid_flag0 {
    /// Compatible vibration (rumble emulation); pairs with `HAPTICS_SELECT`.
    pub const COMPATIBLE_VIBRATION: u8 = 0x01;
    /// Select rumble motors over audio haptics.
    pub const HAPTICS_SELECT: u8 = 0x02;
    /// Apply the right trigger effect block.
    pub const RIGHT_TRIGGER: u8 = 0x04;
    /// Apply the left trigger effect block.
    pub const LEFT_TRIGGER: u8 = 0x08;
    /// Headphone volume.
    pub const AUDIO_VOLUME: u8 = 0x10;
    /// Internal speaker toggle while a headset is connected.
    pub const SPEAKER_TOGGLE: u8 = 0x20;
    /// Microphone volume.
    pub const MIC_VOLUME: u8 = 0x40;
    /// Every update bit, written on each cycle.
    pub const ALL: u8 = 0xFF;
}

/// Second feature-flag byte: LED, mute, and power updates.
pub mod valid_flag1 {
    /// Microphone mute LED.
    pub const MIC_MUTE_LED: u8 = 0x01;
    /// Audio/microphone mute.
    pub const AUDIO_MUTE: u8 = 0x02;
    /// Lightbar (touchpad side LED strips) color.
    pub const LIGHTBAR: u8 = 0x04;
    /// Release the LED block from firmware control. Bluetooth needs this
    /// exactly once per connection before the lightbar follows commands.
    pub const RELEASE_LEDS: u8 = 0x08;
    /// White player-indicator LEDs below the touchpad.
    pub const PLAYER_INDICATOR: u8 = 0x10;
    /// Overall motor/effect power reduction.
    pub const MOTOR_POWER: u8 = 0x40;

    /// Flags written on every steady-state packet.
    pub const STEADY: u8 = MIC_MUTE_LED | AUDIO_MUTE | LIGHTBAR | PLAYER_INDICATOR | MOTOR_POWER;
    /// Flags written on the first Bluetooth packet of a connection.
    pub const BT_FIRST_PACKET: u8 = STEADY | RELEASE_LEDS;
}

/// Value written to the mute byte when the microphone is muted.
pub const MIC_MUTE_ON: u8 = 0x10;
