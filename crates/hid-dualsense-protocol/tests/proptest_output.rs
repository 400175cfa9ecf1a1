//! Property-based tests for output report encoding and trigger generators.

use hid_dualsense_protocol::crc::{BT_CRC_OFFSET, bluetooth_output_crc};
use hid_dualsense_protocol::{
    DualSenseError, LightbarColor, MAX_OUTPUT_REPORT_LEN, OutputCommand, OutputSession, PlayerLed,
    Transport, TriggerEffect, TriggerEffectSpec, TriggerMode, TriggerPolicy, encode_output_report,
};
use proptest::prelude::*;

fn arb_transport() -> impl Strategy<Value = Transport> {
    prop_oneof![Just(Transport::Usb), Just(Transport::Bluetooth)]
}

fn arb_effect() -> impl Strategy<Value = TriggerEffect> {
    (any::<u8>(), any::<[u8; 10]>())
        .prop_map(|(mode, params)| TriggerEffect::new(TriggerMode::from_byte(mode), params))
}

prop_compose! {
    fn arb_command()(
        right_motor in -10.0f32..300.0,
        left_motor in -10.0f32..300.0,
        microphone_led in any::<bool>(),
        microphone_mute in any::<bool>(),
        right_trigger in arb_effect(),
        left_trigger in arb_effect(),
        r in 0.0f32..=1.0,
        g in 0.0f32..=1.0,
        b in 0.0f32..=1.0,
        brightness in 0.0f32..=1.0,
        player_count in 1u8..=4,
    ) -> OutputCommand {
        OutputCommand {
            right_motor,
            left_motor,
            microphone_led,
            microphone_mute,
            right_trigger,
            left_trigger,
            lightbar: LightbarColor::new(r, g, b),
            player_led: PlayerLed::new(brightness, player_count),
        }
    }
}

// ── Report structure ─────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_report_length_and_header(command in arb_command(), transport in arb_transport()) {
        let report = OutputSession::new(transport)
            .encode(&command)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let bytes = report.as_bytes();
        match transport {
            Transport::Usb => {
                prop_assert_eq!(bytes.len(), 64);
                prop_assert_eq!(bytes[0], 0x02);
                prop_assert_eq!(bytes[1], 0xFF);
            }
            Transport::Bluetooth => {
                prop_assert_eq!(bytes.len(), 78);
                prop_assert_eq!(bytes[0], 0x31);
                prop_assert_eq!(bytes[1], 0x02);
                prop_assert_eq!(bytes[2], 0xFF);
            }
        }
    }

    /// The LED-release bit appears on the first Bluetooth packet only.
    #[test]
    fn prop_led_release_bit_one_shot(
        commands in proptest::collection::vec(arb_command(), 1..8),
    ) {
        let mut session = OutputSession::new(Transport::Bluetooth);
        for (i, command) in commands.iter().enumerate() {
            let report = session.encode(command).map_err(|e| TestCaseError::fail(e.to_string()))?;
            let expected = if i == 0 { 0x5F } else { 0x57 };
            prop_assert_eq!(report.as_bytes()[3], expected, "packet {}", i);
        }
    }

    /// The trailer always matches the body it follows.
    #[test]
    fn prop_bluetooth_trailer_valid(command in arb_command(), initialized in any::<bool>()) {
        let mut out = [0u8; MAX_OUTPUT_REPORT_LEN];
        let len = encode_output_report(&command, Transport::Bluetooth, initialized, &mut out)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(len, 78);
        let crc = bluetooth_output_crc(&out);
        prop_assert_eq!(&out[BT_CRC_OFFSET..], &crc.to_le_bytes()[..]);
    }

    /// Corrupting any body byte invalidates the stored trailer.
    #[test]
    fn prop_bluetooth_trailer_detects_corruption(
        command in arb_command(),
        index in 0usize..BT_CRC_OFFSET,
        flip in 1u8..=255,
    ) {
        let mut out = [0u8; MAX_OUTPUT_REPORT_LEN];
        encode_output_report(&command, Transport::Bluetooth, true, &mut out)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let stored = u32::from_le_bytes([out[74], out[75], out[76], out[77]]);
        out[index] ^= flip;
        prop_assert_ne!(bluetooth_output_crc(&out), stored);
    }

    /// Scalar fields sit one byte later on Bluetooth; trigger blocks carry
    /// parameters 0-5 and 6 only.
    #[test]
    fn prop_bluetooth_layout_follows_usb(command in arb_command()) {
        let mut usb = [0u8; MAX_OUTPUT_REPORT_LEN];
        let mut bt = [0u8; MAX_OUTPUT_REPORT_LEN];
        encode_output_report(&command, Transport::Usb, true, &mut usb)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        encode_output_report(&command, Transport::Bluetooth, true, &mut bt)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        prop_assert_eq!(&usb[1..11], &bt[2..12]);
        prop_assert_eq!(&usb[33..63], &bt[34..64]);

        for (usb_mode, bt_mode) in [(11usize, 12usize), (22, 23)] {
            prop_assert_eq!(bt[bt_mode], usb[usb_mode]);
            prop_assert_eq!(&bt[bt_mode + 1..bt_mode + 7], &usb[usb_mode + 1..usb_mode + 7]);
            prop_assert_eq!(bt[bt_mode + 9], usb[usb_mode + 7]);
            prop_assert_eq!(bt[bt_mode + 7], 0);
            prop_assert_eq!(bt[bt_mode + 8], 0);
            prop_assert_eq!(bt[bt_mode + 10], 0);
        }
    }

    #[test]
    fn prop_invalid_player_count_rejected(
        command in arb_command(),
        count in prop_oneof![Just(0u8), 5u8..=255],
        transport in arb_transport(),
    ) {
        let command = OutputCommand {
            player_led: PlayerLed::new(command.player_led.brightness, count),
            ..command
        };
        let mut session = OutputSession::new(transport);
        prop_assert_eq!(session.encode(&command), Err(DualSenseError::InvalidPlayerCount(count)));
        prop_assert!(!session.leds_initialized());
    }
}

// ── Trigger generators ───────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Clamped feedback marks zones position..=9 and only those.
    #[test]
    fn prop_feedback_mask_matches_position(position in any::<u8>(), strength in any::<u8>()) {
        let effect = TriggerEffect::feedback(position, strength);
        let first = position.min(9);
        let expected: u16 = (first..10).fold(0, |m, z| m | (1 << z));
        prop_assert_eq!(effect.mode, TriggerMode::Feedback);
        prop_assert_eq!(effect.zone_mask(), expected);
        prop_assert!(effect.params[6..].iter().all(|&b| b == 0));
    }

    /// Weapon always has exactly two zone bits with start < end.
    #[test]
    fn prop_weapon_two_zone_bits(start in any::<u8>(), end in any::<u8>(), strength in any::<u8>()) {
        let effect = TriggerEffect::weapon(start, end, strength);
        let mask = effect.zone_mask();
        prop_assert_eq!(mask.count_ones(), 2);
        let low = mask.trailing_zeros();
        let high = 15 - mask.leading_zeros();
        prop_assert!((2..=7).contains(&low));
        prop_assert!(high > low && high <= 8);
        prop_assert!(effect.params[2] <= 7);
    }

    #[test]
    fn prop_vibration_frequency_nonzero(
        position in any::<u8>(),
        amplitude in any::<u8>(),
        frequency in any::<u8>(),
    ) {
        let effect = TriggerEffect::vibration(position, amplitude, frequency);
        prop_assert_eq!(effect.mode, TriggerMode::Vibration);
        prop_assert!(effect.params[8] >= 1);
        prop_assert_eq!(effect.params[9], 0);
    }

    /// Strict generation succeeds exactly when clamping would not alter the inputs.
    #[test]
    fn prop_strict_agrees_with_clamp_in_range(position in any::<u8>(), strength in any::<u8>()) {
        let spec = TriggerEffectSpec::Feedback { position, strength };
        let strict = TriggerEffect::generate(TriggerPolicy::Strict, spec);
        let clamped = TriggerEffect::generate(TriggerPolicy::Clamp, spec);
        let in_range = position <= 9 && (1..=8).contains(&strength);
        prop_assert_eq!(strict.is_some(), in_range);
        prop_assert!(clamped.is_some());
        if in_range {
            prop_assert_eq!(strict, clamped);
        }
    }
}
