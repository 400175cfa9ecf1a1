//! Cross-reference tests for DualSense VID/PID and report-ID constants
//! against the values used by the Linux `hid-playstation` driver.
//!
//! If any assertion fails, the constant in `ids.rs` has drifted from the
//! hardware; fix the constant, not the test.

use hid_dualsense_protocol::ids::{MIC_MUTE_ON, report_ids, valid_flag0, valid_flag1};
use hid_dualsense_protocol::{SONY_VENDOR_ID, Transport, is_dualsense_device, product_ids};

#[test]
fn vendor_id_is_054c() {
    assert_eq!(SONY_VENDOR_ID, 0x054C, "Sony VID changed, check ids.rs");
}

#[test]
fn dualsense_pid_is_0ce6() {
    assert_eq!(product_ids::DUALSENSE, 0x0CE6);
}

#[test]
fn dualsense_edge_pid_is_0df2() {
    assert_eq!(product_ids::DUALSENSE_EDGE, 0x0DF2);
}

#[test]
fn both_controllers_are_recognized() {
    assert!(is_dualsense_device(0x054C, 0x0CE6));
    assert!(is_dualsense_device(0x054C, 0x0DF2));
}

#[test]
fn other_sony_devices_are_not_recognized() {
    // DualShock 4 v1 and v2.
    assert!(!is_dualsense_device(0x054C, 0x05C4));
    assert!(!is_dualsense_device(0x054C, 0x09CC));
    assert!(!is_dualsense_device(0x046D, 0x0CE6));
}

// ── Report IDs ───────────────────────────────────────────────────────────────

#[test]
fn report_ids_match_driver() {
    assert_eq!(report_ids::USB_INPUT, 0x01);
    assert_eq!(report_ids::BT_INPUT, 0x31);
    assert_eq!(report_ids::USB_OUTPUT, 0x02);
    assert_eq!(report_ids::BT_OUTPUT, 0x31);
    assert_eq!(report_ids::BT_OUTPUT_TAG, 0x02);
}

#[test]
fn transport_output_type_matches_report_ids() {
    assert_eq!(Transport::Usb.output_report_type(), report_ids::USB_OUTPUT);
    assert_eq!(Transport::Bluetooth.output_report_type(), report_ids::BT_OUTPUT);
}

// ── Feature flags ────────────────────────────────────────────────────────────

#[test]
fn steady_flag1_is_0x57() {
    assert_eq!(valid_flag1::STEADY, 0x57);
}

#[test]
fn first_bluetooth_flag1_is_0x5f() {
    assert_eq!(valid_flag1::BT_FIRST_PACKET, 0x5F);
    assert_eq!(
        valid_flag1::BT_FIRST_PACKET ^ valid_flag1::STEADY,
        valid_flag1::RELEASE_LEDS
    );
}

#[test]
fn flag0_enables_everything() {
    assert_eq!(valid_flag0::ALL, 0xFF);
    assert_eq!(valid_flag0::RIGHT_TRIGGER, 0x04);
    assert_eq!(valid_flag0::LEFT_TRIGGER, 0x08);
}

#[test]
fn mute_byte_is_0x10() {
    assert_eq!(MIC_MUTE_ON, 0x10);
}
