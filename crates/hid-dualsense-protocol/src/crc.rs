//! Bluetooth CRC-32 trailer.
//!
//! Bluetooth reports end with a little-endian CRC-32 (IEEE, reflected,
//! init and xor-out `0xFFFFFFFF`) computed over a one-byte HID transaction
//! header followed by the report bytes that precede the trailer. The header
//! is `0xA2` (DATA | OUTPUT) for host-to-device reports and `0xA1`
//! (DATA | INPUT) for device-to-host reports, matching
//! `hid-playstation.c` (`PS_OUTPUT_CRC32_SEED`, `PS_INPUT_CRC32_SEED`).

use crc32fast::Hasher;

use crate::transport::BT_REPORT_LEN;

/// Transaction header hashed ahead of an output report.
pub const BT_OUTPUT_CRC_SEED: u8 = 0xA2;
/// Transaction header hashed ahead of an input report.
pub const BT_INPUT_CRC_SEED: u8 = 0xA1;
/// Offset of the 4-byte trailer in a Bluetooth report.
pub const BT_CRC_OFFSET: usize = BT_REPORT_LEN - BT_CRC_LEN;
/// Trailer width in bytes.
pub const BT_CRC_LEN: usize = 4;

/// CRC-32 of `seed` followed by `data`.
pub fn seeded_crc32(seed: u8, data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[seed]);
    hasher.update(data);
    hasher.finalize()
}

/// Checksum of a Bluetooth output report; trailer bytes are not hashed.
pub fn bluetooth_output_crc(report: &[u8; BT_REPORT_LEN]) -> u32 {
    seeded_crc32(BT_OUTPUT_CRC_SEED, &report[..BT_CRC_OFFSET])
}

/// Compute the output checksum and store it little-endian in bytes 74–77.
pub fn write_bluetooth_crc(report: &mut [u8; BT_REPORT_LEN]) -> u32 {
    let crc = bluetooth_output_crc(report);
    report[BT_CRC_OFFSET..].copy_from_slice(&crc.to_le_bytes());
    crc
}

/// Check the trailer of a 78-byte Bluetooth input report.
///
/// Returns `false` for any other length.
pub fn verify_bluetooth_input_crc(report: &[u8]) -> bool {
    let Ok(report) = <&[u8; BT_REPORT_LEN]>::try_from(report) else {
        return false;
    };
    let (body, trailer) = report.split_at(BT_CRC_OFFSET);
    let expected = u32::from_le_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
    seeded_crc32(BT_INPUT_CRC_SEED, body) == expected
}
