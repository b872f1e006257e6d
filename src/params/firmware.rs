// src/params/firmware.rs
//
// EPS firmware gates. Versions are part-number tokens ordered byte-wise
// over a fixed-width prefix. A version shorter than the prefix compares
// on what it has, which orders it before any longer token sharing it.

use crate::types::FirmwareRecord;

/// Width of the part-number prefix used for every firmware gate.
pub const VERSION_PREFIX_LEN: usize = 4;

/// First EPS firmware that raised the minimum steering speed.
pub const NEW_EPS_FIRMWARE_MIN: &[u8] = b"6841";

/// Older RAM 1500 racks in `("68", "6831"]` can steer down to zero speed.
pub const STEER_TO_ZERO_LOWER_EXCLUSIVE: &[u8] = b"68";
pub const STEER_TO_ZERO_UPPER_INCLUSIVE: &[u8] = b"6831";

pub fn version_prefix(version: &[u8]) -> &[u8] {
    &version[..version.len().min(VERSION_PREFIX_LEN)]
}

fn eps_prefixes(car_fw: &[FirmwareRecord]) -> impl Iterator<Item = &[u8]> {
    car_fw
        .iter()
        .filter(|fw| fw.is_eps())
        .map(|fw| version_prefix(&fw.version))
}

/// Any EPS unit at or beyond `6841`.
pub fn has_new_eps_firmware(car_fw: &[FirmwareRecord]) -> bool {
    eps_prefixes(car_fw).any(|prefix| prefix >= NEW_EPS_FIRMWARE_MIN)
}

/// Any EPS unit in the steer-to-zero window.
pub fn allows_steer_to_zero(car_fw: &[FirmwareRecord]) -> bool {
    eps_prefixes(car_fw).any(|prefix| {
        prefix > STEER_TO_ZERO_LOWER_EXCLUSIVE && prefix <= STEER_TO_ZERO_UPPER_INCLUSIVE
    })
}
