/// CRC32 for the WOZ header checksum field
///
/// IEEE 802.3 polynomial in reflected form, initial value all ones, final
/// complement. The WOZ checksum covers everything after the first 12 bytes.

use crate::format::constants::{CRC_OFFSET, CRC_START};

const POLYNOMIAL: u32 = 0xEDB8_8320;

static CRC32_TABLE: [u32; 256] = build_table();

const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ POLYNOMIAL
            } else {
                crc >> 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Compute the CRC32 of a buffer
pub fn crc32(data: &[u8]) -> u32 {
    let mut crc = !0u32;
    for &byte in data {
        crc = CRC32_TABLE[((crc ^ byte as u32) & 0xFF) as usize] ^ (crc >> 8);
    }
    !crc
}

/// CRC32 over the image body, excluding the magic and the checksum field
pub fn image_crc(image: &[u8]) -> u32 {
    crc32(&image[CRC_START..])
}

/// Recompute the body CRC and store it little-endian in bytes 8..12
pub fn update(image: &mut [u8]) -> u32 {
    let crc = image_crc(image);
    image[CRC_OFFSET..CRC_OFFSET + 4].copy_from_slice(&crc.to_le_bytes());
    crc
}

/// Check the stored CRC against a fresh one
pub fn verify(image: &[u8]) -> bool {
    stored(image) == image_crc(image)
}

/// CRC currently stored in the header
pub fn stored(image: &[u8]) -> u32 {
    u32::from_le_bytes([
        image[CRC_OFFSET],
        image[CRC_OFFSET + 1],
        image[CRC_OFFSET + 2],
        image[CRC_OFFSET + 3],
    ])
}
