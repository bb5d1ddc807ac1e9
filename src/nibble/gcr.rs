/// Apple 6-and-2 and 4-and-4 group coded recording
///
/// A 6-and-2 data field starts with the low two bits of every source byte,
/// three to a disk byte, followed by the high six bits of each source byte and a
/// trailing checksum entry. Every entry is XORed with its predecessor before
/// being mapped through the 64-entry disk nibble alphabet, so XOR-folding the
/// decoded values recovers the plaintext and checks the field in one pass.

use crate::error::{Result, WozError};

/// Disk-safe byte for each 6-bit value
pub const SIX_AND_TWO_MAPPING: [u8; 64] = [
    0x96, 0x97, 0x9A, 0x9B, 0x9D, 0x9E, 0x9F, 0xA6,
    0xA7, 0xAB, 0xAC, 0xAD, 0xAE, 0xAF, 0xB2, 0xB3,
    0xB4, 0xB5, 0xB6, 0xB7, 0xB9, 0xBA, 0xBB, 0xBC,
    0xBD, 0xBE, 0xBF, 0xCB, 0xCD, 0xCE, 0xCF, 0xD3,
    0xD6, 0xD7, 0xD9, 0xDA, 0xDB, 0xDC, 0xDD, 0xDE,
    0xDF, 0xE5, 0xE6, 0xE7, 0xE9, 0xEA, 0xEB, 0xEC,
    0xED, 0xEE, 0xEF, 0xF2, 0xF3, 0xF4, 0xF5, 0xF6,
    0xF7, 0xF9, 0xFA, 0xFB, 0xFC, 0xFD, 0xFE, 0xFF,
];

const INVALID_NIBBLE: u8 = 0xFF;

/// 6-bit value for each disk byte, `INVALID_NIBBLE` outside the alphabet
const SIX_AND_TWO_UNMAPPING: [u8; 256] = build_unmapping();

const fn build_unmapping() -> [u8; 256] {
    let mut table = [INVALID_NIBBLE; 256];
    let mut i = 0;
    while i < SIX_AND_TWO_MAPPING.len() {
        table[SIX_AND_TWO_MAPPING[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Swaps the two bits of a 2-bit value; its own inverse
const BIT_REVERSE: [u8; 4] = [0, 2, 1, 3];

/// Length of the low-bits block for a sector of `sector_size` bytes
fn low_block_len(sector_size: usize) -> usize {
    sector_size.div_ceil(3)
}

fn encode_into(src: &[u8], dest: &mut [u8]) {
    let low = low_block_len(src.len());
    debug_assert_eq!(dest.len(), low + src.len() + 1);

    // Entry c gathers bytes c, c + low and c + 2 * low; the last entries may
    // have only two sources.
    for (c, entry) in dest[..low].iter_mut().enumerate() {
        let mut value = 0;
        for group in 0..3 {
            if let Some(&byte) = src.get(c + group * low) {
                value |= BIT_REVERSE[(byte & 3) as usize] << (group * 2);
            }
        }
        *entry = value;
    }

    for (entry, &byte) in dest[low..].iter_mut().zip(src) {
        *entry = byte >> 2;
    }

    let last = dest.len() - 1;
    dest[last] = dest[last - 1];
    for location in (1..last).rev() {
        dest[location] ^= dest[location - 1];
    }

    for entry in dest.iter_mut() {
        *entry = SIX_AND_TWO_MAPPING[*entry as usize];
    }
}

fn decode_into(encoded: &[u8], dest: &mut [u8]) -> Result<()> {
    let low = low_block_len(dest.len());
    debug_assert_eq!(encoded.len(), low + dest.len() + 1);

    let last = encoded.len() - 1;
    let mut values = vec![0u8; last];
    let mut checksum = 0u8;

    for (offset, &nibble) in encoded.iter().enumerate() {
        let value = SIX_AND_TWO_UNMAPPING[nibble as usize];
        if value == INVALID_NIBBLE {
            return Err(WozError::InvalidNibble {
                offset,
                value: nibble,
            });
        }
        if offset == last {
            if value != checksum {
                return Err(WozError::integrity(format!(
                    "data field checksum mismatch: expected 0x{:02X}, found 0x{:02X}",
                    checksum, value
                )));
            }
        } else {
            checksum ^= value;
            values[offset] = checksum;
        }
    }

    for (i, byte) in dest.iter_mut().enumerate() {
        let pair = (values[i % low] >> ((i / low) * 2)) & 3;
        *byte = (values[low + i] << 2) | BIT_REVERSE[pair as usize];
    }

    Ok(())
}

/// Encode a 256-byte sector into its 343-byte data field payload
pub fn encode_6_and_2_256(src: &[u8; 256]) -> [u8; 343] {
    let mut dest = [0u8; 343];
    encode_into(src, &mut dest);
    dest
}

/// Encode a 128-byte sector into its 172-byte data field payload
pub fn encode_6_and_2_128(src: &[u8; 128]) -> [u8; 172] {
    let mut dest = [0u8; 172];
    encode_into(src, &mut dest);
    dest
}

/// Decode a 343-byte data field payload, verifying its checksum
pub fn decode_6_and_2_256(encoded: &[u8; 343]) -> Result<[u8; 256]> {
    let mut dest = [0u8; 256];
    decode_into(encoded, &mut dest)?;
    Ok(dest)
}

/// Decode a 172-byte data field payload, verifying its checksum
pub fn decode_6_and_2_128(encoded: &[u8; 172]) -> Result<[u8; 128]> {
    let mut dest = [0u8; 128];
    decode_into(encoded, &mut dest)?;
    Ok(dest)
}

/// Split a byte into its 4-and-4 disk pair: odd bits first, then even bits
#[inline]
pub fn encode_4_and_4(value: u8) -> [u8; 2] {
    [(value >> 1) | 0xAA, value | 0xAA]
}

/// Recombine a 4-and-4 disk pair
#[inline]
pub fn decode_4_and_4(high: u8, low: u8) -> u8 {
    ((high << 1) | 1) & low
}
