/// MSB-first bit packing over a track buffer
///
/// Positions are bit offsets from the start of the buffer. The first bit of a
/// buffer is the MSB of byte 0, the eighth bit is the LSB of byte 0, and so on.
/// Writes only OR bits into place, so a span must be cleared before it is
/// rewritten.

use crate::format::constants::{SYNC_BITS, SYNC_BYTE};
use crate::nibble::gcr::encode_4_and_4;

/// Write a single bit, returning the position after it
#[inline]
pub fn write_bit(buffer: &mut [u8], position: usize, bit: bool) -> usize {
    if bit {
        buffer[position >> 3] |= 0x80 >> (position & 7);
    }
    position + 1
}

/// Write a byte at any bit alignment, returning the position after it
///
/// Touches at most two underlying bytes.
#[inline]
pub fn write_byte(buffer: &mut [u8], position: usize, value: u8) -> usize {
    let shift = position & 7;
    let byte_position = position >> 3;

    buffer[byte_position] |= value >> shift;
    if shift != 0 {
        buffer[byte_position + 1] |= value << (8 - shift);
    }

    position + 8
}

/// Write a prologue byte, patching reserved values in the first byte touched
///
/// After the write, if the first underlying byte reads 0x0D it becomes 0xCD,
/// and 0x03 becomes 0xF3. Only the first byte is inspected; a pattern that is
/// completed by a later write to the second byte is left alone.
pub fn write_byte_prologue(buffer: &mut [u8], position: usize, value: u8) -> usize {
    let next = write_byte(buffer, position, value);
    let byte_position = position >> 3;

    match buffer[byte_position] {
        0x0D => buffer[byte_position] = 0xCD,
        0x03 => buffer[byte_position] = 0xF3,
        _ => {}
    }

    next
}

/// Write a byte in 4-and-4 encoding (two bytes on disk)
pub fn write_4_and_4(buffer: &mut [u8], position: usize, value: u8) -> usize {
    let [high, low] = encode_4_and_4(value);
    let position = write_byte(buffer, position, high);
    write_byte(buffer, position, low)
}

/// Write a self-sync word: 0xFF followed by two zero bits
pub fn write_sync(buffer: &mut [u8], position: usize) -> usize {
    let position = write_byte(buffer, position, SYNC_BYTE);
    position + (SYNC_BITS - 8)
}

/// Clear `count` bits starting at `position`
pub fn clear_bits(buffer: &mut [u8], position: usize, count: usize) {
    let end = position + count;
    let mut bit = position;
    while bit < end {
        if bit & 7 == 0 && end - bit >= 8 {
            buffer[bit >> 3] = 0;
            bit += 8;
        } else {
            buffer[bit >> 3] &= !(0x80 >> (bit & 7));
            bit += 1;
        }
    }
}

/// Read a single bit
#[inline]
pub fn read_bit(buffer: &[u8], position: usize) -> bool {
    buffer[position >> 3] & (0x80 >> (position & 7)) != 0
}

/// Read eight bits starting at any bit alignment
#[inline]
pub fn read_byte(buffer: &[u8], position: usize) -> u8 {
    let shift = position & 7;
    let byte_position = position >> 3;

    if shift == 0 {
        buffer[byte_position]
    } else {
        (buffer[byte_position] << shift) | (buffer[byte_position + 1] >> (8 - shift))
    }
}

/// Cursor that appends to a buffer from a starting bit position
pub struct BitWriter<'a> {
    buffer: &'a mut [u8],
    position: usize,
}

impl<'a> BitWriter<'a> {
    /// Create a writer positioned at `position`
    pub fn new(buffer: &'a mut [u8], position: usize) -> Self {
        Self { buffer, position }
    }

    /// Current bit position
    pub fn position(&self) -> usize {
        self.position
    }

    /// Append plain bytes
    pub fn bytes(&mut self, values: &[u8]) {
        for &value in values {
            self.position = write_byte(self.buffer, self.position, value);
        }
    }

    /// Append prologue bytes with reserved-value patching
    pub fn prologue(&mut self, values: &[u8]) {
        for &value in values {
            self.position = write_byte_prologue(self.buffer, self.position, value);
        }
    }

    /// Append 4-and-4 encoded values
    pub fn four_and_four(&mut self, values: &[u8]) {
        for &value in values {
            self.position = write_4_and_4(self.buffer, self.position, value);
        }
    }

    /// Append `count` sync words
    pub fn syncs(&mut self, count: usize) {
        for _ in 0..count {
            self.position = write_sync(self.buffer, self.position);
        }
    }
}
