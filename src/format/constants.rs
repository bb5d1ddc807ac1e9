/// WOZ1 layout constants and disk field markers

/// WOZ1 file signature: "WOZ1" followed by the 0xFF high-bit check and LF CR LF
pub const WOZ1_SIGNATURE: &[u8] = b"WOZ1\xFF\n\r\n";

/// Size of the container header preceding the track regions
pub const HEADER_SIZE: usize = 256;

/// Number of tracks stored in a WOZ1 image
pub const TRACK_COUNT: usize = 35;

/// Highest valid track number
pub const MAX_TRACK: usize = TRACK_COUNT - 1;

/// Size of one track region in bytes
pub const TRACK_SIZE: usize = 6656;

/// Size of one track region in bits
pub const TRACK_BITS: usize = TRACK_SIZE * 8;

/// Total size of a WOZ1 image
pub const IMAGE_SIZE: usize = HEADER_SIZE + TRACK_COUNT * TRACK_SIZE;

/// Offset of the little-endian CRC32 field
pub const CRC_OFFSET: usize = 8;

/// First byte covered by the CRC32
pub const CRC_START: usize = 12;

/// Volume number written into every standard address field
pub const DEFAULT_VOLUME: u8 = 254;

/// Address field prologue
pub const ADDRESS_PROLOGUE: [u8; 3] = [0xD5, 0xAA, 0x96];

/// Data field prologue
pub const DATA_PROLOGUE: [u8; 3] = [0xD5, 0xAA, 0xAD];

/// Address and data field epilogue
pub const EPILOGUE: [u8; 3] = [0xDE, 0xAA, 0xEB];

/// Self-sync byte
pub const SYNC_BYTE: u8 = 0xFF;

/// Bits taken by one sync word: the sync byte plus two zero bits
pub const SYNC_BITS: usize = 10;

/// Byte offset of a track region within the image
#[inline]
pub fn track_offset(track: usize) -> usize {
    HEADER_SIZE + track * TRACK_SIZE
}
