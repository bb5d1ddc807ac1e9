/// Bit-level track writing and GCR encodings

/// MSB-first bit writer
pub mod bits;
/// 6-and-2 and 4-and-4 encodings
pub mod gcr;

pub use bits::{
    clear_bits, read_bit, read_byte, write_4_and_4, write_bit, write_byte, write_byte_prologue,
    write_sync, BitWriter,
};
pub use gcr::{
    decode_4_and_4, decode_6_and_2_128, decode_6_and_2_256, encode_4_and_4, encode_6_and_2_128,
    encode_6_and_2_256, SIX_AND_TWO_MAPPING,
};
