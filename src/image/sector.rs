/// Physical sector records: serialization and read-back

use crate::error::{Result, WozError};
use crate::format::constants::{
    ADDRESS_PROLOGUE, DATA_PROLOGUE, DEFAULT_VOLUME, EPILOGUE, SYNC_BITS,
};
use crate::format::Geometry;
use crate::nibble::{
    clear_bits, decode_4_and_4, decode_6_and_2_128, decode_6_and_2_256, encode_6_and_2_128,
    encode_6_and_2_256, read_byte, BitWriter,
};
use log::info;

/// Per-field trace of a sector being written
struct FieldTrace {
    enabled: bool,
    geometry: Geometry,
    track: u8,
    sector: u8,
}

impl FieldTrace {
    fn field<'a, F>(&self, writer: &mut BitWriter<'a>, name: &str, write: F)
    where
        F: FnOnce(&mut BitWriter<'a>),
    {
        let start = writer.position();
        write(writer);
        if self.enabled {
            let end = writer.position();
            info!(
                "Track {} ({}) / Sector {} - {}: bit {} (0x{:X}) - bit {} (0x{:X})",
                self.track,
                self.geometry.name(),
                self.sector,
                name,
                start,
                start >> 3,
                end,
                end >> 3
            );
        }
    }
}

/// Address field values in 4-and-4 order for a geometry
fn address_fields(geometry: Geometry, track: u8, sector: u8) -> Vec<u8> {
    match geometry {
        Geometry::Standard => vec![
            DEFAULT_VOLUME,
            track,
            sector,
            DEFAULT_VOLUME ^ track ^ sector,
        ],
        Geometry::Custom => vec![sector],
    }
}

fn serialize(
    geometry: Geometry,
    track_bits: &mut [u8],
    payload: &[u8],
    bit_offset: usize,
    sector: u8,
    track: u8,
    verbose: bool,
) -> usize {
    clear_bits(track_bits, bit_offset, geometry.sector_bits());

    let trace = FieldTrace {
        enabled: verbose,
        geometry,
        track,
        sector,
    };
    let mut writer = BitWriter::new(track_bits, bit_offset);

    trace.field(&mut writer, "Header Prologue", |w| w.prologue(&ADDRESS_PROLOGUE));
    trace.field(&mut writer, "Header Infos", |w| {
        w.four_and_four(&address_fields(geometry, track, sector))
    });
    if geometry.has_epilogues() {
        trace.field(&mut writer, "Header Epilogue", |w| w.bytes(&EPILOGUE));
    }
    trace.field(&mut writer, "Gap2", |w| w.syncs(geometry.gap2_syncs()));

    trace.field(&mut writer, "Data Prologue", |w| w.bytes(&DATA_PROLOGUE));
    trace.field(&mut writer, "Data Contents", |w| w.bytes(payload));
    if geometry.has_epilogues() {
        trace.field(&mut writer, "Data Epilogue", |w| w.bytes(&EPILOGUE));
    }
    trace.field(&mut writer, "Gap3", |w| w.syncs(geometry.gap3_syncs()));

    let end = writer.position();
    debug_assert_eq!(end - bit_offset, geometry.sector_bits());
    end
}

/// Write a 256-byte sector as a standard record at `bit_offset` of a track region
///
/// Returns the bit position after the record's final gap.
pub fn serialize_standard(
    track_bits: &mut [u8],
    src: &[u8; 256],
    bit_offset: usize,
    sector: u8,
    track: u8,
    verbose: bool,
) -> usize {
    let payload = encode_6_and_2_256(src);
    serialize(
        Geometry::Standard,
        track_bits,
        &payload,
        bit_offset,
        sector,
        track,
        verbose,
    )
}

/// Write a 128-byte sector as a custom record at `bit_offset` of a track region
///
/// Returns the bit position after the record's final gap.
pub fn serialize_custom(
    track_bits: &mut [u8],
    src: &[u8; 128],
    bit_offset: usize,
    sector: u8,
    track: u8,
    verbose: bool,
) -> usize {
    let payload = encode_6_and_2_128(src);
    serialize(
        Geometry::Custom,
        track_bits,
        &payload,
        bit_offset,
        sector,
        track,
        verbose,
    )
}

/// Sequential reader used to walk a record back
struct BitCursor<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl BitCursor<'_> {
    fn byte(&mut self) -> u8 {
        let value = read_byte(self.buffer, self.position);
        self.position += 8;
        value
    }

    fn four_and_four(&mut self) -> u8 {
        let high = self.byte();
        let low = self.byte();
        decode_4_and_4(high, low)
    }

    fn expect(&mut self, marker: &[u8; 3], what: &str, track: u8, sector: u8) -> Result<()> {
        let found = [self.byte(), self.byte(), self.byte()];
        if &found != marker {
            return Err(WozError::integrity(format!(
                "{} not found on track {} sector {}: {:02X?}",
                what, track, sector, found
            )));
        }
        Ok(())
    }
}

/// Read back and decode the record at `bit_offset` of a track region
///
/// Checks the address field against the expected track and sector, the
/// field markers, and the data field checksum.
pub fn read_sector(
    geometry: Geometry,
    track_bits: &[u8],
    bit_offset: usize,
    sector: u8,
    track: u8,
) -> Result<Vec<u8>> {
    let mut cursor = BitCursor {
        buffer: track_bits,
        position: bit_offset,
    };

    cursor.expect(&ADDRESS_PROLOGUE, "address prologue", track, sector)?;
    let expected = address_fields(geometry, track, sector);
    let found: Vec<u8> = (0..expected.len()).map(|_| cursor.four_and_four()).collect();
    if found != expected {
        return Err(WozError::integrity(format!(
            "address field mismatch on track {} sector {}: expected {:?}, found {:?}",
            track, sector, expected, found
        )));
    }
    if geometry.has_epilogues() {
        cursor.expect(&EPILOGUE, "address epilogue", track, sector)?;
    }
    cursor.position += geometry.gap2_syncs() * SYNC_BITS;

    cursor.expect(&DATA_PROLOGUE, "data prologue", track, sector)?;
    let data = match geometry {
        Geometry::Standard => {
            let mut encoded = [0u8; 343];
            encoded.iter_mut().for_each(|b| *b = cursor.byte());
            decode_6_and_2_256(&encoded)?.to_vec()
        }
        Geometry::Custom => {
            let mut encoded = [0u8; 172];
            encoded.iter_mut().for_each(|b| *b = cursor.byte());
            decode_6_and_2_128(&encoded)?.to_vec()
        }
    };
    if geometry.has_epilogues() {
        cursor.expect(&EPILOGUE, "data epilogue", track, sector)?;
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::constants::TRACK_SIZE;
    use crate::format::layout::{CUSTOM_HEADER_OFFSETS, STANDARD_HEADER_OFFSETS};
    use crate::nibble::{read_bit, SIX_AND_TWO_MAPPING};

    fn sample_sector<const N: usize>() -> [u8; N] {
        let mut data = [0u8; N];
        for (i, byte) in data.iter_mut().enumerate() {
            *byte = (i * 31 + 7) as u8;
        }
        data
    }

    #[test]
    fn test_standard_record_layout() {
        let mut track = vec![0u8; TRACK_SIZE];
        let end = serialize_standard(&mut track, &[0; 256], 160, 0, 0, false);
        assert_eq!(end, 160 + 3134);

        // Byte-aligned at bit 160: byte 20 onwards
        assert_eq!(&track[20..23], &[0xD5, 0xAA, 0x96]);
        // volume 254, track 0, sector 0, checksum 254
        assert_eq!(&track[23..31], &[0xFF, 0xFE, 0xAA, 0xAA, 0xAA, 0xAA, 0xFF, 0xFE]);
        assert_eq!(&track[31..34], &[0xDE, 0xAA, 0xEB]);

        // Gap 2 is 70 bits, so the data prologue starts at bit 342
        assert_eq!(read_byte(&track, 342), 0xD5);
        assert_eq!(read_byte(&track, 350), 0xAA);
        assert_eq!(read_byte(&track, 358), 0xAD);
        for i in 0..343 {
            assert_eq!(read_byte(&track, 366 + i * 8), 0x96);
        }
        let epilogue = 366 + 343 * 8;
        assert_eq!(read_byte(&track, epilogue), 0xDE);
        assert_eq!(read_byte(&track, epilogue + 8), 0xAA);
        assert_eq!(read_byte(&track, epilogue + 16), 0xEB);

        // Gap 3: sixteen sync words
        let gap3 = epilogue + 24;
        for word in 0..16 {
            let at = gap3 + word * SYNC_BITS;
            assert_eq!(read_byte(&track, at), 0xFF);
            assert!(!read_bit(&track, at + 8));
            assert!(!read_bit(&track, at + 9));
        }
    }

    #[test]
    fn test_custom_record_layout() {
        let mut track = vec![0u8; TRACK_SIZE];
        let end = serialize_custom(&mut track, &[0; 128], 80, 5, 3, false);
        assert_eq!(end, 80 + 1590);

        assert_eq!(&track[10..13], &[0xD5, 0xAA, 0x96]);
        // Only the sector number, no epilogue
        assert_eq!(&track[13..15], &[0xAA, 0xAF]);
        // Gap 2 follows immediately: seven sync words from bit 120
        assert_eq!(read_byte(&track, 120), 0xFF);
        assert_eq!(read_byte(&track, 190), 0xD5);
        assert_eq!(read_byte(&track, 206), 0xAD);
        assert_eq!(read_byte(&track, 214), 0x96);
        // Gap 3 follows the payload directly
        let gap3 = 214 + 172 * 8;
        assert_eq!(read_byte(&track, gap3), 0xFF);
        assert_eq!(gap3 + 8 * SYNC_BITS, end);
    }

    #[test]
    fn test_serialize_clears_old_contents() {
        let mut track = vec![0xFFu8; TRACK_SIZE];
        let offset = STANDARD_HEADER_OFFSETS[1];
        serialize_standard(&mut track, &[0; 256], offset, 1, 0, false);

        // Bits outside the record are untouched
        assert!(read_bit(&track, offset - 1));
        assert!(read_bit(&track, offset + 3134));
        // The trailing zero bits of the last sync word are cleared
        assert!(!read_bit(&track, offset + 3132));
        assert!(!read_bit(&track, offset + 3133));
        assert_eq!(read_sector(Geometry::Standard, &track, offset, 1, 0).unwrap(), vec![0; 256]);
    }

    #[test]
    fn test_unaligned_prologue_patch() {
        // Slot 1 starts at bit 3294: the prologue shares its first byte with the previous record
        let mut track = vec![0u8; TRACK_SIZE];
        let offset = STANDARD_HEADER_OFFSETS[1];
        assert_eq!(offset & 7, 6);
        serialize_standard(&mut track, &[0; 256], offset, 1, 0, false);
        assert_eq!(track[offset >> 3], 0xF3);
        assert_eq!(read_byte(&track, offset), 0xD5);
    }

    #[test]
    fn test_adjacent_records_do_not_overlap() {
        let mut track = vec![0u8; TRACK_SIZE];
        let first = sample_sector::<128>();
        let second = [0xA5u8; 128];
        // Write the later slot first so the earlier one is laid down against it
        serialize_custom(&mut track, &second, CUSTOM_HEADER_OFFSETS[3], 3, 7, false);
        serialize_custom(&mut track, &first, CUSTOM_HEADER_OFFSETS[2], 2, 7, false);
        serialize_custom(&mut track, &first, CUSTOM_HEADER_OFFSETS[4], 4, 7, false);

        assert_eq!(read_sector(Geometry::Custom, &track, CUSTOM_HEADER_OFFSETS[2], 2, 7).unwrap(), first.to_vec());
        assert_eq!(read_sector(Geometry::Custom, &track, CUSTOM_HEADER_OFFSETS[3], 3, 7).unwrap(), second.to_vec());
        assert_eq!(read_sector(Geometry::Custom, &track, CUSTOM_HEADER_OFFSETS[4], 4, 7).unwrap(), first.to_vec());
    }

    #[test]
    fn test_read_back_standard() {
        let mut track = vec![0u8; TRACK_SIZE];
        let data = sample_sector::<256>();
        for (slot, &offset) in STANDARD_HEADER_OFFSETS.iter().enumerate() {
            serialize_standard(&mut track, &data, offset, slot as u8, 17, false);
        }
        for (slot, &offset) in STANDARD_HEADER_OFFSETS.iter().enumerate() {
            let decoded = read_sector(Geometry::Standard, &track, offset, slot as u8, 17).unwrap();
            assert_eq!(decoded, data.to_vec());
        }
    }

    #[test]
    fn test_read_back_wrong_sector() {
        let mut track = vec![0u8; TRACK_SIZE];
        serialize_standard(&mut track, &[1; 256], 160, 0, 2, false);
        assert!(matches!(
            read_sector(Geometry::Standard, &track, 160, 1, 2),
            Err(WozError::IntegrityError(_))
        ));
    }

    #[test]
    fn test_read_back_blank_track() {
        let track = vec![0u8; TRACK_SIZE];
        assert!(read_sector(Geometry::Custom, &track, 80, 0, 0).is_err());
    }

    #[test]
    fn test_payload_uses_alphabet() {
        let mut track = vec![0u8; TRACK_SIZE];
        serialize_custom(&mut track, &sample_sector::<128>(), 80, 0, 0, true);
        for i in 0..172 {
            assert!(SIX_AND_TWO_MAPPING.contains(&read_byte(&track, 214 + i * 8)));
        }
    }
}
