/// Sector placement tables and the layout resolver
///
/// Every physical slot on a track starts at a fixed bit offset: a leading gap of
/// sync words, then one fixed-length sector record per slot. The logical order
/// in which the source is laid down is chosen by an interleave table.

use crate::format::geometry::{Geometry, Interleave};

/// Bit offset of each address prologue on a standard track
pub const STANDARD_HEADER_OFFSETS: [usize; 16] = [
    160, 3294, 6428, 9562, 12696, 15830, 18964, 22098, 25232, 28366, 31500, 34634, 37768, 40902,
    44036, 47170,
];

/// Bit offset of each address prologue on a custom track
pub const CUSTOM_HEADER_OFFSETS: [usize; 32] = [
    80, 1670, 3260, 4850, 6440, 8030, 9620, 11210, 12800, 14390, 15980, 17570, 19160, 20750,
    22340, 23930, 25520, 27110, 28700, 30290, 31880, 33470, 35060, 36650, 38240, 39830, 41420,
    43010, 44600, 46190, 47780, 49370,
];

/// DOS 3.3 logical to physical skew
pub const STANDARD_DOS_INTERLEAVE: [usize; 16] = [
    0x00, 0x0D, 0x0B, 0x09, 0x07, 0x05, 0x03, 0x01, 0x0E, 0x0C, 0x0A, 0x08, 0x06, 0x04, 0x02, 0x0F,
];

/// Identity mapping for standard tracks
pub const STANDARD_PHYSICAL_INTERLEAVE: [usize; 16] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F,
];

/// Custom order 1 on standard tracks; same as DOS
pub const STANDARD_CUSTOM1_INTERLEAVE: [usize; 16] = STANDARD_DOS_INTERLEAVE;

/// Two-to-one skew for custom tracks: even logical sectors fill the first half
pub const CUSTOM_DOS_INTERLEAVE: [usize; 32] = [
    0x00, 0x10, 0x01, 0x11, 0x02, 0x12, 0x03, 0x13, 0x04, 0x14, 0x05, 0x15, 0x06, 0x16, 0x07, 0x17,
    0x08, 0x18, 0x09, 0x19, 0x0A, 0x1A, 0x0B, 0x1B, 0x0C, 0x1C, 0x0D, 0x1D, 0x0E, 0x1E, 0x0F, 0x1F,
];

/// Identity mapping for custom tracks
pub const CUSTOM_PHYSICAL_INTERLEAVE: [usize; 32] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F,
    0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1A, 0x1B, 0x1C, 0x1D, 0x1E, 0x1F,
];

/// Custom order 1: runs of eight, with the second and third runs swapped
pub const CUSTOM_CUSTOM1_INTERLEAVE: [usize; 32] = [
    0, 1, 2, 3, 4, 5, 6, 7, 16, 17, 18, 19, 20, 21, 22, 23, 8, 9, 10, 11, 12, 13, 14, 15, 24, 25,
    26, 27, 28, 29, 30, 31,
];

/// Where a logical sector lands on its track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorLayout {
    /// Physical slot index, also the sector number written in the address field
    pub physical_sector: usize,
    /// Bit offset of the address prologue within the track region
    pub bit_offset: usize,
}

impl Geometry {
    /// Prologue offset table for this geometry, indexed by physical slot
    pub fn header_offsets(&self) -> &'static [usize] {
        match self {
            Geometry::Standard => &STANDARD_HEADER_OFFSETS,
            Geometry::Custom => &CUSTOM_HEADER_OFFSETS,
        }
    }
}

impl Interleave {
    /// Logical to physical table for the given geometry
    pub fn table(&self, geometry: Geometry) -> &'static [usize] {
        match (geometry, self) {
            (Geometry::Standard, Interleave::Dos) => &STANDARD_DOS_INTERLEAVE,
            (Geometry::Standard, Interleave::Physical) => &STANDARD_PHYSICAL_INTERLEAVE,
            (Geometry::Standard, Interleave::Custom1) => &STANDARD_CUSTOM1_INTERLEAVE,
            (Geometry::Custom, Interleave::Dos) => &CUSTOM_DOS_INTERLEAVE,
            (Geometry::Custom, Interleave::Physical) => &CUSTOM_PHYSICAL_INTERLEAVE,
            (Geometry::Custom, Interleave::Custom1) => &CUSTOM_CUSTOM1_INTERLEAVE,
        }
    }
}

/// Resolve a logical sector to its physical slot and bit offset
///
/// `logical_sector` must be below `geometry.sectors_per_track()`.
pub fn resolve(geometry: Geometry, interleave: Interleave, logical_sector: usize) -> SectorLayout {
    let physical_sector = interleave.table(geometry)[logical_sector];
    SectorLayout {
        physical_sector,
        bit_offset: geometry.header_offsets()[physical_sector],
    }
}
