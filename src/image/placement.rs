/// Ordered (track, sector, chunk) placements for a source binary

use crate::format::Geometry;
use std::slice::ChunksExact;

/// Number of sectors needed for `source_len` bytes, rounding up
pub fn sector_count(source_len: usize, sector_size: usize) -> usize {
    source_len.div_ceil(sector_size)
}

/// Copy the source and zero-pad it to a whole number of sectors
pub fn pad_source(source: &[u8], sector_size: usize) -> Vec<u8> {
    let mut padded = source.to_vec();
    padded.resize(sector_count(source.len(), sector_size) * sector_size, 0);
    padded
}

/// Track and logical sector of the `count`-th sector after a starting position
///
/// `count` of zero is the starting position itself.
pub fn advance(
    geometry: Geometry,
    first_track: usize,
    first_sector: usize,
    count: usize,
) -> (usize, usize) {
    let sectors_per_track = geometry.sectors_per_track();
    let linear = first_track * sectors_per_track + first_sector + count;
    (linear / sectors_per_track, linear % sectors_per_track)
}

/// One source chunk and where it goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement<'a> {
    /// Index of the chunk within the source
    pub index: usize,
    /// Track number
    pub track: usize,
    /// Logical sector within the track
    pub sector: usize,
    /// Sector-sized chunk of the padded source
    pub data: &'a [u8],
}

/// Iterator over the placements of a padded source
pub struct Placements<'a> {
    chunks: ChunksExact<'a, u8>,
    sectors_per_track: usize,
    index: usize,
    track: usize,
    sector: usize,
}

impl<'a> Placements<'a> {
    /// Walk `padded` sector by sector from (`first_track`, `first_sector`)
    ///
    /// A trailing partial chunk is ignored; pad the source first.
    pub fn new(padded: &'a [u8], geometry: Geometry, first_track: usize, first_sector: usize) -> Self {
        Self {
            chunks: padded.chunks_exact(geometry.sector_size()),
            sectors_per_track: geometry.sectors_per_track(),
            index: 0,
            track: first_track,
            sector: first_sector,
        }
    }
}

impl<'a> Iterator for Placements<'a> {
    type Item = Placement<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let data = self.chunks.next()?;
        let placement = Placement {
            index: self.index,
            track: self.track,
            sector: self.sector,
            data,
        };

        self.index += 1;
        self.sector += 1;
        if self.sector >= self.sectors_per_track {
            self.sector = 0;
            self.track += 1;
        }

        Some(placement)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl ExactSizeIterator for Placements<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_count_rounds_up() {
        assert_eq!(sector_count(0, 256), 0);
        assert_eq!(sector_count(1, 256), 1);
        assert_eq!(sector_count(256, 256), 1);
        assert_eq!(sector_count(257, 256), 2);
        assert_eq!(sector_count(4096, 128), 32);
    }

    #[test]
    fn test_pad_source() {
        let padded = pad_source(&[0xAB; 257], 256);
        assert_eq!(padded.len(), 512);
        assert_eq!(padded[256], 0xAB);
        assert!(padded[257..].iter().all(|&b| b == 0));

        assert!(pad_source(&[], 128).is_empty());
    }

    #[test]
    fn test_placements_roll_over() {
        let padded = vec![0u8; 4 * 256];
        let placed: Vec<(usize, usize, usize)> = Placements::new(&padded, Geometry::Standard, 2, 14)
            .map(|p| (p.index, p.track, p.sector))
            .collect();
        assert_eq!(placed, vec![(0, 2, 14), (1, 2, 15), (2, 3, 0), (3, 3, 1)]);
    }

    #[test]
    fn test_placements_chunks() {
        let mut padded = vec![0u8; 3 * 128];
        padded[128] = 1;
        padded[256] = 2;
        let placements = Placements::new(&padded, Geometry::Custom, 0, 31);
        assert_eq!(placements.len(), 3);
        let firsts: Vec<(usize, u8)> = placements.map(|p| (p.track, p.data[0])).collect();
        assert_eq!(firsts, vec![(0, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn test_advance() {
        assert_eq!(advance(Geometry::Standard, 0, 0, 15), (0, 15));
        assert_eq!(advance(Geometry::Standard, 0, 0, 16), (1, 0));
        assert_eq!(advance(Geometry::Custom, 34, 30, 1), (34, 31));
        assert_eq!(advance(Geometry::Custom, 34, 31, 1), (35, 0));
    }
}
