/// Track geometries and interleave schemes

use crate::format::constants::SYNC_BITS;
use std::fmt;

/// Sector layout of a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Geometry {
    /// 16 sectors of 256 bytes with full address fields and epilogues
    #[default]
    Standard,
    /// 32 sectors of 128 bytes, sector-only address fields, no epilogues, short gaps
    Custom,
}

impl Geometry {
    /// Parse a command-line selector (`s` or `c`, case-insensitive)
    pub fn from_selector(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "s" | "standard" => Some(Geometry::Standard),
            "c" | "custom" => Some(Geometry::Custom),
            _ => None,
        }
    }

    /// Number of sectors on each track
    pub fn sectors_per_track(&self) -> usize {
        match self {
            Geometry::Standard => 16,
            Geometry::Custom => 32,
        }
    }

    /// Plaintext bytes carried by one sector
    pub fn sector_size(&self) -> usize {
        match self {
            Geometry::Standard => 256,
            Geometry::Custom => 128,
        }
    }

    /// Length of the 6-and-2 encoded data field payload
    pub fn encoded_size(&self) -> usize {
        match self {
            Geometry::Standard => 343,
            Geometry::Custom => 172,
        }
    }

    /// Sync words written before the first sector of a track
    pub fn gap1_syncs(&self) -> usize {
        match self {
            Geometry::Standard => 16,
            Geometry::Custom => 8,
        }
    }

    /// Sync words between the address field and the data field
    pub fn gap2_syncs(&self) -> usize {
        7
    }

    /// Sync words after the data field
    pub fn gap3_syncs(&self) -> usize {
        match self {
            Geometry::Standard => 16,
            Geometry::Custom => 8,
        }
    }

    /// Whether address and data fields end with an epilogue
    pub fn has_epilogues(&self) -> bool {
        matches!(self, Geometry::Standard)
    }

    /// Number of 4-and-4 encoded values in the address field
    pub fn address_fields(&self) -> usize {
        match self {
            // volume, track, sector, checksum
            Geometry::Standard => 4,
            Geometry::Custom => 1,
        }
    }

    /// Exact number of bits one physical sector occupies on the track
    pub fn sector_bits(&self) -> usize {
        let epilogues = if self.has_epilogues() { 2 * 24 } else { 0 };
        24 + self.address_fields() * 16
            + self.gap2_syncs() * SYNC_BITS
            + 24
            + self.encoded_size() * 8
            + self.gap3_syncs() * SYNC_BITS
            + epilogues
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Geometry::Standard => "standard",
            Geometry::Custom => "custom",
        }
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Geometry::Standard => write!(f, "Standard (16 x 256)"),
            Geometry::Custom => write!(f, "Custom (32 x 128)"),
        }
    }
}

/// Mapping from logical sector order to physical slot order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interleave {
    /// DOS 3.3 style skew
    #[default]
    Dos,
    /// Identity mapping
    Physical,
    /// Custom order 1
    Custom1,
}

impl Interleave {
    /// Parse a command-line selector (`d`, `p` or `i1`, case-insensitive)
    pub fn from_selector(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "d" | "dos" => Some(Interleave::Dos),
            "p" | "physical" => Some(Interleave::Physical),
            "i1" | "custom1" => Some(Interleave::Custom1),
            _ => None,
        }
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Interleave::Dos => "dos",
            Interleave::Physical => "physical",
            Interleave::Custom1 => "custom1",
        }
    }
}

impl fmt::Display for Interleave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_bits() {
        assert_eq!(Geometry::Standard.sector_bits(), 3134);
        assert_eq!(Geometry::Custom.sector_bits(), 1590);
    }

    #[test]
    fn test_track_capacity() {
        for geometry in [Geometry::Standard, Geometry::Custom] {
            assert_eq!(
                geometry.sectors_per_track() * geometry.sector_size(),
                4096
            );
        }
    }

    #[test]
    fn test_geometry_selector() {
        assert_eq!(Geometry::from_selector("s"), Some(Geometry::Standard));
        assert_eq!(Geometry::from_selector("C"), Some(Geometry::Custom));
        assert_eq!(Geometry::from_selector("x"), None);
    }

    #[test]
    fn test_interleave_selector() {
        assert_eq!(Interleave::from_selector("d"), Some(Interleave::Dos));
        assert_eq!(Interleave::from_selector("P"), Some(Interleave::Physical));
        assert_eq!(Interleave::from_selector("I1"), Some(Interleave::Custom1));
        assert_eq!(Interleave::from_selector("i2"), None);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Geometry::default(), Geometry::Standard);
        assert_eq!(Interleave::default(), Interleave::Dos);
    }
}
