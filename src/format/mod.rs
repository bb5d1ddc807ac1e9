/// WOZ1 layout, track geometries and sector placement

/// Format constants
pub mod constants;
/// Track geometries and interleave selectors
pub mod geometry;
/// Sector placement tables
pub mod layout;

pub use constants::*;
pub use geometry::{Geometry, Interleave};
pub use layout::{resolve, SectorLayout};

/// Check whether a header starts with the WOZ1 signature
pub fn is_woz1(magic: &[u8]) -> bool {
    magic.starts_with(WOZ1_SIGNATURE)
}
