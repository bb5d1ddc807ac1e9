/// WOZ1 image buffer, sector records and the injection driver

/// Injection options and driver
pub mod injector;
/// Source chunk placement
pub mod placement;
/// Sector record serialization
pub mod sector;

pub use injector::{inject, InjectOptions, InjectSummary};
pub use placement::{Placement, Placements};

use crate::checksum;
use crate::error::{Result, WozError};
use crate::format::constants::*;
use crate::format::{is_woz1, Geometry};
use std::path::Path;

/// A WOZ1 disk image held entirely in memory
///
/// Always exactly [`IMAGE_SIZE`] bytes. Only the track regions and the CRC
/// field are ever modified.
#[derive(Debug, Clone)]
pub struct WozImage {
    data: Vec<u8>,
    changed: bool,
    filename: Option<String>,
}

impl WozImage {
    /// Wrap an image buffer, which must be exactly [`IMAGE_SIZE`] bytes
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        if data.len() != IMAGE_SIZE {
            return Err(WozError::InvalidImageSize {
                expected: IMAGE_SIZE,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            changed: false,
            filename: None,
        })
    }

    /// A zeroed image carrying only the WOZ1 signature
    pub fn blank() -> Self {
        let mut data = vec![0u8; IMAGE_SIZE];
        data[..WOZ1_SIGNATURE.len()].copy_from_slice(WOZ1_SIGNATURE);
        Self {
            data,
            changed: true,
            filename: None,
        }
    }

    /// Open a WOZ1 file from disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut image = crate::io::read_woz(&path)?;
        image.filename = Some(path.as_ref().display().to_string());
        Ok(image)
    }

    /// Write the image over the start of a file
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        crate::io::write_woz(self, path)?;
        self.changed = false;
        Ok(())
    }

    /// Get the original filename if loaded from disk
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Raw image bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        self.changed = true;
        &mut self.data
    }

    /// Whether the header carries the WOZ1 signature
    pub fn has_woz1_signature(&self) -> bool {
        is_woz1(&self.data)
    }

    /// Get a track region
    pub fn track(&self, track: usize) -> Result<&[u8]> {
        if track > MAX_TRACK {
            return Err(WozError::InvalidTrack {
                track,
                max: MAX_TRACK,
            });
        }
        let start = track_offset(track);
        Ok(&self.data[start..start + TRACK_SIZE])
    }

    /// Get a mutable track region
    pub fn track_mut(&mut self, track: usize) -> Result<&mut [u8]> {
        if track > MAX_TRACK {
            return Err(WozError::InvalidTrack {
                track,
                max: MAX_TRACK,
            });
        }
        self.changed = true;
        let start = track_offset(track);
        Ok(&mut self.data[start..start + TRACK_SIZE])
    }

    /// Write a source binary into the tracks; see [`inject`]
    pub fn inject(&mut self, source: &[u8], options: &InjectOptions) -> Result<InjectSummary> {
        injector::inject(self, source, options)
    }

    /// Decode the sector in a physical slot
    pub fn read_sector(&self, geometry: Geometry, track: usize, physical_sector: usize) -> Result<Vec<u8>> {
        let offsets = geometry.header_offsets();
        let bit_offset = *offsets.get(physical_sector).ok_or(WozError::InvalidSector {
            sector: physical_sector,
            max: offsets.len() - 1,
        })?;
        sector::read_sector(
            geometry,
            self.track(track)?,
            bit_offset,
            physical_sector as u8,
            track as u8,
        )
    }

    /// CRC32 stored in the header
    pub fn stored_crc(&self) -> u32 {
        checksum::stored(&self.data)
    }

    /// Recompute and store the header CRC32
    pub fn update_crc(&mut self) -> u32 {
        checksum::update(self.bytes_mut())
    }

    /// Check the stored CRC32 against the image body
    pub fn verify_crc(&self) -> bool {
        checksum::verify(&self.data)
    }

    /// Check if the image has been modified
    pub fn is_changed(&self) -> bool {
        self.changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_image() {
        let image = WozImage::blank();
        assert_eq!(image.as_bytes().len(), IMAGE_SIZE);
        assert!(image.has_woz1_signature());
        assert!(image.is_changed());
        assert!(image.filename().is_none());
    }

    #[test]
    fn test_from_bytes_size() {
        assert!(WozImage::from_bytes(vec![0; IMAGE_SIZE]).is_ok());
        assert!(matches!(
            WozImage::from_bytes(vec![0; IMAGE_SIZE - 1]),
            Err(WozError::InvalidImageSize { expected: IMAGE_SIZE, actual }) if actual == IMAGE_SIZE - 1
        ));
    }

    #[test]
    fn test_track_regions() {
        let mut image = WozImage::from_bytes(vec![0; IMAGE_SIZE]).unwrap();
        assert!(!image.is_changed());

        image.track_mut(1).unwrap()[0] = 0x5A;
        assert!(image.is_changed());
        assert_eq!(image.as_bytes()[HEADER_SIZE + TRACK_SIZE], 0x5A);
        assert_eq!(image.track(1).unwrap().len(), TRACK_SIZE);
        assert!(image.track(MAX_TRACK).is_ok());
        assert!(matches!(image.track(35), Err(WozError::InvalidTrack { .. })));
    }

    #[test]
    fn test_crc_roundtrip() {
        let mut image = WozImage::blank();
        let crc = image.update_crc();
        assert_eq!(image.stored_crc(), crc);
        assert!(image.verify_crc());
    }

    #[test]
    fn test_inject_and_read_sector() {
        let mut image = WozImage::blank();
        let source: Vec<u8> = (0..=255).collect();
        image.inject(&source, &InjectOptions::new().starting_at(4, 1)).unwrap();

        // DOS order puts logical sector 1 into physical slot 13
        assert_eq!(image.read_sector(Geometry::Standard, 4, 13).unwrap(), source);
        assert!(image.read_sector(Geometry::Standard, 4, 1).is_err());
        assert!(image.read_sector(Geometry::Standard, 4, 16).is_err());
    }
}
