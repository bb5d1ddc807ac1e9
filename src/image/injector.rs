/// Injection options and the sector placement driver

use crate::checksum;
use crate::error::{Result, WozError};
use crate::format::constants::MAX_TRACK;
use crate::format::{resolve, Geometry, Interleave};
use crate::image::placement::{advance, pad_source, sector_count, Placements};
use crate::image::sector::{serialize_custom, serialize_standard};
use crate::image::WozImage;
use log::{debug, info};

/// Parameters of one injection run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InjectOptions {
    /// Track layout
    pub geometry: Geometry,
    /// Logical to physical sector order
    pub interleave: Interleave,
    /// Track receiving the first sector
    pub first_track: usize,
    /// Logical sector receiving the first chunk
    pub first_sector: usize,
    /// Trace every field written
    pub verbose: bool,
}

impl InjectOptions {
    /// Standard geometry, DOS order, starting at track 0 sector 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the track geometry
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Set the interleave scheme
    pub fn with_interleave(mut self, interleave: Interleave) -> Self {
        self.interleave = interleave;
        self
    }

    /// Set the starting track and logical sector
    pub fn starting_at(mut self, track: usize, sector: usize) -> Self {
        self.first_track = track;
        self.first_sector = sector;
        self
    }

    /// Enable or disable the field trace
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Check that `sectors` sectors fit from the starting position
    pub fn validate(&self, sectors: usize) -> Result<()> {
        if self.first_track > MAX_TRACK {
            return Err(WozError::InvalidTrack {
                track: self.first_track,
                max: MAX_TRACK,
            });
        }
        let sectors_per_track = self.geometry.sectors_per_track();
        if self.first_sector >= sectors_per_track {
            return Err(WozError::InvalidSector {
                sector: self.first_sector,
                max: sectors_per_track - 1,
            });
        }
        if sectors > 0 {
            let (last_track, _) =
                advance(self.geometry, self.first_track, self.first_sector, sectors - 1);
            if last_track > MAX_TRACK {
                return Err(WozError::TrackOverflow {
                    last_track,
                    max: MAX_TRACK,
                });
            }
        }
        Ok(())
    }
}

/// Outcome of an injection run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InjectSummary {
    /// Number of sectors written
    pub sectors: usize,
    /// First track touched
    pub first_track: usize,
    /// Last track touched
    pub last_track: usize,
    /// CRC32 stored in the header
    pub crc: u32,
}

/// Write `source` into the image's tracks and refresh the header CRC
///
/// Placement is validated before anything is written, so on error the image is
/// unchanged.
pub fn inject(image: &mut WozImage, source: &[u8], options: &InjectOptions) -> Result<InjectSummary> {
    let geometry = options.geometry;
    let sectors = sector_count(source.len(), geometry.sector_size());
    options.validate(sectors)?;

    let padded = pad_source(source, geometry.sector_size());
    let mut last_track = options.first_track;

    for placement in Placements::new(&padded, geometry, options.first_track, options.first_sector) {
        let layout = resolve(geometry, options.interleave, placement.sector);
        debug!(
            "chunk {} -> track {} logical sector {} physical sector {} at bit {}",
            placement.index, placement.track, placement.sector, layout.physical_sector, layout.bit_offset
        );

        let track_bits = image.track_mut(placement.track)?;
        let sector = layout.physical_sector as u8;
        let track = placement.track as u8;
        match geometry {
            Geometry::Standard => {
                let src = <&[u8; 256]>::try_from(placement.data)
                    .map_err(|_| WozError::integrity("source chunk is not 256 bytes"))?;
                serialize_standard(track_bits, src, layout.bit_offset, sector, track, options.verbose);
            }
            Geometry::Custom => {
                let src = <&[u8; 128]>::try_from(placement.data)
                    .map_err(|_| WozError::integrity("source chunk is not 128 bytes"))?;
                serialize_custom(track_bits, src, layout.bit_offset, sector, track, options.verbose);
            }
        }
        last_track = placement.track;
    }

    let crc = checksum::update(image.bytes_mut());
    info!(
        "wrote {} {} sector(s) in {} order, tracks {}-{}, CRC32 0x{:08X}",
        sectors, geometry.name(), options.interleave, options.first_track, last_track, crc
    );

    Ok(InjectSummary {
        sectors,
        first_track: options.first_track,
        last_track,
        crc,
    })
}
