/// WOZ image and source binary reader

use crate::error::{Result, WozError};
use crate::format::constants::IMAGE_SIZE;
use crate::image::WozImage;
use log::{debug, warn};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read the fixed WOZ1 portion of an image file
///
/// Only the first [`IMAGE_SIZE`] bytes are loaded; anything after them (such
/// as a META chunk) is left in the file untouched.
pub fn read_woz<P: AsRef<Path>>(path: P) -> Result<WozImage> {
    let mut file = File::open(&path)?;

    let file_len = file.metadata()?.len() as usize;
    if file_len < IMAGE_SIZE {
        return Err(WozError::InvalidImageSize {
            expected: IMAGE_SIZE,
            actual: file_len,
        });
    }

    let mut data = vec![0u8; IMAGE_SIZE];
    file.read_exact(&mut data)?;
    debug!(
        "read {} of {} bytes from {}",
        IMAGE_SIZE,
        file_len,
        path.as_ref().display()
    );

    let image = WozImage::from_bytes(data)?;
    if !image.has_woz1_signature() {
        warn!("{} does not carry a WOZ1 signature", path.as_ref().display());
    }
    Ok(image)
}

/// Read a whole source binary
pub fn read_source<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let data = std::fs::read(&path)?;
    debug!("read {} source bytes from {}", data.len(), path.as_ref().display());
    Ok(data)
}
