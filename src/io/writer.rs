/// WOZ image writer

use crate::error::{Result, WozError};
use crate::format::constants::IMAGE_SIZE;
use crate::image::WozImage;
use log::debug;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;

/// Write the image over the start of a file
///
/// The file is not truncated, so bytes past [`IMAGE_SIZE`] survive. Nothing
/// is written if the buffer has the wrong size; a short write is reported
/// after the fact.
pub fn write_woz<P: AsRef<Path>>(image: &WozImage, path: P) -> Result<()> {
    let data = image.as_bytes();
    if data.len() != IMAGE_SIZE {
        return Err(WozError::InvalidImageSize {
            expected: IMAGE_SIZE,
            actual: data.len(),
        });
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&path)?;
    let written = write_counted(&mut file, data)?;
    file.flush()?;

    if written != IMAGE_SIZE {
        return Err(WozError::ShortWrite {
            expected: IMAGE_SIZE,
            written,
        });
    }

    debug!("wrote {} bytes to {}", written, path.as_ref().display());
    Ok(())
}

/// Write as much of `data` as the sink accepts, returning the byte count
fn write_counted<W: Write>(sink: &mut W, data: &[u8]) -> Result<usize> {
    let mut written = 0;
    while written < data.len() {
        match sink.write(&data[written..]) {
            Ok(0) => break,
            Ok(n) => written += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sink that accepts a fixed number of bytes
    struct LimitedSink {
        remaining: usize,
    }

    impl Write for LimitedSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            let n = buf.len().min(self.remaining).min(1000);
            self.remaining -= n;
            Ok(n)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_counted_full() {
        let mut sink = LimitedSink { remaining: usize::MAX };
        assert_eq!(write_counted(&mut sink, &[0u8; 4096]).unwrap(), 4096);
    }

    #[test]
    fn test_write_counted_short() {
        let mut sink = LimitedSink { remaining: 2500 };
        assert_eq!(write_counted(&mut sink, &[0u8; 4096]).unwrap(), 2500);
    }
}
