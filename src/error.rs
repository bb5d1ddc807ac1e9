use thiserror::Error;

/// Result type alias for WOZ operations
pub type Result<T> = std::result::Result<T, WozError>;

/// Errors that can occur while injecting data into a WOZ image
#[derive(Debug, Error)]
pub enum WozError {
    /// I/O error occurred while reading or writing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or unrecognized image contents
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// The in-memory image does not have the fixed WOZ1 size
    #[error("Bad WOZ buffer size: expected {expected} bytes, found {actual}")]
    InvalidImageSize {
        /// Required image size in bytes
        expected: usize,
        /// Size actually found
        actual: usize,
    },

    /// Fewer bytes than expected were persisted
    #[error("Could not write full WOZ image: {written} of {expected} bytes written")]
    ShortWrite {
        /// Number of bytes that should have been written
        expected: usize,
        /// Number of bytes actually written
        written: usize,
    },

    /// Invalid track number specified
    #[error("Invalid track {track} (max: {max})")]
    InvalidTrack {
        /// Track number
        track: usize,
        /// Maximum allowed track number
        max: usize,
    },

    /// Invalid sector number specified
    #[error("Invalid sector {sector} (max: {max})")]
    InvalidSector {
        /// Sector number
        sector: usize,
        /// Maximum allowed sector number
        max: usize,
    },

    /// The source does not fit between the starting position and the last track
    #[error("Source runs past the last track: would end on track {last_track} (max: {max})")]
    TrackOverflow {
        /// Track the final sector would land on
        last_track: usize,
        /// Maximum allowed track number
        max: usize,
    },

    /// A byte outside the 6-and-2 nibble alphabet
    #[error("Invalid nibble 0x{value:02X} at offset {offset}")]
    InvalidNibble {
        /// Offset of the byte within the encoded field
        offset: usize,
        /// Offending byte
        value: u8,
    },

    /// Data integrity error
    #[error("Data integrity error: {0}")]
    IntegrityError(String),

    /// Bad command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl WozError {
    /// Create an invalid format error
    pub fn invalid_format<S: Into<String>>(message: S) -> Self {
        WozError::InvalidFormat(message.into())
    }

    /// Create an integrity error
    pub fn integrity<S: Into<String>>(message: S) -> Self {
        WozError::IntegrityError(message.into())
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        WozError::InvalidArgument(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WozError::InvalidTrack { track: 40, max: 34 };
        assert_eq!(err.to_string(), "Invalid track 40 (max: 34)");
    }

    #[test]
    fn test_nibble_error_display() {
        let err = WozError::InvalidNibble {
            offset: 12,
            value: 0xAA,
        };
        assert_eq!(err.to_string(), "Invalid nibble 0xAA at offset 12");
    }

    #[test]
    fn test_integrity_error() {
        let err = WozError::integrity("checksum mismatch");
        assert_eq!(err.to_string(), "Data integrity error: checksum mismatch");
    }
}
