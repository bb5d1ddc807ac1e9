/// I/O operations for WOZ images and source binaries

/// Reader implementation
pub mod reader;
/// Writer implementation
pub mod writer;

pub use reader::{read_source, read_woz};
pub use writer::write_woz;
