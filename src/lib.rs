/*!
# w2w

Write raw binaries straight into the nibble tracks of WOZ1 disk images.

Each sector of the source is laid down as period 5.25" hardware would write it:
an address field, a 6-and-2 encoded data field and self-sync gaps, at a fixed
bit position within its 6656-byte track region. The header CRC32 is refreshed
afterwards.

## Quick Start

```rust,no_run
use w2w::{Geometry, InjectOptions, Interleave, WozImage};

let mut image = WozImage::open("disk.woz")?;
let source = w2w::io::read_source("boot.bin")?;

let options = InjectOptions::new()
    .with_geometry(Geometry::Standard)
    .with_interleave(Interleave::Dos)
    .starting_at(0, 0);
let summary = image.inject(&source, &options)?;
println!("{} sectors, CRC32 {:08X}", summary.sectors, summary.crc);

image.save("disk.woz")?;
# Ok::<(), w2w::WozError>(())
```

## Track layouts

- Standard: 16 sectors of 256 bytes, volume/track/sector/checksum address
  fields, epilogues on both fields
- Custom: 32 sectors of 128 bytes, sector-only address fields, no epilogues,
  shorter gaps

## Modules

- `format`: WOZ1 layout constants, geometries, interleave and offset tables
- `nibble`: bit writer, 4-and-4 and 6-and-2 encodings
- `image`: the image buffer, sector records and the injection driver
- `checksum`: WOZ CRC32
- `io`: reading and writing images and source binaries
- `error`: Error types and Result alias
*/

#![warn(missing_docs)]

/// WOZ CRC32
pub mod checksum;
/// Error types and Result alias
pub mod error;
/// WOZ1 layout, geometries and sector placement
pub mod format;
/// WOZ1 image buffer and sector records
pub mod image;
/// I/O operations for WOZ images and source binaries
pub mod io;
/// Bit-level writing and GCR encodings
pub mod nibble;

// Re-export common types
pub use error::{Result, WozError};
pub use format::{resolve, Geometry, Interleave, SectorLayout};
pub use image::{inject, InjectOptions, InjectSummary, Placement, Placements, WozImage};
pub use nibble::{encode_6_and_2_128, encode_6_and_2_256};
