/// Command-line tool writing a binary straight into a WOZ1 image

use std::process;
use w2w::{Geometry, InjectOptions, Interleave, WozError, WozImage};

const USAGE: &str = "USAGE: w2w <s|c> <d|p|i1> <track> <sector> <image.woz> <binary> [-v]";

const EXIT_USAGE: i32 = -1;
const EXIT_READ: i32 = -2;
const EXIT_WRITE: i32 = -6;

/// Parsed command line
#[derive(Debug)]
struct Args {
    options: InjectOptions,
    image_path: String,
    source_path: String,
}

fn main() {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            eprintln!("{}", USAGE);
            process::exit(EXIT_USAGE);
        }
    };

    init_logging(args.options.verbose);
    process::exit(run(&args));
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn run(args: &Args) -> i32 {
    let mut image = match WozImage::open(&args.image_path) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("ERROR: could not open {}: {}", args.image_path, e);
            return EXIT_READ;
        }
    };

    let source = match w2w::io::read_source(&args.source_path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("ERROR: could not open {} for reading: {}", args.source_path, e);
            return EXIT_READ;
        }
    };

    let summary = match image.inject(&source, &args.options) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("ERROR: {}. Image file was not modified!", e);
            return EXIT_USAGE;
        }
    };

    if let Err(e) = image.save(&args.image_path) {
        match e {
            WozError::InvalidImageSize { .. } => {
                eprintln!("ERROR: {}. Image file was not modified!", e)
            }
            _ => eprintln!("ERROR: {}", e),
        }
        return EXIT_WRITE;
    }

    println!(
        "Wrote {} sector(s) to tracks {}-{} of {} (CRC32 {:08X})",
        summary.sectors, summary.first_track, summary.last_track, args.image_path, summary.crc
    );
    0
}

fn parse_args(argv: &[String]) -> Result<Args, WozError> {
    if argv.len() != 6 && argv.len() != 7 {
        return Err(WozError::invalid_argument(format!(
            "expected 6 or 7 arguments, got {}",
            argv.len()
        )));
    }

    let verbose = match argv.get(6).map(|s| s.as_str()) {
        None => false,
        Some("-v") | Some("-V") => true,
        Some(other) => {
            return Err(WozError::invalid_argument(format!("unknown option {}", other)))
        }
    };

    let geometry = Geometry::from_selector(&argv[0]).ok_or_else(|| {
        WozError::invalid_argument(format!("unknown track structure '{}' (use s or c)", argv[0]))
    })?;
    let interleave = Interleave::from_selector(&argv[1]).ok_or_else(|| {
        WozError::invalid_argument(format!("unknown interleaving '{}' (use d, p or i1)", argv[1]))
    })?;
    let track = parse_hex_or_dec(&argv[2])
        .ok_or_else(|| WozError::invalid_argument(format!("bad track number '{}'", argv[2])))?;
    let sector = parse_hex_or_dec(&argv[3])
        .ok_or_else(|| WozError::invalid_argument(format!("bad sector number '{}'", argv[3])))?;

    Ok(Args {
        options: InjectOptions::new()
            .with_geometry(geometry)
            .with_interleave(interleave)
            .starting_at(track, sector)
            .verbose(verbose),
        image_path: argv[4].clone(),
        source_path: argv[5].clone(),
    })
}

/// Parse a number with an optional 0x prefix for hexadecimal
fn parse_hex_or_dec(s: &str) -> Option<usize> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        usize::from_str_radix(hex, 16).ok()
    } else {
        s.parse().ok()
    }
}
