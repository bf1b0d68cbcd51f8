//! Decompresses a file as zlib compressed data, writing the result to
//! `<source>.zdecompressed`.

use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use zinflate::{Decompressor, Error};

#[derive(Parser, Debug)]
#[command(name = "zdecompress", version)]
#[command(about = "Decompress data as zlib compressed data")]
struct Args {
    /// Source file containing the compressed data
    #[arg(value_name = "SOURCE")]
    source: PathBuf,

    /// Offset of the compressed data in the source file
    #[arg(short = 'o', long, default_value_t = 0)]
    offset: u64,

    /// Size of the compressed data (default is the remainder of the file)
    #[arg(short = 's', long)]
    size: Option<u64>,

    /// Verbose output to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("zdecompress: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), String> {
    let data = fs::read(&args.source)
        .map_err(|error| format!("unable to read {}: {error}", args.source.display()))?;

    let offset = usize::try_from(args.offset).map_err(|_| "invalid offset".to_string())?;
    if offset >= data.len() {
        return Err(format!(
            "offset {offset} is beyond the end of the source file ({} bytes)",
            data.len()
        ));
    }
    let end = match args.size {
        Some(size) => {
            let size = usize::try_from(size).map_err(|_| "invalid size".to_string())?;
            offset.saturating_add(size).min(data.len())
        }
        None => data.len(),
    };
    let compressed = &data[offset..end];

    if args.verbose {
        eprintln!(
            "decompressing {} bytes at offset {offset} of {}",
            compressed.len(),
            args.source.display()
        );
    }

    let uncompressed = decompress_with_retry(compressed)?;

    let mut destination = OsString::from(args.source.as_os_str());
    destination.push(".zdecompressed");
    fs::write(&destination, &uncompressed).map_err(|error| {
        format!(
            "unable to write {}: {error}",
            PathBuf::from(&destination).display()
        )
    })?;

    if args.verbose {
        eprintln!(
            "wrote {} bytes to {}",
            uncompressed.len(),
            PathBuf::from(&destination).display()
        );
    }
    Ok(())
}

/// The decompressed size is not recorded in a zlib stream; start from a
/// 16x estimate and grow until the decode fits or the decoder's safety
/// limit cuts the search off.
fn decompress_with_retry(compressed: &[u8]) -> Result<Vec<u8>, String> {
    let mut decompressor = Decompressor::new();
    let mut expected_size = compressed.len().saturating_mul(16).max(4096);
    loop {
        match decompressor.decompress_zlib(compressed, expected_size) {
            Ok(output) => return Ok(output),
            Err(Error::OutputOverflow) => {
                expected_size = expected_size.saturating_mul(4);
            }
            Err(error) => return Err(error.to_string()),
        }
    }
}
