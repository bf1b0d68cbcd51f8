//! Single-shot zlib (RFC 1950) and DEFLATE (RFC 1951) decompression.

pub mod adler32;
pub mod api;
pub mod batch;
pub mod bitstream;
pub mod common;
pub mod decompress;
pub mod error;
pub mod huffman;

pub use adler32::adler32;
pub use api::Decompressor;
pub use batch::BatchDecompressor;
pub use error::{Error, Result};
