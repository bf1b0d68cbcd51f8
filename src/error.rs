use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while decoding a zlib stream.
///
/// Every error is fatal to the decode call that raised it; the output
/// buffer contents are unspecified after a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// A caller-supplied buffer or size was unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The compressed stream ended before enough bits were available.
    #[error("compressed data stream is truncated")]
    TruncatedInput,

    /// The zlib header declares a compression method other than deflate.
    #[error("unsupported compression method: {0}")]
    UnsupportedMethod(u8),

    /// The zlib header declares an LZ77 window larger than 32 KiB.
    #[error("unsupported compression window size: {0}")]
    UnsupportedWindowSize(u32),

    /// The zlib header has the preset dictionary flag set.
    #[error("preset dictionaries are not supported")]
    UnsupportedPresetDictionary,

    /// The zlib header check bits do not validate.
    #[error("zlib header check bits mismatch")]
    BadZlibHeader,

    /// A block header uses the reserved block type.
    #[error("reserved block type")]
    ReservedBlockType,

    /// A stored block size does not match its one's complement copy.
    #[error("mismatch in stored block size")]
    BlockSizeMismatch,

    /// Huffman code lengths claim more codes than the code space holds.
    #[error("huffman code sizes are over-subscribed")]
    OverSubscribed,

    /// Huffman code lengths leave part of the code space unused.
    #[error("huffman code sizes are incomplete")]
    IncompleteTree,

    /// A dynamic block defines no code for the end-of-block symbol.
    #[error("end-of-block code missing in literal codes")]
    MissingEndOfBlock,

    /// A bit sequence does not correspond to any Huffman code, or a
    /// decoded symbol lies outside its alphabet.
    #[error("invalid huffman encoded value")]
    InvalidSymbol,

    /// A back-reference points before the start of the output or beyond
    /// the declared window.
    #[error("invalid back-reference distance {distance} with {written} bytes written")]
    BadDistance { distance: usize, written: usize },

    /// The output buffer is too small for the decompressed data.
    #[error("uncompressed data buffer too small")]
    OutputOverflow,

    /// The trailing Adler-32 does not match the decompressed data.
    #[error("checksum mismatch (stored: 0x{stored:08x}, calculated: 0x{calculated:08x})")]
    ChecksumMismatch { stored: u32, calculated: u32 },
}
