use crate::decompress::Decompressor as InternalDecompressor;
use crate::error::{Error, Result};

/// Allocating front end over [`crate::decompress::Decompressor`].
///
/// Sizes the output from a caller-supplied expectation and guards the
/// allocation against decompression bombs: the expected size may not
/// exceed a configurable multiple of the input size, nor an absolute
/// memory limit.
pub struct Decompressor {
    inner: InternalDecompressor,
    max_memory_limit: usize,
    limit_ratio: usize,
}

impl Decompressor {
    pub fn new() -> Self {
        Self {
            inner: InternalDecompressor::new(),
            max_memory_limit: usize::MAX,
            // Deflate tops out around 1032:1; allow a generous margin.
            limit_ratio: 2000,
        }
    }

    /// Caps the output allocation in bytes.
    pub fn set_max_memory_limit(&mut self, limit: usize) {
        self.max_memory_limit = limit;
    }

    /// Caps the output allocation as a multiple of the input size.
    pub fn set_limit_ratio(&mut self, ratio: usize) {
        self.limit_ratio = ratio;
    }

    /// Decompresses a zlib stream into a freshly allocated buffer of at
    /// most `expected_size` bytes, truncated to the decoded length.
    pub fn decompress_zlib(&mut self, data: &[u8], expected_size: usize) -> Result<Vec<u8>> {
        let limit = data
            .len()
            .saturating_mul(self.limit_ratio)
            .saturating_add(4096);
        if expected_size > limit {
            return Err(Error::InvalidArgument(
                "expected size exceeds safety limit for input size",
            ));
        }
        if expected_size > self.max_memory_limit {
            return Err(Error::InvalidArgument(
                "expected size exceeds maximum memory limit",
            ));
        }

        let mut output = vec![0u8; expected_size];
        let size = self.inner.decompress(data, &mut output)?;
        output.truncate(size);
        Ok(output)
    }

    /// Decompresses a zlib stream into a caller-provided buffer,
    /// returning the number of bytes written.
    pub fn decompress_zlib_into(&mut self, data: &[u8], output: &mut [u8]) -> Result<usize> {
        self.inner.decompress(data, output)
    }
}

impl Default for Decompressor {
    fn default() -> Self {
        Self::new()
    }
}
