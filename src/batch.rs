use rayon::prelude::*;

use crate::decompress::Decompressor;

/// Decompresses independent zlib streams in parallel.
///
/// Each worker thread keeps one scratch [`Decompressor`]; the buffers
/// never alias, so the decodes are free of shared mutable state.
pub struct BatchDecompressor;

impl BatchDecompressor {
    pub fn new() -> Self {
        Self
    }

    /// Decompresses each input into a buffer of the paired maximum size.
    /// A failed stream yields `None` in its slot.
    pub fn decompress_batch(
        &self,
        inputs: &[&[u8]],
        max_out_sizes: &[usize],
    ) -> Vec<Option<Vec<u8>>> {
        inputs
            .par_iter()
            .zip(max_out_sizes.par_iter())
            .map_init(Decompressor::new, |decompressor, (&input, &max_size)| {
                let mut output = vec![0u8; max_size];
                match decompressor.decompress(input, &mut output) {
                    Ok(size) => {
                        output.truncate(size);
                        Some(output)
                    }
                    Err(_) => None,
                }
            })
            .collect()
    }
}

impl Default for BatchDecompressor {
    fn default() -> Self {
        Self::new()
    }
}
