use log::{debug, trace};

use crate::adler32::adler32;
use crate::bitstream::BitStream;
use crate::common::{
    DEFLATE_BLOCKTYPE_DYNAMIC_HUFFMAN, DEFLATE_BLOCKTYPE_STATIC_HUFFMAN,
    DEFLATE_BLOCKTYPE_UNCOMPRESSED, DEFLATE_END_OF_BLOCK, DEFLATE_LAST_LEN_SYM,
    DEFLATE_MAX_MATCH_OFFSET, DEFLATE_MAX_NUM_LITLEN_CODES, DEFLATE_MAX_NUM_OFFSET_CODES,
    DEFLATE_NUM_LITLEN_SYMS, DEFLATE_NUM_OFFSET_SYMS, DEFLATE_NUM_PRECODE_SYMS,
    ZLIB_CINFO_32K_WINDOW, ZLIB_CM_DEFLATE, ZLIB_FDICT_FLAG, ZLIB_FOOTER_SIZE,
    ZLIB_MIN_HEADER_SIZE,
};
use crate::error::{Error, Result};
use crate::huffman::{fixed_tables, HuffmanTable};

/// Base lengths for symbols 257..=285.
const LENGTH_BASE: [u16; 29] = [
    3, 4, 5, 6, 7, 8, 9, 10, 11, 13, 15, 17, 19, 23, 27, 31, 35, 43, 51, 59, 67, 83, 99, 115, 131,
    163, 195, 227, 258,
];

/// Extra bits carried by symbols 257..=285.
const LENGTH_EXTRA: [u8; 29] = [
    0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 0,
];

/// Base distances for distance symbols 0..=29.
const DISTANCE_BASE: [u16; 30] = [
    1, 2, 3, 4, 5, 7, 9, 13, 17, 25, 33, 49, 65, 97, 129, 193, 257, 385, 513, 769, 1025, 1537,
    2049, 3073, 4097, 6145, 8193, 12289, 16385, 24577,
];

/// Extra bits carried by distance symbols 0..=29.
const DISTANCE_EXTRA: [u8; 30] = [
    0, 0, 0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 10, 11, 11, 12, 12, 13,
    13,
];

/// Transmission order of the code-length alphabet in a dynamic header.
const CODE_LENGTH_ORDER: [usize; DEFLATE_NUM_PRECODE_SYMS] = [
    16, 17, 18, 0, 8, 7, 9, 6, 10, 5, 11, 4, 12, 3, 13, 2, 14, 1, 15,
];

/// Single-shot zlib decoder.
///
/// Holds the code-length scratch array so repeated decodes do not rebuild
/// it; everything else lives on the stack for the duration of one call.
/// A `Decompressor` is cheap to create and freely movable between decodes,
/// but each concurrent decode needs its own instance.
pub struct Decompressor {
    code_sizes: [u8; DEFLATE_NUM_LITLEN_SYMS + DEFLATE_NUM_OFFSET_SYMS],
    window_size: usize,
}

impl Decompressor {
    pub fn new() -> Self {
        Self {
            code_sizes: [0; DEFLATE_NUM_LITLEN_SYMS + DEFLATE_NUM_OFFSET_SYMS],
            window_size: DEFLATE_MAX_MATCH_OFFSET,
        }
    }

    /// Decompresses a complete zlib stream into `uncompressed`, returning
    /// the number of bytes written.
    ///
    /// The input must contain the 2-byte zlib header, the deflate bit
    /// stream, and normally the 4-byte big-endian Adler-32 trailer, which
    /// is verified against the produced output.
    pub fn decompress(&mut self, compressed: &[u8], uncompressed: &mut [u8]) -> Result<usize> {
        if compressed.len() < ZLIB_MIN_HEADER_SIZE {
            return Err(Error::InvalidArgument("compressed data too small"));
        }

        let header = u16::from_be_bytes([compressed[0], compressed[1]]);
        if header % 31 != 0 {
            return Err(Error::BadZlibHeader);
        }
        let compression_method = compressed[0] & 0x0f;
        let compression_information = compressed[0] >> 4;
        if compression_method != ZLIB_CM_DEFLATE {
            return Err(Error::UnsupportedMethod(compression_method));
        }
        if compression_information > ZLIB_CINFO_32K_WINDOW {
            return Err(Error::UnsupportedWindowSize(
                1u32 << (compression_information + 8),
            ));
        }
        if compressed[1] & ZLIB_FDICT_FLAG != 0 {
            return Err(Error::UnsupportedPresetDictionary);
        }
        self.window_size = 1usize << (compression_information + 8);
        trace!(
            "zlib header: window size {}, compression level {}",
            self.window_size,
            compressed[1] >> 6
        );

        let mut bits = BitStream::new(compressed, ZLIB_MIN_HEADER_SIZE);
        let mut written = 0usize;

        loop {
            let block_header = bits.get_bits(3)?;
            let last_block = block_header & 1 != 0;
            let block_type = (block_header >> 1) as u8;
            trace!("block type {block_type}, last block {last_block}");

            match block_type {
                DEFLATE_BLOCKTYPE_UNCOMPRESSED => {
                    self.stored_block(&mut bits, uncompressed, &mut written)?;
                }
                DEFLATE_BLOCKTYPE_STATIC_HUFFMAN => {
                    let (literals, distances) = fixed_tables();
                    self.huffman_block(&mut bits, literals, distances, uncompressed, &mut written)?;
                }
                DEFLATE_BLOCKTYPE_DYNAMIC_HUFFMAN => {
                    let (literals, distances) = self.dynamic_tables(&mut bits)?;
                    self.huffman_block(
                        &mut bits,
                        &literals,
                        &distances,
                        uncompressed,
                        &mut written,
                    )?;
                }
                _ => return Err(Error::ReservedBlockType),
            }
            if last_block {
                break;
            }
        }

        bits.rewind_buffered_bytes();
        if bits.remaining_bytes() >= ZLIB_FOOTER_SIZE {
            let trailer = bits.read_slice(ZLIB_FOOTER_SIZE)?;
            let stored = u32::from_be_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
            let calculated = adler32(1, &uncompressed[..written]);
            debug!("stored checksum 0x{stored:08x}, calculated checksum 0x{calculated:08x}");
            if stored != calculated {
                return Err(Error::ChecksumMismatch { stored, calculated });
            }
        }
        Ok(written)
    }

    /// Copies one stored block. The LEN/NLEN words and the raw data go
    /// through the byte cursor; the bit buffer is drained first and is
    /// empty for the copy.
    fn stored_block(
        &self,
        bits: &mut BitStream<'_>,
        output: &mut [u8],
        written: &mut usize,
    ) -> Result<()> {
        bits.align_to_byte();
        let sizes = bits.get_bits(32)?;
        let block_size = (sizes & 0xffff) as usize;
        let block_size_copy = ((sizes >> 16) ^ 0xffff) as usize;
        if block_size != block_size_copy {
            return Err(Error::BlockSizeMismatch);
        }
        trace!("stored block of {block_size} bytes");
        if block_size == 0 {
            return Ok(());
        }
        let data = bits.read_slice(block_size)?;
        let end = *written + block_size;
        if end > output.len() {
            return Err(Error::OutputOverflow);
        }
        output[*written..end].copy_from_slice(data);
        *written = end;
        Ok(())
    }

    /// Reads the dynamic block metadata and builds the literal/length and
    /// distance tables from the run-length encoded code sizes.
    fn dynamic_tables(
        &mut self,
        bits: &mut BitStream<'_>,
    ) -> Result<(HuffmanTable, HuffmanTable)> {
        let counts = bits.get_bits(14)?;
        let number_of_literal_codes = (counts & 0x1f) as usize + 257;
        let number_of_distance_codes = ((counts >> 5) & 0x1f) as usize + 1;
        let number_of_code_sizes = ((counts >> 10) & 0x0f) as usize + 4;
        trace!(
            "dynamic header: {number_of_literal_codes} literal codes, \
             {number_of_distance_codes} distance codes, {number_of_code_sizes} code sizes"
        );
        if number_of_literal_codes > DEFLATE_MAX_NUM_LITLEN_CODES {
            return Err(Error::InvalidSymbol);
        }
        if number_of_distance_codes > DEFLATE_MAX_NUM_OFFSET_CODES {
            return Err(Error::InvalidSymbol);
        }

        let mut precode_sizes = [0u8; DEFLATE_NUM_PRECODE_SYMS];
        for index in 0..number_of_code_sizes {
            precode_sizes[CODE_LENGTH_ORDER[index]] = bits.get_bits(3)? as u8;
        }
        let precode_table = HuffmanTable::construct(&precode_sizes)?;

        let total = number_of_literal_codes + number_of_distance_codes;
        let mut index = 0;
        while index < total {
            let symbol = precode_table.decode_symbol(bits)?;
            let (repeated_size, times_to_repeat) = match symbol {
                0..=15 => {
                    self.code_sizes[index] = symbol as u8;
                    index += 1;
                    continue;
                }
                16 => {
                    if index == 0 {
                        return Err(Error::InvalidSymbol);
                    }
                    let previous = self.code_sizes[index - 1];
                    (previous, 3 + bits.get_bits(2)? as usize)
                }
                17 => (0, 3 + bits.get_bits(3)? as usize),
                18 => (0, 11 + bits.get_bits(7)? as usize),
                _ => return Err(Error::InvalidSymbol),
            };
            if index + times_to_repeat > total {
                return Err(Error::InvalidSymbol);
            }
            self.code_sizes[index..index + times_to_repeat].fill(repeated_size);
            index += times_to_repeat;
        }

        if self.code_sizes[DEFLATE_END_OF_BLOCK] == 0 {
            return Err(Error::MissingEndOfBlock);
        }
        let literals = HuffmanTable::construct(&self.code_sizes[..number_of_literal_codes])?;
        let distances =
            HuffmanTable::construct(&self.code_sizes[number_of_literal_codes..total])?;
        Ok((literals, distances))
    }

    /// Decodes one Huffman block body: literals are copied through, and
    /// length/distance pairs replay already-written output.
    fn huffman_block(
        &self,
        bits: &mut BitStream<'_>,
        literals: &HuffmanTable,
        distances: &HuffmanTable,
        output: &mut [u8],
        written: &mut usize,
    ) -> Result<()> {
        loop {
            let symbol = literals.decode_symbol(bits)?;
            if symbol < DEFLATE_END_OF_BLOCK as u16 {
                if *written >= output.len() {
                    return Err(Error::OutputOverflow);
                }
                output[*written] = symbol as u8;
                *written += 1;
                continue;
            }
            if symbol == DEFLATE_END_OF_BLOCK as u16 {
                return Ok(());
            }
            if symbol > DEFLATE_LAST_LEN_SYM {
                return Err(Error::InvalidSymbol);
            }

            let length_index = usize::from(symbol - 257);
            let length = usize::from(LENGTH_BASE[length_index])
                + bits.get_bits(LENGTH_EXTRA[length_index])? as usize;

            let distance_symbol = distances.decode_symbol(bits)?;
            if usize::from(distance_symbol) >= DEFLATE_MAX_NUM_OFFSET_CODES {
                return Err(Error::InvalidSymbol);
            }
            let distance_index = usize::from(distance_symbol);
            let distance = usize::from(DISTANCE_BASE[distance_index])
                + bits.get_bits(DISTANCE_EXTRA[distance_index])? as usize;

            if distance > *written || distance > self.window_size {
                return Err(Error::BadDistance {
                    distance,
                    written: *written,
                });
            }
            let end = *written + length;
            if end > output.len() {
                return Err(Error::OutputOverflow);
            }
            // The copy must stay byte-by-byte: length may exceed distance,
            // replicating the trailing pattern as it is written.
            for offset in *written..end {
                output[offset] = output[offset - distance];
            }
            *written = end;
        }
    }
}

impl Default for Decompressor {
    fn default() -> Self {
        Self::new()
    }
}
