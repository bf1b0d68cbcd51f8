use std::sync::OnceLock;

use crate::bitstream::BitStream;
use crate::common::{
    DEFLATE_MAX_CODEWORD_LEN, DEFLATE_MAX_NUM_SYMS, DEFLATE_NUM_LITLEN_SYMS,
    DEFLATE_NUM_OFFSET_SYMS,
};
use crate::error::{Error, Result};

/// A canonical Huffman table: the number of codes per length plus the
/// symbols sorted by (code length, symbol). Decoding walks the lengths
/// from short to long, narrowing the candidate range one bit at a time.
#[derive(Clone)]
pub struct HuffmanTable {
    max_bits: u8,
    counts: [u16; DEFLATE_MAX_CODEWORD_LEN + 1],
    symbols: [u16; DEFLATE_MAX_NUM_SYMS],
    empty: bool,
}

impl HuffmanTable {
    /// Builds the table from per-symbol code lengths.
    ///
    /// An all-zero length vector yields an empty table, which decodes
    /// nothing; a block may legitimately carry one for its distance
    /// alphabet. Over-subscribed lengths are rejected, and so are
    /// incomplete ones except for the single-code case RFC 1951 permits.
    pub fn construct(code_sizes: &[u8]) -> Result<Self> {
        debug_assert!(code_sizes.len() <= DEFLATE_MAX_NUM_SYMS);

        let mut table = HuffmanTable {
            max_bits: DEFLATE_MAX_CODEWORD_LEN as u8,
            counts: [0; DEFLATE_MAX_CODEWORD_LEN + 1],
            symbols: [0; DEFLATE_MAX_NUM_SYMS],
            empty: false,
        };
        for &code_size in code_sizes {
            debug_assert!(usize::from(code_size) <= DEFLATE_MAX_CODEWORD_LEN);
            table.counts[usize::from(code_size)] += 1;
        }
        if usize::from(table.counts[0]) == code_sizes.len() {
            table.empty = true;
            return Ok(table);
        }

        let mut left: i32 = 1;
        for &count in &table.counts[1..] {
            left = (left << 1) - i32::from(count);
            if left < 0 {
                return Err(Error::OverSubscribed);
            }
        }
        if left > 0 {
            // A lone code is valid (RFC 1951 encodes a single-symbol
            // distance alphabet with one bit); anything else incomplete
            // is rejected.
            let assigned: u16 = table.counts[1..].iter().sum();
            if assigned != 1 {
                return Err(Error::IncompleteTree);
            }
        }

        let mut offsets = [0u16; DEFLATE_MAX_CODEWORD_LEN + 1];
        for bit_index in 1..DEFLATE_MAX_CODEWORD_LEN {
            offsets[bit_index + 1] = offsets[bit_index] + table.counts[bit_index];
        }
        for (symbol, &code_size) in code_sizes.iter().enumerate() {
            if code_size == 0 {
                continue;
            }
            let offset = usize::from(offsets[usize::from(code_size)]);
            table.symbols[offset] = symbol as u16;
            offsets[usize::from(code_size)] += 1;
        }
        Ok(table)
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Decodes one symbol from the bit stream.
    ///
    /// Consumes exactly as many bits as the matched code is long. When no
    /// code matches, the failure is reported as truncation if the walk was
    /// cut short by the end of the input, and as an invalid symbol
    /// otherwise.
    pub fn decode_symbol(&self, bits: &mut BitStream<'_>) -> Result<u16> {
        bits.fill(self.max_bits);
        let (mut bit_buffer, available) = bits.peek();
        let number_of_bits = self.max_bits.min(available);

        let mut code: u32 = 0;
        let mut first_code: u32 = 0;
        let mut first_index: u32 = 0;
        for bit_index in 1..=number_of_bits {
            code = (code << 1) | (bit_buffer & 1);
            bit_buffer >>= 1;

            let count = u32::from(self.counts[usize::from(bit_index)]);
            if code < first_code + count {
                bits.consume(bit_index);
                return Ok(self.symbols[(first_index + (code - first_code)) as usize]);
            }
            first_code = (first_code + count) << 1;
            first_index += count;
        }
        if number_of_bits < self.max_bits && bits.is_exhausted() {
            Err(Error::TruncatedInput)
        } else {
            Err(Error::InvalidSymbol)
        }
    }
}

struct FixedTables {
    literals: HuffmanTable,
    distances: HuffmanTable,
}

static FIXED_TABLES: OnceLock<FixedTables> = OnceLock::new();

/// The fixed literal/length and distance tables of RFC 1951 3.2.6,
/// built once per process.
pub fn fixed_tables() -> (&'static HuffmanTable, &'static HuffmanTable) {
    let tables = FIXED_TABLES.get_or_init(|| {
        let mut code_sizes = [0u8; DEFLATE_NUM_LITLEN_SYMS + DEFLATE_NUM_OFFSET_SYMS];
        for (symbol, code_size) in code_sizes.iter_mut().enumerate() {
            *code_size = match symbol {
                0..=143 => 8,
                144..=255 => 9,
                256..=279 => 7,
                280..=287 => 8,
                // All 32 distance symbols, including the two that never
                // occur in a valid stream, keep the tree complete.
                _ => 5,
            };
        }
        FixedTables {
            literals: HuffmanTable::construct(&code_sizes[..DEFLATE_NUM_LITLEN_SYMS])
                .expect("fixed literal code sizes are complete"),
            distances: HuffmanTable::construct(&code_sizes[DEFLATE_NUM_LITLEN_SYMS..])
                .expect("fixed distance code sizes are complete"),
        }
    });
    (&tables.literals, &tables.distances)
}
