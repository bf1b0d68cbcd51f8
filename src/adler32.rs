const DIVISOR: u32 = 65521;

/* The largest number of bytes whose worst-case running sums still fit in
 * 32 bits, so the modulo can be deferred to the end of each chunk.
 */
const MAX_CHUNK_LEN: usize = 5552;

/// Folds the high word back into the low word; two rounds suffice for
/// sums accumulated over at most `MAX_CHUNK_LEN` bytes.
#[inline]
fn reduce(mut word: u32) -> u32 {
    word = (word & 0xffff) + (word >> 16) * 15;
    if word > DIVISOR {
        word = (word & 0xffff) + (word >> 16) * 15;
    }
    if word >= DIVISOR {
        word -= DIVISOR;
    }
    word
}

/// Computes the Adler-32 of `buffer`, continuing from a previous value.
///
/// Pass 1 to start a new checksum. Checksums thread through
/// concatenation: `adler32(adler32(1, a), b)` equals the checksum of
/// `a` followed by `b`.
pub fn adler32(adler: u32, buffer: &[u8]) -> u32 {
    let mut lower_word = adler & 0xffff;
    let mut upper_word = (adler >> 16) & 0xffff;

    for chunk in buffer.chunks(MAX_CHUNK_LEN) {
        for &byte in chunk {
            lower_word += u32::from(byte);
            upper_word += lower_word;
        }
        lower_word = reduce(lower_word);
        upper_word = reduce(upper_word);
    }
    (upper_word << 16) | lower_word
}
