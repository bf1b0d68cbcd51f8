mod common;

use common::BitWriter;
use zinflate::decompress::Decompressor;
use zinflate::error::Error;

fn decode(data: &[u8]) -> Result<usize, Error> {
    let mut output = [0u8; 1024];
    Decompressor::new().decompress(data, &mut output)
}

#[test]
fn test_input_too_small() {
    assert!(matches!(decode(&[]), Err(Error::InvalidArgument(_))));
    assert!(matches!(decode(&[0x78]), Err(Error::InvalidArgument(_))));
}

#[test]
fn test_bad_header_check_bits() {
    // 0x7802 is not a multiple of 31.
    assert_eq!(decode(&[0x78, 0x02]), Err(Error::BadZlibHeader));
}

#[test]
fn test_unsupported_method() {
    // Compression method 9 with valid check bits.
    assert_eq!(decode(&[0x79, 0x18]), Err(Error::UnsupportedMethod(9)));
}

#[test]
fn test_unsupported_window_size() {
    // CINFO 8 declares a 64 KiB window.
    assert_eq!(
        decode(&[0x88, 0x1c]),
        Err(Error::UnsupportedWindowSize(65536))
    );
}

#[test]
fn test_preset_dictionary_rejected() {
    assert_eq!(
        decode(&[0x78, 0x20]),
        Err(Error::UnsupportedPresetDictionary)
    );
}

#[test]
fn test_reserved_block_type() {
    assert_eq!(decode(&[0x78, 0x01, 0x07]), Err(Error::ReservedBlockType));
}

#[test]
fn test_stored_block_size_mismatch() {
    let data = [
        0x78, 0x01, 0x01, 0x05, 0x00, 0xfa, 0xfe, b'h', b'e', b'l', b'l', b'o',
    ];
    assert_eq!(decode(&data), Err(Error::BlockSizeMismatch));
}

#[test]
fn test_stored_block_truncated_data() {
    // LEN claims five bytes, the input carries two.
    let data = [0x78, 0x01, 0x01, 0x05, 0x00, 0xfa, 0xff, b'h', b'e'];
    assert_eq!(decode(&data), Err(Error::TruncatedInput));
}

#[test]
fn test_truncated_inside_huffman_block() {
    // "abcabc" vector cut in the middle of a literal code.
    let data = [0x78, 0x01, 0x4b, 0x4c, 0x4a];
    assert_eq!(decode(&data), Err(Error::TruncatedInput));
}

#[test]
fn test_checksum_mismatch() {
    let mut data = vec![
        0x78, 0x01, 0x4b, 0x4c, 0x4a, 0x4e, 0x4c, 0x4a, 0x06, 0x00, 0x08, 0x0c, 0x02, 0x4d,
    ];
    *data.last_mut().unwrap() ^= 0xff;
    match decode(&data) {
        Err(Error::ChecksumMismatch { stored, calculated }) => {
            assert_eq!(calculated, 0x080c024d);
            assert_eq!(stored, 0x080c02b2);
        }
        other => panic!("expected checksum mismatch, got {other:?}"),
    }
}

#[test]
fn test_bad_distance() {
    // Fixed block opening with a length/distance pair: nothing has been
    // written yet, so any distance is out of range.
    let data = [0x78, 0x01, 0x03, 0x02];
    assert_eq!(
        decode(&data),
        Err(Error::BadDistance {
            distance: 1,
            written: 0
        })
    );
}

#[test]
fn test_output_overflow_on_literals() {
    let data = [
        0x78, 0x01, 0x4b, 0x4c, 0x4a, 0x4e, 0x4c, 0x4a, 0x06, 0x00, 0x08, 0x0c, 0x02, 0x4d,
    ];
    let mut output = [0u8; 3];
    let result = Decompressor::new().decompress(&data, &mut output);
    assert_eq!(result, Err(Error::OutputOverflow));
}

#[test]
fn test_output_overflow_on_back_reference() {
    // Literal 'a' plus a 258-byte fill does not fit in 16 bytes.
    let data = [0x78, 0x01, 0x4b, 0x1c, 0x05, 0x00, 0xd9, 0xa8, 0x62, 0x24];
    let mut output = [0u8; 16];
    let result = Decompressor::new().decompress(&data, &mut output);
    assert_eq!(result, Err(Error::OutputOverflow));
}

#[test]
fn test_output_overflow_on_stored_block() {
    let data = [
        0x78, 0x01, 0x01, 0x05, 0x00, 0xfa, 0xff, b'h', b'e', b'l', b'l', b'o', 0x06, 0x2c, 0x02,
        0x15,
    ];
    let mut output = [0u8; 4];
    let result = Decompressor::new().decompress(&data, &mut output);
    assert_eq!(result, Err(Error::OutputOverflow));
}

fn dynamic_header(precode_sizes_in_order: &[u32], hclen: u32) -> BitWriter {
    let mut writer = BitWriter::new();
    writer.push_bits(1, 1); // BFINAL
    writer.push_bits(2, 2); // dynamic
    writer.push_bits(0, 5); // HLIT = 257
    writer.push_bits(0, 5); // HDIST = 1
    writer.push_bits(hclen - 4, 4);
    for &size in precode_sizes_in_order {
        writer.push_bits(size, 3);
    }
    writer
}

#[test]
fn test_over_subscribed_code_sizes() {
    // Nineteen one-bit codes claim sixteen times the available space.
    let writer = dynamic_header(&[1; 19], 19);
    let mut data = vec![0x78, 0x01];
    data.extend_from_slice(&writer.into_bytes());
    assert_eq!(decode(&data), Err(Error::OverSubscribed));
}

#[test]
fn test_incomplete_code_sizes() {
    // Two two-bit codes leave half the code space dangling.
    let writer = dynamic_header(&[0, 0, 2, 2], 4);
    let mut data = vec![0x78, 0x01];
    data.extend_from_slice(&writer.into_bytes());
    assert_eq!(decode(&data), Err(Error::IncompleteTree));
}

#[test]
fn test_missing_end_of_block_code() {
    // Literal sizes give symbols 0 and 1 one-bit codes and leave
    // symbol 256 with none.
    let mut writer = dynamic_header(
        &[0, 2, 2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2],
        18,
    );
    // Code-length codes: 0 -> 00, 1 -> 01, 17 -> 10, 18 -> 11.
    writer.push_code(0b01, 2); // size 1
    writer.push_code(0b01, 2); // size 1
    writer.push_code(0b11, 2); // 18: 138 zeros
    writer.push_bits(127, 7);
    writer.push_code(0b10, 2); // 17: 10 zeros
    writer.push_bits(7, 3);
    writer.push_code(0b11, 2); // 18: 107 zeros
    writer.push_bits(96, 7);
    writer.push_code(0b00, 2); // distance size 0

    let mut data = vec![0x78, 0x01];
    data.extend_from_slice(&writer.into_bytes());
    assert_eq!(decode(&data), Err(Error::MissingEndOfBlock));
}

#[test]
fn test_repeat_code_without_previous_length() {
    // The very first code-length symbol is 16, which repeats a length
    // that does not exist.
    let mut writer = dynamic_header(
        &[2, 2, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2],
        18,
    );
    // Code-length codes: 0 -> 00, 1 -> 01, 16 -> 10, 17 -> 11.
    writer.push_code(0b10, 2); // 16 with nothing before it
    writer.push_bits(0, 2);

    let mut data = vec![0x78, 0x01];
    data.extend_from_slice(&writer.into_bytes());
    assert_eq!(decode(&data), Err(Error::InvalidSymbol));
}

#[test]
fn test_repeat_run_past_end() {
    // 16 one-bit literal sizes would over-subscribe; use a run of zeros
    // that overshoots the declared 258 code sizes instead.
    let mut writer = dynamic_header(
        &[0, 2, 2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2],
        18,
    );
    // Code-length codes: 0 -> 00, 1 -> 01, 17 -> 10, 18 -> 11.
    writer.push_code(0b01, 2); // size 1 on symbol 0
    for _ in 0..2 {
        writer.push_code(0b11, 2); // 18: 138 zeros each
        writer.push_bits(127, 7);
    }
    // 1 + 138 + 138 = 277 entries > 258.
    let mut data = vec![0x78, 0x01];
    data.extend_from_slice(&writer.into_bytes());
    assert_eq!(decode(&data), Err(Error::InvalidSymbol));
}

#[test]
fn test_truncated_dynamic_header() {
    let writer = dynamic_header(&[0, 0], 4);
    let mut data = vec![0x78, 0x01];
    let mut bytes = writer.into_bytes();
    bytes.truncate(3);
    data.extend_from_slice(&bytes);
    assert_eq!(decode(&data), Err(Error::TruncatedInput));
}
