use std::io::Cursor;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use huffcode::{
    header, BitSink, BitSource, CodeTable, CodecConfig, CompressedData, CompressedWriter, EmptyInputPolicy,
    FrequencyTable, HuffmanCodec, HuffmanError, HuffmanTree,
};

fn roundtrip(data: &[u8]) -> CompressedData {
    let codec = HuffmanCodec::default();
    let compressed = codec.compress_bytes(data).unwrap();
    assert_eq!(codec.decompress_bytes(&compressed).unwrap(), data);
    compressed
}

#[test]
fn identical_bytes() {
    let compressed = roundtrip(b"aaaa");
    assert_eq!(compressed.header(), b".a");
    assert_eq!(compressed.bit_count(), 4);
}

#[test]
fn two_distinct_bytes() {
    let compressed = roundtrip(b"ab");
    assert!(compressed.header() == b"(.a.b)" || compressed.header() == b"(.b.a)");
    assert_eq!(compressed.bit_count(), 2);
}

#[test]
fn skewed_counts() {
    let compressed = roundtrip(b"aaabbc");
    let tree = header::deserialize(compressed.header()).unwrap();
    let codes = CodeTable::from_tree(&tree);
    let len = |b: u8| codes.get(b).unwrap().len();
    assert!(len(b'a') < len(b'b'));
    assert!(len(b'c') >= len(b'b'));
    assert_eq!(compressed.bit_count(), 3 * len(b'a') + 2 * len(b'b') + len(b'c'));
}

#[test]
fn empty_input_encodes_to_empty_header() {
    let compressed = roundtrip(b"");
    assert!(compressed.header().is_empty());
    assert_eq!(compressed.bit_count(), 0);

    let strict = HuffmanCodec::new(CodecConfig::new().with_empty_input(EmptyInputPolicy::Reject));
    assert!(matches!(strict.compress_bytes(b""), Err(HuffmanError::EmptyInput)));
}

#[test]
fn unbalanced_header_is_format_error() {
    assert!(matches!(
        header::deserialize(b"(.a"),
        Err(HuffmanError::Format { .. })
    ));
}

#[test]
fn every_byte_value() {
    let data: Vec<u8> = (0..4096u32).map(|i| (i * 7 % 256) as u8).collect();
    roundtrip(&data);
}

#[test]
fn text_shrinks() {
    let text = "It was the best of times, it was the worst of times, it was the age of wisdom, \
                it was the age of foolishness, it was the epoch of belief, it was the epoch of \
                incredulity, it was the season of Light, it was the season of Darkness.";
    let text = text.repeat(4);
    let compressed = roundtrip(text.as_bytes());
    assert!(compressed.serialized_len() < text.len());
}

#[test]
fn seeded_random_inputs() {
    let mut rng = StdRng::seed_from_u64(0x5eed_cafe);
    for _ in 0..400 {
        let len: usize = rng.gen_range(1..2048);
        let alphabet: u16 = rng.gen_range(1..=256);
        let offset: u8 = rng.gen();
        let data: Vec<u8> = (0..len)
            .map(|_| offset.wrapping_add(rng.gen_range(0..alphabet) as u8))
            .collect();

        let compressed = roundtrip(&data);
        let codes = CodeTable::from_tree(&header::deserialize(compressed.header()).unwrap());
        for (a, code_a) in codes.iter() {
            for (b, code_b) in codes.iter() {
                assert!(a == b || !code_a.is_prefix_of(code_b));
            }
        }
    }
}

#[test]
fn seeded_skewed_inputs() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100 {
        let len: usize = rng.gen_range(1..4096);
        // geometric-ish counts give deep, lopsided trees
        let data: Vec<u8> = (0..len)
            .map(|_| {
                let mut symbol = 0u8;
                while symbol < 40 && rng.gen_bool(0.5) {
                    symbol += 1;
                }
                symbol
            })
            .collect();
        roundtrip(&data);
    }
}

#[test]
fn headers_are_deterministic() {
    let data = b"she sells sea shells by the sea shore";
    let a = roundtrip(data);
    let b = roundtrip(data);
    assert_eq!(a, b);
}

#[test]
fn header_round_trips_built_trees() {
    for data in [&b"x"[..], b"xy", b"hello world", b"\x00\x01\x02((..))"] {
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(data)).unwrap();
        assert_eq!(header::deserialize(&header::serialize(&tree)).unwrap(), tree);
    }
}

#[test]
fn file_wrappers_round_trip() {
    let original = b"Huffman encoding is a greedy algorithm that builds optimal prefix codes.".to_vec();
    let codec = HuffmanCodec::default();

    let mut packed = Vec::new();
    codec.encode_from_file(Cursor::new(&original), &mut packed).unwrap();
    let compressed = CompressedData::deserialize(&packed).unwrap();
    assert_eq!(compressed.serialized_len(), packed.len());

    let mut restored = Vec::new();
    codec.decode_from_file(Cursor::new(&packed), &mut restored).unwrap();
    assert_eq!(restored, original);
}

#[test]
fn truncated_bits_are_reported() {
    let codec = HuffmanCodec::default();
    let compressed = codec.compress_bytes(b"abcabcabcd").unwrap();

    // replay the same header with one bit missing
    let mut writer = CompressedWriter::new();
    let mut reader = compressed.reader();
    writer.write_header(&reader.read_header().unwrap()).unwrap();
    for _ in 0..compressed.bit_count() - 1 {
        writer.write_bit(reader.read_bit().unwrap().unwrap()).unwrap();
    }
    let short = writer.finish();

    let err = codec.decompress_bytes(&short).unwrap_err();
    assert!(matches!(err, HuffmanError::TruncatedStream { .. }));
}

#[test]
fn free_functions_use_defaults() {
    let mut writer = CompressedWriter::new();
    let bits = huffcode::compress(&mut Cursor::new(b"mississippi"), &mut writer).unwrap();
    let compressed = writer.finish();
    assert_eq!(bits as usize, compressed.bit_count());

    let mut out = Vec::new();
    let bytes = huffcode::decompress(compressed.reader(), &mut out).unwrap();
    assert_eq!(bytes, 11);
    assert_eq!(out, b"mississippi");
}
