#![no_main]

use huffcode::{CompressedData, HuffmanCodec};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let codec = HuffmanCodec::default();

    let compressed = codec.compress_bytes(data).unwrap();
    let bytes = compressed.serialize().unwrap();
    let restored = CompressedData::deserialize(&bytes).unwrap();

    assert_eq!(data, codec.decompress_bytes(&restored).unwrap());
});
