#![no_main]

use huffcode::header;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(tree) = header::deserialize(data) {
        assert_eq!(header::serialize(&tree), data);
    }
});
