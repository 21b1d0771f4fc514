#![no_main]
use huffpack::{decode, encode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let encoded = encode(data);
    let decoded = decode(&encoded.tree, &encoded.data).expect("own output must decode");
    assert_eq!(data, decoded.as_slice());
});
