#![no_main]
use huffpack::decode;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (Vec<u8>, Vec<u8>)| {
    let (tree, packed) = data;
    // Corrupt input must be rejected, never panic.
    let _ = decode(&tree, &packed);
});
