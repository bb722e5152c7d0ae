//! Fuzz target for snapshot decoding.
//!
//! Arbitrary bytes must never panic the snapshot reader; every corruption
//! shape maps to a typed error. Inputs that do decode must re-encode into a
//! snapshot that decodes to the same state.

#![no_main]

use libfuzzer_sys::fuzz_target;

use rollbook_registry::{decode_snapshot, encode_snapshot};

fuzz_target!(|data: &[u8]| {
    if let Ok((_, state)) = decode_snapshot(data) {
        // Invariant checking must not panic on any decodable state.
        let _ = state.check_invariants();

        let bytes = encode_snapshot(&state).expect("re-encode of decoded state");
        let (_, again) = decode_snapshot(&bytes).expect("decode of fresh snapshot");
        assert_eq!(again, state);
    }
});
