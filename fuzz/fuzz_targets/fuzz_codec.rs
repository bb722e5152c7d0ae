//! Fuzz target for postcard codec roundtrip.
//!
//! Tests that arbitrary bytes fed to the decoder for persisted domain types
//! never panic, and that successfully decoded values roundtrip correctly.

#![no_main]

use libfuzzer_sys::fuzz_target;

use rollbook_registry::{IdAllocator, RegistryState};
use rollbook_types::{Identity, VoterId, VoterRecord, decode, encode};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let selector = data[0] % 5;
    let payload = &data[1..];

    match selector {
        0 => try_roundtrip::<VoterId>(payload),
        1 => try_roundtrip::<Identity>(payload),
        2 => try_roundtrip::<VoterRecord>(payload),
        3 => try_roundtrip::<IdAllocator>(payload),
        _ => try_roundtrip::<RegistryState>(payload),
    }
});

/// Attempt to decode arbitrary bytes as type T. If successful, re-encode
/// and verify the roundtrip produces the same value.
fn try_roundtrip<T>(data: &[u8])
where
    T: serde::Serialize + serde::de::DeserializeOwned + PartialEq + std::fmt::Debug,
{
    if let Ok(value) = decode::<T>(data) {
        let bytes = encode(&value).expect("re-encode of decoded value");
        let again: T = decode(&bytes).expect("decode of canonical bytes");
        assert_eq!(again, value);
    }
}
