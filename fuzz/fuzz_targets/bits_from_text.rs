//! Bit-string construction must reject, never panic.

#![no_main]

use bitframe_proto::BitString;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|text: &str| {
    // The validity check and the constructor must always agree.
    let parsed = BitString::from_text(text);
    assert_eq!(parsed.is_ok(), BitString::is_binary(text));
    if let Ok(bits) = parsed {
        assert_eq!(bits.to_string(), text);
    }
});
