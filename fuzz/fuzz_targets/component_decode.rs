//! The version-gated field walk must reject malformed frames, never
//! panic, at any version.

#![no_main]

use arbitrary::Arbitrary;
use bitframe_harness::components::TELEMETRY_SCHEMA;
use bitframe_proto::{BitString, Reader};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    version: u32,
    bits: Vec<bool>,
}

fuzz_target!(|input: Input| {
    let digits: String = input.bits.iter().map(|&b| if b { '1' } else { '0' }).collect();
    if digits.is_empty() {
        return;
    }
    let stream = BitString::from_text(&digits).expect("generated digits are binary");
    let mut reader = Reader::new(&stream);
    let _ = TELEMETRY_SCHEMA.decode(&mut reader, input.version);
});
