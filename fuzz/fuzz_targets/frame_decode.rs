//! Packed-frame parsing must reject, never panic, and accepted frames
//! must survive a repack round trip.

#![no_main]

use bitframe_proto::wire;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(frame) = wire::unpack(data) {
        let repacked = wire::pack(&frame);
        let reframed = wire::unpack(&repacked).expect("repacked frame must parse");
        assert_eq!(frame, reframed);
    }
});
