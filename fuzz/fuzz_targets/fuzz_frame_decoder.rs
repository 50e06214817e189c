//! Fuzz target: `FrameDecoder::feed`
//!
//! Drives arbitrary byte sequences into the streaming frame decoder and
//! asserts that it never panics, never yields an empty or oversized
//! payload, and behaves identically after a reset.
//!
//! cargo fuzz run fuzz_frame_decoder

#![no_main]

use libfuzzer_sys::fuzz_target;
use rfctl::rpc::codec::{FrameDecoder, MAX_FRAME_SIZE};

fn drain(decoder: &mut FrameDecoder, data: &[u8]) -> Vec<Vec<u8>> {
    let mut frames = Vec::new();
    let mut next = decoder.feed(data);
    while let Some(payload) = next {
        assert!(!payload.is_empty(), "decoder must not yield empty payload");
        assert!(payload.len() <= MAX_FRAME_SIZE, "payload exceeds MAX_FRAME_SIZE");
        frames.push(payload);
        next = decoder.next_pending();
    }
    frames
}

fuzz_target!(|data: &[u8]| {
    let mut decoder = FrameDecoder::new();
    let first = drain(&mut decoder, data);

    decoder.reset();
    let second = drain(&mut decoder, data);
    assert_eq!(first, second, "reset must restore a clean decoder");
});
