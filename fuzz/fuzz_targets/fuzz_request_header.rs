//! Fuzz target: request header decoding
//!
//! Arbitrary frame payloads must decode to a header or a codec error,
//! never panic, and the argument tail must lie inside the input.
//!
//! cargo fuzz run fuzz_request_header

#![no_main]

use libfuzzer_sys::fuzz_target;
use rfctl::rpc::wire::decode_request_header;

fuzz_target!(|data: &[u8]| {
    if let Ok((header, rest)) = decode_request_header(data) {
        assert!(rest.len() < data.len());
        assert!(header.method.len() <= data.len());
    }
});
