//! RPC message layout inside a frame.
//!
//! ```text
//! request: [ RequestHeader ][ args tuple ]     (both postcard)
//! reply:   [ ReplyHeader   ][ Reply<R>   ]
//! ```
//!
//! The header is decoded on its own with `take_from_bytes`, so the
//! receiving side can pick the argument types from the method name before
//! decoding the rest.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::RemoteCallFailure;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestHeader {
    pub seq: u32,
    pub token: String,
    pub method: String,
    /// `false` for notifications; the peer sends nothing back.
    pub expects_reply: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyHeader {
    pub seq: u32,
}

/// Outcome of a call as reported by the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Reply<R> {
    Ok(R),
    Err(String),
}

fn concat<H: Serialize, B: Serialize>(
    head: &H,
    body: &B,
) -> Result<Vec<u8>, RemoteCallFailure> {
    let mut out = postcard::to_allocvec(head)?;
    out.extend(postcard::to_allocvec(body)?);
    Ok(out)
}

pub fn encode_request<A: Serialize>(
    header: &RequestHeader,
    args: &A,
) -> Result<Vec<u8>, RemoteCallFailure> {
    concat(header, args)
}

/// Split a request payload into its header and the still-encoded args.
pub fn decode_request_header(payload: &[u8]) -> Result<(RequestHeader, &[u8]), RemoteCallFailure> {
    Ok(postcard::take_from_bytes(payload)?)
}

pub fn decode_args<A: DeserializeOwned>(raw: &[u8]) -> Result<A, RemoteCallFailure> {
    Ok(postcard::from_bytes(raw)?)
}

pub fn encode_reply<R: Serialize>(seq: u32, reply: &Reply<R>) -> Result<Vec<u8>, RemoteCallFailure> {
    concat(&ReplyHeader { seq }, reply)
}

/// Split a reply payload into its header and the still-encoded body, so a
/// stale reply can be dropped without knowing its value type.
pub fn decode_reply_header(payload: &[u8]) -> Result<(ReplyHeader, &[u8]), RemoteCallFailure> {
    Ok(postcard::take_from_bytes(payload)?)
}

pub fn decode_reply_body<R: DeserializeOwned>(raw: &[u8]) -> Result<Reply<R>, RemoteCallFailure> {
    Ok(postcard::from_bytes(raw)?)
}

pub fn decode_reply<R: DeserializeOwned>(
    payload: &[u8],
) -> Result<(ReplyHeader, Reply<R>), RemoteCallFailure> {
    let (header, rest) = decode_reply_header(payload)?;
    Ok((header, decode_reply_body(rest)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_decodes_independently_of_args() {
        let header = RequestHeader {
            seq: 7,
            token: "tok".into(),
            method: "db_0_set_freq".into(),
            expects_reply: true,
        };
        let payload = encode_request(&header, &("RX1", 2.4e9_f64, false)).unwrap();

        let (decoded, rest) = decode_request_header(&payload).unwrap();
        assert_eq!(decoded, header);
        let (which, freq, retune): (String, f64, bool) = decode_args(rest).unwrap();
        assert_eq!(which, "RX1");
        assert_eq!(freq, 2.4e9);
        assert!(!retune);
    }

    #[test]
    fn error_reply_carries_message() {
        let payload = encode_reply::<f64>(3, &Reply::Err("bad which".into())).unwrap();
        let (header, reply) = decode_reply::<f64>(&payload).unwrap();
        assert_eq!(header.seq, 3);
        assert_eq!(reply, Reply::Err("bad which".into()));
    }

    #[test]
    fn truncated_reply_is_codec_error() {
        let payload = encode_reply(1, &Reply::Ok(1.0_f64)).unwrap();
        let err = decode_reply::<f64>(&payload[..payload.len() - 2]).unwrap_err();
        assert!(matches!(err, RemoteCallFailure::Codec(_)));
    }
}
