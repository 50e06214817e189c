//! Blocking RPC client for the transceiver controller.
//!
//! Every call carries the session token and a sequence number. A call is one
//! frame out and, for requests, exactly one frame back whose sequence number
//! must match. There is no retry and no timeout at this layer.
//!
//! Callers sharing one controller must keep a single call in flight per
//! token; the client does not lock internally.

use log::{debug, trace};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, RemoteCallFailure, Result};

use super::codec::{FrameDecoder, encode_frame};
use super::transport::Transport;
use super::wire::{self, Reply, RequestHeader};

const READ_CHUNK: usize = 512;

pub struct RpcClient<X: Transport> {
    transport: X,
    decoder: FrameDecoder,
    token: Option<String>,
    next_seq: u32,
}

impl<X: Transport> RpcClient<X> {
    /// Wrap a transport. No token is set; calls fail until
    /// [`set_token`](Self::set_token) is called.
    pub fn new(transport: X) -> Self {
        Self {
            transport,
            decoder: FrameDecoder::new(),
            token: None,
            next_seq: 1,
        }
    }

    pub fn with_token(transport: X, token: impl Into<String>) -> Self {
        let mut client = Self::new(transport);
        client.set_token(token);
        client
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn transport(&self) -> &X {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut X {
        &mut self.transport
    }

    /// Issue a call and block until the controller answers.
    ///
    /// Replies to earlier calls that gave up waiting (read timeout, transport
    /// error) are discarded. A reply from the future is a protocol error.
    pub fn request<R, A>(&mut self, method: &str, args: A) -> Result<R>
    where
        R: DeserializeOwned,
        A: Serialize,
    {
        let seq = self.send(method, &args, true)?;
        let reply = loop {
            let payload = self.read_frame()?;
            let (header, body) = wire::decode_reply_header(&payload)?;

            if header.seq == seq {
                break wire::decode_reply_body::<R>(body)?;
            }
            if is_older(header.seq, seq) {
                debug!("{method}: dropping stale reply #{} while awaiting #{seq}", header.seq);
                continue;
            }
            self.decoder.reset();
            return Err(RemoteCallFailure::Protocol(format!(
                "{method}: reply seq {} does not match request seq {seq}",
                header.seq
            ))
            .into());
        };

        match reply {
            Reply::Ok(value) => Ok(value),
            Reply::Err(message) => Err(RemoteCallFailure::Remote {
                method: method.to_owned(),
                message,
            }
            .into()),
        }
    }

    /// Send a call without waiting for any reply.
    ///
    /// Still requires the token, and still fails if the frame cannot be
    /// written.
    pub fn notify<A: Serialize>(&mut self, method: &str, args: A) -> Result<()> {
        self.send(method, &args, false).map(|_| ())
    }

    fn send<A: Serialize>(&mut self, method: &str, args: &A, expects_reply: bool) -> Result<u32> {
        let token = self.token.clone().ok_or(Error::NoSessionToken)?;
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1).max(1);

        let header = RequestHeader {
            seq,
            token,
            method: method.to_owned(),
            expects_reply,
        };
        let payload = wire::encode_request(&header, args)?;
        let frame = encode_frame(&payload).ok_or_else(|| {
            RemoteCallFailure::Codec(format!("{method}: payload of {} bytes", payload.len()))
        })?;

        trace!("rpc -> #{seq} {method} ({} bytes)", frame.len());
        self.write_all(&frame)?;
        self.transport.flush().map_err(transport_err)?;
        Ok(seq)
    }

    fn write_all(&mut self, mut data: &[u8]) -> Result<()> {
        while !data.is_empty() {
            match self.transport.write(data).map_err(transport_err)? {
                0 => return Err(RemoteCallFailure::LinkClosed.into()),
                n => data = &data[n..],
            }
        }
        Ok(())
    }

    fn read_frame(&mut self) -> Result<Vec<u8>> {
        if let Some(frame) = self.decoder.next_pending() {
            return Ok(frame);
        }
        let mut buf = [0u8; READ_CHUNK];
        loop {
            let n = self.transport.read(&mut buf).map_err(transport_err)?;
            if n == 0 {
                self.decoder.reset();
                return Err(RemoteCallFailure::LinkClosed.into());
            }
            if let Some(frame) = self.decoder.feed(&buf[..n]) {
                trace!("rpc <- {} bytes", frame.len());
                return Ok(frame);
            }
        }
    }
}

/// `a` was issued before `b`, allowing for wrap-around.
fn is_older(a: u32, b: u32) -> bool {
    let gap = b.wrapping_sub(a);
    gap != 0 && gap < u32::MAX / 2
}

fn transport_err<E: core::fmt::Debug>(e: E) -> Error {
    RemoteCallFailure::Transport(format!("{e:?}")).into()
}
