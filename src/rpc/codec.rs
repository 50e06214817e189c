//! Length-prefix frame codec.
//!
//! Wire format:
//! ```text
//! ┌────────────┬──────────────────────────┐
//! │ Length (4B)│ postcard payload (N B)   │
//! │ LE u32     │                          │
//! └────────────┴──────────────────────────┘
//! ```
//!
//! The decoder accumulates incoming bytes and yields complete frames. A
//! single `Transport::read` may return part of the header, part of the
//! payload, or several frames back to back; leftover bytes are kept for the
//! next call.

/// Maximum frame payload size (EEPROM blobs are the largest payload).
pub const MAX_FRAME_SIZE: usize = 64 * 1024;

/// Frame header size (4-byte little-endian length).
pub const HEADER_SIZE: usize = 4;

/// Decoder state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecoderState {
    /// Waiting for header bytes.
    ReadingHeader,
    /// Header received, reading payload.
    ReadingPayload { expected: usize },
}

/// Streaming frame decoder.
#[derive(Debug)]
pub struct FrameDecoder {
    state: DecoderState,
    buf: Vec<u8>,
    /// Bytes received past the end of the last yielded frame.
    pending: Vec<u8>,
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self {
            state: DecoderState::ReadingHeader,
            buf: Vec::with_capacity(HEADER_SIZE),
            pending: Vec::new(),
        }
    }

    /// Feed bytes into the decoder.
    ///
    /// Returns a complete frame payload once one is available. Bytes after
    /// that frame are retained; call [`next_pending`](Self::next_pending) to
    /// drain them.
    pub fn feed(&mut self, data: &[u8]) -> Option<Vec<u8>> {
        let mut offset = 0;

        while offset < data.len() {
            let needed = match self.state {
                DecoderState::ReadingHeader => HEADER_SIZE - self.buf.len(),
                DecoderState::ReadingPayload { expected } => expected - self.buf.len(),
            };
            let to_copy = needed.min(data.len() - offset);
            self.buf.extend_from_slice(&data[offset..offset + to_copy]);
            offset += to_copy;

            match self.state {
                DecoderState::ReadingHeader if self.buf.len() == HEADER_SIZE => {
                    let mut header = [0u8; HEADER_SIZE];
                    header.copy_from_slice(&self.buf);
                    let expected = u32::from_le_bytes(header) as usize;
                    self.buf.clear();

                    if expected == 0 || expected > MAX_FRAME_SIZE {
                        // Invalid frame — resynchronise on the next header.
                        continue;
                    }
                    self.buf.reserve(expected);
                    self.state = DecoderState::ReadingPayload { expected };
                }
                DecoderState::ReadingPayload { expected } if self.buf.len() == expected => {
                    self.state = DecoderState::ReadingHeader;
                    self.pending.extend_from_slice(&data[offset..]);
                    return Some(core::mem::take(&mut self.buf));
                }
                _ => {}
            }
        }

        None // No complete frame yet.
    }

    /// Decode the next frame from bytes left over by a previous `feed`.
    pub fn next_pending(&mut self) -> Option<Vec<u8>> {
        if self.pending.is_empty() {
            return None;
        }
        let data = core::mem::take(&mut self.pending);
        self.feed(&data)
    }

    /// Reset decoder state (e.g. after a transport reconnect).
    pub fn reset(&mut self) {
        self.state = DecoderState::ReadingHeader;
        self.buf.clear();
        self.pending.clear();
    }
}

/// Encode a payload into a length-prefixed frame.
///
/// Returns `None` if the payload is empty or exceeds [`MAX_FRAME_SIZE`].
pub fn encode_frame(payload: &[u8]) -> Option<Vec<u8>> {
    if payload.is_empty() || payload.len() > MAX_FRAME_SIZE {
        return None;
    }
    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(payload);
    Some(out)
}
