//! Simulated transceiver controller.
//!
//! Speaks the same wire protocol as the firmware and models what matters to
//! the control plane: one LO per direction per board (so `RX1` and `RX2`
//! always report the same frequency), per-chain gain with step snapping,
//! per-board EEPROM, token checking, link loss and injected failures.
//!
//! State lives behind a shared [`SimHandle`] so tests can inspect the call
//! log after the transport has been moved into an RPC client.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::rc::Rc;

use log::{debug, warn};
use serde::Serialize;

use crate::config::RadioConfig;
use crate::error::RemoteCallFailure;
use crate::rpc::Transport;
use crate::rpc::codec::{FrameDecoder, encode_frame};
use crate::rpc::wire::{self, Reply, RequestHeader};
use crate::types::{Direction, EepromMap, ValueRange};

/// LO frequency both directions report before the first tune.
pub const POWER_ON_LO_HZ: f64 = 1e9;

/// One call as seen by the simulated controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimCall {
    pub method: String,
    /// Chain identifier for frontend calls, `None` for board calls.
    pub which: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    LinkDown,
}

#[derive(Debug, Clone)]
struct BoardState {
    /// Indexed by direction: RX LO, TX LO.
    lo: [f64; 2],
    gains: HashMap<String, f64>,
}

impl BoardState {
    fn new() -> Self {
        Self {
            lo: [POWER_ON_LO_HZ; 2],
            gains: HashMap::new(),
        }
    }
}

#[derive(Debug)]
struct SimState {
    token: String,
    boards: [BoardState; 2],
    eeproms: BTreeMap<u32, EepromMap>,
    calls: Vec<SimCall>,
    link_up: bool,
    injected: HashMap<String, String>,
    freq_range: ValueRange,
    rx_gain_range: ValueRange,
    tx_gain_range: ValueRange,
}

/// Shared view of the simulated controller.
#[derive(Clone)]
pub struct SimHandle(Rc<RefCell<SimState>>);

impl SimHandle {
    /// A controller accepting `token`, with limits from the default config.
    pub fn new(token: &str) -> Self {
        let cfg = RadioConfig::default();
        Self(Rc::new(RefCell::new(SimState {
            token: token.to_owned(),
            boards: [BoardState::new(), BoardState::new()],
            eeproms: BTreeMap::new(),
            calls: Vec::new(),
            link_up: true,
            injected: HashMap::new(),
            freq_range: cfg.freq_range,
            rx_gain_range: cfg.rx_gain_range,
            tx_gain_range: cfg.tx_gain_range,
        })))
    }

    /// A fresh transport connected to this controller.
    pub fn transport(&self) -> SimTransceiver {
        SimTransceiver {
            state: Rc::clone(&self.0),
            decoder: FrameDecoder::new(),
            outbound: VecDeque::new(),
        }
    }

    pub fn calls(&self) -> Vec<SimCall> {
        self.0.borrow().calls.clone()
    }

    /// Number of calls to `method` (full name, prefix included).
    pub fn count(&self, method: &str) -> usize {
        self.0.borrow().calls.iter().filter(|c| c.method == method).count()
    }

    /// Number of calls to `method` addressed to chain `which`.
    pub fn count_on(&self, method: &str, which: &str) -> usize {
        self.0
            .borrow()
            .calls
            .iter()
            .filter(|c| c.method == method && c.which.as_deref() == Some(which))
            .count()
    }

    pub fn clear_calls(&self) {
        self.0.borrow_mut().calls.clear();
    }

    pub fn set_link_up(&self, up: bool) {
        self.0.borrow_mut().link_up = up;
    }

    /// Make the next call to `method` fail with `message`.
    pub fn fail_next(&self, method: &str, message: &str) {
        self.0
            .borrow_mut()
            .injected
            .insert(method.to_owned(), message.to_owned());
    }

    /// Current LO of `dir` on board `board` (0 or 1).
    pub fn lo(&self, board: usize, dir: Direction) -> f64 {
        self.0.borrow().boards[board].lo[dir_index(dir)]
    }

    /// Retune an LO behind the control plane's back.
    pub fn retune(&self, board: usize, dir: Direction, freq: f64) {
        self.0.borrow_mut().boards[board].lo[dir_index(dir)] = freq;
    }

    pub fn eeprom(&self, db_idx: u32) -> Option<EepromMap> {
        self.0.borrow().eeproms.get(&db_idx).cloned()
    }

    pub fn store_eeprom(&self, db_idx: u32, map: EepromMap) {
        self.0.borrow_mut().eeproms.insert(db_idx, map);
    }
}

/// Byte transport into the simulated controller.
pub struct SimTransceiver {
    state: Rc<RefCell<SimState>>,
    decoder: FrameDecoder,
    outbound: VecDeque<u8>,
}

impl Transport for SimTransceiver {
    type Error = SimError;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SimError> {
        if self.outbound.is_empty() {
            // Nothing will ever arrive; report the link as closed rather
            // than block forever.
            return if self.state.borrow().link_up {
                Ok(0)
            } else {
                Err(SimError::LinkDown)
            };
        }
        let n = buf.len().min(self.outbound.len());
        for (slot, byte) in buf.iter_mut().zip(self.outbound.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, SimError> {
        if !self.state.borrow().link_up {
            return Err(SimError::LinkDown);
        }
        let mut frame = self.decoder.feed(data);
        while let Some(payload) = frame {
            if let Some(reply) = self.state.borrow_mut().handle(&payload) {
                self.outbound.extend(reply);
            }
            frame = self.decoder.next_pending();
        }
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), SimError> {
        if self.state.borrow().link_up {
            Ok(())
        } else {
            Err(SimError::LinkDown)
        }
    }
}

// ── Controller logic ──────────────────────────────────────────

fn dir_index(dir: Direction) -> usize {
    match dir {
        Direction::Rx => 0,
        Direction::Tx => 1,
    }
}

/// Parse `"RX1"`-style identifiers.
fn parse_which(which: &str) -> Option<(Direction, usize)> {
    let dir = which.get(..2)?.parse().ok()?;
    match which.get(2..)? {
        "1" => Some((dir, 0)),
        "2" => Some((dir, 1)),
        _ => None,
    }
}

/// Split `"db_1_set_freq"` into board 1 and `"set_freq"`.
fn split_prefix(method: &str) -> Option<(usize, &str)> {
    if let Some(rest) = method.strip_prefix("db_0_") {
        Some((0, rest))
    } else {
        method.strip_prefix("db_1_").map(|rest| (1, rest))
    }
}

type Outcome = Result<Vec<u8>, String>;

fn ok<R: Serialize>(value: &R) -> Outcome {
    postcard::to_allocvec(value).map_err(|e| e.to_string())
}

impl SimState {
    /// Execute one request frame; returns the reply frame, if any.
    fn handle(&mut self, payload: &[u8]) -> Option<Vec<u8>> {
        let (header, raw_args) = match wire::decode_request_header(payload) {
            Ok(parts) => parts,
            Err(e) => {
                warn!("sim: undecodable request: {e}");
                return None;
            }
        };

        let outcome = if header.token == self.token {
            self.dispatch(&header, raw_args)
        } else {
            Err("invalid session token".to_owned())
        };

        if !header.expects_reply {
            if let Err(e) = outcome {
                warn!("sim: notification {} failed: {e}", header.method);
            }
            return None;
        }

        let body = match outcome {
            Ok(encoded_value) => {
                // Reply::Ok(v) is the variant tag followed by v itself.
                let mut body = postcard::to_allocvec(&Reply::<()>::Ok(())).ok()?;
                body.extend(encoded_value);
                body
            }
            Err(message) => postcard::to_allocvec(&Reply::<()>::Err(message)).ok()?,
        };
        let mut reply = postcard::to_allocvec(&wire::ReplyHeader { seq: header.seq }).ok()?;
        reply.extend(body);
        encode_frame(&reply)
    }

    fn dispatch(&mut self, header: &RequestHeader, raw: &[u8]) -> Outcome {
        let method = header.method.as_str();
        debug!("sim: #{} {method}", header.seq);

        if let Some(message) = self.injected.remove(method) {
            self.calls.push(SimCall {
                method: method.to_owned(),
                which: None,
            });
            return Err(message);
        }

        match method {
            "get_db_eeprom" => {
                let (db_idx,): (u32,) = decode(raw)?;
                self.record(method, None);
                ok(&self.eeproms.get(&db_idx).cloned().unwrap_or_default())
            }
            "set_db_eeprom" => {
                let (db_idx, map): (u32, EepromMap) = decode(raw)?;
                self.record(method, None);
                self.eeproms.insert(db_idx, map);
                ok(&())
            }
            _ => {
                let (board, op) =
                    split_prefix(method).ok_or_else(|| format!("unknown method {method}"))?;
                self.dispatch_frontend(method, board, op, raw)
            }
        }
    }

    fn dispatch_frontend(&mut self, method: &str, board: usize, op: &str, raw: &[u8]) -> Outcome {
        match op {
            "set_freq" => {
                let (which, freq, _retune): (String, f64, bool) = decode(raw)?;
                let (dir, _) = chain(&which)?;
                self.record(method, Some(&which));
                let coerced = self.freq_range.clip(freq, false).round();
                self.boards[board].lo[dir_index(dir)] = coerced;
                ok(&coerced)
            }
            "get_freq" => {
                let (which,): (String,) = decode(raw)?;
                let (dir, _) = chain(&which)?;
                self.record(method, Some(&which));
                ok(&self.boards[board].lo[dir_index(dir)])
            }
            "set_gain" => {
                let (which, gain): (String, f64) = decode(raw)?;
                let (dir, _) = chain(&which)?;
                self.record(method, Some(&which));
                let range = match dir {
                    Direction::Rx => self.rx_gain_range,
                    Direction::Tx => self.tx_gain_range,
                };
                let coerced = range.clip(gain, true);
                self.boards[board].gains.insert(which, coerced);
                ok(&coerced)
            }
            "get_gain" => {
                let (which,): (String,) = decode(raw)?;
                chain(&which)?;
                self.record(method, Some(&which));
                ok(&self.boards[board].gains.get(&which).copied().unwrap_or(0.0))
            }
            _ => Err(format!("unknown method {method}")),
        }
    }

    fn record(&mut self, method: &str, which: Option<&str>) {
        self.calls.push(SimCall {
            method: method.to_owned(),
            which: which.map(str::to_owned),
        });
    }
}

fn decode<A: serde::de::DeserializeOwned>(raw: &[u8]) -> Result<A, String> {
    wire::decode_args(raw).map_err(|e: RemoteCallFailure| e.to_string())
}

fn chain(which: &str) -> Result<(Direction, usize), String> {
    parse_which(which).ok_or_else(|| format!("bad chain identifier `{which}`"))
}
