//! Shared value types: directions, wire identifiers, ranges, EEPROM maps.

use core::fmt;
use core::str::FromStr;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of frontend chains sharing one LO in each direction.
pub const CHANS_PER_LO: usize = 2;

/// Signal direction of a frontend chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    Rx,
    Tx,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Rx, Direction::Tx];

    /// Upper-case tag used in wire identifiers and frontend names.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Rx => "RX",
            Self::Tx => "TX",
        }
    }

    /// Property tree segment holding this direction's frontends.
    pub const fn frontends_segment(self) -> &'static str {
        match self {
            Self::Rx => "rx_frontends",
            Self::Tx => "tx_frontends",
        }
    }

    /// Property tree segment holding this direction's codec.
    pub const fn codecs_segment(self) -> &'static str {
        match self {
            Self::Rx => "rx_codecs",
            Self::Tx => "tx_codecs",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("rx") {
            Ok(Self::Rx)
        } else if s.eq_ignore_ascii_case("tx") {
            Ok(Self::Tx)
        } else {
            Err(Error::invalid(format!("unknown direction `{s}`")))
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = Error;

    fn try_from(raw: u8) -> Result<Self> {
        match raw {
            0 => Ok(Self::Rx),
            1 => Ok(Self::Tx),
            other => Err(Error::invalid(format!("unknown direction index {other}"))),
        }
    }
}

/// Wire-level name of one frontend chain, e.g. `"RX1"`.
pub type HardwareId = heapless::String<4>;

/// Derive the wire identifier for `(dir, chan)`.
///
/// Channels are 0-based in the API and 1-based on the wire.
pub fn hardware_id(dir: Direction, chan: usize) -> Result<HardwareId> {
    if chan >= CHANS_PER_LO {
        return Err(Error::invalid(format!(
            "channel {chan} out of range for {dir} (expected 0 or 1)"
        )));
    }
    let mut id = HardwareId::new();
    // Capacity covers "RX" + one digit.
    id.push_str(dir.tag())
        .and_then(|()| id.push(char::from(b'1' + chan as u8)))
        .map_err(|()| Error::invalid("hardware identifier overflow"))?;
    Ok(id)
}

/// Discoverable range metadata attached to numeric properties.
///
/// A `step` of zero means the range is continuous.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl ValueRange {
    pub const fn new(start: f64, stop: f64, step: f64) -> Self {
        Self { start, stop, step }
    }

    pub const fn continuous(start: f64, stop: f64) -> Self {
        Self::new(start, stop, 0.0)
    }

    /// A degenerate range holding one value.
    pub const fn fixed(value: f64) -> Self {
        Self::new(value, value, 0.0)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.start && value <= self.stop
    }

    /// Clamp into the range, optionally snapping to the nearest step.
    pub fn clip(&self, value: f64, snap: bool) -> f64 {
        let clamped = value.clamp(self.start, self.stop);
        if !snap || self.step <= 0.0 {
            return clamped;
        }
        let steps = ((clamped - self.start) / self.step).round();
        (self.start + steps * self.step).min(self.stop)
    }
}

/// Daughterboard EEPROM contents: small integer keys to raw bytes.
pub type EepromMap = BTreeMap<u8, Vec<u8>>;
