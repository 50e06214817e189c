//! Frontend control adapter — turns attribute operations on one
//! (direction, channel) pair into transceiver RPC calls.
//!
//! There is only one LO per direction, so retuning one channel retunes its
//! neighbour as well. Nothing here caches a frequency: every read goes to
//! the controller, which keeps the neighbour's getter truthful.

use log::{trace, warn};

use crate::error::{Error, Result};
use crate::rpc::{RpcClient, Transport};
use crate::types::{Direction, EepromMap, HardwareId, hardware_id};

/// Antenna reported by every chain until antenna switching is driven.
pub const ANTENNA_READBACK: &str = "RX1";

pub struct FrontendCtrl<X: Transport> {
    rpc: RpcClient<X>,
    prefix: String,
    default_bandwidth_hz: f64,
}

impl<X: Transport> FrontendCtrl<X> {
    pub fn new(rpc: RpcClient<X>, prefix: impl Into<String>, default_bandwidth_hz: f64) -> Self {
        Self {
            rpc,
            prefix: prefix.into(),
            default_bandwidth_hz,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn rpc(&self) -> &RpcClient<X> {
        &self.rpc
    }

    pub fn rpc_mut(&mut self) -> &mut RpcClient<X> {
        &mut self.rpc
    }

    /// Wire identifier for `(dir, chan)`, e.g. `"TX2"`.
    pub fn which(dir: Direction, chan: usize) -> Result<HardwareId> {
        hardware_id(dir, chan)
    }

    /// Operations that never reach the controller still require a session.
    fn require_session(&self) -> Result<()> {
        if self.rpc.has_token() {
            Ok(())
        } else {
            Err(Error::NoSessionToken)
        }
    }

    // ── Frequency ─────────────────────────────────────────────

    /// Tune the LO serving `(dir, chan)`; returns the frequency the
    /// controller actually applied.
    pub fn set_frequency(&mut self, freq: f64, chan: usize, dir: Direction) -> Result<f64> {
        let which = Self::which(dir, chan)?;
        let method = format!("{}set_freq", self.prefix);
        trace!("Calling {method} on {which} with {freq}");
        let coerced: f64 = self.rpc.request(&method, (which.as_str(), freq, false))?;
        trace!("{method} returned {coerced}");
        Ok(coerced)
    }

    pub fn get_frequency(&mut self, chan: usize, dir: Direction) -> Result<f64> {
        let which = Self::which(dir, chan)?;
        let method = format!("{}get_freq", self.prefix);
        trace!("Calling {method} on {which}");
        let freq: f64 = self.rpc.request(&method, (which.as_str(),))?;
        trace!("{method} returned {freq}");
        Ok(freq)
    }

    // ── Gain ──────────────────────────────────────────────────

    pub fn set_gain(&mut self, gain: f64, chan: usize, dir: Direction) -> Result<f64> {
        let which = Self::which(dir, chan)?;
        let method = format!("{}set_gain", self.prefix);
        trace!("Calling {method} on {which} with {gain}");
        let coerced: f64 = self.rpc.request(&method, (which.as_str(), gain))?;
        trace!("{method} returned {coerced}");
        Ok(coerced)
    }

    pub fn get_gain(&mut self, chan: usize, dir: Direction) -> Result<f64> {
        let which = Self::which(dir, chan)?;
        let method = format!("{}get_gain", self.prefix);
        trace!("Calling {method} on {which}");
        let gain: f64 = self.rpc.request(&method, (which.as_str(),))?;
        trace!("{method} returned {gain}");
        Ok(gain)
    }

    // ── Antenna (not driven) ──────────────────────────────────

    /// Accepts any antenna name and changes nothing.
    pub fn set_antenna(&mut self, ant: &str, chan: usize, dir: Direction) -> Result<()> {
        let which = Self::which(dir, chan)?;
        self.require_session()?;
        warn!("Ignoring attempt to set antenna on {which} to `{ant}`");
        Ok(())
    }

    pub fn get_antenna(&mut self, chan: usize, dir: Direction) -> Result<String> {
        let which = Self::which(dir, chan)?;
        self.require_session()?;
        warn!("Ignoring attempt to get antenna on {which}");
        Ok(ANTENNA_READBACK.to_owned())
    }

    // ── Bandwidth (not driven) ────────────────────────────────

    /// Accepts any bandwidth and reports the fixed default back.
    pub fn set_bandwidth(&mut self, bandwidth: f64, chan: usize, dir: Direction) -> Result<f64> {
        let which = Self::which(dir, chan)?;
        self.require_session()?;
        warn!("Ignoring attempt to set bandwidth on {which} to {bandwidth}");
        Ok(self.default_bandwidth_hz)
    }

    pub fn get_bandwidth(&mut self, chan: usize, dir: Direction) -> Result<f64> {
        let which = Self::which(dir, chan)?;
        self.require_session()?;
        warn!("Ignoring attempt to get bandwidth on {which}");
        Ok(self.default_bandwidth_hz)
    }

    // ── EEPROM ────────────────────────────────────────────────

    pub fn get_db_eeprom(&mut self, db_idx: u32) -> Result<EepromMap> {
        trace!("Calling get_db_eeprom for board {db_idx}");
        self.rpc.request("get_db_eeprom", (db_idx,))
    }

    pub fn set_db_eeprom(&mut self, db_idx: u32, eeprom: &EepromMap) -> Result<()> {
        trace!("Notifying set_db_eeprom for board {db_idx} ({} keys)", eeprom.len());
        self.rpc.notify("set_db_eeprom", (db_idx, eeprom))
    }
}
