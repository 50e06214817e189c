//! Property hooks bound to one frontend chain.
//!
//! Each hook is plain data: which attribute (by type), which direction and
//! channel. The adapter arrives as the tree context on every call.

use crate::error::Result;
use crate::prop::{Coercer, Publisher, Subscriber};
use crate::rpc::Transport;
use crate::types::{Direction, EepromMap};

use super::adapter::FrontendCtrl;

/// Addresses one frontend chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeKey {
    pub dir: Direction,
    pub chan: usize,
}

impl FeKey {
    pub const fn new(dir: Direction, chan: usize) -> Self {
        Self { dir, chan }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FreqHook(pub FeKey);

#[derive(Debug, Clone, Copy)]
pub struct GainHook(pub FeKey);

#[derive(Debug, Clone, Copy)]
pub struct AntennaHook(pub FeKey);

#[derive(Debug, Clone, Copy)]
pub struct BandwidthHook(pub FeKey);

/// Binds the board EEPROM node to the controller.
#[derive(Debug, Clone, Copy)]
pub struct EepromHook {
    pub db_idx: u32,
}

impl<X: Transport> Coercer<f64, FrontendCtrl<X>> for FreqHook {
    fn coerce(&self, fe: &mut FrontendCtrl<X>, value: f64) -> Result<f64> {
        fe.set_frequency(value, self.0.chan, self.0.dir)
    }
}

impl<X: Transport> Publisher<f64, FrontendCtrl<X>> for FreqHook {
    fn publish(&self, fe: &mut FrontendCtrl<X>) -> Result<f64> {
        fe.get_frequency(self.0.chan, self.0.dir)
    }
}

impl<X: Transport> Coercer<f64, FrontendCtrl<X>> for GainHook {
    fn coerce(&self, fe: &mut FrontendCtrl<X>, value: f64) -> Result<f64> {
        fe.set_gain(value, self.0.chan, self.0.dir)
    }
}

impl<X: Transport> Publisher<f64, FrontendCtrl<X>> for GainHook {
    fn publish(&self, fe: &mut FrontendCtrl<X>) -> Result<f64> {
        fe.get_gain(self.0.chan, self.0.dir)
    }
}

impl<X: Transport> Coercer<String, FrontendCtrl<X>> for AntennaHook {
    fn coerce(&self, fe: &mut FrontendCtrl<X>, value: String) -> Result<String> {
        fe.set_antenna(&value, self.0.chan, self.0.dir)?;
        Ok(value)
    }
}

impl<X: Transport> Publisher<String, FrontendCtrl<X>> for AntennaHook {
    fn publish(&self, fe: &mut FrontendCtrl<X>) -> Result<String> {
        fe.get_antenna(self.0.chan, self.0.dir)
    }
}

impl<X: Transport> Coercer<f64, FrontendCtrl<X>> for BandwidthHook {
    fn coerce(&self, fe: &mut FrontendCtrl<X>, value: f64) -> Result<f64> {
        fe.set_bandwidth(value, self.0.chan, self.0.dir)
    }
}

impl<X: Transport> Publisher<f64, FrontendCtrl<X>> for BandwidthHook {
    fn publish(&self, fe: &mut FrontendCtrl<X>) -> Result<f64> {
        fe.get_bandwidth(self.0.chan, self.0.dir)
    }
}

impl<X: Transport> Subscriber<EepromMap, FrontendCtrl<X>> for EepromHook {
    fn notify(&self, fe: &mut FrontendCtrl<X>, value: &EepromMap) -> Result<()> {
        fe.set_db_eeprom(self.db_idx, value)
    }
}

impl<X: Transport> Publisher<EepromMap, FrontendCtrl<X>> for EepromHook {
    fn publish(&self, fe: &mut FrontendCtrl<X>) -> Result<EepromMap> {
        fe.get_db_eeprom(self.db_idx)
    }
}
