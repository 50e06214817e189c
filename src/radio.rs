//! Daughterboard radio control — owns the property tree and the frontend
//! adapter for one radio block, and runs bring-up.
//!
//! ```text
//!  consumer ──▶ ┌──────────────────────────────┐
//!               │           RadioCtrl          │
//!               │  PropertyTree ◀─▶ FrontendCtrl│ ──▶ RpcClient ──▶ controller
//!               └──────────────────────────────┘
//! ```
//!
//! Construction registers every node but talks to no hardware. The session
//! token arrives later through [`RadioCtrl::attach_session`]; only then can
//! [`RadioCtrl::init_defaults`] push the defaults through the normal write
//! path.

use log::{debug, info, warn};

use crate::config::RadioConfig;
use crate::error::{Error, Result};
use crate::frontend::{
    EepromHook, FeAttr, FrontendBinding, FrontendCtrl, fe_base, register_frontends,
};
use crate::prop::{PropertyPath, PropertyTree, PropertyValue};
use crate::rpc::{RpcClient, Transport};
use crate::types::{Direction, EepromMap};

/// Slot letters assigned by radio block position.
const SLOT_NAMES: [char; 4] = ['A', 'B', 'C', 'D'];

pub struct RadioCtrl<X: Transport + 'static> {
    config: RadioConfig,
    block_index: usize,
    slot: char,
    tree: PropertyTree<FrontendCtrl<X>>,
    frontend: FrontendCtrl<X>,
    bindings: Vec<FrontendBinding>,
}

impl<X: Transport + 'static> RadioCtrl<X> {
    /// Build the control plane for radio block `block_index`.
    ///
    /// Registers all property nodes. No RPC traffic happens here.
    pub fn new(config: RadioConfig, block_index: usize, rpc: RpcClient<X>) -> Result<Self> {
        config.validate()?;
        let slot = *SLOT_NAMES.get(block_index).ok_or_else(|| {
            Error::invalid(format!("radio block index {block_index} has no slot"))
        })?;
        let prefix = if block_index % 2 == 0 { "db_0_" } else { "db_1_" };
        debug!("Radio slot: {slot}, RPC prefix `{prefix}`");

        let frontend = FrontendCtrl::new(rpc, prefix, config.default_bandwidth_hz);
        let mut tree = PropertyTree::new();
        let bindings = register_frontends(&mut tree, slot, &config)?;

        let mut radio = Self {
            config,
            block_index,
            slot,
            tree,
            frontend,
            bindings,
        };
        radio.register_board_nodes()?;
        Ok(radio)
    }

    fn register_board_nodes(&mut self) -> Result<()> {
        let db_idx = self.block_index as u32;
        let eeprom = self.eeprom_path();
        self.tree
            .create::<EepromMap>(eeprom)?
            .set_initial(EepromMap::new())
            .add_subscriber(EepromHook { db_idx })
            .set_publisher(EepromHook { db_idx });

        for dir in Direction::ALL {
            let codec = PropertyPath::new(dir.codecs_segment()).join(self.slot);
            let name = match dir {
                Direction::Rx => self.config.rx_codec_name.clone(),
                Direction::Tx => self.config.tx_codec_name.clone(),
            };
            self.tree.create::<String>(codec.join("name"))?.set_initial(name);
            self.tree.create::<i32>(codec.join("gains"))?;
        }

        if !self.tree.exists("tick_rate") {
            self.tree
                .create::<f64>("tick_rate")?
                .set_initial(self.config.tick_rate_hz);
        }
        Ok(())
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Supply the session token. Until then every hardware operation fails
    /// with [`Error::NoSessionToken`].
    pub fn attach_session(&mut self, token: impl Into<String>) {
        self.frontend.rpc_mut().set_token(token);
        info!("Radio {}: RPC session attached", self.slot);
    }

    pub fn has_session(&self) -> bool {
        self.frontend.rpc().has_token()
    }

    /// Push every default through the regular write path.
    ///
    /// The first failure aborts bring-up and is returned.
    pub fn init_defaults(&mut self) -> Result<()> {
        info!(
            "Radio {}: initialising defaults ({} RX, {} TX)",
            self.slot, self.config.num_rx_chans, self.config.num_tx_chans
        );
        let bindings = self.bindings.clone();
        for b in &bindings {
            let antenna = match b.key.dir {
                Direction::Rx => self.config.default_rx_antenna.clone(),
                Direction::Tx => self.config.default_tx_antenna.clone(),
            };
            self.set(b.value_path(FeAttr::Freq), self.config.center_freq_hz)?;
            self.set(b.value_path(FeAttr::Gain), self.config.default_gain_db)?;
            self.set(b.value_path(FeAttr::Antenna), antenna)?;
            self.set(b.value_path(FeAttr::Bandwidth), self.config.default_bandwidth_hz)?;
        }
        Ok(())
    }

    /// Remove every node this radio registered.
    pub fn teardown(&mut self) {
        let dropped = self.tree.remove(PropertyPath::new("dboards").join(self.slot));
        for dir in Direction::ALL {
            self.tree
                .remove(PropertyPath::new(dir.codecs_segment()).join(self.slot));
        }
        self.bindings.clear();
        debug!("Radio {}: removed {dropped} frontend nodes", self.slot);
    }

    // ── Generic property access ───────────────────────────────

    /// Write a node through its hook chain; returns the effective value.
    pub fn set<T: PropertyValue>(&mut self, path: impl Into<PropertyPath>, value: T) -> Result<T> {
        self.tree.set(path, value, &mut self.frontend)
    }

    /// Read a node; publisher-backed nodes query the controller.
    pub fn get<T: PropertyValue>(&mut self, path: impl Into<PropertyPath>) -> Result<T> {
        self.tree.get(path, &mut self.frontend)
    }

    pub fn tree(&self) -> &PropertyTree<FrontendCtrl<X>> {
        &self.tree
    }

    pub fn frontend(&self) -> &FrontendCtrl<X> {
        &self.frontend
    }

    pub fn frontend_mut(&mut self) -> &mut FrontendCtrl<X> {
        &mut self.frontend
    }

    pub fn bindings(&self) -> &[FrontendBinding] {
        &self.bindings
    }

    pub fn slot(&self) -> char {
        self.slot
    }

    pub fn config(&self) -> &RadioConfig {
        &self.config
    }

    // ── Per-channel API ───────────────────────────────────────

    fn attr_path(&self, attr: FeAttr, chan: usize, dir: Direction) -> Result<PropertyPath> {
        self.bindings
            .iter()
            .find(|b| b.key.dir == dir && b.key.chan == chan)
            .map(|b| b.value_path(attr))
            .ok_or_else(|| Error::invalid(format!("no {dir} frontend for channel {chan}")))
    }

    pub fn set_frequency(&mut self, freq: f64, chan: usize, dir: Direction) -> Result<f64> {
        let path = self.attr_path(FeAttr::Freq, chan, dir)?;
        self.set(path, freq)
    }

    pub fn frequency(&mut self, chan: usize, dir: Direction) -> Result<f64> {
        let path = self.attr_path(FeAttr::Freq, chan, dir)?;
        self.get(path)
    }

    pub fn set_gain(&mut self, gain: f64, chan: usize, dir: Direction) -> Result<f64> {
        let path = self.attr_path(FeAttr::Gain, chan, dir)?;
        self.set(path, gain)
    }

    pub fn gain(&mut self, chan: usize, dir: Direction) -> Result<f64> {
        let path = self.attr_path(FeAttr::Gain, chan, dir)?;
        self.get(path)
    }

    pub fn set_antenna(&mut self, ant: &str, chan: usize, dir: Direction) -> Result<()> {
        let path = self.attr_path(FeAttr::Antenna, chan, dir)?;
        self.set(path, ant.to_owned()).map(|_| ())
    }

    pub fn antenna(&mut self, chan: usize, dir: Direction) -> Result<String> {
        let path = self.attr_path(FeAttr::Antenna, chan, dir)?;
        self.get(path)
    }

    pub fn set_bandwidth(&mut self, bandwidth: f64, chan: usize, dir: Direction) -> Result<f64> {
        let path = self.attr_path(FeAttr::Bandwidth, chan, dir)?;
        self.set(path, bandwidth)
    }

    pub fn bandwidth(&mut self, chan: usize, dir: Direction) -> Result<f64> {
        let path = self.attr_path(FeAttr::Bandwidth, chan, dir)?;
        self.get(path)
    }

    pub fn set_rx_frequency(&mut self, freq: f64, chan: usize) -> Result<f64> {
        self.set_frequency(freq, chan, Direction::Rx)
    }

    pub fn set_tx_frequency(&mut self, freq: f64, chan: usize) -> Result<f64> {
        self.set_frequency(freq, chan, Direction::Tx)
    }

    pub fn rx_frequency(&mut self, chan: usize) -> Result<f64> {
        self.frequency(chan, Direction::Rx)
    }

    pub fn tx_frequency(&mut self, chan: usize) -> Result<f64> {
        self.frequency(chan, Direction::Tx)
    }

    pub fn set_rx_gain(&mut self, gain: f64, chan: usize) -> Result<f64> {
        self.set_gain(gain, chan, Direction::Rx)
    }

    pub fn set_tx_gain(&mut self, gain: f64, chan: usize) -> Result<f64> {
        self.set_gain(gain, chan, Direction::Tx)
    }

    pub fn rx_gain(&mut self, chan: usize) -> Result<f64> {
        self.gain(chan, Direction::Rx)
    }

    pub fn tx_gain(&mut self, chan: usize) -> Result<f64> {
        self.gain(chan, Direction::Tx)
    }

    pub fn set_rx_antenna(&mut self, ant: &str, chan: usize) -> Result<()> {
        self.set_antenna(ant, chan, Direction::Rx)
    }

    pub fn set_tx_antenna(&mut self, ant: &str, chan: usize) -> Result<()> {
        self.set_antenna(ant, chan, Direction::Tx)
    }

    pub fn rx_antenna(&mut self, chan: usize) -> Result<String> {
        self.antenna(chan, Direction::Rx)
    }

    pub fn tx_antenna(&mut self, chan: usize) -> Result<String> {
        self.antenna(chan, Direction::Tx)
    }

    pub fn set_rx_bandwidth(&mut self, bandwidth: f64, chan: usize) -> Result<f64> {
        self.set_bandwidth(bandwidth, chan, Direction::Rx)
    }

    pub fn set_tx_bandwidth(&mut self, bandwidth: f64, chan: usize) -> Result<f64> {
        self.set_bandwidth(bandwidth, chan, Direction::Tx)
    }

    pub fn rx_bandwidth(&mut self, chan: usize) -> Result<f64> {
        self.bandwidth(chan, Direction::Rx)
    }

    pub fn tx_bandwidth(&mut self, chan: usize) -> Result<f64> {
        self.bandwidth(chan, Direction::Tx)
    }

    // ── Rate ──────────────────────────────────────────────────

    /// The sample rate is fixed; this only reports it.
    pub fn rate(&self) -> f64 {
        self.config.radio_rate_hz
    }

    /// Requests for any other rate are logged and ignored.
    pub fn set_rate(&mut self, rate: f64) -> f64 {
        if rate != self.rate() {
            warn!("Attempting to set sampling rate to invalid value {rate}");
        }
        self.rate()
    }

    pub fn output_samp_rate(&self, _port: usize) -> f64 {
        self.config.radio_rate_hz
    }

    // ── Frontend naming ───────────────────────────────────────

    pub fn dboard_fe_from_chan(&self, chan: usize, _dir: Direction) -> String {
        chan.to_string()
    }

    pub fn chan_from_dboard_fe(&self, fe: &str, dir: Direction) -> Result<usize> {
        fe.trim()
            .parse()
            .map_err(|_| Error::invalid(format!("`{fe}` is not a {dir} frontend name")))
    }

    pub fn fe_path(&self, chan: usize, dir: Direction) -> PropertyPath {
        fe_base(self.slot, dir, chan)
    }

    // ── EEPROM ────────────────────────────────────────────────

    pub fn eeprom_path(&self) -> PropertyPath {
        PropertyPath::new("dboards").join(self.slot).join("eeprom")
    }

    pub fn db_eeprom(&mut self) -> Result<EepromMap> {
        let path = self.eeprom_path();
        self.get(path)
    }

    pub fn set_db_eeprom(&mut self, eeprom: EepromMap) -> Result<()> {
        let path = self.eeprom_path();
        self.set(path, eeprom).map(|_| ())
    }
}
