//! Frontend configuration parameters
//!
//! Hardware limits and bring-up defaults for one daughterboard.
//! Every field has a default matching the AD9371-based frontend; a JSON
//! document may override any subset.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{CHANS_PER_LO, Direction, ValueRange};

/// Core daughterboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RadioConfig {
    // --- Clocking ---
    /// Radio tick rate (Hz)
    pub tick_rate_hz: f64,
    /// Fixed sample rate presented to the host (Hz)
    pub radio_rate_hz: f64,

    // --- Channel grid ---
    pub num_rx_chans: usize,
    pub num_tx_chans: usize,

    // --- Limits (advisory, firmware is authoritative) ---
    pub freq_range: ValueRange,
    pub rx_gain_range: ValueRange,
    pub tx_gain_range: ValueRange,

    // --- Bring-up defaults ---
    /// Center frequency applied to every chain (Hz)
    pub center_freq_hz: f64,
    /// Gain applied to every chain (dB)
    pub default_gain_db: f64,
    pub default_rx_antenna: String,
    pub default_tx_antenna: String,
    /// Analog bandwidth reported by every chain (Hz)
    pub default_bandwidth_hz: f64,

    // --- Naming ---
    /// Prefix of the per-frontend `name` node
    pub frontend_name: String,
    pub rx_codec_name: String,
    pub tx_codec_name: String,
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            // Clocking
            tick_rate_hz: 125e6,
            radio_rate_hz: 125e6,

            // Grid
            num_rx_chans: 1,
            num_tx_chans: 1,

            // Limits
            freq_range: ValueRange::continuous(300e6, 6e9),
            rx_gain_range: ValueRange::new(0.0, 30.0, 0.5),
            tx_gain_range: ValueRange::new(0.0, 41.95, 0.05),

            // Defaults
            center_freq_hz: 2.5e9,
            default_gain_db: 0.0,
            default_rx_antenna: "RX2".into(),
            default_tx_antenna: "TX/RX".into(),
            default_bandwidth_hz: 40e6,

            // Naming
            frontend_name: "AD9371".into(),
            rx_codec_name: "AD9371 Dual ADC".into(),
            tx_codec_name: "AD9371 Dual DAC".into(),
        }
    }
}

impl RadioConfig {
    /// Parse a (possibly partial) JSON document and validate it.
    pub fn from_json(text: &str) -> Result<Self> {
        let cfg: Self =
            serde_json::from_str(text).map_err(|_| Error::Config("malformed JSON config"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Gain range for one direction.
    pub fn gain_range(&self, dir: Direction) -> ValueRange {
        match dir {
            Direction::Rx => self.rx_gain_range,
            Direction::Tx => self.tx_gain_range,
        }
    }

    /// Channel count for one direction.
    pub fn num_chans(&self, dir: Direction) -> usize {
        match dir {
            Direction::Rx => self.num_rx_chans,
            Direction::Tx => self.num_tx_chans,
        }
    }

    /// Reject values the control plane cannot be built from.
    pub fn validate(&self) -> Result<()> {
        if self.num_rx_chans > CHANS_PER_LO || self.num_tx_chans > CHANS_PER_LO {
            return Err(Error::Config("at most 2 channels per direction"));
        }
        if self.tick_rate_hz <= 0.0 || self.radio_rate_hz <= 0.0 {
            return Err(Error::Config("rates must be positive"));
        }
        for range in [self.freq_range, self.rx_gain_range, self.tx_gain_range] {
            if range.start > range.stop || range.step < 0.0 {
                return Err(Error::Config("range start must not exceed stop"));
            }
        }
        if !self.freq_range.contains(self.center_freq_hz) {
            return Err(Error::Config("center_freq_hz outside freq_range"));
        }
        if self.default_bandwidth_hz <= 0.0 {
            return Err(Error::Config("default_bandwidth_hz must be positive"));
        }
        Ok(())
    }
}
