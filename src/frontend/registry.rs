//! Frontend registry — builds the Direction × Channel grid in the property
//! tree and attaches the hooks for each cell.
//!
//! ```text
//! dboards/<slot>/{rx,tx}_frontends/<chan>/
//!     name, connection
//!     antenna/{value,options}
//!     freq/{value,range}
//!     gains/{value,range}
//!     bandwidth/{value,range}
//! ```

use log::debug;

use crate::config::RadioConfig;
use crate::error::Result;
use crate::prop::{PropertyPath, PropertyTree};
use crate::rpc::Transport;
use crate::types::{Direction, ValueRange, hardware_id};

use super::adapter::FrontendCtrl;
use super::hooks::{AntennaHook, BandwidthHook, FeKey, FreqHook, GainHook};

/// Frontend attribute exposed as a `<attr>/value` node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeAttr {
    Antenna,
    Freq,
    Gain,
    Bandwidth,
}

impl FeAttr {
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Antenna => "antenna",
            Self::Freq => "freq",
            Self::Gain => "gains",
            Self::Bandwidth => "bandwidth",
        }
    }
}

/// One registered (direction, channel) cell and where it lives in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontendBinding {
    pub key: FeKey,
    pub base: PropertyPath,
}

impl FrontendBinding {
    pub fn value_path(&self, attr: FeAttr) -> PropertyPath {
        self.base.join(attr.segment()).join("value")
    }

    pub fn range_path(&self, attr: FeAttr) -> PropertyPath {
        self.base.join(attr.segment()).join("range")
    }
}

/// Base path of one frontend: `dboards/<slot>/{rx,tx}_frontends/<chan>`.
pub fn fe_base(slot: char, dir: Direction, chan: usize) -> PropertyPath {
    PropertyPath::new("dboards")
        .join(slot)
        .join(dir.frontends_segment())
        .join(chan)
}

/// Create every frontend node for one daughterboard.
pub fn register_frontends<X: Transport + 'static>(
    tree: &mut PropertyTree<FrontendCtrl<X>>,
    slot: char,
    config: &RadioConfig,
) -> Result<Vec<FrontendBinding>> {
    let mut bindings = Vec::with_capacity(config.num_rx_chans + config.num_tx_chans);

    for dir in Direction::ALL {
        for chan in 0..config.num_chans(dir) {
            let key = FeKey::new(dir, chan);
            let binding = FrontendBinding {
                key,
                base: fe_base(slot, dir, chan),
            };
            debug!("Adding FE at {}", binding.base);
            register_cell(tree, &binding, config)?;
            bindings.push(binding);
        }
    }

    Ok(bindings)
}

fn register_cell<X: Transport + 'static>(
    tree: &mut PropertyTree<FrontendCtrl<X>>,
    binding: &FrontendBinding,
    config: &RadioConfig,
) -> Result<()> {
    let FeKey { dir, chan } = binding.key;
    let base = &binding.base;
    let native_antenna = hardware_id(dir, chan)?;

    tree.create::<String>(base.join("name"))?
        .set_initial(format!("{} {} {}", config.frontend_name, dir.tag(), chan));
    tree.create::<String>(base.join("connection"))?
        .set_initial("IQ".to_owned());

    // Antenna
    tree.create::<String>(binding.value_path(FeAttr::Antenna))?
        .set_initial(native_antenna.as_str().to_owned())
        .set_coercer(AntennaHook(binding.key))
        .set_publisher(AntennaHook(binding.key));
    tree.create::<Vec<String>>(base.join("antenna/options"))?
        .set_initial(vec![native_antenna.as_str().to_owned()]);

    // Frequency (shared LO per direction; publisher always re-queries)
    tree.create::<f64>(binding.value_path(FeAttr::Freq))?
        .set_range(config.freq_range)
        .set_coercer(FreqHook(binding.key))
        .set_publisher(FreqHook(binding.key));
    tree.create::<ValueRange>(binding.range_path(FeAttr::Freq))?
        .set_initial(config.freq_range);

    // Gain
    let gain_range = config.gain_range(dir);
    tree.create::<f64>(binding.value_path(FeAttr::Gain))?
        .set_range(gain_range)
        .set_coercer(GainHook(binding.key))
        .set_publisher(GainHook(binding.key));
    tree.create::<ValueRange>(binding.range_path(FeAttr::Gain))?
        .set_initial(gain_range);

    // Bandwidth
    let bw_range = ValueRange::fixed(config.default_bandwidth_hz);
    tree.create::<f64>(binding.value_path(FeAttr::Bandwidth))?
        .set_range(bw_range)
        .set_coercer(BandwidthHook(binding.key))
        .set_publisher(BandwidthHook(binding.key));
    tree.create::<ValueRange>(binding.range_path(FeAttr::Bandwidth))?
        .set_initial(bw_range);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::NullTransport;

    #[test]
    fn default_grid_is_one_by_one() {
        let mut tree = PropertyTree::<FrontendCtrl<NullTransport>>::new();
        let bindings = register_frontends(&mut tree, 'A', &RadioConfig::default()).unwrap();

        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings[0].key, FeKey::new(Direction::Rx, 0));
        assert_eq!(bindings[1].base.as_str(), "dboards/A/tx_frontends/0");
        assert_eq!(tree.list("dboards/A"), ["rx_frontends", "tx_frontends"]);
        assert_eq!(
            tree.list("dboards/A/rx_frontends/0"),
            ["antenna", "bandwidth", "connection", "freq", "gains", "name"]
        );
    }

    #[test]
    fn value_nodes_are_hooked_and_ranged() {
        let mut tree = PropertyTree::<FrontendCtrl<NullTransport>>::new();
        let cfg = RadioConfig::default();
        let bindings = register_frontends(&mut tree, 'B', &cfg).unwrap();
        let tx = &bindings[1];

        let freq = tree.node::<f64>(tx.value_path(FeAttr::Freq)).unwrap();
        assert!(freq.has_coercer() && freq.has_publisher());
        assert_eq!(freq.stored(), None);

        let gain_range = tree.node::<ValueRange>(tx.range_path(FeAttr::Gain)).unwrap();
        assert_eq!(gain_range.stored(), Some(&cfg.tx_gain_range));

        let options = tree
            .node::<Vec<String>>("dboards/B/tx_frontends/0/antenna/options")
            .unwrap();
        assert_eq!(options.stored().unwrap(), &["TX1".to_owned()]);
    }

    #[test]
    fn two_channel_grid() {
        let mut tree = PropertyTree::<FrontendCtrl<NullTransport>>::new();
        let cfg = RadioConfig {
            num_rx_chans: 2,
            num_tx_chans: 2,
            ..RadioConfig::default()
        };
        let bindings = register_frontends(&mut tree, 'C', &cfg).unwrap();
        assert_eq!(bindings.len(), 4);
        assert_eq!(tree.list("dboards/C/rx_frontends"), ["0", "1"]);
        let name = tree
            .node::<String>("dboards/C/tx_frontends/1/name")
            .unwrap()
            .stored()
            .cloned();
        assert_eq!(name.as_deref(), Some("AD9371 TX 1"));
    }
}
