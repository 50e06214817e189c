//! Construction, default bring-up and teardown of a radio block.

use super::mock_link::{TOKEN, dual_channel, radio_with_session, radio_without_session};

use rfctl::adapters::sim::POWER_ON_LO_HZ;
use rfctl::frontend::{ANTENNA_READBACK, FeAttr};
use rfctl::rpc::{NullTransport, RpcClient};
use rfctl::types::Direction;
use rfctl::{Error, RadioConfig, RadioCtrl};

#[test]
fn construction_talks_to_no_hardware() {
    let (radio, sim) = radio_without_session(dual_channel(), 0);
    assert!(sim.calls().is_empty());
    assert!(radio.frontend().rpc().transport().untouched());
    assert_eq!(radio.bindings().len(), 4);
    assert_eq!(sim.lo(0, Direction::Rx), POWER_ON_LO_HZ);
}

#[test]
fn defaults_require_a_session() {
    let (mut radio, sim) = radio_without_session(RadioConfig::default(), 0);
    assert_eq!(radio.init_defaults(), Err(Error::NoSessionToken));
    assert!(sim.calls().is_empty());
}

#[test]
fn defaults_are_pushed_through_the_write_path() {
    let (mut radio, sim) = radio_with_session(dual_channel(), 0);
    radio.init_defaults().unwrap();

    let cfg = radio.config().clone();
    assert_eq!(sim.lo(0, Direction::Rx), cfg.center_freq_hz);
    assert_eq!(sim.lo(0, Direction::Tx), cfg.center_freq_hz);
    for which in ["RX1", "RX2", "TX1", "TX2"] {
        assert_eq!(sim.count_on("db_0_set_freq", which), 1, "{which}");
        assert_eq!(sim.count_on("db_0_set_gain", which), 1, "{which}");
    }

    for b in radio.bindings().to_vec() {
        let freq = radio.tree().node::<f64>(b.value_path(FeAttr::Freq)).unwrap();
        assert_eq!(freq.stored(), Some(&cfg.center_freq_hz));
        let antenna = radio
            .tree()
            .node::<String>(b.value_path(FeAttr::Antenna))
            .unwrap()
            .stored()
            .cloned();
        let expected = match b.key.dir {
            Direction::Rx => &cfg.default_rx_antenna,
            Direction::Tx => &cfg.default_tx_antenna,
        };
        assert_eq!(antenna.as_ref(), Some(expected));
        // Reads still go through the publisher.
        assert_eq!(
            radio.get::<String>(b.value_path(FeAttr::Antenna)).unwrap(),
            ANTENNA_READBACK
        );
        assert_eq!(
            radio.get::<f64>(b.value_path(FeAttr::Bandwidth)).unwrap(),
            cfg.default_bandwidth_hz
        );
    }
}

#[test]
fn bringup_aborts_on_first_failure() {
    let (mut radio, sim) = radio_with_session(RadioConfig::default(), 0);
    sim.fail_next("db_0_set_gain", "AGC busy");

    let err = radio.init_defaults().unwrap_err();
    assert!(matches!(err, Error::RemoteCall(_)));
    // RX freq succeeded, RX gain failed, nothing on TX was attempted.
    assert_eq!(sim.count_on("db_0_set_freq", "RX1"), 1);
    assert_eq!(sim.count_on("db_0_set_freq", "TX1"), 0);
}

#[test]
fn custom_config_from_json() {
    let cfg = RadioConfig::from_json(
        r#"{ "center_freq_hz": 915e6, "default_gain_db": 6.0, "num_rx_chans": 2 }"#,
    )
    .unwrap();
    let sim = rfctl::adapters::sim::SimHandle::new(TOKEN);
    let mut radio = RadioCtrl::new(cfg, 2, RpcClient::with_token(sim.transport(), TOKEN)).unwrap();
    radio.init_defaults().unwrap();

    assert_eq!(radio.slot(), 'C');
    assert_eq!(sim.lo(0, Direction::Rx), 915e6);
    assert_eq!(radio.rx_gain(1).unwrap(), 6.0);
}

#[test]
fn invalid_config_is_refused() {
    let cfg = RadioConfig {
        num_tx_chans: 3,
        ..RadioConfig::default()
    };
    let result = RadioCtrl::new(cfg, 0, RpcClient::new(NullTransport));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn teardown_then_rebuild() {
    let (mut radio, sim) = radio_with_session(RadioConfig::default(), 0);
    radio.init_defaults().unwrap();
    radio.teardown();

    assert!(!radio.tree().exists(radio.fe_path(0, Direction::Rx)));
    assert!(matches!(radio.rx_frequency(0), Err(Error::InvalidArgument(_))));

    // Hardware state outlives the tree.
    assert_eq!(sim.lo(0, Direction::Rx), radio.config().center_freq_hz);
}
