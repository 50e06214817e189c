//! Frontend attribute behaviour through the property tree, end to end
//! against the simulated controller.

use super::mock_link::{TOKEN, dual_channel, radio_with_session, radio_without_session};

use rfctl::frontend::{ANTENNA_READBACK, FeAttr};
use rfctl::types::Direction;
use rfctl::{Error, RadioConfig, RemoteCallFailure};

// ── Shared LO ─────────────────────────────────────────────────

#[test]
fn tuning_one_channel_retunes_its_neighbour() {
    let (mut radio, sim) = radio_with_session(dual_channel(), 0);

    let applied = radio.set_rx_frequency(1.2e9, 0).unwrap();
    assert_eq!(applied, 1.2e9);

    sim.clear_calls();
    assert_eq!(radio.rx_frequency(1).unwrap(), 1.2e9);
    // The neighbour's value comes from a fresh query, never a cache.
    assert_eq!(sim.count_on("db_0_get_freq", "RX2"), 1);

    // TX LO is independent.
    assert_ne!(radio.tx_frequency(0).unwrap(), 1.2e9);
}

#[test]
fn reads_reflect_retunes_outside_the_tree() {
    let (mut radio, sim) = radio_with_session(dual_channel(), 0);
    radio.set_tx_frequency(900e6, 1).unwrap();

    sim.retune(0, Direction::Tx, 3.3e9);
    assert_eq!(radio.tx_frequency(0).unwrap(), 3.3e9);
    assert_eq!(radio.tx_frequency(1).unwrap(), 3.3e9);
}

#[test]
fn odd_block_uses_second_board() {
    let (mut radio, sim) = radio_with_session(RadioConfig::default(), 1);
    radio.set_rx_frequency(2.0e9, 0).unwrap();

    assert_eq!(sim.count_on("db_1_set_freq", "RX1"), 1);
    assert_eq!(sim.lo(1, Direction::Rx), 2.0e9);
    assert_ne!(sim.lo(0, Direction::Rx), 2.0e9);
}

#[test]
fn out_of_range_write_is_forwarded_and_coerced() {
    let (mut radio, sim) = radio_with_session(RadioConfig::default(), 0);

    let applied = radio.set_rx_frequency(10e9, 0).unwrap();
    assert_eq!(sim.count("db_0_set_freq"), 1);
    assert_eq!(applied, 6e9);

    let path = radio.bindings()[0].value_path(FeAttr::Freq);
    let stored = radio.tree().node::<f64>(path).unwrap().stored().copied();
    assert_eq!(stored, Some(6e9));
}

// ── Gain ──────────────────────────────────────────────────────

#[test]
fn gain_is_per_chain() {
    let (mut radio, _sim) = radio_with_session(dual_channel(), 0);

    assert_eq!(radio.set_rx_gain(12.3, 0).unwrap(), 12.5);
    assert_eq!(radio.set_rx_gain(4.0, 1).unwrap(), 4.0);
    assert_eq!(radio.rx_gain(0).unwrap(), 12.5);
    assert_eq!(radio.rx_gain(1).unwrap(), 4.0);
}

#[test]
fn remote_failure_leaves_node_unchanged() {
    let (mut radio, sim) = radio_with_session(RadioConfig::default(), 0);
    radio.set_tx_gain(10.0, 0).unwrap();

    sim.fail_next("db_0_set_gain", "gain table locked");
    let err = radio.set_tx_gain(20.0, 0).unwrap_err();
    assert_eq!(
        err,
        Error::RemoteCall(RemoteCallFailure::Remote {
            method: "db_0_set_gain".into(),
            message: "gain table locked".into(),
        })
    );

    let path = radio.bindings()[1].value_path(FeAttr::Gain);
    let stored = radio.tree().node::<f64>(path).unwrap().stored().copied();
    assert!((stored.unwrap() - 10.0).abs() < 1e-9);
}

#[test]
fn link_loss_surfaces_as_transport_failure() {
    let (mut radio, sim) = radio_with_session(RadioConfig::default(), 0);
    sim.set_link_up(false);

    let err = radio.set_rx_frequency(1e9, 0).unwrap_err();
    assert!(matches!(err, Error::RemoteCall(RemoteCallFailure::Transport(_))));
    assert!(sim.calls().is_empty());
}

// ── Antenna and bandwidth ─────────────────────────────────────

#[test]
fn antenna_writes_are_accepted_but_not_driven() {
    let (mut radio, sim) = radio_with_session(RadioConfig::default(), 0);

    radio.set_tx_antenna("TX/RX", 0).unwrap();
    radio.set_rx_antenna("definitely not an antenna", 0).unwrap();
    assert!(sim.calls().is_empty());

    assert_eq!(radio.tx_antenna(0).unwrap(), ANTENNA_READBACK);
    assert_eq!(radio.rx_antenna(0).unwrap(), ANTENNA_READBACK);
}

#[test]
fn bandwidth_is_fixed_in_both_directions() {
    let (mut radio, sim) = radio_with_session(RadioConfig::default(), 0);
    let default_bw = radio.config().default_bandwidth_hz;

    assert_eq!(radio.set_rx_bandwidth(10e6, 0).unwrap(), default_bw);
    assert_eq!(radio.set_tx_bandwidth(80e6, 0).unwrap(), default_bw);
    assert_eq!(radio.rx_bandwidth(0).unwrap(), default_bw);
    assert_eq!(radio.tx_bandwidth(0).unwrap(), default_bw);
    assert!(sim.calls().is_empty());
}

#[test]
fn antenna_options_list_native_port() {
    let (mut radio, _sim) = radio_with_session(dual_channel(), 0);
    let options: Vec<String> = radio
        .get("dboards/A/tx_frontends/1/antenna/options")
        .unwrap();
    assert_eq!(options, ["TX2"]);
}

// ── Session ───────────────────────────────────────────────────

#[test]
fn no_token_means_no_traffic_and_no_mutation() {
    let (mut radio, sim) = radio_without_session(RadioConfig::default(), 0);

    assert_eq!(radio.set_rx_frequency(1e9, 0), Err(Error::NoSessionToken));
    assert_eq!(radio.set_tx_gain(5.0, 0), Err(Error::NoSessionToken));
    assert_eq!(radio.rx_frequency(0), Err(Error::NoSessionToken));
    assert_eq!(radio.set_rx_antenna("RX2", 0), Err(Error::NoSessionToken));
    assert_eq!(radio.tx_bandwidth(0), Err(Error::NoSessionToken));

    assert!(radio.frontend().rpc().transport().untouched());
    assert!(sim.calls().is_empty());
    let path = radio.bindings()[0].value_path(FeAttr::Freq);
    assert_eq!(radio.tree().node::<f64>(path).unwrap().stored(), None);

    radio.attach_session(TOKEN);
    assert_eq!(radio.set_rx_frequency(1e9, 0).unwrap(), 1e9);
}

#[test]
fn unregistered_channel_is_rejected_locally() {
    let (mut radio, sim) = radio_with_session(RadioConfig::default(), 0);
    assert!(matches!(radio.set_rx_gain(1.0, 1), Err(Error::InvalidArgument(_))));
    assert!(sim.calls().is_empty());
}
