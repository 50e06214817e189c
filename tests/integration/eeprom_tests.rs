//! Daughterboard EEPROM node.

use super::mock_link::{TOKEN, radio_with_session, radio_without_session};

use rfctl::{EepromMap, Error, RadioConfig};

fn sample() -> EepromMap {
    let mut map = EepromMap::new();
    map.insert(0x00, b"AD9371".to_vec());
    map.insert(0x10, vec![0xde, 0xad, 0xbe, 0xef]);
    map
}

#[test]
fn read_returns_controller_contents() {
    let (mut radio, sim) = radio_with_session(RadioConfig::default(), 1);
    sim.store_eeprom(1, sample());
    assert_eq!(radio.db_eeprom().unwrap(), sample());
    assert_eq!(sim.count("get_db_eeprom"), 1);
}

#[test]
fn write_is_a_notification_keyed_by_block() {
    let (mut radio, sim) = radio_with_session(RadioConfig::default(), 3);
    radio.set_db_eeprom(sample()).unwrap();

    assert_eq!(sim.eeprom(3), Some(sample()));
    assert_eq!(sim.eeprom(1), None);
    assert_eq!(radio.db_eeprom().unwrap(), sample());
}

#[test]
fn unprogrammed_eeprom_reads_empty() {
    let (mut radio, _sim) = radio_with_session(RadioConfig::default(), 0);
    assert!(radio.db_eeprom().unwrap().is_empty());
}

#[test]
fn eeprom_needs_a_session() {
    let (mut radio, sim) = radio_without_session(RadioConfig::default(), 0);
    assert_eq!(radio.db_eeprom(), Err(Error::NoSessionToken));
    assert_eq!(radio.set_db_eeprom(sample()), Err(Error::NoSessionToken));
    assert!(sim.calls().is_empty());

    let path = radio.eeprom_path();
    let stored = radio.tree().node::<EepromMap>(path).unwrap().stored().cloned();
    assert_eq!(stored, Some(EepromMap::new()));

    radio.attach_session(TOKEN);
    radio.set_db_eeprom(sample()).unwrap();
    assert_eq!(sim.eeprom(0), Some(sample()));
}
