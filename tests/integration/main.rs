//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against the simulated transceiver controller. All tests run on the host
//! with no radio hardware required.

mod bringup_tests;
mod eeprom_tests;
mod frontend_tests;
mod mock_link;
