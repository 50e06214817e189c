//! Adapters — concrete implementations of the [`Transport`](crate::rpc::Transport) port.
//!
//! | Adapter | Connects to                                  |
//! |---------|----------------------------------------------|
//! | `tcp`   | Networked transceiver controller over TCP    |
//! | `sim`   | In-process simulated controller (tests, dev) |

pub mod sim;
pub mod tcp;
