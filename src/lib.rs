//! Radio frontend control plane.
//!
//! A reactive property tree exposes each frontend chain's antenna, frequency,
//! gain and bandwidth. Writes and reads on those nodes are forwarded over an
//! authenticated RPC link to the transceiver controller, which owns one LO
//! per direction shared by every channel in that direction.
//!
//! ```text
//!   RadioCtrl ──▶ PropertyTree ──▶ hooks ──▶ FrontendCtrl ──▶ RpcClient ──▶ Transport
//!   (bring-up)     (nodes)                   (which, LO)      (token, seq)   (TCP / sim)
//! ```

#![deny(unused_must_use)]

pub mod adapters;
pub mod config;
pub mod frontend;
pub mod prop;
pub mod radio;
pub mod rpc;
pub mod types;

mod error;

pub use config::RadioConfig;
pub use error::{Error, PropertyError, RemoteCallFailure, Result};
pub use frontend::FrontendCtrl;
pub use prop::{PropertyPath, PropertyTree};
pub use radio::RadioCtrl;
pub use rpc::{RpcClient, Transport};
pub use types::{Direction, EepromMap, HardwareId, ValueRange};
