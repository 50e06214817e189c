//! Frontend control — the bridge between property nodes and the
//! transceiver controller.
//!
//! ```text
//!   PropertyTree ──▶ FreqHook/GainHook/... ──▶ FrontendCtrl ──▶ RpcClient
//!   (registry)          (bound data)            (which, LO)      (token)
//! ```

pub mod adapter;
pub mod hooks;
pub mod registry;

pub use adapter::{ANTENNA_READBACK, FrontendCtrl};
pub use hooks::{AntennaHook, BandwidthHook, EepromHook, FeKey, FreqHook, GainHook};
pub use registry::{FeAttr, FrontendBinding, fe_base, register_frontends};
