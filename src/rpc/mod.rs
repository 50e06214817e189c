//! Transport-agnostic RPC client facade.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       RPC Stack                          │
//! │                                                          │
//! │  ┌───────────┐   ┌──────────┐   ┌─────────┐   ┌────────┐ │
//! │  │ RpcClient │──▶│   Wire   │──▶│  Codec  │──▶│Transport│ │
//! │  │ (token)   │   │(postcard)│   │(framing)│   │ (trait) │ │
//! │  └───────────┘   └──────────┘   └─────────┘   └────────┘ │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod client;
pub mod codec;
pub mod transport;
pub mod wire;

pub use client::RpcClient;
pub use transport::{NullTransport, Transport};
