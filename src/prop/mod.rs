//! Reactive property tree.
//!
//! Named, typed nodes that external consumers read and write. A node may
//! carry advisory range metadata, a coercer that decides the effective value
//! of a write, a publisher that computes every read live, and subscribers
//! notified after each write.

pub mod node;
pub mod path;
pub mod tree;

pub use node::{Coercer, Property, PropertyValue, Publisher, Subscriber};
pub use path::PropertyPath;
pub use tree::PropertyTree;
