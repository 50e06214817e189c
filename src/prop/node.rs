//! Property nodes and their hook traits.
//!
//! ```text
//!   set(v) ──▶ range check ──▶ Coercer ──▶ Subscribers ──▶ stored value
//!   get()  ──▶ Publisher (if any) ──────────────────────▶ caller
//!                  └─ otherwise stored value
//! ```
//!
//! Hooks never capture the tree or the hardware adapter. The caller passes a
//! context `C` into every `set`/`get`, and each hook receives `&mut C`.
//! Hooks are therefore plain data and cannot write back into the tree.

use core::fmt;

use log::warn;

use crate::error::Result;
use crate::types::{EepromMap, ValueRange};

// ───────────────────────────────────────────────────────────────
// Value types
// ───────────────────────────────────────────────────────────────

/// A type that can live in a property node.
pub trait PropertyValue: Clone + fmt::Debug + 'static {
    /// Advisory range check. Non-numeric values are always in range.
    fn in_range(&self, _range: &ValueRange) -> bool {
        true
    }
}

impl PropertyValue for f64 {
    fn in_range(&self, range: &ValueRange) -> bool {
        range.contains(*self)
    }
}

impl PropertyValue for i32 {
    fn in_range(&self, range: &ValueRange) -> bool {
        range.contains(f64::from(*self))
    }
}

impl PropertyValue for bool {}
impl PropertyValue for String {}
impl PropertyValue for Vec<String> {}
impl PropertyValue for ValueRange {}
impl PropertyValue for EepromMap {}

// ───────────────────────────────────────────────────────────────
// Hook traits
// ───────────────────────────────────────────────────────────────

/// Invoked on write; its return value is what actually gets stored.
pub trait Coercer<T, C> {
    fn coerce(&self, ctx: &mut C, value: T) -> Result<T>;
}

/// Invoked on every read; bypasses the stored value.
pub trait Publisher<T, C> {
    fn publish(&self, ctx: &mut C) -> Result<T>;
}

/// Notified with the effective value after coercion.
pub trait Subscriber<T, C> {
    fn notify(&self, ctx: &mut C, value: &T) -> Result<()>;
}

// ───────────────────────────────────────────────────────────────
// Property
// ───────────────────────────────────────────────────────────────

/// One typed node of the property tree.
pub struct Property<T, C> {
    value: Option<T>,
    range: Option<ValueRange>,
    coercer: Option<Box<dyn Coercer<T, C>>>,
    publisher: Option<Box<dyn Publisher<T, C>>>,
    subscribers: Vec<Box<dyn Subscriber<T, C>>>,
}

impl<T: PropertyValue, C> Default for Property<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PropertyValue, C> Property<T, C> {
    pub fn new() -> Self {
        Self {
            value: None,
            range: None,
            coercer: None,
            publisher: None,
            subscribers: Vec::new(),
        }
    }

    /// Store a value directly, without hooks. Used for static nodes and
    /// initial values at registration time.
    pub fn set_initial(&mut self, value: T) -> &mut Self {
        self.value = Some(value);
        self
    }

    pub fn set_range(&mut self, range: ValueRange) -> &mut Self {
        self.range = Some(range);
        self
    }

    pub fn set_coercer(&mut self, hook: impl Coercer<T, C> + 'static) -> &mut Self {
        self.coercer = Some(Box::new(hook));
        self
    }

    pub fn set_publisher(&mut self, hook: impl Publisher<T, C> + 'static) -> &mut Self {
        self.publisher = Some(Box::new(hook));
        self
    }

    pub fn add_subscriber(&mut self, hook: impl Subscriber<T, C> + 'static) -> &mut Self {
        self.subscribers.push(Box::new(hook));
        self
    }

    /// Last stored value. With a publisher attached this is advisory only.
    pub fn stored(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn range(&self) -> Option<&ValueRange> {
        self.range.as_ref()
    }

    pub fn has_publisher(&self) -> bool {
        self.publisher.is_some()
    }

    pub fn has_coercer(&self) -> bool {
        self.coercer.is_some()
    }

    /// Write a value through the hook chain and return the effective value.
    ///
    /// The stored value changes only if the coercer and every subscriber
    /// succeed.
    pub fn set(&mut self, value: T, ctx: &mut C) -> Result<T> {
        if let Some(range) = &self.range {
            if !value.in_range(range) {
                warn!(
                    "value {:?} outside advertised range [{}, {}]; forwarding anyway",
                    value, range.start, range.stop
                );
            }
        }

        let effective = match &self.coercer {
            Some(c) => c.coerce(ctx, value)?,
            None => value,
        };

        for sub in &self.subscribers {
            sub.notify(ctx, &effective)?;
        }

        self.value = Some(effective.clone());
        Ok(effective)
    }

    /// Read the node. Publisher-backed nodes are always re-queried.
    ///
    /// Returns `None` if the node was never set and has no publisher.
    pub fn get(&self, ctx: &mut C) -> Result<Option<T>> {
        match &self.publisher {
            Some(p) => p.publish(ctx).map(Some),
            None => Ok(self.value.clone()),
        }
    }
}
