//! Heterogeneous property tree keyed by [`PropertyPath`].

use core::any::Any;
use core::marker::PhantomData;
use std::collections::BTreeMap;

use crate::error::{PropertyError, Result};

use super::node::{Property, PropertyValue};
use super::path::PropertyPath;

/// Typed node store. `C` is the context handed to every hook.
pub struct PropertyTree<C> {
    nodes: BTreeMap<PropertyPath, Box<dyn Any>>,
    _ctx: PhantomData<fn(&mut C)>,
}

impl<C: 'static> Default for PropertyTree<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: 'static> PropertyTree<C> {
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            _ctx: PhantomData,
        }
    }

    /// Create a node, or return the existing one if it already holds a `T`.
    pub fn create<T: PropertyValue>(
        &mut self,
        path: impl Into<PropertyPath>,
    ) -> Result<&mut Property<T, C>> {
        let path = path.into();
        let slot = self
            .nodes
            .entry(path.clone())
            .or_insert_with(|| Box::new(Property::<T, C>::new()));
        slot.downcast_mut::<Property<T, C>>()
            .ok_or_else(|| PropertyError::TypeMismatch(path).into())
    }

    /// Mutable access to an existing node.
    pub fn access<T: PropertyValue>(
        &mut self,
        path: impl Into<PropertyPath>,
    ) -> Result<&mut Property<T, C>> {
        let path = path.into();
        match self.nodes.get_mut(&path) {
            Some(node) => node
                .downcast_mut::<Property<T, C>>()
                .ok_or_else(|| PropertyError::TypeMismatch(path).into()),
            None => Err(PropertyError::NotFound(path).into()),
        }
    }

    /// Shared access to an existing node.
    pub fn node<T: PropertyValue>(&self, path: impl Into<PropertyPath>) -> Result<&Property<T, C>> {
        let path = path.into();
        match self.nodes.get(&path) {
            Some(node) => node
                .downcast_ref::<Property<T, C>>()
                .ok_or_else(|| PropertyError::TypeMismatch(path).into()),
            None => Err(PropertyError::NotFound(path).into()),
        }
    }

    /// Write through the node's hook chain; returns the effective value.
    pub fn set<T: PropertyValue>(
        &mut self,
        path: impl Into<PropertyPath>,
        value: T,
        ctx: &mut C,
    ) -> Result<T> {
        self.access::<T>(path)?.set(value, ctx)
    }

    /// Read a node, running its publisher if one is attached.
    pub fn get<T: PropertyValue>(&self, path: impl Into<PropertyPath>, ctx: &mut C) -> Result<T> {
        let path = path.into();
        self.node::<T>(&path)?
            .get(ctx)?
            .ok_or_else(|| PropertyError::Empty(path).into())
    }

    pub fn exists(&self, path: impl Into<PropertyPath>) -> bool {
        self.nodes.contains_key(&path.into())
    }

    /// Names of the direct children of `path`, sorted and deduplicated.
    ///
    /// Intermediate segments count as children even if no node lives there.
    pub fn list(&self, path: impl Into<PropertyPath>) -> Vec<String> {
        let base = path.into();
        let depth = base.segments().count();
        let mut out: Vec<String> = self
            .nodes
            .keys()
            .filter(|p| p.starts_with(&base) && **p != base)
            .filter_map(|p| p.segments().nth(depth).map(str::to_owned))
            .collect();
        out.sort();
        out.dedup();
        out
    }

    /// Remove `path` and everything below it. Returns the number of nodes
    /// dropped.
    pub fn remove(&mut self, path: impl Into<PropertyPath>) -> usize {
        let base = path.into();
        let before = self.nodes.len();
        self.nodes.retain(|p, _| !p.starts_with(&base));
        before - self.nodes.len()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &PropertyPath> {
        self.nodes.keys()
    }
}
