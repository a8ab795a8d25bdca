//! Key/value containers the masking engine operates on
//!
//! A container maps string keys to arbitrary JSON values. The engine never
//! mutates its input: it asks a [`ContainerFactory`] for an empty container
//! of the same concrete kind, copies every entry across, then overwrites the
//! masked keys.

use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// A schema-less mapping from string keys to values
pub trait Container: Send + Sync {
    /// Look up the value stored under `key`
    fn get_value(&self, key: &str) -> Option<&Value>;

    /// Insert or replace the value stored under `key`
    fn put_value(&mut self, key: String, value: Value);

    /// Iterate over all entries, in the container's own order
    fn entries(&self) -> Box<dyn Iterator<Item = (&String, &Value)> + '_>;

    /// Number of entries
    fn entry_count(&self) -> usize;

    /// Check whether `key` is present
    fn has_key(&self, key: &str) -> bool {
        self.get_value(key).is_some()
    }
}

impl<S> Container for HashMap<String, Value, S>
where
    S: BuildHasher + Send + Sync,
{
    fn get_value(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }

    fn put_value(&mut self, key: String, value: Value) {
        self.insert(key, value);
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&String, &Value)> + '_> {
        Box::new(self.iter())
    }

    fn entry_count(&self) -> usize {
        self.len()
    }
}

impl Container for BTreeMap<String, Value> {
    fn get_value(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }

    fn put_value(&mut self, key: String, value: Value) {
        self.insert(key, value);
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&String, &Value)> + '_> {
        Box::new(self.iter())
    }

    fn entry_count(&self) -> usize {
        self.len()
    }
}

impl Container for Map<String, Value> {
    fn get_value(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }

    fn put_value(&mut self, key: String, value: Value) {
        self.insert(key, value);
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&String, &Value)> + '_> {
        Box::new(self.iter())
    }

    fn entry_count(&self) -> usize {
        self.len()
    }
}

/// Shallow-copy every entry of `source` into `dest`
pub fn copy_entries<C: Container + ?Sized>(source: &C, dest: &mut C) {
    for (key, value) in source.entries() {
        dest.put_value(key.clone(), value.clone());
    }
}

/// Creates empty containers of the same concrete kind as an existing one
pub trait ContainerFactory<C>: Send + Sync {
    /// Return a new, empty container shaped like `template`
    fn create_like(&self, template: &C) -> C;
}

/// Factory for any container with a `Default` implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultContainerFactory;

impl<C: Container + Default> ContainerFactory<C> for DefaultContainerFactory {
    fn create_like(&self, _template: &C) -> C {
        C::default()
    }
}

/// Factory backed by a caller-supplied closure
///
/// Useful when the empty container has to inherit something from the
/// template, such as a hasher or a capacity.
pub struct FnContainerFactory<F> {
    create: F,
}

impl<F> FnContainerFactory<F> {
    /// Wrap a closure mapping a template container to a new empty one
    pub fn new(create: F) -> Self {
        Self { create }
    }
}

impl<C, F> ContainerFactory<C> for FnContainerFactory<F>
where
    F: Fn(&C) -> C + Send + Sync,
{
    fn create_like(&self, template: &C) -> C {
        (self.create)(template)
    }
}
