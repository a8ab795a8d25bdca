//! Field schema: metadata registered by field path
//!
//! Paths are dot-separated object keys (`customer.contact`). The empty path
//! addresses the record itself.

use crate::resolver::ResolverChain;
use keymask_core::{Metadata, Result};
use serde_json::Value;
use std::collections::BTreeMap;

/// Metadata for the fields of a record, keyed by path
#[derive(Debug, Clone, Default)]
pub struct FieldSchema {
    fields: BTreeMap<String, Metadata>,
}

impl FieldSchema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Register metadata for a path
    pub fn with_field(mut self, path: impl Into<String>, metadata: Metadata) -> Self {
        self.insert(path, metadata);
        self
    }

    /// Register metadata for a path, returning what it replaced
    pub fn insert(&mut self, path: impl Into<String>, metadata: Metadata) -> Option<Metadata> {
        self.fields.insert(path.into(), metadata)
    }

    /// Get the metadata registered for a path
    pub fn get(&self, path: &str) -> Option<&Metadata> {
        self.fields.get(path)
    }

    /// Registered paths, sorted
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Get the number of registered fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if no fields are registered
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Resolve every registered field of `record` through `chain`
    ///
    /// Returns a new record; `record` itself is left untouched. Paths that do
    /// not exist in the record are skipped. Paths are visited in sorted order,
    /// so a parent is resolved before its children. Any resolver error aborts
    /// the whole call.
    pub fn apply(&self, record: &Value, chain: &ResolverChain) -> Result<Value> {
        let mut output = record.clone();

        for (path, metadata) in &self.fields {
            let Some(slot) = lookup_mut(&mut output, path) else {
                tracing::debug!("Field path '{}' not present in record, skipping", path);
                continue;
            };

            let current = std::mem::take(slot);
            *slot = chain.resolve(current, metadata)?;
        }

        Ok(output)
    }
}

/// Find the value at a dotted path
fn lookup_mut<'a>(value: &'a mut Value, path: &str) -> Option<&'a mut Value> {
    if path.is_empty() {
        return Some(value);
    }

    path.split('.')
        .try_fold(value, |current, segment| current.as_object_mut()?.get_mut(segment))
}
