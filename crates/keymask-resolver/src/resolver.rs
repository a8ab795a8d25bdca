//! Resolver chain and dispatch
//!
//! Resolvers claim values by runtime shape plus attached metadata. The chain
//! asks them in ascending order and hands the value to the first one that
//! supports it. A value nobody claims is returned unchanged.

use crate::map_resolver::MapFlatTypeResolver;
use keymask_core::{Metadata, Result};
use keymask_pii::DesensitizerConfig;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Strategy for desensitizing values of a particular shape
pub trait TypeResolver: Send + Sync {
    /// Check if this resolver handles the value with the given metadata
    fn support(&self, value: &Value, metadata: &Metadata) -> bool;

    /// Produce the desensitized value
    fn resolve(&self, value: &Value, metadata: &Metadata) -> Result<Value>;

    /// Position in the chain (lower = asked first)
    fn order(&self) -> i32;

    /// Name for logging
    fn name(&self) -> &str;
}

/// Ordered collection of resolvers
#[derive(Clone)]
pub struct ResolverChain {
    /// Resolvers sorted by order, lowest first; ties keep insertion order
    resolvers: Vec<Arc<dyn TypeResolver>>,
}

impl ResolverChain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self {
            resolvers: Vec::new(),
        }
    }

    /// Create the standard chain, holding the map resolver
    pub fn standard(config: DesensitizerConfig) -> Self {
        Self::with_resolvers(vec![Arc::new(MapFlatTypeResolver::new(config))])
    }

    /// Create a chain with the given resolvers
    pub fn with_resolvers(mut resolvers: Vec<Arc<dyn TypeResolver>>) -> Self {
        // Stable sort keeps declaration order among equal orders
        resolvers.sort_by_key(|resolver| resolver.order());
        Self { resolvers }
    }

    /// Add a resolver to the chain
    pub fn add_resolver(&mut self, resolver: Arc<dyn TypeResolver>) {
        self.resolvers.push(resolver);
        // Re-sort after adding
        self.resolvers.sort_by_key(|resolver| resolver.order());
    }

    /// Find the first resolver supporting the value
    pub fn find_resolver(&self, value: &Value, metadata: &Metadata) -> Option<&Arc<dyn TypeResolver>> {
        self.resolvers
            .iter()
            .find(|resolver| resolver.support(value, metadata))
    }

    /// Desensitize a value with the first resolver that supports it
    ///
    /// Returns the value unchanged when no resolver claims it.
    pub fn resolve(&self, value: Value, metadata: &Metadata) -> Result<Value> {
        match self.find_resolver(&value, metadata) {
            Some(resolver) => {
                tracing::debug!(
                    "Resolver '{}' (order {}) claimed value",
                    resolver.name(),
                    resolver.order()
                );
                resolver.resolve(&value, metadata)
            }
            None => {
                tracing::trace!("No resolver supports value, returning it unchanged");
                Ok(value)
            }
        }
    }

    /// Get all resolvers (sorted by order)
    pub fn resolvers(&self) -> &[Arc<dyn TypeResolver>] {
        &self.resolvers
    }

    /// Get the number of resolvers
    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    /// Check if the chain is empty
    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl Default for ResolverChain {
    fn default() -> Self {
        Self::standard(DesensitizerConfig::default())
    }
}

impl fmt::Debug for ResolverChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.resolvers
                    .iter()
                    .map(|resolver| (resolver.name(), resolver.order())),
            )
            .finish()
    }
}
