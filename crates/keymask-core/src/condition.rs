//! Condition predicates gating whether a container is masked at all

use crate::container::Container;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Name of the built-in [`AlwaysTrue`] condition
pub const ALWAYS: &str = "always";

/// Boolean gate evaluated once against a container before it is masked
pub trait Condition: Send + Sync {
    /// Whether the target should be desensitized
    fn required(&self, target: &dyn Container) -> bool;

    /// Name the condition is registered under
    fn name(&self) -> &str;
}

/// Condition that always requests masking
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysTrue;

impl Condition for AlwaysTrue {
    fn required(&self, _target: &dyn Container) -> bool {
        true
    }

    fn name(&self) -> &str {
        ALWAYS
    }
}

/// Lookup table from condition names to implementations
///
/// Schema files refer to conditions by name; this is where those names are
/// turned into predicates.
#[derive(Clone)]
pub struct ConditionRegistry {
    conditions: HashMap<String, Arc<dyn Condition>>,
}

impl ConditionRegistry {
    /// Create a registry holding only the built-in `always` condition
    pub fn new() -> Self {
        let mut registry = Self {
            conditions: HashMap::new(),
        };
        registry.register(Arc::new(AlwaysTrue));
        registry
    }

    /// Register a condition under its own name, returning any it replaced
    pub fn register(&mut self, condition: Arc<dyn Condition>) -> Option<Arc<dyn Condition>> {
        self.conditions
            .insert(condition.name().to_string(), condition)
    }

    /// Look up a condition by name
    pub fn get(&self, name: &str) -> Result<Arc<dyn Condition>> {
        self.conditions
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownCondition(name.to_string()))
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.conditions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for ConditionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConditionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionRegistry")
            .field("conditions", &self.names())
            .finish()
    }
}
