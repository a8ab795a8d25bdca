//! Declarative metadata attached to a value at its call site
//!
//! Metadata replaces annotations on declaration sites: callers build it
//! explicitly (or load it from a schema file) and pass it alongside the value
//! being desensitized.

use crate::condition::{AlwaysTrue, Condition};
use std::fmt;
use std::sync::Arc;

/// Masking config used when a [`MapSensitive`] does not specify one
///
/// Keeps the first 3 and last 4 characters of `phoneNo`, and the first 2 and
/// last 3 characters of `email`.
pub const DEFAULT_MAP_CONFIG: &str = "phoneNo:3,4,*;email:2,3,*";

/// Marks a key/value container whose entries should be masked
#[derive(Clone)]
pub struct MapSensitive {
    /// Rule config in the form `key:start,end,placeholder(;...)`
    pub config: String,

    /// Gate evaluated once against the container before masking
    pub condition: Arc<dyn Condition>,
}

impl MapSensitive {
    /// Create a map annotation with the given config and the `always` condition
    pub fn new(config: impl Into<String>) -> Self {
        Self {
            config: config.into(),
            condition: Arc::new(AlwaysTrue),
        }
    }

    /// Set the condition
    pub fn with_condition(mut self, condition: Arc<dyn Condition>) -> Self {
        self.condition = condition;
        self
    }
}

impl Default for MapSensitive {
    fn default() -> Self {
        Self::new(DEFAULT_MAP_CONFIG)
    }
}

impl fmt::Debug for MapSensitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapSensitive")
            .field("config", &self.config)
            .field("condition", &self.condition.name())
            .finish()
    }
}

/// A single piece of metadata
#[derive(Debug, Clone)]
pub enum Annotation {
    /// Mask configured keys of a key/value container
    MapSensitive(MapSensitive),

    /// Free-form tag for caller-defined resolvers
    Marker(String),
}

/// All metadata attached to one value
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    annotations: Vec<Annotation>,
}

impl Metadata {
    /// Create metadata with no annotations
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an annotation
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Add a map masking annotation
    pub fn with_map_sensitive(self, map_sensitive: MapSensitive) -> Self {
        self.with_annotation(Annotation::MapSensitive(map_sensitive))
    }

    /// Add a marker
    pub fn with_marker(self, marker: impl Into<String>) -> Self {
        self.with_annotation(Annotation::Marker(marker.into()))
    }

    /// The map masking annotation, if one is declared
    pub fn map_sensitive(&self) -> Option<&MapSensitive> {
        self.annotations.iter().find_map(|annotation| match annotation {
            Annotation::MapSensitive(map_sensitive) => Some(map_sensitive),
            _ => None,
        })
    }

    /// Check if a marker is declared
    pub fn has_marker(&self, marker: &str) -> bool {
        self.annotations
            .iter()
            .any(|annotation| matches!(annotation, Annotation::Marker(m) if m == marker))
    }

    /// All annotations, in declaration order
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Check if no annotations are declared
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}
