//! Resolver for schema-less key/value containers

use crate::resolver::TypeResolver;
use keymask_core::{ContainerFactory, DefaultContainerFactory, Metadata, Result};
use keymask_pii::{Desensitizer, DesensitizerConfig, MapDesensitizer};
use serde_json::{Map, Value};

/// Order of the map resolver; it sits ahead of generic resolvers
pub const MAP_RESOLVER_ORDER: i32 = 1;

/// Resolves JSON objects carrying a `MapSensitive` annotation
///
/// Output objects are built by the desensitizer's container factory.
pub struct MapFlatTypeResolver<F = DefaultContainerFactory> {
    desensitizer: MapDesensitizer<F>,
}

impl MapFlatTypeResolver {
    /// Create a map resolver with the given desensitizer configuration
    pub fn new(config: DesensitizerConfig) -> Self {
        Self::with_desensitizer(MapDesensitizer::new(config))
    }
}

impl<F> MapFlatTypeResolver<F> {
    /// Create a map resolver around an existing desensitizer
    pub fn with_desensitizer(desensitizer: MapDesensitizer<F>) -> Self {
        Self { desensitizer }
    }

    /// Get the desensitizer
    pub fn desensitizer(&self) -> &MapDesensitizer<F> {
        &self.desensitizer
    }
}

impl Default for MapFlatTypeResolver {
    fn default() -> Self {
        Self::new(DesensitizerConfig::default())
    }
}

impl<F> TypeResolver for MapFlatTypeResolver<F>
where
    F: ContainerFactory<Map<String, Value>>,
{
    fn support(&self, value: &Value, metadata: &Metadata) -> bool {
        value.is_object() && metadata.map_sensitive().is_some()
    }

    fn resolve(&self, value: &Value, metadata: &Metadata) -> Result<Value> {
        match (value, metadata.map_sensitive()) {
            (Value::Object(map), Some(annotation)) => {
                let masked = self.desensitizer.desensitize(map, annotation)?;
                Ok(Value::Object(masked))
            }
            _ => Ok(value.clone()),
        }
    }

    fn order(&self) -> i32 {
        MAP_RESOLVER_ORDER
    }

    fn name(&self) -> &str {
        "map"
    }
}
