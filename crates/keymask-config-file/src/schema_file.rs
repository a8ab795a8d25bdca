//! File-based field schema

use keymask_core::{
    ALWAYS, ConditionRegistry, DEFAULT_MAP_CONFIG, Error, MapSensitive, Metadata, Result,
};
use keymask_pii::{DesensitizerConfig, MaskingRules};
use keymask_resolver::{FieldSchema, ResolverChain};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Format of a schema file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    Yaml,
    Toml,
    Json,
}

impl SchemaFormat {
    /// Pick the format from a file extension, defaulting to YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => SchemaFormat::Toml,
            Some("json") => SchemaFormat::Json,
            _ => SchemaFormat::Yaml,
        }
    }
}

/// Top-level schema file contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaFileConfig {
    /// Desensitizer settings
    #[serde(default)]
    pub engine: DesensitizerConfig,

    /// Field declarations
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

/// Metadata declared for one field path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Dotted path into the record (empty = the record itself)
    pub path: String,

    /// Mask the configured keys of the object at this path
    #[serde(default)]
    pub map_sensitive: Option<MapSensitiveConfig>,

    /// Free-form markers for caller-defined resolvers
    #[serde(default)]
    pub markers: Vec<String>,
}

/// Serialized form of a `MapSensitive` annotation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapSensitiveConfig {
    /// Rule config, `key:start,end,placeholder(;...)`
    #[serde(default = "default_map_config")]
    pub config: String,

    /// Name of a registered condition
    #[serde(default = "default_condition")]
    pub condition: String,
}

impl Default for MapSensitiveConfig {
    fn default() -> Self {
        Self {
            config: default_map_config(),
            condition: default_condition(),
        }
    }
}

fn default_map_config() -> String {
    DEFAULT_MAP_CONFIG.to_string()
}

fn default_condition() -> String {
    ALWAYS.to_string()
}

impl SchemaFileConfig {
    /// Load a schema file, choosing the format from its extension
    ///
    /// # Errors
    /// - `Error::ConfigNotFound` if the file doesn't exist
    /// - `Error::Io` if the file can't be read
    /// - `Error::Config` if the contents can't be parsed
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = expand_tilde(path.into())?;

        if !path.exists() {
            return Err(Error::ConfigNotFound);
        }

        let contents = std::fs::read_to_string(&path).map_err(|e| {
            error!("Failed to read schema file: {}", e);
            Error::Io(e)
        })?;

        let config = Self::parse(&contents, SchemaFormat::from_path(&path))?;
        info!("Loaded {} field(s) from {:?}", config.fields.len(), path);
        Ok(config)
    }

    /// Parse schema contents in the given format
    pub fn parse(contents: &str, format: SchemaFormat) -> Result<Self> {
        match format {
            SchemaFormat::Toml => toml::from_str(contents).map_err(|e| {
                error!("Failed to parse TOML schema: {}", e);
                Error::Config(format!("Invalid TOML: {}", e))
            }),
            SchemaFormat::Json => serde_json::from_str(contents).map_err(|e| {
                error!("Failed to parse JSON schema: {}", e);
                Error::Config(format!("Invalid JSON: {}", e))
            }),
            SchemaFormat::Yaml => serde_yaml::from_str(contents).map_err(|e| {
                error!("Failed to parse YAML schema: {}", e);
                Error::Config(format!("Invalid YAML: {}", e))
            }),
        }
    }

    /// Validate the declarations and build a field schema
    ///
    /// Every rule config is parsed up front so a malformed file is rejected
    /// before any record is touched.
    pub fn build(&self, conditions: &ConditionRegistry) -> Result<LoadedSchema> {
        let mut seen = HashSet::new();
        let mut schema = FieldSchema::new();

        for field in &self.fields {
            if !seen.insert(field.path.as_str()) {
                return Err(Error::Config(format!(
                    "Duplicate field path '{}'",
                    field.path
                )));
            }

            let mut metadata = Metadata::new();

            if let Some(map_sensitive) = &field.map_sensitive {
                MaskingRules::parse(&map_sensitive.config)?;
                let condition = conditions.get(&map_sensitive.condition)?;
                metadata = metadata.with_map_sensitive(
                    MapSensitive::new(map_sensitive.config.clone()).with_condition(condition),
                );
            }

            for marker in &field.markers {
                metadata = metadata.with_marker(marker.clone());
            }

            schema.insert(field.path.clone(), metadata);
        }

        debug!("Schema validation passed");
        Ok(LoadedSchema {
            engine: self.engine.clone(),
            schema,
        })
    }
}

/// A validated schema ready to apply
#[derive(Debug, Clone)]
pub struct LoadedSchema {
    /// Desensitizer settings from the file
    pub engine: DesensitizerConfig,

    /// Field metadata by path
    pub schema: FieldSchema,
}

impl LoadedSchema {
    /// Load and validate a schema file in one step
    pub fn from_file(path: impl Into<PathBuf>, conditions: &ConditionRegistry) -> Result<Self> {
        SchemaFileConfig::from_file(path)?.build(conditions)
    }

    /// Build the standard resolver chain with this schema's engine settings
    pub fn chain(&self) -> ResolverChain {
        ResolverChain::standard(self.engine.clone())
    }
}

fn expand_tilde(path: PathBuf) -> Result<PathBuf> {
    if let Ok(rest) = path.strip_prefix("~") {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;
        return Ok(home.join(rest));
    }
    Ok(path)
}
