//! File-based field schemas for KeyMask
//!
//! This crate loads the metadata for a record's fields from a file on disk
//! and validates it before any record is processed.
//!
//! # Features
//! - YAML, TOML and JSON schema files (chosen by extension)
//! - Up-front validation of every masking rule config
//! - Named conditions resolved through a `ConditionRegistry`
//!
//! # Example
//! ```no_run
//! # use keymask_config_file::LoadedSchema;
//! # use keymask_core::ConditionRegistry;
//! # fn example() -> keymask_core::Result<()> {
//! let loaded = LoadedSchema::from_file("~/.keymask/schema.yaml", &ConditionRegistry::new())?;
//! let record = serde_json::json!({"customer": {"phoneNo": "13800138000"}});
//! let masked = loaded.schema.apply(&record, &loaded.chain())?;
//! # Ok(())
//! # }
//! ```

mod schema_file;

pub use schema_file::{
    FieldConfig, LoadedSchema, MapSensitiveConfig, SchemaFileConfig, SchemaFormat,
};
