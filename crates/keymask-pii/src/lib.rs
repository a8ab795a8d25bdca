//! KeyMask masking rules and desensitizers
//!
//! This crate provides the masking engine:
//! - Parsing of `key:start,end,placeholder` rule configs
//! - Offset-based character masking
//! - Desensitization of key/value containers, optionally in parallel

pub mod desensitizer;
pub mod mask;
pub mod rule;

pub use desensitizer::{Desensitizer, DesensitizerConfig, MapDesensitizer};
pub use keymask_core::DEFAULT_MAP_CONFIG;
pub use mask::mask;
pub use rule::{MaskingRule, MaskingRules};
