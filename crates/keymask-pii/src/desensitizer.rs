//! Desensitizers
//!
//! A desensitizer turns a value plus its masking annotation into a new,
//! masked value of the same type.

mod map_desensitizer;

pub use map_desensitizer::MapDesensitizer;

use keymask_core::Result;
use serde::{Deserialize, Serialize};

/// Trait for producing a desensitized copy of a target
pub trait Desensitizer<T, A>: Send + Sync {
    /// Desensitize `target` as described by `annotation`
    ///
    /// The target is never modified. On error no output is produced.
    fn desensitize(&self, target: &T, annotation: &A) -> Result<T>;
}

/// Configuration for container desensitization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesensitizerConfig {
    /// Mask the keys of one container concurrently
    #[serde(default = "default_true")]
    pub parallel: bool,

    /// Minimum number of keys to mask before work is fanned out
    #[serde(default = "default_parallel_min_keys")]
    pub parallel_min_keys: usize,
}

impl Default for DesensitizerConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_min_keys: default_parallel_min_keys(),
        }
    }
}

impl DesensitizerConfig {
    /// Configuration that always masks keys on the calling thread
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_parallel_min_keys() -> usize {
    8
}
