//! Desensitizer for schema-less key/value containers

use crate::desensitizer::{Desensitizer, DesensitizerConfig};
use crate::rule::{MaskingRule, MaskingRules};
use keymask_core::{
    Container, ContainerFactory, DefaultContainerFactory, MapSensitive, Result, copy_entries,
};
use serde_json::Value;
use std::borrow::Cow;
use tracing::{debug, trace};

/// Masks configured keys of a key/value container
///
/// The output is a new container of the same kind holding every entry of the
/// input; only keys that are both configured and present are rewritten.
pub struct MapDesensitizer<F = DefaultContainerFactory> {
    config: DesensitizerConfig,
    factory: F,
}

impl MapDesensitizer {
    /// Create a map desensitizer that builds outputs with `Default`
    pub fn new(config: DesensitizerConfig) -> Self {
        Self::with_factory(config, DefaultContainerFactory)
    }
}

impl<F> MapDesensitizer<F> {
    /// Create a map desensitizer with a custom output factory
    pub fn with_factory(config: DesensitizerConfig, factory: F) -> Self {
        Self { config, factory }
    }

    /// Get the configuration
    pub fn config(&self) -> &DesensitizerConfig {
        &self.config
    }

    /// Mask every rule whose key holds a maskable value
    ///
    /// Each rule writes a distinct key, so the work can be split freely. The
    /// first failure is returned and the partial results are dropped.
    fn mask_rules<C: Container>(
        &self,
        target: &C,
        rules: &[&MaskingRule],
    ) -> Result<Vec<(String, Value)>> {
        #[cfg(feature = "parallel")]
        {
            if self.config.parallel && rules.len() >= self.config.parallel_min_keys {
                use rayon::prelude::*;

                trace!(keys = rules.len(), "Masking keys on the rayon pool");
                return rules
                    .par_iter()
                    .filter_map(|rule| mask_entry(target, rule).transpose())
                    .collect();
            }
        }

        rules
            .iter()
            .filter_map(|rule| mask_entry(target, rule).transpose())
            .collect()
    }
}

impl Default for MapDesensitizer {
    fn default() -> Self {
        Self::new(DesensitizerConfig::default())
    }
}

impl<C, F> Desensitizer<C, MapSensitive> for MapDesensitizer<F>
where
    C: Container,
    F: ContainerFactory<C>,
{
    fn desensitize(&self, target: &C, annotation: &MapSensitive) -> Result<C> {
        // Malformed config fails before anything is copied
        let rules = MaskingRules::parse(&annotation.config)?;

        let mut result = self.factory.create_like(target);
        copy_entries(target, &mut result);

        if !annotation.condition.required(target) {
            debug!(
                condition = annotation.condition.name(),
                "Condition not met, container copied unmasked"
            );
            return Ok(result);
        }

        let present: Vec<&MaskingRule> = rules
            .iter()
            .filter(|rule| target.has_key(&rule.key))
            .collect();

        let masked = self.mask_rules(target, &present)?;
        let masked_count = masked.len();
        for (key, value) in masked {
            result.put_value(key, value);
        }

        debug!(
            configured = rules.len(),
            present = present.len(),
            masked = masked_count,
            "Desensitized container"
        );

        Ok(result)
    }
}

/// Mask the value stored under the rule's key
///
/// Returns `None` when there is nothing to mask: the key is absent, the
/// value is `null`, or its text is empty.
fn mask_entry<C: Container>(target: &C, rule: &MaskingRule) -> Result<Option<(String, Value)>> {
    let text = match target.get_value(&rule.key) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
        Some(other) => Cow::Owned(other.to_string()),
    };

    if text.is_empty() {
        return Ok(None);
    }

    let masked = rule.apply(&text)?;
    trace!(
        key = %rule.key,
        length = masked.chars().count(),
        "Masked key"
    );

    Ok(Some((rule.key.clone(), Value::String(masked))))
}
