//! Masking rule parsing
//!
//! A masking config is a `;`-separated list of groups, each of the form
//! `key:startOffset,endOffset,placeholder`:
//!
//! ```text
//! phoneNo:3,4,*;email:2,3,*
//! ```

use crate::mask::mask;
use keymask_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A parsed masking rule for one container key
///
/// Offsets are validated against a value's length only when the rule is
/// applied, since one rule set is reused across containers whose values
/// differ in length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskingRule {
    /// Container key the rule applies to
    pub key: String,

    /// Number of leading characters left as-is
    pub start_offset: usize,

    /// Number of trailing characters left as-is
    pub end_offset: usize,

    /// Character written over every masked position
    pub placeholder: char,
}

impl MaskingRule {
    /// Parse a single `key:start,end,placeholder` group
    pub fn parse_group(group: &str) -> Result<Self> {
        let parts: Vec<&str> = group.split(':').collect();
        if parts.len() != 2 {
            return Err(Error::config_format(
                group,
                format!(
                    "expected `key:start,end,placeholder`, found {} ':'-separated parts",
                    parts.len()
                ),
            ));
        }

        let key = parts[0];
        let tokens: Vec<&str> = parts[1].split(',').collect();
        if tokens.len() != 3 {
            return Err(Error::config_format(
                group,
                format!(
                    "expected 3 comma-separated fields, found {}",
                    tokens.len()
                ),
            ));
        }

        let start_offset = parse_offset(group, "startOffset", tokens[0])?;
        let end_offset = parse_offset(group, "endOffset", tokens[1])?;

        let mut placeholder_chars = tokens[2].chars();
        let placeholder = match (placeholder_chars.next(), placeholder_chars.next()) {
            (Some(ch), None) => ch,
            _ => {
                return Err(Error::config_format(
                    group,
                    format!(
                        "placeholder must be exactly one character, found '{}'",
                        tokens[2]
                    ),
                ));
            }
        };

        Ok(Self {
            key: key.to_string(),
            start_offset,
            end_offset,
            placeholder,
        })
    }

    /// Mask `value` according to this rule
    pub fn apply(&self, value: &str) -> Result<String> {
        mask(value, self.start_offset, self.end_offset, self.placeholder)
    }
}

impl fmt::Display for MaskingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{},{},{}",
            self.key, self.start_offset, self.end_offset, self.placeholder
        )
    }
}

fn parse_offset(group: &str, name: &str, token: &str) -> Result<usize> {
    token.parse::<usize>().map_err(|_| {
        Error::config_format(
            group,
            format!("{} must be a non-negative integer, found '{}'", name, token),
        )
    })
}

/// A set of masking rules keyed by container key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskingRules {
    rules: HashMap<String, MaskingRule>,
}

impl MaskingRules {
    /// Parse a full masking config
    ///
    /// A single trailing `;` is tolerated. Any other empty group, including
    /// an entirely empty config, is rejected. When a key appears more than
    /// once the last group wins.
    pub fn parse(config: &str) -> Result<Self> {
        let mut groups: Vec<&str> = config.split(';').collect();
        if groups.len() > 1 && groups.last() == Some(&"") {
            groups.pop();
        }

        let mut rules = HashMap::with_capacity(groups.len());
        for group in groups {
            let rule = MaskingRule::parse_group(group)?;
            rules.insert(rule.key.clone(), rule);
        }

        Ok(Self { rules })
    }

    /// Get the rule for a key
    pub fn get(&self, key: &str) -> Option<&MaskingRule> {
        self.rules.get(key)
    }

    /// Iterate over the configured keys
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Iterate over all rules
    pub fn iter(&self) -> impl Iterator<Item = &MaskingRule> {
        self.rules.values()
    }

    /// Rules sorted by key, for stable display
    pub fn sorted(&self) -> Vec<&MaskingRule> {
        let mut rules: Vec<&MaskingRule> = self.rules.values().collect();
        rules.sort_by(|a, b| a.key.cmp(&b.key));
        rules
    }

    /// Get the number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if there are no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromStr for MaskingRules {
    type Err = Error;

    fn from_str(config: &str) -> Result<Self> {
        Self::parse(config)
    }
}
