//! Error types for KeyMask Core

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A masking config string does not follow `key:start,end,placeholder(;...)`
    #[error("Invalid masking config group '{group}': {reason}")]
    ConfigFormat { group: String, reason: String },

    /// A value is too short for the offsets of the rule applied to it.
    ///
    /// The target is kept for callers that need it, but it is never part of
    /// the rendered message since it holds the unmasked value.
    #[error(
        "Invalid offsets: startOffset: {start_offset}, endOffset: {end_offset}, target length: {}",
        .target.chars().count()
    )]
    InvalidOffset {
        start_offset: usize,
        end_offset: usize,
        target: String,
    },

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration not found")]
    ConfigNotFound,

    #[error("Unknown condition: {0}")]
    UnknownCondition(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for building a [`Error::ConfigFormat`]
    pub fn config_format(group: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::ConfigFormat {
            group: group.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_offset_message_hides_target() {
        let err = Error::InvalidOffset {
            start_offset: 3,
            end_offset: 4,
            target: "secret".to_string(),
        };

        let message = err.to_string();
        assert!(message.contains("startOffset: 3"));
        assert!(message.contains("endOffset: 4"));
        assert!(message.contains("target length: 6"));
        assert!(!message.contains("secret"));
    }

    #[test]
    fn test_config_format_message() {
        let err = Error::config_format("phoneNo:3,4", "expected 3 comma-separated fields, found 2");
        assert_eq!(
            err.to_string(),
            "Invalid masking config group 'phoneNo:3,4': expected 3 comma-separated fields, found 2"
        );
    }
}
