//! Error types for the Covenant policy system.
//!
//! Errors are organized by subsystem, with each subsystem having its own
//! error type. The root error type, `Error`, wraps any of them so callers
//! can handle failures uniformly at the top level.
//!
//! Structural validation failures are *not* errors: the validator reports
//! them as data. `PolicyError::Invalid` exists only for callers that want
//! to turn a non-empty violation list into a hard stop.

use crate::id::{PolicyKey, RuleId};
use thiserror::Error;

/// Root error type for the Covenant system.
#[derive(Debug, Error)]
pub enum Error {
    /// Policy model errors
    #[error("Policy error: {0}")]
    Policy(#[from] PolicyError),

    /// Policy store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Errors related to the policy model.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// Rule with the given ID does not exist in the policy
    #[error("Rule not found: {0}")]
    RuleNotFound(RuleId),

    /// Constraint index is out of range for the addressed rule
    #[error("Constraint {index} not found on rule {rule}")]
    ConstraintNotFound {
        /// The rule that was addressed
        rule: RuleId,

        /// The constraint index that was requested
        index: usize,
    },

    /// A term is not part of the closed vocabulary it was looked up in
    #[error("Unknown {vocabulary} '{term}'")]
    UnknownTerm {
        /// The vocabulary that was searched
        vocabulary: &'static str,

        /// The offending term
        term: String,
    },

    /// The policy failed structural validation
    #[error("Policy has {} violation(s)", .0.len())]
    Invalid(Vec<String>),
}

/// Errors related to the policy store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No policy has been saved under the given key
    #[error("Policy not found: {0}")]
    NotFound(PolicyKey),

    /// The key already belongs to a policy of another family
    #[error("Key {key} is held by a policy of family '{existing}'")]
    KeyConflict {
        /// The contested key
        key: PolicyKey,

        /// Family of the policy stored under the key
        existing: String,
    },

    /// Every generic policy id has been handed out
    #[error("No generic policy ids left")]
    IdsExhausted,

    /// The store lock was poisoned by a panicking writer
    #[error("Store lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Errors related to configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration source
    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    /// Failed to parse the configuration source
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Configuration parsed but holds unusable values
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type used throughout the Covenant system.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let policy_err = PolicyError::RuleNotFound(RuleId::new(3));
        let error: Error = policy_err.into();
        assert!(matches!(error, Error::Policy(PolicyError::RuleNotFound(_))));

        let store_err = StoreError::NotFound(PolicyKey::new("urn:policy:1"));
        let error: Error = store_err.into();
        assert!(matches!(error, Error::Store(_)));

        let config_err = ConfigError::Invalid("empty".to_string());
        let error: Error = config_err.into();
        assert!(matches!(error, Error::Config(_)));
    }

    #[test]
    fn test_error_display() {
        let error: Error = PolicyError::ConstraintNotFound {
            rule: RuleId::new(2),
            index: 4,
        }
        .into();
        assert_eq!(
            error.to_string(),
            "Policy error: Constraint 4 not found on rule 2"
        );

        let error: Error = PolicyError::UnknownTerm {
            vocabulary: "action",
            term: "fly".to_string(),
        }
        .into();
        assert_eq!(error.to_string(), "Policy error: Unknown action 'fly'");

        let error = StoreError::KeyConflict {
            key: PolicyKey::new("1"),
            existing: "odrl".to_string(),
        };
        assert_eq!(error.to_string(), "Key 1 is held by a policy of family 'odrl'");
    }

    #[test]
    fn test_invalid_counts_violations() {
        let err = PolicyError::Invalid(vec!["uid: missing".into(), "target: missing".into()]);
        assert_eq!(err.to_string(), "Policy has 2 violation(s)");
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = parse_err.into();
        assert!(matches!(error, Error::Serialization(_)));
    }
}
