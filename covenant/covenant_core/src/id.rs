//! Identifiers used by the Covenant policy system.
//!
//! Two identifier types exist with very different scopes:
//!
//! - [`RuleId`] addresses a rule inside its parent policy. It is allocated
//!   from a per-policy monotonic counter and is never exported.
//! - [`PolicyKey`] names a saved policy inside a store. It is either the
//!   policy's own identifier or a freshly generated one.
//!
//! # Examples
//!
//! ```
//! use covenant_core::id::{PolicyKey, RuleId};
//!
//! let rule = RuleId::new(1);
//! assert_eq!(rule.next(), RuleId::new(2));
//!
//! let key = PolicyKey::generate("urn:uuid:");
//! assert!(key.as_str().starts_with("urn:uuid:"));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier of a rule, unique within its parent policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(u64);

impl RuleId {
    /// Create a rule identifier from a raw counter value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw counter value.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// The identifier that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Key under which a policy snapshot is saved in a store.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyKey(String);

impl PolicyKey {
    /// Create a key from an existing identifier.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Generate a fresh key from a random UUID v4.
    ///
    /// # Arguments
    ///
    /// * `prefix` - Text prepended to the hyphenated UUID, e.g. `urn:uuid:`.
    ///
    /// # Examples
    ///
    /// ```
    /// use covenant_core::id::PolicyKey;
    ///
    /// let a = PolicyKey::generate("");
    /// let b = PolicyKey::generate("");
    /// assert_ne!(a, b);
    /// assert_eq!(a.as_str().len(), 36);
    /// ```
    pub fn generate(prefix: &str) -> Self {
        Self(format!("{}{}", prefix, Uuid::new_v4()))
    }

    /// Borrow the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PolicyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PolicyKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<String> for PolicyKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&str> for PolicyKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}
