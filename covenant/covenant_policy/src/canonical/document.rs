//! Canonical document types.
//!
//! Field order here is the key order of the emitted JSON. Collections are
//! skipped when empty; scalars are always written, empty or not.

use chrono::{DateTime, Utc};
use covenant_core::error::Result;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::Notifications;

/// A canonical document of either family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PolicyDocument {
    /// An ODRL policy, recognised by its `@context` and `@type` keys.
    Odrl(OdrlDocument),

    /// A generic policy.
    Generic(GenericDocument),
}

/// Canonical form of an ODRL policy.
///
/// Empty scalars are written as `""`, with one exception: `assigner` and
/// `assignee` are left out when empty and the kind does not require them.
/// A `Set` writes neither and an `Offer` writes no `assignee` unless one is
/// given. Agreement always writes both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OdrlDocument {
    #[serde(rename = "@context")]
    pub context: String,

    #[serde(rename = "@type")]
    pub kind: String,

    #[serde(default)]
    pub uid: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Written unless empty and not required by the kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigner: Option<String>,

    /// Written unless empty and not required by the kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    #[serde(default)]
    pub target: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permission: Vec<RuleDocument>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prohibition: Vec<RuleDocument>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub obligation: Vec<RuleDocument>,
}

/// Canonical form of an ODRL rule. Its effect is the partition key it
/// appears under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDocument {
    #[serde(default)]
    pub action: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraint: Vec<ConstraintDocument>,
}

/// Canonical form of an ODRL constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintDocument {
    #[serde(default)]
    pub left_operand: String,

    #[serde(default)]
    pub operator: String,

    #[serde(default, deserialize_with = "scalar_string")]
    pub right_operand: String,
}

/// Canonical form of a generic policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    pub name: String,

    #[serde(default)]
    pub description: String,

    pub kind: String,

    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub priority: i32,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_resources: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_users: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<GenericRuleDocument>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<DateTime<Utc>>,

    #[serde(default)]
    pub notifications: Notifications,

    #[serde(default)]
    pub enforcement: String,
}

/// Canonical form of a generic rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericRuleDocument {
    #[serde(default, rename = "type")]
    pub rule_type: String,

    #[serde(default)]
    pub operator: String,

    #[serde(default, deserialize_with = "scalar_string")]
    pub value: String,

    #[serde(default)]
    pub description: String,
}

/// Accept any JSON scalar and keep its textual form. `null` reads as empty.
fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!(
            "expected a scalar value, found {}",
            other
        ))),
    }
}

impl PolicyDocument {
    /// Serialize to compact JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize using the configured layout.
    pub fn render(&self, pretty: bool) -> Result<String> {
        if pretty {
            self.to_json_pretty()
        } else {
            self.to_json()
        }
    }

    /// Parse a canonical document.
    ///
    /// # Errors
    ///
    /// `Error::Serialization` if the text is not JSON or matches neither
    /// document shape.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
