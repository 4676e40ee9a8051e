//! Generic policy model.
//!
//! The generic family describes access, usage, retention and sharing
//! policies as a flat list of typed comparison rules applied to a set of
//! resources and a set of users or roles.

use chrono::{DateTime, Utc};
use covenant_core::error::{PolicyError, Result};
use covenant_core::id::RuleId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::rule::{GenericRule, GenericRuleField};
use crate::vocab::{EnforcementMode, GenericKind, PolicyStatus};

/// Who is told about what happens to a generic policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notifications {
    /// Notify when the policy is violated.
    #[serde(default)]
    pub on_violation: bool,

    /// Notify when the validity window closes.
    #[serde(default)]
    pub on_expiry: bool,

    /// Addresses to notify.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recipients: Vec<String>,
}

/// A generic-family policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericPolicy {
    pub(crate) id: Option<u64>,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) kind: GenericKind,
    pub(crate) status: PolicyStatus,
    pub(crate) priority: i32,
    pub(crate) target_resources: BTreeSet<String>,
    pub(crate) target_users: BTreeSet<String>,
    pub(crate) valid_from: Option<DateTime<Utc>>,
    pub(crate) valid_to: Option<DateTime<Utc>>,
    pub(crate) rules: Vec<GenericRule>,
    pub(crate) notifications: Notifications,
    pub(crate) enforcement: EnforcementMode,
    next_rule_id: RuleId,
}

/// A top-level field of a generic policy, with its new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenericField {
    /// Numeric surrogate identifier.
    Id(Option<u64>),
    /// Display name.
    Name(String),
    /// Free-text description.
    Description(String),
    /// Policy kind.
    Kind(GenericKind),
    /// Lifecycle status.
    Status(PolicyStatus),
    /// Relative priority; higher wins.
    Priority(i32),
    /// Governed resources.
    TargetResources(BTreeSet<String>),
    /// Governed users or roles.
    TargetUsers(BTreeSet<String>),
    /// Start of the validity window.
    ValidFrom(Option<DateTime<Utc>>),
    /// End of the validity window.
    ValidTo(Option<DateTime<Utc>>),
    /// Notification settings.
    Notifications(Notifications),
    /// Enforcement mode.
    Enforcement(EnforcementMode),
}

impl Default for GenericPolicy {
    fn default() -> Self {
        Self::new(GenericKind::default())
    }
}

impl GenericPolicy {
    /// Create an empty draft policy of the given kind.
    pub fn new(kind: GenericKind) -> Self {
        Self {
            id: None,
            name: String::new(),
            description: String::new(),
            kind,
            status: PolicyStatus::default(),
            priority: 0,
            target_resources: BTreeSet::new(),
            target_users: BTreeSet::new(),
            valid_from: None,
            valid_to: None,
            rules: Vec::new(),
            notifications: Notifications::default(),
            enforcement: EnforcementMode::default(),
            next_rule_id: RuleId::new(1),
        }
    }

    pub fn id(&self) -> Option<u64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> GenericKind {
        self.kind
    }

    pub fn status(&self) -> PolicyStatus {
        self.status
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn target_resources(&self) -> &BTreeSet<String> {
        &self.target_resources
    }

    pub fn target_users(&self) -> &BTreeSet<String> {
        &self.target_users
    }

    pub fn valid_from(&self) -> Option<DateTime<Utc>> {
        self.valid_from
    }

    pub fn valid_to(&self) -> Option<DateTime<Utc>> {
        self.valid_to
    }

    pub fn rules(&self) -> &[GenericRule] {
        &self.rules
    }

    pub fn rule(&self, rule_id: RuleId) -> Option<&GenericRule> {
        self.rules.iter().find(|rule| rule.id == rule_id)
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn enforcement(&self) -> EnforcementMode {
        self.enforcement
    }

    /// Return a copy with one top-level field replaced. Never validates.
    pub fn with_field(&self, field: GenericField) -> Self {
        let mut next = self.clone();
        match field {
            GenericField::Id(id) => next.id = id,
            GenericField::Name(name) => next.name = name,
            GenericField::Description(description) => next.description = description,
            GenericField::Kind(kind) => next.kind = kind,
            GenericField::Status(status) => next.status = status,
            GenericField::Priority(priority) => next.priority = priority,
            GenericField::TargetResources(resources) => next.target_resources = resources,
            GenericField::TargetUsers(users) => next.target_users = users,
            GenericField::ValidFrom(from) => next.valid_from = from,
            GenericField::ValidTo(to) => next.valid_to = to,
            GenericField::Notifications(notifications) => next.notifications = notifications,
            GenericField::Enforcement(mode) => next.enforcement = mode,
        }
        next
    }

    /// Return a copy with one more target resource.
    pub fn with_target_resource(&self, resource: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.target_resources.insert(resource.into());
        next
    }

    /// Return a copy with one more target user or role.
    pub fn with_target_user(&self, user: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.target_users.insert(user.into());
        next
    }

    /// Return a copy with a new, empty rule appended.
    ///
    /// # Returns
    ///
    /// The updated policy and the ID of the new rule.
    pub fn add_rule(&self) -> (Self, RuleId) {
        let mut next = self.clone();
        let id = next.push_rule(GenericRule::new(RuleId::new(0)));
        (next, id)
    }

    /// Return a copy with one field of a rule replaced.
    ///
    /// # Errors
    ///
    /// `PolicyError::RuleNotFound` if no rule has the given ID.
    pub fn update_rule(&self, rule_id: RuleId, field: GenericRuleField) -> Result<Self> {
        let mut next = self.clone();
        next.rules
            .iter_mut()
            .find(|rule| rule.id == rule_id)
            .ok_or(PolicyError::RuleNotFound(rule_id))?
            .apply(field);
        Ok(next)
    }

    /// Return a copy without the given rule.
    ///
    /// # Errors
    ///
    /// `PolicyError::RuleNotFound` if no rule has the given ID.
    pub fn remove_rule(&self, rule_id: RuleId) -> Result<Self> {
        let position = self
            .rules
            .iter()
            .position(|rule| rule.id == rule_id)
            .ok_or(PolicyError::RuleNotFound(rule_id))?;
        let mut next = self.clone();
        next.rules.remove(position);
        Ok(next)
    }

    /// Append `rule` under a freshly allocated ID.
    pub(crate) fn push_rule(&mut self, mut rule: GenericRule) -> RuleId {
        let id = self.next_rule_id;
        self.next_rule_id = id.next();
        rule.id = id;
        self.rules.push(rule);
        id
    }
}
