//! Policy rule model.
//!
//! This module defines the rule types of both policy families. Rules are
//! owned by their parent policy and addressed by a [`RuleId`] that is only
//! unique within that policy.

use covenant_core::id::RuleId;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::constraint::Constraint;
use crate::vocab::{Action, ComparisonOperator, RuleType};

/// An ODRL rule.
///
/// Its legal effect is the partition of the parent policy it lives in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OdrlRule {
    /// The ID of this rule within its policy.
    pub id: RuleId,

    /// The action the rule is about. Required, no default.
    pub action: Option<Action>,

    /// Narrows the policy target for this rule only.
    pub target: Option<String>,

    /// Constraints, in authoring order.
    pub constraints: Vec<Constraint>,
}

impl OdrlRule {
    /// Create an empty rule.
    pub fn new(id: RuleId) -> Self {
        Self {
            id,
            action: None,
            target: None,
            constraints: Vec::new(),
        }
    }

    pub(crate) fn apply(&mut self, field: OdrlRuleField) {
        match field {
            OdrlRuleField::Action(action) => self.action = action,
            OdrlRuleField::Target(target) => self.target = target,
        }
    }
}

impl fmt::Display for OdrlRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.action.map_or("?", |a| a.as_str()))?;

        if let Some(target) = &self.target {
            write!(f, " on '{}'", target)?;
        }

        if !self.constraints.is_empty() {
            write!(f, " where [")?;
            for (i, constraint) in self.constraints.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", constraint)?;
            }
            write!(f, "]")?;
        }

        Ok(())
    }
}

/// A single assignable field of an ODRL rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OdrlRuleField {
    /// Set or clear the action.
    Action(Option<Action>),

    /// Set or clear the target override.
    Target(Option<String>),
}

/// A generic-family rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericRule {
    /// The ID of this rule within its policy.
    pub id: RuleId,

    /// What the rule restricts.
    pub rule_type: Option<RuleType>,

    /// How `value` is compared.
    pub operator: Option<ComparisonOperator>,

    /// The scalar compared against, kept in its textual form.
    pub value: String,

    /// Free-text explanation shown to authors.
    pub description: String,
}

impl GenericRule {
    /// Create an empty rule.
    pub fn new(id: RuleId) -> Self {
        Self {
            id,
            rule_type: None,
            operator: None,
            value: String::new(),
            description: String::new(),
        }
    }

    pub(crate) fn apply(&mut self, field: GenericRuleField) {
        match field {
            GenericRuleField::Type(rule_type) => self.rule_type = rule_type,
            GenericRuleField::Operator(operator) => self.operator = operator,
            GenericRuleField::Value(value) => self.value = value,
            GenericRuleField::Description(description) => self.description = description,
        }
    }
}

/// A single assignable field of a generic rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenericRuleField {
    /// Set or clear the rule type.
    Type(Option<RuleType>),

    /// Set or clear the comparison operator.
    Operator(Option<ComparisonOperator>),

    /// Set the value.
    Value(String),

    /// Set the description.
    Description(String),
}
