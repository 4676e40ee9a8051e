//! Validation result model.
//!
//! A [`Violation`] is one unmet structural requirement. Violations are
//! plain values: the validator collects them, and callers decide whether
//! a non-empty list blocks a save or an export.

use std::fmt;

use crate::vocab::Partition;

/// What requirement was not met.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationCode {
    MissingUid,
    MissingAssigner,
    MissingAssignee,
    MissingTarget,
    NoRules,
    MissingAction,
    MissingLeftOperand,
    MissingOperator,
    MissingRightOperand,
    MissingName,
    MissingDescription,
    MissingTargetResources,
    MissingTargetUsers,
    InvalidValidityWindow,
    MissingRuleDescription,
    MissingRuleValue,
    MissingRuleType,
    MissingRuleOperator,
}

impl ViolationCode {
    /// Message shown to authors.
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingUid => "policy uid is required",
            Self::MissingAssigner => "assigner is required for this policy kind",
            Self::MissingAssignee => "assignee is required for this policy kind",
            Self::MissingTarget => "target is required",
            Self::NoRules => "at least one permission, prohibition or obligation is required",
            Self::MissingAction => "action is required",
            Self::MissingLeftOperand => "left operand is required",
            Self::MissingOperator => "operator is required",
            Self::MissingRightOperand => "right operand is required",
            Self::MissingName => "name is required",
            Self::MissingDescription => "description is required",
            Self::MissingTargetResources => "at least one target resource is required",
            Self::MissingTargetUsers => "at least one target user or role is required",
            Self::InvalidValidityWindow => "end date must be after start date",
            Self::MissingRuleDescription => "rule description is required",
            Self::MissingRuleValue => "rule value is required",
            Self::MissingRuleType => "rule type is required",
            Self::MissingRuleOperator => "rule operator is required",
        }
    }
}

/// Where in the policy a violation was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    /// A top-level field of the policy.
    Policy,

    /// A rule, by partition (ODRL) and index within it.
    Rule {
        /// `None` for the flat rule list of generic policies.
        partition: Option<Partition>,
        /// Position within the partition or list.
        index: usize,
    },

    /// A constraint of an ODRL rule.
    Constraint {
        /// Partition of the owning rule.
        partition: Partition,
        /// Position of the owning rule within its partition.
        rule: usize,
        /// Position of the constraint within the rule.
        index: usize,
    },
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Policy => Ok(()),
            Self::Rule {
                partition: Some(partition),
                index,
            } => write!(f, "{}[{}]", partition, index),
            Self::Rule {
                partition: None,
                index,
            } => write!(f, "rules[{}]", index),
            Self::Constraint {
                partition,
                rule,
                index,
            } => write!(f, "{}[{}].constraint[{}]", partition, rule, index),
        }
    }
}

/// A single structural violation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Violation {
    /// The unmet requirement.
    pub code: ViolationCode,

    /// Where it was found.
    pub location: Location,

    /// Wire name of the offending field, e.g. `rightOperand`.
    pub field: &'static str,
}

impl Violation {
    /// A violation on a top-level field.
    pub fn policy(code: ViolationCode, field: &'static str) -> Self {
        Self {
            code,
            location: Location::Policy,
            field,
        }
    }

    /// A violation on a rule field.
    pub fn rule(
        code: ViolationCode,
        partition: Option<Partition>,
        index: usize,
        field: &'static str,
    ) -> Self {
        Self {
            code,
            location: Location::Rule { partition, index },
            field,
        }
    }

    /// A violation on a constraint field.
    pub fn constraint(
        code: ViolationCode,
        partition: Partition,
        rule: usize,
        index: usize,
        field: &'static str,
    ) -> Self {
        Self {
            code,
            location: Location::Constraint {
                partition,
                rule,
                index,
            },
            field,
        }
    }

    /// Dotted path of the offending field, e.g. `permission[0].action`.
    pub fn path(&self) -> String {
        match self.location {
            Location::Policy => self.field.to_string(),
            _ => format!("{}.{}", self.location, self.field),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path(), self.code.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_display() {
        let v = Violation::policy(ViolationCode::MissingUid, "uid");
        assert_eq!(v.to_string(), "uid: policy uid is required");

        let v = Violation::rule(
            ViolationCode::MissingAction,
            Some(Partition::Prohibition),
            2,
            "action",
        );
        assert_eq!(v.to_string(), "prohibition[2].action: action is required");

        let v = Violation::rule(ViolationCode::MissingRuleValue, None, 0, "value");
        assert_eq!(v.path(), "rules[0].value");

        let v = Violation::constraint(
            ViolationCode::MissingRightOperand,
            Partition::Permission,
            0,
            1,
            "rightOperand",
        );
        assert_eq!(
            v.to_string(),
            "permission[0].constraint[1].rightOperand: right operand is required"
        );
    }
}
