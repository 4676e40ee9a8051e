//! Policy constraint model.
//!
//! This module defines ODRL constraints: `(leftOperand, operator,
//! rightOperand)` triples that narrow when a rule applies.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::vocab::{ConstraintOperator, LeftOperand};

/// An ODRL constraint.
///
/// Every field starts out empty; the validator reports each missing field
/// separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    /// The attribute being compared.
    pub left_operand: Option<LeftOperand>,

    /// The comparison relation.
    pub operator: Option<ConstraintOperator>,

    /// The value compared against, kept in its textual form.
    pub right_operand: String,
}

impl Constraint {
    /// Create a fully populated constraint.
    pub fn new(
        left_operand: LeftOperand,
        operator: ConstraintOperator,
        right_operand: impl Into<String>,
    ) -> Self {
        Self {
            left_operand: Some(left_operand),
            operator: Some(operator),
            right_operand: right_operand.into(),
        }
    }

    pub(crate) fn apply(&mut self, field: ConstraintField) {
        match field {
            ConstraintField::LeftOperand(value) => self.left_operand = value,
            ConstraintField::Operator(value) => self.operator = value,
            ConstraintField::RightOperand(value) => self.right_operand = value,
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let left = self.left_operand.map_or("?", |l| l.as_str());
        let operator = self.operator.map_or("?", |o| o.as_str());
        write!(f, "{} {} '{}'", left, operator, self.right_operand)
    }
}

/// A single assignable field of a constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintField {
    /// Set or clear the left operand.
    LeftOperand(Option<LeftOperand>),

    /// Set or clear the operator.
    Operator(Option<ConstraintOperator>),

    /// Set the right operand.
    RightOperand(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_field() {
        let mut constraint = Constraint::default();
        constraint.apply(ConstraintField::LeftOperand(Some(LeftOperand::Purpose)));
        constraint.apply(ConstraintField::Operator(Some(ConstraintOperator::IsA)));
        constraint.apply(ConstraintField::RightOperand("research".to_string()));
        assert_eq!(
            constraint,
            Constraint::new(LeftOperand::Purpose, ConstraintOperator::IsA, "research")
        );

        constraint.apply(ConstraintField::Operator(None));
        assert_eq!(constraint.operator, None);
        assert_eq!(constraint.left_operand, Some(LeftOperand::Purpose));
    }

    #[test]
    fn test_constraint_display() {
        let constraint = Constraint::new(LeftOperand::DateTime, ConstraintOperator::Lt, "2030-01-01");
        assert_eq!(constraint.to_string(), "dateTime lt '2030-01-01'");
        assert_eq!(Constraint::default().to_string(), "? ? ''");
    }
}
