//! Policy models.
//!
//! This module defines the policy entity graph for both families and the
//! violation records produced by validation.

pub mod constraint;
pub mod generic;
pub mod odrl;
pub mod policy;
pub mod rule;
pub mod violation;

pub use constraint::{Constraint, ConstraintField};
pub use generic::{GenericField, GenericPolicy, Notifications};
pub use odrl::{OdrlField, OdrlPolicy};
pub use policy::Policy;
pub use rule::{GenericRule, GenericRuleField, OdrlRule, OdrlRuleField};
pub use violation::{Location, Violation, ViolationCode};
