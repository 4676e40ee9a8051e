//! Reading canonical documents back into policies.

use covenant_core::error::{PolicyError, Result};
use covenant_core::id::RuleId;
use log::debug;
use std::str::FromStr;

use super::document::{
    ConstraintDocument, GenericDocument, GenericRuleDocument, OdrlDocument, PolicyDocument,
    RuleDocument,
};
use crate::model::{Constraint, GenericPolicy, GenericRule, OdrlPolicy, OdrlRule, Policy};
use crate::vocab::{GenericKind, OdrlKind, Partition};

/// Parse an optional vocabulary term. The empty string means "not set".
fn term<T>(value: &str) -> std::result::Result<Option<T>, PolicyError>
where
    T: FromStr<Err = PolicyError>,
{
    if value.is_empty() {
        Ok(None)
    } else {
        value.parse().map(Some)
    }
}

impl PolicyDocument {
    /// Import this document as a policy.
    ///
    /// Rules receive fresh IDs in document order. Absent collections read
    /// as empty, and empty vocabulary fields read as unset.
    ///
    /// # Errors
    ///
    /// `PolicyError::UnknownTerm` if a vocabulary field holds a term that
    /// is not part of its vocabulary.
    pub fn into_policy(self) -> Result<Policy> {
        let policy = match self {
            Self::Odrl(document) => Policy::Odrl(document.into_policy()?),
            Self::Generic(document) => Policy::Generic(document.into_policy()?),
        };

        debug!("Imported {}", policy);

        Ok(policy)
    }
}

impl OdrlDocument {
    /// Import this document as an ODRL policy.
    pub fn into_policy(self) -> Result<OdrlPolicy> {
        let kind: OdrlKind = self.kind.parse()?;

        let mut policy = OdrlPolicy::new(kind);
        policy.uid = self.uid;
        policy.profile = self.profile;
        policy.assigner = self.assigner.unwrap_or_default();
        policy.assignee = self.assignee.unwrap_or_default();
        policy.target = self.target;

        for (partition, rules) in [
            (Partition::Permission, self.permission),
            (Partition::Prohibition, self.prohibition),
            (Partition::Obligation, self.obligation),
        ] {
            for rule in rules {
                policy.push_rule(partition, import_rule(rule)?);
            }
        }

        Ok(policy)
    }
}

fn import_rule(document: RuleDocument) -> Result<OdrlRule> {
    let mut rule = OdrlRule::new(RuleId::new(0));
    rule.action = term(&document.action)?;
    rule.target = document.target;
    rule.constraints = document
        .constraint
        .into_iter()
        .map(import_constraint)
        .collect::<Result<_>>()?;
    Ok(rule)
}

fn import_constraint(document: ConstraintDocument) -> Result<Constraint> {
    Ok(Constraint {
        left_operand: term(&document.left_operand)?,
        operator: term(&document.operator)?,
        right_operand: document.right_operand,
    })
}

impl GenericDocument {
    /// Import this document as a generic policy.
    ///
    /// An empty `status` or `enforcement` reads as the default value.
    pub fn into_policy(self) -> Result<GenericPolicy> {
        let kind: GenericKind = self.kind.parse()?;

        let mut policy = GenericPolicy::new(kind);
        policy.id = self.id;
        policy.name = self.name;
        policy.description = self.description;
        policy.status = term(&self.status)?.unwrap_or_default();
        policy.priority = self.priority;
        policy.target_resources = self.target_resources.into_iter().collect();
        policy.target_users = self.target_users.into_iter().collect();
        policy.valid_from = self.valid_from;
        policy.valid_to = self.valid_to;
        policy.notifications = self.notifications;
        policy.enforcement = term(&self.enforcement)?.unwrap_or_default();

        for rule in self.rules {
            policy.push_rule(import_generic_rule(rule)?);
        }

        Ok(policy)
    }
}

fn import_generic_rule(document: GenericRuleDocument) -> Result<GenericRule> {
    let mut rule = GenericRule::new(RuleId::new(0));
    rule.rule_type = term(&document.rule_type)?;
    rule.operator = term(&document.operator)?;
    rule.value = document.value;
    rule.description = document.description;
    Ok(rule)
}
