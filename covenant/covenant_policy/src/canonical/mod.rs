//! Canonical export.
//!
//! This module turns a policy into its canonical document: a structural
//! copy with empty collections removed at every level. Canonicalization
//! never validates, so an incomplete draft can still be previewed.
//!
//! Documents can be read back with [`PolicyDocument::into_policy`], which
//! treats an absent collection the same as an empty one.

mod document;
mod import;

pub use document::{
    ConstraintDocument, GenericDocument, GenericRuleDocument, OdrlDocument, PolicyDocument,
    RuleDocument,
};

use covenant_core::utils::CanonicalConfig;
use log::trace;

use crate::model::{Constraint, GenericPolicy, GenericRule, OdrlPolicy, OdrlRule, Policy};
use crate::vocab::Partition;

/// Canonicalize a policy with the default configuration.
pub fn canonicalize(policy: &Policy) -> PolicyDocument {
    canonicalize_with(policy, &CanonicalConfig::default())
}

/// Canonicalize a policy.
///
/// # Arguments
///
/// * `policy` - The policy to export. It does not need to be valid.
/// * `config` - Supplies the ODRL `@context` and the fallback profile.
///
/// # Returns
///
/// The canonical document.
pub fn canonicalize_with(policy: &Policy, config: &CanonicalConfig) -> PolicyDocument {
    trace!("Canonicalizing {}", policy);

    match policy {
        Policy::Odrl(policy) => PolicyDocument::Odrl(odrl_document(policy, config)),
        Policy::Generic(policy) => PolicyDocument::Generic(generic_document(policy)),
    }
}

fn odrl_document(policy: &OdrlPolicy, config: &CanonicalConfig) -> OdrlDocument {
    let kind = policy.kind();
    let party = |value: &str, required: bool| {
        if required || !value.is_empty() {
            Some(value.to_string())
        } else {
            None
        }
    };

    let rules = |partition: Partition| -> Vec<RuleDocument> {
        policy
            .partition(partition)
            .iter()
            .map(rule_document)
            .collect()
    };

    OdrlDocument {
        context: config.odrl_context.clone(),
        kind: kind.as_str().to_string(),
        uid: policy.uid().to_string(),
        profile: policy
            .profile()
            .map(str::to_string)
            .or_else(|| config.default_profile.clone()),
        assigner: party(policy.assigner(), kind.requires_assigner()),
        assignee: party(policy.assignee(), kind.requires_assignee()),
        target: policy.target().to_string(),
        permission: rules(Partition::Permission),
        prohibition: rules(Partition::Prohibition),
        obligation: rules(Partition::Obligation),
    }
}

fn rule_document(rule: &OdrlRule) -> RuleDocument {
    RuleDocument {
        action: rule.action.map(|a| a.as_str()).unwrap_or_default().to_string(),
        target: rule.target.clone(),
        constraint: rule.constraints.iter().map(constraint_document).collect(),
    }
}

fn constraint_document(constraint: &Constraint) -> ConstraintDocument {
    ConstraintDocument {
        left_operand: constraint
            .left_operand
            .map(|l| l.as_str())
            .unwrap_or_default()
            .to_string(),
        operator: constraint
            .operator
            .map(|o| o.as_str())
            .unwrap_or_default()
            .to_string(),
        right_operand: constraint.right_operand.clone(),
    }
}

fn generic_document(policy: &GenericPolicy) -> GenericDocument {
    GenericDocument {
        id: policy.id(),
        name: policy.name().to_string(),
        description: policy.description().to_string(),
        kind: policy.kind().as_str().to_string(),
        status: policy.status().as_str().to_string(),
        priority: policy.priority(),
        target_resources: policy.target_resources().iter().cloned().collect(),
        target_users: policy.target_users().iter().cloned().collect(),
        rules: policy.rules().iter().map(generic_rule_document).collect(),
        valid_from: policy.valid_from(),
        valid_to: policy.valid_to(),
        notifications: policy.notifications().clone(),
        enforcement: policy.enforcement().as_str().to_string(),
    }
}

fn generic_rule_document(rule: &GenericRule) -> GenericRuleDocument {
    GenericRuleDocument {
        rule_type: rule.rule_type.map(|t| t.as_str()).unwrap_or_default().to_string(),
        operator: rule.operator.map(|o| o.as_str()).unwrap_or_default().to_string(),
        value: rule.value.clone(),
        description: rule.description.clone(),
    }
}
