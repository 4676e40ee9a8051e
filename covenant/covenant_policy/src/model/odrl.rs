//! ODRL policy model.
//!
//! An [`OdrlPolicy`] holds its rules in three partitions, one per legal
//! effect. Every operation takes `&self` and returns an updated copy, so a
//! caller can keep earlier snapshots around (for undo, or for comparing
//! against a saved version) without any aliasing.

use covenant_core::error::{PolicyError, Result};
use covenant_core::id::RuleId;

use super::constraint::{Constraint, ConstraintField};
use super::rule::{OdrlRule, OdrlRuleField};
use crate::vocab::{Action, OdrlKind, Partition};

/// An ODRL policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OdrlPolicy {
    pub(crate) uid: String,
    pub(crate) kind: OdrlKind,
    pub(crate) profile: Option<String>,
    pub(crate) assigner: String,
    pub(crate) assignee: String,
    pub(crate) target: String,
    pub(crate) permission: Vec<OdrlRule>,
    pub(crate) prohibition: Vec<OdrlRule>,
    pub(crate) obligation: Vec<OdrlRule>,
    next_rule_id: RuleId,
}

/// A top-level field of an ODRL policy, with its new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OdrlField {
    /// The policy identifier, usually an IRI.
    Uid(String),

    /// The policy subclass.
    Kind(OdrlKind),

    /// The ODRL profile the policy conforms to.
    Profile(Option<String>),

    /// The granting party.
    Assigner(String),

    /// The receiving party.
    Assignee(String),

    /// The governed asset.
    Target(String),
}

impl Default for OdrlPolicy {
    fn default() -> Self {
        Self::new(OdrlKind::default())
    }
}

impl OdrlPolicy {
    /// Create an empty policy of the given kind.
    pub fn new(kind: OdrlKind) -> Self {
        Self {
            uid: String::new(),
            kind,
            profile: None,
            assigner: String::new(),
            assignee: String::new(),
            target: String::new(),
            permission: Vec::new(),
            prohibition: Vec::new(),
            obligation: Vec::new(),
            next_rule_id: RuleId::new(1),
        }
    }

    /// The policy identifier; empty until entered or assigned by a store.
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// The policy subclass.
    pub fn kind(&self) -> OdrlKind {
        self.kind
    }

    /// The ODRL profile, if any.
    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    /// The granting party.
    pub fn assigner(&self) -> &str {
        &self.assigner
    }

    /// The receiving party.
    pub fn assignee(&self) -> &str {
        &self.assignee
    }

    /// The governed asset.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The rules of one partition, in authoring order.
    pub fn partition(&self, partition: Partition) -> &[OdrlRule] {
        match partition {
            Partition::Permission => &self.permission,
            Partition::Prohibition => &self.prohibition,
            Partition::Obligation => &self.obligation,
        }
    }

    /// All rules, permission first, then prohibition, then obligation.
    pub fn rules(&self) -> impl Iterator<Item = (Partition, &OdrlRule)> + '_ {
        Partition::ALL
            .iter()
            .flat_map(move |p| self.partition(*p).iter().map(move |rule| (*p, rule)))
    }

    /// Find a rule and the partition it lives in.
    pub fn rule(&self, rule_id: RuleId) -> Option<(Partition, &OdrlRule)> {
        self.rules().find(|(_, rule)| rule.id == rule_id)
    }

    /// Number of rules across all partitions.
    pub fn rule_count(&self) -> usize {
        self.permission.len() + self.prohibition.len() + self.obligation.len()
    }

    /// Return a copy with one top-level field replaced.
    ///
    /// No validation happens here; incomplete values are expected while a
    /// policy is being authored.
    pub fn with_field(&self, field: OdrlField) -> Self {
        let mut next = self.clone();
        match field {
            OdrlField::Uid(uid) => next.uid = uid,
            OdrlField::Kind(kind) => next.kind = kind,
            OdrlField::Profile(profile) => next.profile = profile,
            OdrlField::Assigner(assigner) => next.assigner = assigner,
            OdrlField::Assignee(assignee) => next.assignee = assignee,
            OdrlField::Target(target) => next.target = target,
        }
        next
    }

    /// Return a copy with a new, empty rule appended to `partition`.
    ///
    /// # Returns
    ///
    /// The updated policy and the ID of the new rule.
    pub fn add_rule(&self, partition: Partition) -> (Self, RuleId) {
        let mut next = self.clone();
        let id = next.push_rule(partition, OdrlRule::new(RuleId::new(0)));
        (next, id)
    }

    /// Return a copy with one field of a rule replaced.
    ///
    /// # Errors
    ///
    /// `PolicyError::RuleNotFound` if no rule has the given ID.
    pub fn update_rule(&self, rule_id: RuleId, field: OdrlRuleField) -> Result<Self> {
        let mut next = self.clone();
        next.rule_mut(rule_id)?.apply(field);
        Ok(next)
    }

    /// Return a copy without the given rule.
    ///
    /// # Errors
    ///
    /// `PolicyError::RuleNotFound` if no rule has the given ID.
    pub fn remove_rule(&self, rule_id: RuleId) -> Result<Self> {
        let mut next = self.clone();
        for partition in Partition::ALL {
            let rules = next.partition_mut(*partition);
            if let Some(position) = rules.iter().position(|rule| rule.id == rule_id) {
                rules.remove(position);
                return Ok(next);
            }
        }
        Err(PolicyError::RuleNotFound(rule_id).into())
    }

    /// Return a copy with an empty constraint appended to a rule.
    ///
    /// # Returns
    ///
    /// The updated policy and the index of the new constraint.
    ///
    /// # Errors
    ///
    /// `PolicyError::RuleNotFound` if no rule has the given ID.
    pub fn add_constraint(&self, rule_id: RuleId) -> Result<(Self, usize)> {
        let mut next = self.clone();
        let constraints = &mut next.rule_mut(rule_id)?.constraints;
        constraints.push(Constraint::default());
        let index = constraints.len() - 1;
        Ok((next, index))
    }

    /// Return a copy with one field of a constraint replaced.
    ///
    /// # Errors
    ///
    /// `PolicyError::RuleNotFound` or `PolicyError::ConstraintNotFound`
    /// if the address does not resolve.
    pub fn update_constraint(
        &self,
        rule_id: RuleId,
        index: usize,
        field: ConstraintField,
    ) -> Result<Self> {
        let mut next = self.clone();
        let constraint = next
            .rule_mut(rule_id)?
            .constraints
            .get_mut(index)
            .ok_or(PolicyError::ConstraintNotFound {
                rule: rule_id,
                index,
            })?;
        constraint.apply(field);
        Ok(next)
    }

    /// Return a copy without the addressed constraint.
    ///
    /// Later constraints of the same rule shift down by one.
    ///
    /// # Errors
    ///
    /// `PolicyError::RuleNotFound` or `PolicyError::ConstraintNotFound`
    /// if the address does not resolve.
    pub fn remove_constraint(&self, rule_id: RuleId, index: usize) -> Result<Self> {
        let mut next = self.clone();
        let constraints = &mut next.rule_mut(rule_id)?.constraints;
        if index >= constraints.len() {
            return Err(PolicyError::ConstraintNotFound {
                rule: rule_id,
                index,
            }
            .into());
        }
        constraints.remove(index);
        Ok(next)
    }

    /// Shorthand for adding a rule and setting its action in one step.
    pub fn with_rule(&self, partition: Partition, action: Action) -> (Self, RuleId) {
        let mut next = self.clone();
        let mut rule = OdrlRule::new(RuleId::new(0));
        rule.action = Some(action);
        let id = next.push_rule(partition, rule);
        (next, id)
    }

    /// Append `rule` under a freshly allocated ID.
    pub(crate) fn push_rule(&mut self, partition: Partition, mut rule: OdrlRule) -> RuleId {
        let id = self.next_rule_id;
        self.next_rule_id = id.next();
        rule.id = id;
        self.partition_mut(partition).push(rule);
        id
    }

    fn partition_mut(&mut self, partition: Partition) -> &mut Vec<OdrlRule> {
        match partition {
            Partition::Permission => &mut self.permission,
            Partition::Prohibition => &mut self.prohibition,
            Partition::Obligation => &mut self.obligation,
        }
    }

    fn rule_mut(&mut self, rule_id: RuleId) -> std::result::Result<&mut OdrlRule, PolicyError> {
        self.permission
            .iter_mut()
            .chain(self.prohibition.iter_mut())
            .chain(self.obligation.iter_mut())
            .find(|rule| rule.id == rule_id)
            .ok_or(PolicyError::RuleNotFound(rule_id))
    }
}
