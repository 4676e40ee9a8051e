//! Structural policy validation.
//!
//! The validator walks a policy in a fixed order and collects every unmet
//! requirement. It never stops at the first problem and never mutates the
//! policy, so calling it repeatedly on the same value yields the same list.
//!
//! ODRL order: uid, parties (by kind), target, rule presence, every rule's
//! action in partition order, then every constraint in the same rule order.
//!
//! Generic order: name, description, target resources, target users,
//! validity window, then each rule's description, value, type, operator.

use covenant_core::error::{PolicyError, Result};
use log::trace;

use crate::model::{GenericPolicy, OdrlPolicy, Policy, Violation, ViolationCode};
use crate::vocab::Partition;

/// Validate a policy.
///
/// # Returns
///
/// The violations in traversal order. An empty list means the policy is
/// structurally valid.
pub fn validate(policy: &Policy) -> Vec<Violation> {
    let mut violations = Vec::new();

    match policy {
        Policy::Odrl(policy) => validate_odrl(policy, &mut violations),
        Policy::Generic(policy) => validate_generic(policy, &mut violations),
    }

    trace!(
        "Validated {} policy: {} violation(s)",
        policy.family(),
        violations.len()
    );

    violations
}

/// Validate a policy and turn violations into an error.
///
/// # Errors
///
/// `PolicyError::Invalid` carrying the rendered violations.
pub fn ensure_valid(policy: &Policy) -> Result<()> {
    let violations = validate(policy);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(PolicyError::Invalid(violations.iter().map(ToString::to_string).collect()).into())
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn validate_odrl(policy: &OdrlPolicy, out: &mut Vec<Violation>) {
    if is_blank(policy.uid()) {
        out.push(Violation::policy(ViolationCode::MissingUid, "uid"));
    }

    if policy.kind().requires_assigner() && is_blank(policy.assigner()) {
        out.push(Violation::policy(ViolationCode::MissingAssigner, "assigner"));
    }

    if policy.kind().requires_assignee() && is_blank(policy.assignee()) {
        out.push(Violation::policy(ViolationCode::MissingAssignee, "assignee"));
    }

    if is_blank(policy.target()) {
        out.push(Violation::policy(ViolationCode::MissingTarget, "target"));
    }

    if policy.rule_count() == 0 {
        out.push(Violation::policy(ViolationCode::NoRules, "rules"));
        return;
    }

    for partition in Partition::ALL {
        for (rule_index, rule) in policy.partition(*partition).iter().enumerate() {
            if rule.action.is_none() {
                out.push(Violation::rule(
                    ViolationCode::MissingAction,
                    Some(*partition),
                    rule_index,
                    "action",
                ));
            }
        }
    }

    // Constraints are reported only once every action has been checked.
    for partition in Partition::ALL {
        for (rule_index, rule) in policy.partition(*partition).iter().enumerate() {
            for (index, constraint) in rule.constraints.iter().enumerate() {
                let mut report = |code, field| {
                    out.push(Violation::constraint(
                        code, *partition, rule_index, index, field,
                    ));
                };

                if constraint.left_operand.is_none() {
                    report(ViolationCode::MissingLeftOperand, "leftOperand");
                }
                if constraint.operator.is_none() {
                    report(ViolationCode::MissingOperator, "operator");
                }
                if is_blank(&constraint.right_operand) {
                    report(ViolationCode::MissingRightOperand, "rightOperand");
                }
            }
        }
    }
}

fn validate_generic(policy: &GenericPolicy, out: &mut Vec<Violation>) {
    if is_blank(policy.name()) {
        out.push(Violation::policy(ViolationCode::MissingName, "name"));
    }

    if is_blank(policy.description()) {
        out.push(Violation::policy(ViolationCode::MissingDescription, "description"));
    }

    // A set holding only blank entries is as good as empty.
    if policy.target_resources().iter().all(|r| is_blank(r)) {
        out.push(Violation::policy(
            ViolationCode::MissingTargetResources,
            "targetResources",
        ));
    }

    if policy.target_users().iter().all(|u| is_blank(u)) {
        out.push(Violation::policy(
            ViolationCode::MissingTargetUsers,
            "targetUsers",
        ));
    }

    if let (Some(from), Some(to)) = (policy.valid_from(), policy.valid_to()) {
        if from >= to {
            out.push(Violation::policy(
                ViolationCode::InvalidValidityWindow,
                "validTo",
            ));
        }
    }

    for (index, rule) in policy.rules().iter().enumerate() {
        let mut report = |code, field| out.push(Violation::rule(code, None, index, field));

        if is_blank(&rule.description) {
            report(ViolationCode::MissingRuleDescription, "description");
        }
        if is_blank(&rule.value) {
            report(ViolationCode::MissingRuleValue, "value");
        }
        if rule.rule_type.is_none() {
            report(ViolationCode::MissingRuleType, "type");
        }
        if rule.operator.is_none() {
            report(ViolationCode::MissingRuleOperator, "operator");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        ConstraintField, GenericField, GenericRuleField, Location, OdrlField, OdrlRuleField,
    };
    use crate::vocab::{
        Action, ComparisonOperator, ConstraintOperator, LeftOperand, OdrlKind, PolicyFamily,
        RuleType,
    };
    use chrono::{TimeZone, Utc};
    use covenant_core::error::Error;

    fn codes(violations: &[Violation]) -> Vec<ViolationCode> {
        violations.iter().map(|v| v.code).collect()
    }

    fn agreement(assigner: &str, assignee: &str) -> OdrlPolicy {
        let policy = OdrlPolicy::new(OdrlKind::Agreement)
            .with_field(OdrlField::Uid("http://example.com/policy:1".into()))
            .with_field(OdrlField::Assigner(assigner.into()))
            .with_field(OdrlField::Assignee(assignee.into()))
            .with_field(OdrlField::Target("t".into()));
        policy.with_rule(Partition::Permission, Action::Use).0
    }

    fn complete_generic() -> GenericPolicy {
        let (policy, id) = GenericPolicy::default()
            .with_field(GenericField::Name("Read limit".into()))
            .with_field(GenericField::Description("Caps reads per user".into()))
            .with_target_resource("dataset:sales")
            .with_target_user("role:analyst")
            .add_rule();
        policy
            .update_rule(id, GenericRuleField::Type(Some(RuleType::UsageCount)))
            .and_then(|p| p.update_rule(id, GenericRuleField::Operator(Some(ComparisonOperator::LessThan))))
            .and_then(|p| p.update_rule(id, GenericRuleField::Value("100".into())))
            .and_then(|p| p.update_rule(id, GenericRuleField::Description("At most 100 reads".into())))
            .unwrap()
    }

    #[test]
    fn test_agreement_requires_assigner() {
        let policy = Policy::from(agreement("", "x"));
        let violations = validate(&policy);
        assert_eq!(codes(&violations), vec![ViolationCode::MissingAssigner]);
        assert_eq!(violations[0].field, "assigner");

        let policy = Policy::from(agreement("a", "x"));
        assert!(validate(&policy).is_empty());
    }

    #[test]
    fn test_offer_ignores_assignee() {
        let policy = OdrlPolicy::new(OdrlKind::Offer)
            .with_field(OdrlField::Uid("urn:offer:1".into()))
            .with_field(OdrlField::Target("t".into()))
            .with_rule(Partition::Permission, Action::Play)
            .0;

        let violations = validate(&Policy::from(policy.clone()));
        assert_eq!(codes(&violations), vec![ViolationCode::MissingAssigner]);

        let with_assigner = policy.with_field(OdrlField::Assigner("urn:party:a".into()));
        assert!(validate(&Policy::from(with_assigner)).is_empty());
    }

    #[test]
    fn test_set_requires_no_parties() {
        let policy = OdrlPolicy::new(OdrlKind::Set)
            .with_field(OdrlField::Uid("urn:set:1".into()))
            .with_field(OdrlField::Target("t".into()))
            .with_rule(Partition::Prohibition, Action::Sell)
            .0;
        assert!(validate(&Policy::from(policy)).is_empty());
    }

    #[test]
    fn test_fresh_policy_reports_every_missing_field() {
        let policy = Policy::create(PolicyFamily::Odrl);
        let violations = validate(&policy);
        assert_eq!(
            codes(&violations),
            vec![
                ViolationCode::MissingUid,
                ViolationCode::MissingAssigner,
                ViolationCode::MissingAssignee,
                ViolationCode::MissingTarget,
                ViolationCode::NoRules,
            ]
        );
        assert!(violations.iter().all(|v| v.location == Location::Policy));
    }

    #[test]
    fn test_blank_strings_count_as_missing() {
        let policy = agreement("   ", "x").with_field(OdrlField::Target("\t".into()));
        assert_eq!(
            codes(&validate(&Policy::from(policy))),
            vec![ViolationCode::MissingAssigner, ViolationCode::MissingTarget]
        );
    }

    #[test]
    fn test_each_missing_constraint_field_is_separate() {
        let policy = agreement("a", "x");
        let (_, rule) = policy.rules().next().unwrap();
        let id = rule.id;
        let (policy, index) = policy.add_constraint(id).unwrap();
        let policy = policy
            .update_constraint(id, index, ConstraintField::Operator(Some(ConstraintOperator::Eq)))
            .unwrap();

        let violations = validate(&Policy::from(policy));
        assert_eq!(
            codes(&violations),
            vec![
                ViolationCode::MissingLeftOperand,
                ViolationCode::MissingRightOperand,
            ]
        );
        assert_eq!(
            violations[0].location,
            Location::Constraint {
                partition: Partition::Permission,
                rule: 0,
                index: 0,
            }
        );
        assert_eq!(violations[1].field, "rightOperand");
    }

    #[test]
    fn test_actions_are_checked_before_constraints() {
        let policy = agreement("a", "x");
        let (policy, obligation) = policy.add_rule(Partition::Obligation);
        let (policy, prohibition) = policy.add_rule(Partition::Prohibition);
        let (policy, _) = policy.add_constraint(prohibition).unwrap();
        let policy = policy
            .update_constraint(
                prohibition,
                0,
                ConstraintField::LeftOperand(Some(LeftOperand::Spatial)),
            )
            .unwrap();
        let policy = policy
            .update_rule(obligation, OdrlRuleField::Target(Some("t2".into())))
            .unwrap();

        let paths: Vec<String> = validate(&Policy::from(policy))
            .iter()
            .map(Violation::path)
            .collect();
        assert_eq!(
            paths,
            vec![
                "prohibition[0].action",
                "obligation[0].action",
                "prohibition[0].constraint[0].operator",
                "prohibition[0].constraint[0].rightOperand",
            ]
        );
    }

    #[test]
    fn test_validation_is_idempotent() {
        let policy = Policy::create(PolicyFamily::Odrl);
        assert_eq!(validate(&policy), validate(&policy));

        let policy = Policy::create(PolicyFamily::Generic);
        assert_eq!(validate(&policy), validate(&policy));
    }

    #[test]
    fn test_complete_generic_policy_is_valid() {
        assert!(validate(&Policy::from(complete_generic())).is_empty());
    }

    #[test]
    fn test_fresh_generic_policy() {
        let (policy, _) = GenericPolicy::default().add_rule();
        let violations = validate(&Policy::from(policy));
        let paths: Vec<String> = violations.iter().map(Violation::path).collect();
        assert_eq!(
            paths,
            vec![
                "name",
                "description",
                "targetResources",
                "targetUsers",
                "rules[0].description",
                "rules[0].value",
                "rules[0].type",
                "rules[0].operator",
            ]
        );
    }

    #[test]
    fn test_validity_window_must_be_ordered() {
        let early = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let base = complete_generic();

        let reversed = base
            .with_field(GenericField::ValidFrom(Some(late)))
            .with_field(GenericField::ValidTo(Some(early)));
        let violations = validate(&Policy::from(reversed));
        assert_eq!(codes(&violations), vec![ViolationCode::InvalidValidityWindow]);
        assert_eq!(violations[0].field, "validTo");

        let equal = base
            .with_field(GenericField::ValidFrom(Some(early)))
            .with_field(GenericField::ValidTo(Some(early)));
        assert_eq!(
            codes(&validate(&Policy::from(equal))),
            vec![ViolationCode::InvalidValidityWindow]
        );

        let ordered = base
            .with_field(GenericField::ValidFrom(Some(early)))
            .with_field(GenericField::ValidTo(Some(late)));
        assert!(validate(&Policy::from(ordered)).is_empty());

        let open_ended = base.with_field(GenericField::ValidTo(Some(early)));
        assert!(validate(&Policy::from(open_ended)).is_empty());
    }

    #[test]
    fn test_ensure_valid() {
        assert!(ensure_valid(&Policy::from(agreement("a", "x"))).is_ok());

        match ensure_valid(&Policy::from(agreement("", ""))) {
            Err(Error::Policy(PolicyError::Invalid(messages))) => {
                assert_eq!(
                    messages,
                    vec![
                        "assigner: assigner is required for this policy kind".to_string(),
                        "assignee: assignee is required for this policy kind".to_string(),
                    ]
                );
            }
            other => panic!("Unexpected result: {:?}", other),
        }
    }
}
