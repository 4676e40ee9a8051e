//! Integration tests for the authoring workflow.
//!
//! These tests drive a policy from an empty draft through validation,
//! saving, export and read-back, the way an authoring tool would.

use chrono::{TimeZone, Utc};
use covenant_core::error::{Error, PolicyError};
use covenant_core::utils::{CovenantConfig, FixedClock};
use covenant_policy::canonical::{canonicalize_with, PolicyDocument};
use covenant_policy::model::{
    ConstraintField, GenericField, GenericRuleField, OdrlField, OdrlPolicy, OdrlRuleField,
};
use covenant_policy::store::{InMemoryPolicyStore, PolicyStore};
use covenant_policy::vocab::{
    Action, ComparisonOperator, ConstraintOperator, LeftOperand, OdrlKind, Partition,
    PolicyFamily, RuleType,
};
use covenant_policy::{ensure_valid, validate, Policy, ViolationCode};

#[test]
fn test_odrl_draft_to_export() {
    let config = CovenantConfig::default();
    let store = InMemoryPolicyStore::from_config(&config.store);

    // Start from an empty draft
    let draft = OdrlPolicy::new(OdrlKind::Agreement);
    assert_eq!(validate(&Policy::from(draft.clone())).len(), 5);

    // Fill in the parties and the asset
    let draft = draft
        .with_field(OdrlField::Assigner("http://example.com/party:org".into()))
        .with_field(OdrlField::Assignee("http://example.com/party:person".into()))
        .with_field(OdrlField::Target("http://example.com/asset:9898".into()));

    // Add a constrained permission
    let (draft, rule) = draft.add_rule(Partition::Permission);
    let (draft, index) = draft.add_constraint(rule).unwrap();
    let draft = draft
        .update_constraint(rule, index, ConstraintField::Operator(Some(ConstraintOperator::Eq)))
        .unwrap();

    // The constraint is only half done
    let codes: Vec<_> = validate(&Policy::from(draft.clone()))
        .into_iter()
        .map(|v| v.code)
        .collect();
    assert_eq!(
        codes,
        vec![
            ViolationCode::MissingUid,
            ViolationCode::MissingAction,
            ViolationCode::MissingLeftOperand,
            ViolationCode::MissingRightOperand,
        ]
    );

    // Finish it
    let draft = draft
        .with_field(OdrlField::Uid("http://example.com/policy:1010".into()))
        .update_rule(rule, OdrlRuleField::Action(Some(Action::Display)))
        .unwrap()
        .update_constraint(rule, index, ConstraintField::LeftOperand(Some(LeftOperand::Spatial)))
        .unwrap()
        .update_constraint(
            rule,
            index,
            ConstraintField::RightOperand("https://www.wikidata.org/wiki/Q183".into()),
        )
        .unwrap();
    let policy = Policy::from(draft);
    ensure_valid(&policy).unwrap();

    // Save, load and export
    let key = store.save(&policy).unwrap();
    let loaded = store.load(&key).unwrap();
    assert_eq!(loaded, policy);

    let json = canonicalize_with(&loaded, &config.canonical)
        .to_json()
        .unwrap();
    assert_eq!(
        json,
        concat!(
            r#"{"@context":"http://www.w3.org/ns/odrl.jsonld","@type":"Agreement","#,
            r#""uid":"http://example.com/policy:1010","#,
            r#""assigner":"http://example.com/party:org","#,
            r#""assignee":"http://example.com/party:person","#,
            r#""target":"http://example.com/asset:9898","#,
            r#""permission":[{"action":"display","constraint":[{"leftOperand":"spatial","#,
            r#""operator":"eq","rightOperand":"https://www.wikidata.org/wiki/Q183"}]}]}"#,
        )
    );

    // Reading the export back yields an equivalent policy
    let imported = PolicyDocument::from_json(&json)
        .unwrap()
        .into_policy()
        .unwrap();
    assert!(validate(&imported).is_empty());
    assert_eq!(
        canonicalize_with(&imported, &config.canonical).to_json().unwrap(),
        json
    );
}

#[test]
fn test_generic_policy_saved_without_id() {
    let saved_at = Utc.with_ymd_and_hms(2025, 5, 4, 10, 30, 0).unwrap();
    let store = InMemoryPolicyStore::new().with_clock(FixedClock::new(saved_at));

    let Policy::Generic(draft) = Policy::create(PolicyFamily::Generic) else {
        panic!("Expected a generic policy");
    };
    let (draft, rule) = draft
        .with_field(GenericField::Name("Analyst reads".into()))
        .with_field(GenericField::Description("Analysts may read the sales data".into()))
        .with_target_resource("dataset:sales")
        .with_target_user("role:analyst")
        .add_rule();
    let draft = draft
        .update_rule(rule, GenericRuleField::Type(Some(RuleType::UserRole)))
        .unwrap()
        .update_rule(rule, GenericRuleField::Operator(Some(ComparisonOperator::Equals)))
        .unwrap()
        .update_rule(rule, GenericRuleField::Value("analyst".into()))
        .unwrap()
        .update_rule(rule, GenericRuleField::Description("Role must match".into()))
        .unwrap();
    let policy = Policy::from(draft.clone());
    assert!(validate(&policy).is_empty());

    let key = store.save(&policy).unwrap();
    let entries = store.list(None).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].key, key);
    assert_eq!(entries[0].saved_at, saved_at);

    // Ignoring the assigned id, the snapshot equals the draft
    let loaded = store.load(&key).unwrap();
    let id = loaded.as_generic().unwrap().id();
    assert_eq!(id.map(|id| id.to_string()), Some(key.to_string()));
    assert_eq!(
        loaded,
        Policy::from(draft.with_field(GenericField::Id(id)))
    );
}

#[test]
fn test_invalid_policy_is_refused_before_save() {
    let policy = Policy::create(PolicyFamily::Odrl);

    match ensure_valid(&policy) {
        Err(Error::Policy(PolicyError::Invalid(messages))) => {
            assert_eq!(messages.len(), 5);
            assert_eq!(messages[0], "uid: policy uid is required");
        }
        other => panic!("Unexpected result: {:?}", other),
    }
}
