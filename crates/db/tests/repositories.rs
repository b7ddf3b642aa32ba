//! Integration tests for the rule, validator, and validator-rule
//! repositories.
//!
//! Exercises the repository layer against a real database:
//! - Create / find / list / update / delete for each table
//! - Cascade delete from rules and validators to their associations
//! - Unique constraint violations (validator name, order number)
//! - Foreign key violations

use assert_matches::assert_matches;
use rulegate_core::validation::ActiveStatus;
use rulegate_db::models::rule::{CreateRule, UpdateRule};
use rulegate_db::models::validator::{CreateValidator, UpdateValidator};
use rulegate_db::models::validator_rule::{CreateValidatorRule, UpdateValidatorRule};
use rulegate_db::repositories::{RuleRepo, ValidatorRepo, ValidatorRuleRepo};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_rule(attribute: &str, kind: &str, parameters: serde_json::Value) -> CreateRule {
    CreateRule {
        attribute: attribute.to_string(),
        kind: kind.to_string(),
        parameters: parameters.as_object().cloned(),
    }
}

fn new_validator(name: &str) -> CreateValidator {
    CreateValidator {
        name: name.to_string(),
        description: None,
        context: None,
        sort_order: None,
        active_status: None,
    }
}

fn link(validator_id: i64, rule_id: i64, order_number: i32) -> CreateValidatorRule {
    CreateValidatorRule {
        validator_id,
        rule_id,
        order_number,
        active_status: None,
    }
}

fn constraint_of(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) => db_err.constraint().map(str::to_string),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn rule_crud_round_trip(pool: PgPool) {
    let created = RuleRepo::create(
        &pool,
        &new_rule("colour", "OneOf", json!({ "allowedValues": ["red"] })),
    )
    .await
    .unwrap();
    assert_eq!(created.kind, "OneOf");
    assert_eq!(created.parameters, json!({ "allowedValues": ["red"] }));

    let found = RuleRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(found.attribute, "colour");

    let updated = RuleRepo::update(
        &pool,
        created.id,
        &UpdateRule {
            parameters: json!({ "allowedValues": ["red", "blue"] }).as_object().cloned(),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.attribute, "colour");
    assert_eq!(updated.parameters, json!({ "allowedValues": ["red", "blue"] }));
    assert!(updated.updated_at >= created.updated_at);

    assert_eq!(RuleRepo::list(&pool).await.unwrap().len(), 1);
    assert!(RuleRepo::delete(&pool, created.id).await.unwrap());
    assert!(!RuleRepo::delete(&pool, created.id).await.unwrap());
    assert!(RuleRepo::find_by_id(&pool, created.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn rule_parameters_default_to_empty_object(pool: PgPool) {
    let created = RuleRepo::create(&pool, &new_rule("when", "DayTime", json!(null)))
        .await
        .unwrap();
    assert_eq!(created.parameters, json!({}));
    assert!(created.to_definition().parameters.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn update_missing_rule_returns_none(pool: PgPool) {
    let result = RuleRepo::update(&pool, 9999, &UpdateRule::default())
        .await
        .unwrap();
    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn validator_defaults_and_update(pool: PgPool) {
    let created = ValidatorRepo::create(&pool, &new_validator("StateValidator"))
        .await
        .unwrap();
    assert_eq!(created.sort_order, 0);
    assert_eq!(created.active_status, "Active");

    let updated = ValidatorRepo::update(
        &pool,
        created.id,
        &UpdateValidator {
            active_status: Some(ActiveStatus::Inactive),
            description: Some("Checks record state".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.name, "StateValidator");
    assert_eq!(updated.active_status, "Inactive");
    assert_eq!(
        updated.to_definition().active_status,
        ActiveStatus::Inactive
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_validator_name_violates_unique_constraint(pool: PgPool) {
    ValidatorRepo::create(&pool, &new_validator("Dup")).await.unwrap();
    let err = ValidatorRepo::create(&pool, &new_validator("Dup"))
        .await
        .unwrap_err();
    assert_matches!(&err, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505"));
    assert_eq!(constraint_of(&err).as_deref(), Some("uq_validators_name"));
}

#[sqlx::test(migrations = "./migrations")]
async fn lookup_by_id_or_name_skips_inactive(pool: PgPool) {
    let active = ValidatorRepo::create(&pool, &new_validator("Live")).await.unwrap();
    let inactive = ValidatorRepo::create(
        &pool,
        &CreateValidator {
            active_status: Some(ActiveStatus::Inactive),
            ..new_validator("Dormant")
        },
    )
    .await
    .unwrap();

    let by_name = ValidatorRepo::find_active_by_id_or_name(&pool, "Live")
        .await
        .unwrap();
    assert_eq!(by_name.map(|v| v.id), Some(active.id));

    let by_id = ValidatorRepo::find_active_by_id_or_name(&pool, &active.id.to_string())
        .await
        .unwrap();
    assert_eq!(by_id.map(|v| v.id), Some(active.id));

    assert!(ValidatorRepo::find_active_by_id_or_name(&pool, "Dormant")
        .await
        .unwrap()
        .is_none());
    assert!(
        ValidatorRepo::find_active_by_id_or_name(&pool, &inactive.id.to_string())
            .await
            .unwrap()
            .is_none()
    );
    assert!(ValidatorRepo::find_active_by_id_or_name(&pool, "Nope")
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Validator rules
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn associations_order_and_filter_rules(pool: PgPool) {
    let validator = ValidatorRepo::create(&pool, &new_validator("Profile")).await.unwrap();
    let first = RuleRepo::create(&pool, &new_rule("a", "OneOf", json!({ "allowedValues": [1] })))
        .await
        .unwrap();
    let second = RuleRepo::create(&pool, &new_rule("b", "OneOf", json!({ "allowedValues": [2] })))
        .await
        .unwrap();
    let third = RuleRepo::create(&pool, &new_rule("c", "OneOf", json!({ "allowedValues": [3] })))
        .await
        .unwrap();

    ValidatorRuleRepo::create(&pool, &link(validator.id, second.id, 2)).await.unwrap();
    ValidatorRuleRepo::create(&pool, &link(validator.id, first.id, 1)).await.unwrap();
    ValidatorRuleRepo::create(
        &pool,
        &CreateValidatorRule {
            active_status: Some(ActiveStatus::Inactive),
            ..link(validator.id, third.id, 3)
        },
    )
    .await
    .unwrap();

    let all = ValidatorRuleRepo::rules_for_validator(&pool, validator.id, false)
        .await
        .unwrap();
    let ids: Vec<_> = all.iter().map(|r| r.rule_id).collect();
    assert_eq!(ids, [first.id, second.id, third.id]);

    let active = ValidatorRuleRepo::rules_for_validator(&pool, validator.id, true)
        .await
        .unwrap();
    let ids: Vec<_> = active.iter().map(|r| r.rule_id).collect();
    assert_eq!(ids, [first.id, second.id]);
    assert_eq!(active[0].to_ordered_rule().definition.attribute, "a");

    let listed = ValidatorRuleRepo::list(&pool, Some(validator.id)).await.unwrap();
    assert_eq!(listed.len(), 3);
    assert_eq!(ValidatorRuleRepo::list(&pool, None).await.unwrap().len(), 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn association_update_and_delete(pool: PgPool) {
    let validator = ValidatorRepo::create(&pool, &new_validator("V")).await.unwrap();
    let rule = RuleRepo::create(&pool, &new_rule("a", "TimeOfDay", json!({})))
        .await
        .unwrap();
    ValidatorRuleRepo::create(&pool, &link(validator.id, rule.id, 1)).await.unwrap();

    let updated = ValidatorRuleRepo::update(
        &pool,
        validator.id,
        rule.id,
        &UpdateValidatorRule {
            order_number: Some(5),
            active_status: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.order_number, 5);
    assert_eq!(updated.active_status, "Active");

    assert!(ValidatorRuleRepo::delete(&pool, validator.id, rule.id).await.unwrap());
    assert!(ValidatorRuleRepo::find(&pool, validator.id, rule.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_order_number_violates_unique_constraint(pool: PgPool) {
    let validator = ValidatorRepo::create(&pool, &new_validator("V")).await.unwrap();
    let a = RuleRepo::create(&pool, &new_rule("a", "TimeOfDay", json!({}))).await.unwrap();
    let b = RuleRepo::create(&pool, &new_rule("b", "TimeOfDay", json!({}))).await.unwrap();

    ValidatorRuleRepo::create(&pool, &link(validator.id, a.id, 1)).await.unwrap();
    let err = ValidatorRuleRepo::create(&pool, &link(validator.id, b.id, 1))
        .await
        .unwrap_err();
    assert_eq!(constraint_of(&err).as_deref(), Some("uq_validator_rules_order"));
}

#[sqlx::test(migrations = "./migrations")]
async fn association_requires_existing_rule(pool: PgPool) {
    let validator = ValidatorRepo::create(&pool, &new_validator("V")).await.unwrap();
    let err = ValidatorRuleRepo::create(&pool, &link(validator.id, 424242, 1))
        .await
        .unwrap_err();
    assert_eq!(constraint_of(&err).as_deref(), Some("fk_validator_rules_rule"));
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_a_rule_or_validator_cascades(pool: PgPool) {
    let validator = ValidatorRepo::create(&pool, &new_validator("V")).await.unwrap();
    let a = RuleRepo::create(&pool, &new_rule("a", "TimeOfDay", json!({}))).await.unwrap();
    let b = RuleRepo::create(&pool, &new_rule("b", "TimeOfDay", json!({}))).await.unwrap();
    ValidatorRuleRepo::create(&pool, &link(validator.id, a.id, 1)).await.unwrap();
    ValidatorRuleRepo::create(&pool, &link(validator.id, b.id, 2)).await.unwrap();

    RuleRepo::delete(&pool, a.id).await.unwrap();
    assert_eq!(
        ValidatorRuleRepo::list(&pool, Some(validator.id)).await.unwrap().len(),
        1
    );

    ValidatorRepo::delete(&pool, validator.id).await.unwrap();
    assert!(ValidatorRuleRepo::list(&pool, None).await.unwrap().is_empty());
    assert!(RuleRepo::find_by_id(&pool, b.id).await.unwrap().is_some());
}
