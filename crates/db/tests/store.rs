//! Validator runs through the PostgreSQL-backed rule store.

use rulegate_core::types::JsonMap;
use rulegate_core::validation::{ActiveStatus, RunMode, ValidatorService};
use rulegate_db::models::rule::CreateRule;
use rulegate_db::models::validator::CreateValidator;
use rulegate_db::models::validator_rule::CreateValidatorRule;
use rulegate_db::repositories::{RuleRepo, ValidatorRepo, ValidatorRuleRepo};
use rulegate_db::PgRuleStore;
use serde_json::json;
use sqlx::PgPool;

async fn seed_state_validator(pool: &PgPool, status: ActiveStatus) -> i64 {
    let validator = ValidatorRepo::create(
        pool,
        &CreateValidator {
            name: "StateValidator".into(),
            description: Some("Record must be active".into()),
            context: None,
            sort_order: None,
            active_status: Some(status),
        },
    )
    .await
    .unwrap();
    let rule = RuleRepo::create(
        pool,
        &CreateRule {
            attribute: "active_status".into(),
            kind: "Enum".into(),
            parameters: json!({ "enumClass": "ActiveStatus", "allowedValues": ["Active"] })
                .as_object()
                .cloned(),
        },
    )
    .await
    .unwrap();
    ValidatorRuleRepo::create(
        pool,
        &CreateValidatorRule {
            validator_id: validator.id,
            rule_id: rule.id,
            order_number: 1,
            active_status: None,
        },
    )
    .await
    .unwrap();
    validator.id
}

fn record(status: &str) -> JsonMap {
    json!({ "active_status": status }).as_object().cloned().unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn state_validator_runs_against_the_database(pool: PgPool) {
    let id = seed_state_validator(&pool, ActiveStatus::Active).await;
    let service = ValidatorService::new(PgRuleStore::new(pool));

    assert!(service.run_validator("StateValidator", &record("Active")).await.unwrap());
    assert!(!service.run_validator("StateValidator", &record("Inactive")).await.unwrap());
    assert!(service.run_validator(&id.to_string(), &record("Active")).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn inactive_validator_never_passes(pool: PgPool) {
    seed_state_validator(&pool, ActiveStatus::Inactive).await;
    let service = ValidatorService::new(PgRuleStore::new(pool));

    let report = service
        .run_validator_with("StateValidator", &record("Active"), RunMode::CollectAll)
        .await
        .unwrap();
    assert!(!report.success);
    assert!(report.errors.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn misconfigured_stored_rule_fails_the_run(pool: PgPool) {
    let id = seed_state_validator(&pool, ActiveStatus::Active).await;
    let broken = RuleRepo::create(
        &pool,
        &CreateRule {
            attribute: "when".into(),
            kind: "DayOfWeek".into(),
            parameters: None,
        },
    )
    .await
    .unwrap();
    ValidatorRuleRepo::create(
        &pool,
        &CreateValidatorRule {
            validator_id: id,
            rule_id: broken.id,
            order_number: 2,
            active_status: None,
        },
    )
    .await
    .unwrap();

    let service = ValidatorService::new(PgRuleStore::new(pool));
    let report = service
        .run_validator_with("StateValidator", &record("Active"), RunMode::CollectAll)
        .await
        .unwrap();
    assert!(!report.success);
    assert_eq!(
        report.messages_for("when"),
        ["The when rule is misconfigured: DayOfWeek rule is missing required parameter 'day'"]
    );
}
