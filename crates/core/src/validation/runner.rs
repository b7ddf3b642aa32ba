//! Rule runner: pure logic, no storage access.
//!
//! Rules are compiled once per run, then evaluated in ascending
//! `order_number` against the attribute each names. A rule that fails to
//! compile counts as a failure of its attribute and never aborts the
//! process.

use chrono::Utc;
use serde_json::Value;

use crate::types::{DbId, JsonMap, Timestamp};

use super::compiler::compile_definition;
use super::error::RuleError;
use super::kinds::CompiledRule;
use super::rules::{OrderedRule, RunMode, ValidationOutcome, ValidationReport};

/// A rule prepared for a run, or the reason it could not be prepared.
#[derive(Debug, Clone)]
pub struct BoundRule {
    pub rule_id: DbId,
    pub attribute: String,
    pub order_number: i32,
    pub compiled: Result<CompiledRule, RuleError>,
}

/// Compile every rule and sort by `order_number`, ties broken by rule id.
pub fn bind_rules(rules: &[OrderedRule]) -> Vec<BoundRule> {
    let mut bound: Vec<BoundRule> = rules
        .iter()
        .map(|rule| {
            let compiled = compile_definition(&rule.definition);
            if let Err(e) = &compiled {
                tracing::error!(
                    rule_id = rule.definition.id,
                    attribute = %rule.definition.attribute,
                    kind = %rule.definition.kind,
                    error = %e,
                    "Rule failed to compile",
                );
            }
            BoundRule {
                rule_id: rule.definition.id,
                attribute: rule.definition.attribute.clone(),
                order_number: rule.order_number,
                compiled,
            }
        })
        .collect();
    bound.sort_by_key(|r| (r.order_number, r.rule_id));
    bound
}

/// Evaluate bound rules against `record` at the current time.
pub fn evaluate_rules(rules: &[BoundRule], record: &JsonMap, mode: RunMode) -> ValidationReport {
    evaluate_rules_at(rules, record, mode, Utc::now())
}

pub fn evaluate_rules_at(
    rules: &[BoundRule],
    record: &JsonMap,
    mode: RunMode,
    now: Timestamp,
) -> ValidationReport {
    let mut report = ValidationReport::passed();

    for rule in rules {
        let value = record.get(&rule.attribute).unwrap_or(&Value::Null);
        let outcome = match &rule.compiled {
            Ok(compiled) => compiled.validate_at(&rule.attribute, value, now),
            Err(e) => ValidationOutcome::fail(format!(
                "The {} rule is misconfigured: {e}",
                rule.attribute
            )),
        };

        if let ValidationOutcome::Fail(message) = outcome {
            tracing::debug!(
                rule_id = rule.rule_id,
                attribute = %rule.attribute,
                %message,
                "Rule failed",
            );
            report.record_failure(&rule.attribute, message);
            if mode == RunMode::ShortCircuit {
                break;
            }
        }
    }

    report
}
