//! Runs a named validator against an input record.

use crate::types::JsonMap;

use super::rules::{RunMode, ValidationReport};
use super::runner::{bind_rules, evaluate_rules};
use super::store::RuleStore;

/// Resolves validators through a [`RuleStore`] and runs their rules.
#[derive(Debug, Clone)]
pub struct ValidatorService<S> {
    store: S,
    default_mode: RunMode,
}

impl<S: RuleStore> ValidatorService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            default_mode: RunMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.default_mode = mode;
        self
    }

    pub fn default_mode(&self) -> RunMode {
        self.default_mode
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// `true` when the validator exists, is active, and every active rule
    /// passes. Stops at the first failing rule.
    pub async fn run_validator(&self, id_or_name: &str, record: &JsonMap) -> Result<bool, S::Error> {
        let report = self
            .run_validator_with(id_or_name, record, RunMode::ShortCircuit)
            .await?;
        Ok(report.success)
    }

    /// Run in the service's default mode.
    pub async fn run(&self, id_or_name: &str, record: &JsonMap) -> Result<ValidationReport, S::Error> {
        self.run_validator_with(id_or_name, record, self.default_mode)
            .await
    }

    /// Run a validator and return the full report.
    ///
    /// An unknown or inactive validator yields a failed report without
    /// evaluating any rule.
    pub async fn run_validator_with(
        &self,
        id_or_name: &str,
        record: &JsonMap,
        mode: RunMode,
    ) -> Result<ValidationReport, S::Error> {
        let Some(validator) = self.store.find_active_validator(id_or_name).await? else {
            tracing::info!(validator = %id_or_name, "No active validator found");
            return Ok(ValidationReport::failed());
        };
        if !validator.active_status.is_active() {
            tracing::info!(validator_id = validator.id, "Validator is inactive");
            return Ok(ValidationReport::failed());
        }

        let rules = self.store.active_rules_for_validator(validator.id).await?;
        let bound = bind_rules(&rules);
        let report = evaluate_rules(&bound, record, mode);

        tracing::debug!(
            validator_id = validator.id,
            validator = %validator.name,
            rule_count = bound.len(),
            success = report.success,
            "Validator run finished",
        );
        Ok(report)
    }
}
