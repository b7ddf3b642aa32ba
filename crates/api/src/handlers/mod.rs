//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the corresponding repository in `rulegate_db` (or
//! to the validator service for runs) and map errors via
//! [`AppError`](crate::error::AppError).

pub mod rule_kinds;
pub mod rules;
pub mod validator_rules;
pub mod validators;
