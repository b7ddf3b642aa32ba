//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - A `Deserialize` + `Validate` update DTO (all `Option` fields) for patches

pub mod rule;
pub mod validator;
pub mod validator_rule;

use rulegate_core::validation::ActiveStatus;

/// Parse a stored `active_status` column. The table CHECK constraints
/// guarantee one of the two known values; anything else reads as inactive.
pub(crate) fn parse_active_status(raw: &str) -> ActiveStatus {
    raw.parse().unwrap_or(ActiveStatus::Inactive)
}
