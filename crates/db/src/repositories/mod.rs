//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod rule_repo;
pub mod validator_repo;
pub mod validator_rule_repo;

pub use rule_repo::RuleRepo;
pub use validator_repo::ValidatorRepo;
pub use validator_rule_repo::ValidatorRuleRepo;
