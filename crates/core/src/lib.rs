//! Rule engine core: rule kinds, the kind registry, the rule compiler, the
//! validation runner, and validator resolution over an abstract rule store.
//!
//! This crate performs no I/O of its own. Persistence lives behind the
//! [`validation::store::RuleStore`] trait.

pub mod error;
pub mod types;
pub mod validation;
