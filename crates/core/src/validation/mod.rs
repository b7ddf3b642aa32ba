//! Rule-based validation engine.
//!
//! Stored rule definitions are compiled through the kind [`registry`],
//! grouped into validators, and evaluated by the [`runner`] against an
//! input record.

pub mod compiler;
pub mod enums;
pub mod error;
pub mod kinds;
pub mod registry;
pub mod rules;
pub mod runner;
pub mod service;
pub mod store;

pub use compiler::{compile, compile_definition};
pub use error::RuleError;
pub use kinds::CompiledRule;
pub use registry::{list_kinds, RuleKind};
pub use rules::*;
pub use service::ValidatorService;
pub use store::{InMemoryRuleStore, RuleStore};
