//! Turns stored rule definitions into executable [`CompiledRule`]s.
//!
//! Compilation resolves the kind, maps stored parameters onto the kind's
//! declared inputs (primary name or alias, falling back to defaults) and
//! lets the kind's constructor validate them. Undeclared parameters are
//! ignored.

use serde_json::Value;

use crate::types::JsonMap;

use super::error::RuleError;
use super::kinds::CompiledRule;
use super::registry::RuleKind;
use super::rules::RuleDefinition;

/// Parameters keyed by primary input name, with defaults filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParams {
    kind: RuleKind,
    values: JsonMap,
}

impl ResolvedParams {
    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn value(&self, name: &str) -> &Value {
        self.values.get(name).unwrap_or(&Value::Null)
    }

    /// A string-valued input; any other JSON type is a configuration error.
    pub fn str(&self, name: &str) -> Result<&str, RuleError> {
        self.value(name)
            .as_str()
            .ok_or_else(|| self.invalid(format!("'{name}' must be a string")))
    }

    /// A list-valued input. A lone scalar is accepted as a one-element list.
    pub fn list(&self, name: &str) -> Result<Vec<Value>, RuleError> {
        match self.value(name) {
            Value::Array(items) => Ok(items.clone()),
            Value::Null | Value::Object(_) => {
                Err(self.invalid(format!("'{name}' must be an array")))
            }
            scalar => Ok(vec![scalar.clone()]),
        }
    }

    pub fn invalid(&self, detail: impl Into<String>) -> RuleError {
        RuleError::invalid(self.kind, detail)
    }
}

/// Map `parameters` onto the inputs declared by `kind`.
///
/// An explicit `null` counts as absent.
pub fn resolve_params(kind: RuleKind, parameters: &JsonMap) -> Result<ResolvedParams, RuleError> {
    let mut values = JsonMap::new();
    for spec in kind.inputs() {
        let supplied = spec
            .lookup_keys()
            .find_map(|key| parameters.get(key).filter(|v| !v.is_null()));
        let value = match (supplied, spec.default) {
            (Some(v), _) => v.clone(),
            (None, Some(default)) => default.to_value(),
            (None, None) => {
                return Err(RuleError::MissingRequiredParameter {
                    kind,
                    name: spec.name,
                })
            }
        };
        values.insert(spec.name.to_string(), value);
    }
    Ok(ResolvedParams { kind, values })
}

/// Compile a rule from its kind identifier and stored parameters.
pub fn compile(kind: &str, parameters: &JsonMap) -> Result<CompiledRule, RuleError> {
    let kind = RuleKind::resolve(kind)?;
    let params = resolve_params(kind, parameters)?;
    kind.construct(&params)
}

pub fn compile_definition(definition: &RuleDefinition) -> Result<CompiledRule, RuleError> {
    compile(&definition.kind, &definition.parameters)
}
