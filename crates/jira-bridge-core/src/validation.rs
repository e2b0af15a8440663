// crates/jira-bridge-core/src/validation.rs
// ============================================================================
// Module: Argument Validation
// Description: Re-anchors loosely-typed argument bags to operation schemas.
// Purpose: Reject malformed calls before any backend work starts.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! [`validate`] walks an operation's declared parameters in order and builds a
//! [`ValidatedCall`] holding only declared parameters, coerced to their
//! declared types, with defaults applied. Undeclared keys are ignored.
//!
//! ## Invariants
//! - Validation is pure: no I/O and no backend access.
//! - A required parameter that is absent, `null`, or a blank string fails with
//!   [`ValidationError::MissingParameter`].
//! - A [`ValidatedCall`] can only be constructed here.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::operation::OperationName;
use crate::registry::DefaultValue;
use crate::registry::Operation;
use crate::registry::ParameterKind;
use crate::registry::ParameterSpec;
use crate::registry::Presence;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Argument validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required parameter was absent, null, or blank.
    #[error("missing required parameter: {parameter}")]
    MissingParameter {
        /// Parameter name.
        parameter: String,
    },
    /// A parameter could not be coerced to its declared type.
    #[error("parameter {parameter} must be {expected}, found {found}")]
    InvalidParameterType {
        /// Parameter name.
        parameter: String,
        /// Declared type label.
        expected: &'static str,
        /// JSON type label of the supplied value.
        found: &'static str,
    },
}

impl ValidationError {
    /// Returns the parameter the error refers to.
    #[must_use]
    pub fn parameter(&self) -> &str {
        match self {
            Self::MissingParameter {
                parameter,
            }
            | Self::InvalidParameterType {
                parameter, ..
            } => parameter,
        }
    }
}

// ============================================================================
// SECTION: Validated Call
// ============================================================================

/// Validated argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    /// String parameter value.
    Text(String),
    /// Integer parameter value.
    Integer(i64),
    /// Opaque JSON parameter value.
    Json(Value),
}

impl ArgValue {
    /// Converts the value back into JSON.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(text) => Value::String(text.clone()),
            Self::Integer(number) => Value::from(*number),
            Self::Json(value) => value.clone(),
        }
    }
}

/// Operation arguments after schema validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCall {
    /// Operation being invoked.
    operation: OperationName,
    /// Declared parameters that are present after defaults.
    arguments: BTreeMap<&'static str, ArgValue>,
}

impl ValidatedCall {
    /// Returns the operation this call targets.
    #[must_use]
    pub const fn operation(&self) -> OperationName {
        self.operation
    }

    /// Returns a validated argument by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.arguments.get(name)
    }

    /// Returns true when the argument is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.arguments.contains_key(name)
    }

    /// Returns a string argument when present.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.arguments.get(name) {
            Some(ArgValue::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Returns a string argument that the schema declares as required.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingParameter`] when the argument is absent.
    pub fn required_text(&self, name: &str) -> Result<&str, ValidationError> {
        self.text(name).ok_or_else(|| ValidationError::MissingParameter {
            parameter: name.to_string(),
        })
    }

    /// Returns an integer argument when present.
    #[must_use]
    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.arguments.get(name) {
            Some(ArgValue::Integer(number)) => Some(*number),
            _ => None,
        }
    }

    /// Returns a JSON argument when present.
    #[must_use]
    pub fn json(&self, name: &str) -> Option<&Value> {
        match self.arguments.get(name) {
            Some(ArgValue::Json(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the names of the present arguments in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.arguments.keys().copied().collect()
    }
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates an argument bag against an operation schema.
///
/// A `null` bag is treated as empty.
///
/// # Errors
///
/// Returns [`ValidationError`] when the bag is not an object, a required
/// parameter is missing, or a value cannot be coerced to its declared type.
pub fn validate(operation: &Operation, arguments: &Value) -> Result<ValidatedCall, ValidationError> {
    let empty = Map::new();
    let bag = match arguments {
        Value::Object(map) => map,
        Value::Null => &empty,
        other => {
            return Err(ValidationError::InvalidParameterType {
                parameter: "arguments".to_string(),
                expected: "object",
                found: json_type_name(other),
            });
        }
    };

    let mut validated = BTreeMap::new();
    for parameter in operation.parameters {
        let supplied = bag.get(parameter.name).filter(|value| !value.is_null());
        match supplied {
            Some(value) => {
                let coerced = coerce(parameter, value)?;
                if parameter.presence.is_required() && is_blank(&coerced) {
                    return Err(missing(parameter));
                }
                validated.insert(parameter.name, coerced);
            }
            None => match parameter.presence {
                Presence::Required => return Err(missing(parameter)),
                Presence::Optional => {}
                Presence::Defaulted(default) => {
                    validated.insert(parameter.name, default_value(default));
                }
            },
        }
    }

    Ok(ValidatedCall {
        operation: operation.name,
        arguments: validated,
    })
}

/// Coerces a supplied value to the parameter's declared type.
fn coerce(parameter: &ParameterSpec, value: &Value) -> Result<ArgValue, ValidationError> {
    let coerced = match (parameter.kind, value) {
        (ParameterKind::String, Value::String(text)) => Some(ArgValue::Text(text.clone())),
        (ParameterKind::String, Value::Number(number)) => Some(ArgValue::Text(number.to_string())),
        (ParameterKind::String, Value::Bool(flag)) => Some(ArgValue::Text(flag.to_string())),
        (ParameterKind::Integer, Value::Number(number)) => number.as_i64().map(ArgValue::Integer),
        (ParameterKind::Integer, Value::String(text)) => {
            text.trim().parse::<i64>().ok().map(ArgValue::Integer)
        }
        (ParameterKind::Json, other) => Some(ArgValue::Json(other.clone())),
        _ => None,
    };
    coerced.ok_or_else(|| ValidationError::InvalidParameterType {
        parameter: parameter.name.to_string(),
        expected: parameter.kind.as_str(),
        found: json_type_name(value),
    })
}

/// Returns true for string values that are empty after trimming.
fn is_blank(value: &ArgValue) -> bool {
    matches!(value, ArgValue::Text(text) if text.trim().is_empty())
}

/// Builds the missing-parameter error for a declared parameter.
fn missing(parameter: &ParameterSpec) -> ValidationError {
    ValidationError::MissingParameter {
        parameter: parameter.name.to_string(),
    }
}

/// Converts a registry default into a validated value.
fn default_value(default: DefaultValue) -> ArgValue {
    match default {
        DefaultValue::Text(text) => ArgValue::Text(text.to_string()),
        DefaultValue::Integer(number) => ArgValue::Integer(number),
    }
}

/// Returns the JSON type label of a value.
#[must_use]
pub const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
