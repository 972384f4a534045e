//! # Default Values
//!
//! Classifies a field's declared default and prints it in the form the
//! emitters splice into generated code.

use dmgen_core::{DeclaredDefault, FieldDescriptor, ScalarType};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What kind of default a field declares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultValueKind {
    /// No default.
    #[default]
    None,
    /// A literal value.
    Literal,
    /// A generator function such as `now` or `uuid`.
    Function,
}

/// Kind and printed expression of a field's default. The expression is the
/// canonical function name for function defaults and the printed literal
/// for literal defaults.
pub fn classify_default(field: &FieldDescriptor) -> (DefaultValueKind, Option<String>) {
    match &field.default {
        None => (DefaultValueKind::None, None),
        Some(default @ DeclaredDefault::Function { .. }) => {
            (DefaultValueKind::Function, default.function_name())
        }
        Some(DeclaredDefault::Literal { value }) => (
            DefaultValueKind::Literal,
            Some(print_literal(&field.scalar_type, value)),
        ),
    }
}

/// Print a literal default. String fields are quoted; everything else is
/// printed as-is.
pub fn print_literal(scalar_type: &ScalarType, value: &Value) -> String {
    match (scalar_type, value) {
        (ScalarType::String, Value::String(_)) => value.to_string(),
        (ScalarType::String, other) => Value::String(other.to_string()).to_string(),
        (_, Value::String(text)) => text.clone(),
        (_, other) => other.to_string(),
    }
}
