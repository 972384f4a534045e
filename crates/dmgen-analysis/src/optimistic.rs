//! # Optimistic Placeholder Values
//!
//! Before the server confirms a write, the client shows a provisional
//! record. Every field gets a placeholder from the table below; the first
//! matching row wins.
//!
//! | Condition                              | Placeholder           |
//! |----------------------------------------|-----------------------|
//! | identifier                             | temporary id          |
//! | created-at / updated-at role           | current timestamp     |
//! | default `now`                          | current timestamp     |
//! | default `uuid`/`cuid`/`ulid`/`nanoid`/`autoincrement` | temporary id |
//! | other function default                 | see below             |
//! | literal default                        | printed literal       |
//! | optional, no default                   | null                  |
//! | required, no default                   | zero value for type   |
//!
//! Other generator functions yield the current timestamp for date-times,
//! an empty string for text and null otherwise. Zero values: empty string,
//! `0`, `false`, current timestamp for date-times, and null for enums, JSON,
//! relations and unknown host types.

use std::fmt;

use dmgen_core::{DeclaredDefault, FieldDescriptor, ScalarType};
use serde::{Deserialize, Serialize};

use crate::defaults::print_literal;
use crate::roles::timestamp_role;

/// Generator functions whose output is an identifier the client cannot
/// know ahead of the server.
const ID_GENERATORS: &[&str] = &["uuid", "cuid", "ulid", "nanoid", "autoincrement"];

/// A provisional value shown until the server responds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum OptimisticValue {
    /// A client-generated temporary identifier.
    TemporaryId,
    /// The client's current time.
    CurrentTimestamp,
    /// `""`.
    EmptyString,
    /// `0`.
    Zero,
    /// `false`.
    False,
    /// `null`.
    Null,
    /// A printed literal taken from the declared default.
    Literal(String),
}

impl fmt::Display for OptimisticValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TemporaryId => f.write_str("temporary-id"),
            Self::CurrentTimestamp => f.write_str("current-timestamp"),
            Self::EmptyString => f.write_str("\"\""),
            Self::Zero => f.write_str("0"),
            Self::False => f.write_str("false"),
            Self::Null => f.write_str("null"),
            Self::Literal(text) => f.write_str(text),
        }
    }
}

/// Whether an emitter must synthesize a value for this field in an
/// optimistic record, rather than taking it from the user's input.
pub fn needs_optimistic_value(field: &FieldDescriptor) -> bool {
    field.is_id || timestamp_role(field).is_some() || field.has_default_value()
}

/// Placeholder for `field`, following the table in the module docs.
pub fn optimistic_value(field: &FieldDescriptor) -> OptimisticValue {
    if field.is_id {
        return OptimisticValue::TemporaryId;
    }
    if timestamp_role(field).is_some() {
        return OptimisticValue::CurrentTimestamp;
    }
    match &field.default {
        Some(default @ DeclaredDefault::Function { .. }) => {
            let name = default.function_name().unwrap_or_default();
            if name == "now" {
                OptimisticValue::CurrentTimestamp
            } else if ID_GENERATORS.contains(&name.as_str()) {
                OptimisticValue::TemporaryId
            } else {
                match field.scalar_type {
                    ScalarType::DateTime => OptimisticValue::CurrentTimestamp,
                    ScalarType::String => OptimisticValue::EmptyString,
                    _ => OptimisticValue::Null,
                }
            }
        }
        Some(DeclaredDefault::Literal { value }) => {
            OptimisticValue::Literal(print_literal(&field.scalar_type, value))
        }
        None if !field.is_required => OptimisticValue::Null,
        None => zero_value(&field.scalar_type),
    }
}

fn zero_value(scalar_type: &ScalarType) -> OptimisticValue {
    match scalar_type {
        ScalarType::String => OptimisticValue::EmptyString,
        ScalarType::Int | ScalarType::Float => OptimisticValue::Zero,
        ScalarType::Boolean => OptimisticValue::False,
        ScalarType::DateTime => OptimisticValue::CurrentTimestamp,
        ScalarType::Json
        | ScalarType::Enum(_)
        | ScalarType::Relation(_)
        | ScalarType::Other(_)
        | ScalarType::Unsupported(_) => OptimisticValue::Null,
    }
}
