//! # Validation Rules
//!
//! Rules the emitters turn into client-side input checks, derived from the
//! field descriptor alone.

use std::fmt;

use dmgen_core::{FieldDescriptor, ScalarType};
use serde::{Deserialize, Serialize};

use crate::roles::timestamp_role;

/// The check a rule performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// A value must be supplied.
    Required,
    /// Text must not exceed the declared length.
    MaxLength,
    /// Text must be an email address.
    Email,
    /// Text must be a URL.
    Url,
}

impl RuleKind {
    /// Stable string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::MaxLength => "max_length",
            Self::Email => "email",
            Self::Url => "url",
        }
    }

    /// All kinds, in emission order within a field.
    pub fn all() -> &'static [RuleKind] {
        &[Self::Required, Self::MaxLength, Self::Email, Self::Url]
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One client-side check on one field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationRule {
    /// Field the rule applies to.
    pub field: String,
    /// What is checked.
    pub kind: RuleKind,
    /// Rule parameter; the limit for [`RuleKind::MaxLength`].
    pub parameter: Option<u32>,
    /// Message shown when the check fails.
    pub message: String,
}

impl ValidationRule {
    fn new(field: &FieldDescriptor, kind: RuleKind, parameter: Option<u32>) -> Self {
        let name = &field.name;
        let message = match (kind, parameter) {
            (RuleKind::Required, _) => format!("{name} is required"),
            (RuleKind::MaxLength, Some(max)) => {
                format!("{name} must be at most {max} characters")
            }
            (RuleKind::MaxLength, None) => format!("{name} is too long"),
            (RuleKind::Email, _) => format!("{name} must be a valid email address"),
            (RuleKind::Url, _) => format!("{name} must be a valid URL"),
        };
        Self {
            field: name.clone(),
            kind,
            parameter,
            message,
        }
    }
}

/// Whether the database or the engine fills this field without user input.
pub fn is_auto_generated(field: &FieldDescriptor) -> bool {
    field.is_id || timestamp_role(field).is_some() || field.is_auto_increment()
}

/// Rules for one field, in [`RuleKind::all`] order.
pub fn rules_for_field(field: &FieldDescriptor) -> Vec<ValidationRule> {
    let mut rules = Vec::new();

    if field.is_required
        && !field.is_relation()
        && !is_auto_generated(field)
        && !field.has_default_value()
    {
        rules.push(ValidationRule::new(field, RuleKind::Required, None));
    }

    if field.scalar_type != ScalarType::String {
        return rules;
    }

    if let Some(max) = field.max_length {
        rules.push(ValidationRule::new(field, RuleKind::MaxLength, Some(max)));
    }
    if field.name == "email" {
        rules.push(ValidationRule::new(field, RuleKind::Email, None));
    }
    let lowered = field.name.to_ascii_lowercase();
    if lowered.contains("url") || lowered.contains("website") {
        rules.push(ValidationRule::new(field, RuleKind::Url, None));
    }

    rules
}
