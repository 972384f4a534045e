//! # Model Analyzer
//!
//! Derives, for one model, everything the emitters need to know about its
//! fields: which are required, which are foreign keys, how defaults print,
//! which placeholders an optimistic record uses, and which client-side
//! checks apply. Pure; never consults other models.

use std::collections::BTreeSet;

use dmgen_core::ModelDescriptor;
use serde::{Deserialize, Serialize};

use crate::defaults::{classify_default, DefaultValueKind};
use crate::optimistic::{needs_optimistic_value, optimistic_value, OptimisticValue};
use crate::roles::{timestamp_role, TimestampRole};
use crate::rules::{is_auto_generated, rules_for_field, ValidationRule};

/// Analysis of a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldAnalysis {
    /// Field name.
    pub name: String,
    /// Whether the field is a relation to another model.
    pub is_relation: bool,
    /// Whether the field is required.
    pub is_required: bool,
    /// Whether a sibling relation field lists this field as a foreign key.
    pub is_foreign_key: bool,
    /// Target model, for relation fields.
    pub related_model: Option<String>,
    /// Kind of declared default.
    pub default_kind: DefaultValueKind,
    /// Printed default: canonical function name or printed literal.
    pub default_expression: Option<String>,
    /// Timestamp role, if any.
    pub timestamp_role: Option<TimestampRole>,
    /// Whether the database or engine fills the field.
    pub is_auto_generated: bool,
    /// Whether emitters must fill the field in an optimistic record.
    pub needs_optimistic_value: bool,
    /// Placeholder for optimistic records and form initial values.
    pub optimistic_value: OptimisticValue,
}

/// Analysis of one model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelAnalysis {
    /// Model name.
    pub model: String,
    /// Per-field analysis, in declaration order.
    pub fields: Vec<FieldAnalysis>,
    /// Required non-relation fields.
    pub required_fields: Vec<String>,
    /// Optional non-relation fields.
    pub optional_fields: Vec<String>,
    /// Relation fields.
    pub relation_fields: Vec<String>,
    /// Non-relation fields.
    pub scalar_fields: Vec<String>,
    /// Fields some relation field uses as a foreign key.
    pub foreign_key_fields: Vec<String>,
    /// Fields with a uniqueness constraint.
    pub unique_fields: Vec<String>,
    /// Identifier field.
    pub id_field: Option<String>,
    /// Validation rules, grouped by field in declaration order.
    pub validation_rules: Vec<ValidationRule>,
}

impl ModelAnalysis {
    /// Look up a field's analysis.
    pub fn field(&self, name: &str) -> Option<&FieldAnalysis> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Rules for one field.
    pub fn rules_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationRule> {
        self.validation_rules.iter().filter(move |r| r.field == field)
    }

    /// Fields an optimistic record must synthesize, with their placeholders.
    pub fn optimistic_fields(&self) -> impl Iterator<Item = (&str, &OptimisticValue)> {
        self.fields
            .iter()
            .filter(|f| f.needs_optimistic_value)
            .map(|f| (f.name.as_str(), &f.optimistic_value))
    }
}

/// Analyze one model.
pub fn analyze_model(model: &ModelDescriptor) -> ModelAnalysis {
    let foreign_keys: BTreeSet<&str> = model
        .relation_fields()
        .flat_map(|f| f.foreign_key_fields.iter().map(String::as_str))
        .collect();

    let fields: Vec<FieldAnalysis> = model
        .fields
        .iter()
        .map(|field| {
            let (default_kind, default_expression) = classify_default(field);
            FieldAnalysis {
                name: field.name.clone(),
                is_relation: field.is_relation(),
                is_required: field.is_required,
                is_foreign_key: !field.is_relation()
                    && foreign_keys.contains(field.name.as_str()),
                related_model: field.related_model().map(str::to_string),
                default_kind,
                default_expression,
                timestamp_role: timestamp_role(field),
                is_auto_generated: is_auto_generated(field),
                needs_optimistic_value: needs_optimistic_value(field),
                optimistic_value: optimistic_value(field),
            }
        })
        .collect();

    let analysis = ModelAnalysis {
        model: model.name.clone(),
        required_fields: names_where(&fields, |f| !f.is_relation && f.is_required),
        optional_fields: names_where(&fields, |f| !f.is_relation && !f.is_required),
        relation_fields: names_where(&fields, |f| f.is_relation),
        scalar_fields: names_where(&fields, |f| !f.is_relation),
        foreign_key_fields: names_where(&fields, |f| f.is_foreign_key),
        unique_fields: model
            .fields
            .iter()
            .filter(|f| f.is_unique)
            .map(|f| f.name.clone())
            .collect(),
        id_field: model.id_field().map(|f| f.name.clone()),
        validation_rules: model.fields.iter().flat_map(rules_for_field).collect(),
        fields,
    };

    tracing::trace!(
        model = %analysis.model,
        fields = analysis.fields.len(),
        rules = analysis.validation_rules.len(),
        "model analyzed"
    );
    analysis
}

fn names_where(fields: &[FieldAnalysis], keep: impl Fn(&FieldAnalysis) -> bool) -> Vec<String> {
    fields
        .iter()
        .filter(|&f| keep(f))
        .map(|f| f.name.clone())
        .collect()
}
