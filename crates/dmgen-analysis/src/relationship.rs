//! # Relationship Graph
//!
//! One pass over the whole schema producing, for every model, the relations
//! it owns, the relations that point at it, and the set of models it is
//! related to in either direction.
//!
//! ## Edge Placement
//!
//! - An **owning** field `A.f -> B` (non-empty foreign key list) produces an
//!   edge on `A.owns` and a converse edge on `B.referenced_by` with the
//!   inverse cardinality. The converse edge's back reference is `B`'s
//!   pairing field.
//! - A **non-owning** field whose pairing field is owning contributes
//!   nothing; its relation is already represented by the converse edge.
//! - A **non-owning** field with no owning counterpart (implicit
//!   many-to-many, one-sided declaration) produces a converse edge on the
//!   related model's `referenced_by`: lists read as many-to-one, single
//!   fields as one-to-one.
//!
//! Edges are collected into one immutable list and grouped by model at the
//! end.
//!
//! ## Dangling Targets
//!
//! A relation to a model the schema does not declare keeps its owning edge
//! with no back reference, records no converse edge, and emits a warning.
//! The graph is built regardless.

use std::collections::{BTreeMap, BTreeSet};

use dmgen_core::{Cardinality, FieldDescriptor, ModelDescriptor, Schema};
use serde::{Deserialize, Serialize};

/// One relation as seen from one side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationshipEdge {
    /// Model declaring the field.
    pub source_model: String,
    /// Field on the source model.
    pub field_name: String,
    /// Model the field points to.
    pub related_model: String,
    /// Cardinality from the perspective of the list the edge sits in.
    pub cardinality: Cardinality,
    /// Whether the edge is the owning side.
    pub is_owning: bool,
    /// The pairing field on the other side, if one exists.
    pub back_reference_field_name: Option<String>,
}

/// Everything the graph knows about one model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRelationships {
    /// Relations this model owns.
    pub owns: Vec<RelationshipEdge>,
    /// Converse edges of relations pointing at this model.
    pub referenced_by: Vec<RelationshipEdge>,
    /// Models related in either direction.
    pub related_models: BTreeSet<String>,
}

/// Relationship records for every model of a schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipGraph {
    models: BTreeMap<String, ModelRelationships>,
}

impl RelationshipGraph {
    /// Record for one model.
    pub fn model(&self, name: &str) -> Option<&ModelRelationships> {
        self.models.get(name)
    }

    /// Relations `model` owns. Empty for unknown models.
    pub fn owns(&self, model: &str) -> &[RelationshipEdge] {
        self.models
            .get(model)
            .map(|r| r.owns.as_slice())
            .unwrap_or_default()
    }

    /// Converse edges pointing at `model`. Empty for unknown models.
    pub fn referenced_by(&self, model: &str) -> &[RelationshipEdge] {
        self.models
            .get(model)
            .map(|r| r.referenced_by.as_slice())
            .unwrap_or_default()
    }

    /// Models related to `model` in either direction.
    pub fn related_models(&self, model: &str) -> Option<&BTreeSet<String>> {
        self.models.get(model).map(|r| &r.related_models)
    }

    /// Whether `a` and `b` are related in either direction.
    pub fn is_related(&self, a: &str, b: &str) -> bool {
        self.related_models(a).is_some_and(|set| set.contains(b))
    }

    /// Every edge: per model, owned edges then converse edges.
    pub fn edges(&self) -> impl Iterator<Item = &RelationshipEdge> {
        self.models
            .values()
            .flat_map(|r| r.owns.iter().chain(r.referenced_by.iter()))
    }

    /// Model names with a record, in sorted order.
    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Owns,
    ReferencedBy,
}

/// An edge and the model record it belongs in.
#[derive(Debug)]
struct Placement {
    model: String,
    slot: Slot,
    edge: RelationshipEdge,
}

/// Build the relationship graph for a whole schema.
pub fn analyze_relationships(schema: &Schema) -> RelationshipGraph {
    let placements: Vec<Placement> = schema
        .models()
        .iter()
        .flat_map(|model| {
            model
                .relation_fields()
                .flat_map(move |field| place_field(schema, model, field))
        })
        .collect();

    let mut models: BTreeMap<String, ModelRelationships> = schema
        .models()
        .iter()
        .map(|m| (m.name.clone(), ModelRelationships::default()))
        .collect();

    for Placement { model, slot, edge } in placements {
        let record = models.entry(model).or_default();
        match slot {
            Slot::Owns => {
                record.related_models.insert(edge.related_model.clone());
                record.owns.push(edge);
            }
            Slot::ReferencedBy => {
                record.related_models.insert(edge.source_model.clone());
                record.referenced_by.push(edge);
            }
        }
    }

    let graph = RelationshipGraph { models };
    tracing::debug!(
        models = graph.models.len(),
        edges = graph.edges().count(),
        "relationship graph built"
    );
    graph
}

/// The related model's field sharing `field`'s relation name.
fn back_reference<'a>(
    related: &'a ModelDescriptor,
    field: &FieldDescriptor,
) -> Option<&'a FieldDescriptor> {
    let relation_name = field.relation_name.as_deref()?;
    related
        .relation_fields()
        .find(|f| f.relation_name.as_deref() == Some(relation_name) && f.name != field.name)
}

fn place_field(
    schema: &Schema,
    model: &ModelDescriptor,
    field: &FieldDescriptor,
) -> Vec<Placement> {
    let Some(target) = field.related_model() else {
        return Vec::new();
    };
    let related = schema.model(target);
    if related.is_none() {
        tracing::warn!(
            model = %model.name,
            field = %field.name,
            related = target,
            "relation targets a model missing from the schema"
        );
    }
    let pair = related.and_then(|r| back_reference(r, field));
    let back_reference_field_name = pair.map(|f| f.name.clone());

    let edge = |cardinality: Cardinality, is_owning: bool| RelationshipEdge {
        source_model: model.name.clone(),
        field_name: field.name.clone(),
        related_model: target.to_string(),
        cardinality,
        is_owning,
        back_reference_field_name: back_reference_field_name.clone(),
    };

    if field.is_owning() {
        let cardinality = Cardinality::classify(true, field.is_list);
        let mut placed = vec![Placement {
            model: model.name.clone(),
            slot: Slot::Owns,
            edge: edge(cardinality, true),
        }];
        if related.is_some() {
            placed.push(Placement {
                model: target.to_string(),
                slot: Slot::ReferencedBy,
                edge: edge(cardinality.inverse(), false),
            });
        }
        return placed;
    }

    if related.is_none() || pair.is_some_and(FieldDescriptor::is_owning) {
        return Vec::new();
    }

    let cardinality = if field.is_list {
        Cardinality::ManyToOne
    } else {
        Cardinality::OneToOne
    };
    vec![Placement {
        model: target.to_string(),
        slot: Slot::ReferencedBy,
        edge: edge(cardinality, false),
    }]
}
