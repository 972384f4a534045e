//! # Projection Synthesis
//!
//! Builds the selection tree for a query rooted at one model, expanding
//! to-one relations into nested selections and keeping everything else flat.
//!
//! ## Termination
//!
//! Each branch carries its own `visited` set, seeded with the root model and
//! extended on every descent. A relation whose target is already on the
//! current root-to-leaf path is emitted as a flat reference. Siblings never
//! see each other's visits, so the same model may appear on two different
//! branches but never twice on one path.
//!
//! ## Expansion Rules
//!
//! - List relations are flat references.
//! - A to-one relation expands into the related model's configured select
//!   override (restricted to fields that exist) or, without one, its scalar
//!   and enum fields. Candidates that are list relations, or that point back
//!   at the model being projected, are dropped.
//! - An empty candidate set, a visited target, or a target missing from the
//!   schema yields a flat reference.
//! - Names the model does not declare pass through as flat references.

use std::collections::BTreeSet;

use dmgen_analysis::RelationshipGraph;
use dmgen_core::{FieldDescriptor, ModelDescriptor, Schema};

use crate::node::ProjectionNode;
use crate::source::SelectionSource;

/// Synthesize the projection for `model` selecting `selected`, in order.
pub fn synthesize_projection<S>(
    schema: &Schema,
    model: &str,
    selected: &[String],
    graph: &RelationshipGraph,
    source: &S,
) -> ProjectionNode
where
    S: SelectionSource + ?Sized,
{
    let visited = BTreeSet::from([model.to_string()]);
    let synthesizer = Synthesizer {
        schema,
        graph,
        source,
    };
    synthesizer.project(model, selected, visited)
}

struct Synthesizer<'a, S: ?Sized> {
    schema: &'a Schema,
    graph: &'a RelationshipGraph,
    source: &'a S,
}

impl<S: SelectionSource + ?Sized> Synthesizer<'_, S> {
    fn project(&self, model: &str, selected: &[String], visited: BTreeSet<String>) -> ProjectionNode {
        let mut node = ProjectionNode::new(model);
        let descriptor = self.schema.model(model);

        for name in selected {
            let Some(field) = descriptor.and_then(|d| d.field(name)) else {
                tracing::debug!(model, field = %name, "unknown field passed through");
                node.push_reference(name);
                continue;
            };
            let Some(target) = field.related_model() else {
                node.push_scalar(name);
                continue;
            };
            if field.is_list {
                node.push_reference(name);
                continue;
            }
            let Some(related) = self.schema.model(target) else {
                tracing::debug!(model, field = %name, related = target, "related model missing; kept flat");
                node.push_reference(name);
                continue;
            };
            if visited.contains(target) {
                tracing::debug!(model, field = %name, related = target, "model already on path; kept flat");
                node.push_reference(name);
                continue;
            }

            let candidates = self.candidates(model, related);
            if candidates.is_empty() {
                node.push_reference(name);
                continue;
            }

            let mut branch = visited.clone();
            branch.insert(target.to_string());
            node.push_nested(name, self.project(target, &candidates, branch));
        }

        node
    }

    /// Fields to select when expanding a to-one relation from `current`
    /// into `related`.
    fn candidates(&self, current: &str, related: &ModelDescriptor) -> Vec<String> {
        let base: Vec<&FieldDescriptor> = match self.source.selected_fields(&related.name) {
            Some(names) => names.iter().filter_map(|n| related.field(n)).collect(),
            None => related.scalar_fields().collect(),
        };
        let points_back = self.graph.is_related(&related.name, current);

        base.into_iter()
            .filter(|f| match f.related_model() {
                None => true,
                Some(target) => !f.is_list && !(points_back && target == current),
            })
            .map(|f| f.name.clone())
            .collect()
    }
}
