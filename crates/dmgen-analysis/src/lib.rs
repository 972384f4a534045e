//! # dmgen-analysis — Schema Analysis
//!
//! Two analyzers over the immutable [`dmgen_core::Schema`]:
//!
//! - [`analyze_model`] classifies one model's fields, prints their
//!   defaults, assigns optimistic placeholders and derives validation rules.
//!   It never consults other models.
//! - [`analyze_relationships`] builds the [`RelationshipGraph`] for the
//!   whole schema in one pass. The graph is complete before any projection
//!   is synthesized from it.
//!
//! Neither analyzer fails. Unknown scalar types degrade to a null
//! placeholder; relations to undeclared models are kept without a back
//! reference and logged at `warn`.
//!
//! ## Crate Policy
//!
//! - Depends only on `dmgen-core` internally.
//! - Outputs are plain owned data (`Send + Sync`) and may be shared across
//!   threads read-only.
//! - The name-based created-at heuristic lives in [`roles`] only.

pub mod defaults;
pub mod model;
pub mod optimistic;
pub mod relationship;
pub mod roles;
pub mod rules;

pub use defaults::DefaultValueKind;
pub use model::{analyze_model, FieldAnalysis, ModelAnalysis};
pub use optimistic::OptimisticValue;
pub use relationship::{
    analyze_relationships, ModelRelationships, RelationshipEdge, RelationshipGraph,
};
pub use roles::{is_created_at_name, TimestampRole};
pub use rules::{RuleKind, ValidationRule};
