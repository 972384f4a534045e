//! # dmgen-projection — Safe Projection Synthesis
//!
//! Turns "select these fields of model `M`" into a finite selection tree
//! for a query that may traverse relations. To-one relations expand into
//! nested selections; list relations stay flat; a model never expands twice
//! on one root-to-leaf path, so cyclic schemas (including self references)
//! always terminate.
//!
//! ## Inputs
//!
//! - The immutable [`dmgen_core::Schema`].
//! - A complete [`dmgen_analysis::RelationshipGraph`], used to recognize
//!   relations that point back at the model being projected.
//! - A [`SelectionSource`] supplying per-model select overrides, normally
//!   the validated [`dmgen_config::GeneratorConfig`].
//!
//! Synthesis never fails; every fallback produces a flat reference and a
//! `debug` event.

pub mod node;
pub mod source;
pub mod synthesize;

pub use node::{NestedProjection, ProjectionNode};
pub use source::{NoOverrides, SelectionSource};
pub use synthesize::synthesize_projection;
