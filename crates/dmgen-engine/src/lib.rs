//! # dmgen-engine — Generation Pipeline
//!
//! Entry point for hosts: hand over the schema metadata and configuration
//! bag, get back a [`GenerationPlan`] holding the relationship graph, the
//! analysis of every model, the validated configuration and one root
//! projection per configured model.
//!
//! ```no_run
//! use dmgen_engine::GenerationPlan;
//! use std::path::Path;
//!
//! # fn run(schema_json: &str, config_json: &str) -> Result<(), dmgen_core::GeneratorError> {
//! let plan = GenerationPlan::from_json(schema_json, config_json, Path::new("prisma/schema.prisma"))?;
//! for model in plan.models() {
//!     println!("{}: {}", model.model, model.projection.to_select_value());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Policy
//!
//! - No I/O and no global state. Each stage runs inside a `tracing` span;
//!   installing a subscriber is the host's business.
//! - Configuration errors abort the run before any projection is built.

pub mod plan;

pub use plan::{GenerationPlan, ModelPlan};
