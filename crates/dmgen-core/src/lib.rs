//! # dmgen-core — Foundational Types for dmgen
//!
//! This crate defines the vocabulary every other dmgen crate speaks: the
//! immutable model and field descriptors loaded from the host's schema
//! metadata, relation cardinality, and the single error type a generation
//! run can fail with. Every other crate in the workspace depends on
//! `dmgen-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Descriptors are immutable.** A [`Schema`] is built once per run,
//!    either directly or through [`Schema::from_dmmf_json`], and only
//!    borrowed afterwards.
//!
//! 2. **Ownership is structural.** A relation field owns its relation iff
//!    it lists local foreign-key fields. Nothing else in the workspace
//!    re-derives ownership from names.
//!
//! 3. **One error enum.** [`GeneratorError`] covers configuration, unknown
//!    models, and malformed host payloads. Analysis never fails.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `dmgen-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public data types derive `Debug`, `Clone`, and `Serialize`.

pub mod dmmf;
pub mod error;
pub mod model;
pub mod relation;
pub mod schema;

// Re-export primary types for ergonomic imports.
pub use error::GeneratorError;
pub use model::{DeclaredDefault, FieldDescriptor, ModelDescriptor, ScalarType};
pub use relation::Cardinality;
pub use schema::Schema;
