//! # dmgen-config — Configuration Resolver
//!
//! Turns the host's flat key/value configuration into a typed
//! [`GeneratorConfig`] and validates it against the schema.
//!
//! ## Two Passes
//!
//! 1. [`parse_config`] normalizes the bag: required keys, model list,
//!    per-model `Select`/`Optimistic`/`Pagination` overrides, and the
//!    data-source import path (rebased from the schema's directory onto the
//!    output directory).
//! 2. [`validate_config`] runs after the schema is loaded and rejects
//!    unknown models and malformed select overrides.
//!
//! Both passes fail fast with [`dmgen_core::GeneratorError`]; neither
//! repairs input.
//!
//! ## Crate Policy
//!
//! - Depends only on `dmgen-core` internally.
//! - String-suffix override keys are interpreted in [`resolve`] and nowhere
//!   else.

pub mod config;
pub mod import_path;
pub mod raw;
pub mod resolve;
pub mod validate;

pub use config::{GeneratorConfig, ModelOverrides, OptimisticStrategy, SelectOverride};
pub use import_path::{resolve_import_path, DEFAULT_DATA_SOURCE_IMPORT};
pub use raw::{RawConfig, RawValue};
pub use resolve::{override_key, parse_config};
pub use validate::validate_config;
