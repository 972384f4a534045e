//! # Timestamp Roles
//!
//! A field plays the updated-at role only when the schema flags it. The
//! created-at role is inferred from the field name alone, whatever the
//! field's declared type: `createdAt` and `created_at` qualify. That
//! inference lives in [`is_created_at_name`] and nowhere else, so it can be
//! tightened without touching the analyzer.

use dmgen_core::FieldDescriptor;
use serde::{Deserialize, Serialize};

/// Which timestamp a field maintains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampRole {
    /// Set once when the record is created.
    CreatedAt,
    /// Refreshed on every update.
    UpdatedAt,
}

/// Name-based created-at heuristic.
pub fn is_created_at_name(name: &str) -> bool {
    matches!(name, "createdAt" | "created_at")
}

/// The timestamp role a field plays, if any. The explicit updated-at flag
/// wins over the name heuristic.
pub fn timestamp_role(field: &FieldDescriptor) -> Option<TimestampRole> {
    if field.is_updated_at {
        Some(TimestampRole::UpdatedAt)
    } else if is_created_at_name(&field.name) {
        Some(TimestampRole::CreatedAt)
    } else {
        None
    }
}
