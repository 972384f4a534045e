//! # Relation Cardinality
//!
//! The four cardinalities a relation can have, seen from the side that
//! declares the field. Classification is a fixed table over two facts:
//! whether the declaring side owns the foreign key, and whether the field
//! is a list.
//!
//! | Owning | List | Cardinality |
//! |--------|------|-------------|
//! | yes | no  | many-to-one  |
//! | yes | yes | many-to-many |
//! | no  | yes | one-to-many  |
//! | no  | no  | one-to-one   |

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::GeneratorError;

/// Cardinality of a relation from the perspective of one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cardinality {
    /// Exactly one related record on each side.
    OneToOne,
    /// This side has many related records; each of them points back here.
    OneToMany,
    /// Many records on this side point at one related record.
    ManyToOne,
    /// Collections on both sides.
    ManyToMany,
}

impl Cardinality {
    /// Classify a relation field from ownership and list-ness.
    pub fn classify(is_owning: bool, is_list: bool) -> Self {
        match (is_owning, is_list) {
            (true, false) => Self::ManyToOne,
            (true, true) => Self::ManyToMany,
            (false, true) => Self::OneToMany,
            (false, false) => Self::OneToOne,
        }
    }

    /// The same relation seen from the other side.
    pub fn inverse(self) -> Self {
        match self {
            Self::OneToMany => Self::ManyToOne,
            Self::ManyToOne => Self::OneToMany,
            other => other,
        }
    }

    /// Whether following the relation from this side yields a collection.
    pub fn is_to_many(self) -> bool {
        matches!(self, Self::OneToMany | Self::ManyToMany)
    }

    /// Returns all cardinalities in canonical order.
    pub fn all() -> &'static [Cardinality] {
        &[
            Self::OneToOne,
            Self::OneToMany,
            Self::ManyToOne,
            Self::ManyToMany,
        ]
    }

    /// The kebab-case identifier, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneToOne => "one-to-one",
            Self::OneToMany => "one-to-many",
            Self::ManyToOne => "many-to-one",
            Self::ManyToMany => "many-to-many",
        }
    }
}

impl std::fmt::Display for Cardinality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cardinality {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| GeneratorError::Metadata(format!("unknown cardinality: {s}")))
    }
}
