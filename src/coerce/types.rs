//! Coercion policy types

use serde::{Deserialize, Serialize};

/// What to do when a value cannot be converted to its declared type.
///
/// Only value-level conversion failures are subject to this policy;
/// configuration errors, structural mismatches and null-against-non-nullable
/// violations are always fatal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OnInvalid {
    /// Propagate the conversion error with path context
    #[default]
    Raise,
    /// Substitute null for the offending value
    Null,
    /// Keep a best-effort string representation
    Force,
}
