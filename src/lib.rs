//! # recast
//!
//! Infer a JSON-Schema-compatible type description from a sample of
//! semi-structured records, and coerce loosely-typed records to the types a
//! schema declares.
//!
//! ## Quick Start
//!
//! ```rust
//! use recast::{infer_schema, Coercer, OnInvalid};
//! use serde_json::json;
//!
//! # fn main() -> recast::Result<()> {
//! // Infer one conservative schema across sample records
//! let samples = vec![json!({"id": 0, "tag": "a"}), json!({"id": 1, "tag": "b"})];
//! let schema = infer_schema(&samples)?;
//!
//! // Coerce a loosely-typed record to the declared types
//! let cleaned = Coercer::new(OnInvalid::Raise)
//!     .coerce(&json!({"id": "2", "tag": "c"}), &schema)?;
//! assert_eq!(cleaned, json!({"id": 2, "tag": "c"}));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! records ──► SchemaInferrer ──► merge fold ──► normalize ──► schema
//!                                                               │
//! record ──────────────────────► Coercer ◄──────────────────────┘
//! ```
//!
//! The inference fold widens conflicting per-record types conservatively
//! (`integer` + `number` = `number`, anything else falls back to a nullable
//! string); the coercion engine walks a record alongside the schema and
//! casts every value, with the [`OnInvalid`] policy deciding the fate of
//! values that do not fit.

#![warn(clippy::all)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types: key conventions and node paths
pub mod types;

/// Schema inference, merging and normalization
pub mod schema;

/// Schema-driven type coercion
pub mod coerce;

/// Record loading (JSON, YAML, CSV)
pub mod load;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use coerce::{Coercer, OnInvalid};
pub use error::{Error, Result};
pub use load::{records_from_path, records_from_str, InputFormat};
pub use schema::{infer_schema, SchemaInferrer, SchemaNode, TypeList, TypeName};
pub use types::{KeyConvention, NodePath, PathSegment};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
