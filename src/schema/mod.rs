//! Schema inference from sample records
//!
//! # Pipeline
//!
//! - [`SchemaInferrer`] inspects one record at a time
//! - [`merge_records`] folds the per-record schemas conservatively
//! - [`normalize`] substitutes the default type for only-null fields

mod infer;
mod merge;
mod normalize;
mod types;

pub use infer::{infer_schema, looks_like_datetime, SchemaInferrer};
pub use merge::{merge_nodes, merge_records};
pub use normalize::normalize;
pub use types::{default_type, SchemaNode, TypeList, TypeName};

#[cfg(test)]
mod tests;
