//! Record loading (JSON, YAML, CSV)
//!
//! External collaborators of the core pipelines: deserialize a file into a
//! sequence of generic value trees, and optionally select record subtrees by
//! JSONPath.

mod readers;
mod types;

pub use readers::{records_from_path, records_from_str, select_records};
pub use types::InputFormat;
