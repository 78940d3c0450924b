//! Command-line interface
//!
//! # Commands
//!
//! - `infer` - Infer a JSON schema from sample records
//! - `clean` - Coerce records to the types a schema declares

mod commands;
mod runner;

pub use commands::{Cli, Commands, InputArgs};
pub use runner::{load_schema, Runner};
