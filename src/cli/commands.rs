//! CLI commands and argument parsing

use crate::coerce::OnInvalid;
use crate::load::InputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Infer JSON Schema from sample records and coerce records to match
#[derive(Parser, Debug)]
#[command(name = "recast")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Number of spaces for output indentation
    #[arg(short, long, global = true, default_value = "2")]
    pub indent: usize,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Shared record-input options
#[derive(clap::Args, Debug)]
pub struct InputArgs {
    /// Record file (JSON, YAML, or CSV)
    pub data: PathBuf,

    /// Record file format
    #[arg(short = 't', long, value_enum, default_value = "json")]
    pub format: InputFormat,

    /// Skip the first n records (for CSV, the header row is never skipped)
    #[arg(short, long, default_value = "0")]
    pub skip: usize,

    /// Convert keys to lower case
    #[arg(short, long)]
    pub lower: bool,

    /// Replace special characters in keys with this string
    #[arg(short = 'r', long)]
    pub replace_special: Option<String>,

    /// Convert keys to snake_case
    #[arg(short = 'n', long)]
    pub snake_case: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Infer a JSON schema from sample records
    Infer {
        #[command(flatten)]
        input: InputArgs,

        /// JSONPath to the record subtree inside each document
        #[arg(long)]
        record_level: Option<String>,
    },

    /// Coerce records to the types declared in a schema
    Clean {
        #[command(flatten)]
        input: InputArgs,

        /// Schema file (JSON), e.g. the output of `recast infer`
        #[arg(short = 'S', long)]
        schema: PathBuf,

        /// What to do when a value cannot be converted
        #[arg(long, value_enum, default_value = "raise")]
        on_invalid: OnInvalid,
    },
}
