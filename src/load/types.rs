//! Input format types

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Format of a record file
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// JSON document or array of records (default)
    #[default]
    Json,
    /// YAML document or sequence of records
    Yaml,
    /// CSV with a header row; every cell is delivered as text
    Csv,
}

impl FromStr for InputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(InputFormat::Json),
            "yaml" | "yml" => Ok(InputFormat::Yaml),
            "csv" => Ok(InputFormat::Csv),
            other => Err(Error::unsupported_format(other)),
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Json => write!(f, "json"),
            InputFormat::Yaml => write!(f, "yaml"),
            InputFormat::Csv => write!(f, "csv"),
        }
    }
}
