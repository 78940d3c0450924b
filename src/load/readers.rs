//! Record readers
//!
//! File-format collaborators for the inference and coercion pipelines: each
//! reader hands back a plain sequence of value trees. CSV rows are exposed
//! as string-keyed flat mappings with every cell as text; the inference
//! heuristics are what recover real types from them.

use super::types::InputFormat;
use crate::error::{Error, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read records from a file.
pub fn records_from_path(
    path: impl AsRef<Path>,
    format: InputFormat,
    skip: usize,
) -> Result<Vec<Value>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| Error::io(path.display().to_string(), e))?;
    debug!("read {} bytes from {}", content.len(), path.display());
    records_from_str(&content, format, skip)
}

/// Parse records from a string.
///
/// JSON arrays and YAML sequences skip the first `skip` records; a single
/// document becomes a one-record sample. For CSV, `skip` skips data rows
/// (never the header).
pub fn records_from_str(content: &str, format: InputFormat, skip: usize) -> Result<Vec<Value>> {
    let records = match format {
        InputFormat::Json => {
            let value: Value = serde_json::from_str(content)?;
            skip_records(value, skip)
        }
        InputFormat::Yaml => {
            let value: Value = serde_yaml::from_str(content)?;
            skip_records(value, skip)
        }
        InputFormat::Csv => parse_csv(content, skip)?,
    };
    debug!("loaded {} records", records.len());
    Ok(records)
}

fn skip_records(value: Value, skip: usize) -> Vec<Value> {
    match value {
        Value::Array(records) => records.into_iter().skip(skip).collect(),
        single => vec![single],
    }
}

/// Parse CSV content into flat string-keyed records.
fn parse_csv(content: &str, skip: usize) -> Result<Vec<Value>> {
    let mut lines = content.lines();

    let headers: Vec<String> = match lines.next() {
        Some(header_line) => parse_csv_line(header_line, ','),
        None => return Err(Error::csv("input has no header row")),
    };

    let mut records = Vec::new();
    for line in lines.skip(skip) {
        if line.trim().is_empty() {
            continue;
        }

        let fields = parse_csv_line(line, ',');
        let mut record = Map::new();
        for (i, header) in headers.iter().enumerate() {
            let cell = fields.get(i).cloned().unwrap_or_default();
            // All cells stay text; type recovery is the inferencer's job.
            record.insert(header.clone(), Value::String(cell));
        }
        records.push(Value::Object(record));
    }

    Ok(records)
}

/// Parse a CSV line into fields, honoring quotes and escaped quotes.
fn parse_csv_line(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '"' {
            if in_quotes {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                in_quotes = true;
            }
        } else if c == delimiter && !in_quotes {
            fields.push(current.trim().to_string());
            current = String::new();
        } else {
            current.push(c);
        }
    }

    fields.push(current.trim().to_string());
    fields
}

/// Select subtrees of a document with a JSONPath expression.
pub fn select_records(value: &Value, path: &str) -> Result<Vec<Value>> {
    use jsonpath_rust::JsonPath;

    let jp = JsonPath::try_from(path).map_err(|e| Error::JsonPath {
        message: format!("Invalid JSONPath: {e}"),
    })?;

    match jp.find(value) {
        Value::Array(matches) => Ok(matches),
        Value::Null => Ok(vec![]),
        other => Ok(vec![other]),
    }
}
