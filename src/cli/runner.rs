//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, InputArgs};
use crate::coerce::{Coercer, OnInvalid};
use crate::error::{Error, Result};
use crate::load::records_from_path;
use crate::schema::{SchemaInferrer, SchemaNode};
use crate::types::KeyConvention;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Infer {
                input,
                record_level,
            } => self.infer(input, record_level.as_deref()),
            Commands::Clean {
                input,
                schema,
                on_invalid,
            } => self.clean(input, schema, *on_invalid),
        }
    }

    fn infer(&self, input: &InputArgs, record_level: Option<&str>) -> Result<()> {
        let records = records_from_path(&input.data, input.format, input.skip)?;
        debug!("inferring schema from {} records", records.len());

        let mut inferrer = SchemaInferrer::new().with_key_convention(key_convention(input));
        if let Some(path) = record_level {
            inferrer = inferrer.with_record_level(path);
        }
        let schema = inferrer.infer(&records)?;

        println!("{}", to_indented_json(&schema.to_json(), self.cli.indent)?);
        Ok(())
    }

    fn clean(&self, input: &InputArgs, schema_path: &Path, on_invalid: OnInvalid) -> Result<()> {
        let schema = load_schema(schema_path)?;
        let records = records_from_path(&input.data, input.format, input.skip)?;
        debug!("coercing {} records", records.len());

        let coercer = Coercer::new(on_invalid).with_key_convention(key_convention(input));
        let cleaned = records
            .iter()
            .map(|record| coercer.coerce(record, &schema))
            .collect::<Result<Vec<Value>>>()?;

        println!(
            "{}",
            to_indented_json(&Value::Array(cleaned), self.cli.indent)?
        );
        Ok(())
    }
}

fn key_convention(input: &InputArgs) -> KeyConvention {
    KeyConvention {
        lower: input.lower,
        replace_special: input.replace_special.clone(),
        snake_case: input.snake_case,
    }
}

/// Load a schema node from a JSON file
pub fn load_schema(path: impl AsRef<Path>) -> Result<SchemaNode> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| Error::io(path.display().to_string(), e))?;
    Ok(serde_json::from_str(&content)?)
}

/// Serialize a value as JSON with the requested indentation width.
fn to_indented_json(value: &Value, indent: usize) -> Result<String> {
    if indent == 0 {
        return Ok(serde_json::to_string(value)?);
    }
    let indent_str = " ".repeat(indent);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent_str.as_bytes());
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    serde::Serialize::serialize(value, &mut serializer)?;
    Ok(String::from_utf8(out).expect("serde_json emits valid UTF-8"))
}
