//! Schema inference from sample records
//!
//! One conservative type signature per field, inferred across many
//! heterogeneous records: each record is inspected in isolation, the
//! per-record schemas are folded through the widening merge, and the result
//! is normalized to remove only-null inferences.

use super::merge::merge_records;
use super::normalize::normalize;
use super::types::{SchemaNode, TypeList, TypeName};
use crate::error::{Error, Result};
use crate::load::select_records;
use crate::types::{KeyConvention, NodePath};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;

/// Loose date-time check: a `YYYY-MM-DD` prefix with year 1900-2099, month
/// 01-12 and day 1-31. Trailing characters (a time-of-day suffix) are
/// permitted; this is deliberately not a full ISO-8601 grammar.
static DATE_TIME_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(19|20)\d\d-(0[1-9]|1[012])-([1-9]|0[1-9]|[12][0-9]|3[01])")
        .expect("date-time pattern is valid")
});

/// Whether a string passes the loose date-time heuristic.
///
/// Used both at inference time (to attach `format: "date-time"`) and at
/// coercion time (to re-validate values against that format).
pub fn looks_like_datetime(s: &str) -> bool {
    DATE_TIME_PREFIX.is_match(s)
}

/// Schema inferrer with configuration options
#[derive(Debug, Clone, Default)]
pub struct SchemaInferrer {
    /// Key-naming convention applied at every nesting level
    keys: KeyConvention,
    /// Optional JSONPath selecting the record subtree inside each document
    record_level: Option<String>,
}

impl SchemaInferrer {
    /// Create a new schema inferrer with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the key-naming convention
    #[must_use]
    pub fn with_key_convention(mut self, keys: KeyConvention) -> Self {
        self.keys = keys;
        self
    }

    /// Descend to this JSONPath inside each document before inferring
    #[must_use]
    pub fn with_record_level(mut self, path: impl Into<String>) -> Self {
        self.record_level = Some(path.into());
        self
    }

    /// Infer one schema from a finite sample of records.
    ///
    /// Folds the per-record schemas left to right, forces the root type to
    /// bare `"object"` (the root record itself is never absent), and
    /// normalizes away only-null inferences.
    pub fn infer(&self, records: &[Value]) -> Result<SchemaNode> {
        let first = records
            .first()
            .ok_or_else(|| Error::config("no records to infer a schema from"))?;
        if !first.is_object() {
            return Err(Error::config("input records must be objects"));
        }

        let mut schema = None;
        for record in records {
            let current = self.infer_record(record)?;
            // Every record must be an object (or pure null, which carries no
            // evidence); an array or scalar root can never reconcile with the
            // accumulated object schema.
            if let Some(node) = &current {
                if !node.is_null_only() && node.primary() != Some(TypeName::Object) {
                    return Err(Error::type_mismatch(
                        &NodePath::root(),
                        TypeName::Object,
                        node.primary().unwrap_or(TypeName::Null),
                    ));
                }
            }
            schema = merge_records(schema, current)?;
        }

        let mut schema = schema
            .ok_or_else(|| Error::config("no fields could be inferred from the sample"))?;
        schema.type_list = TypeList::single(TypeName::Object);

        Ok(normalize(&schema, &NodePath::root()))
    }

    /// Infer a provisional schema from one record.
    ///
    /// Returns `None` for records carrying no type evidence (an empty
    /// object); the fold treats those as absent.
    pub fn infer_record(&self, record: &Value) -> Result<Option<SchemaNode>> {
        match &self.record_level {
            Some(path) => {
                let mut matches = select_records(record, path)?;
                if matches.is_empty() {
                    return Err(Error::json_path(format!(
                        "record level '{path}' matched nothing"
                    )));
                }
                self.infer_value(&matches.remove(0))
            }
            None => self.infer_value(record),
        }
    }

    /// Infer the schema node for one value.
    pub fn infer_value(&self, value: &Value) -> Result<Option<SchemaNode>> {
        let node = match value {
            Value::Null => Some(SchemaNode::null()),
            Value::Object(map) => {
                if map.is_empty() {
                    // An empty object carries no evidence; unlike an empty
                    // array it yields no node at all.
                    None
                } else {
                    let mut properties = BTreeMap::new();
                    for (key, child) in map {
                        if let Some(child_node) = self.infer_value(child)? {
                            properties.insert(self.keys.convert(key), child_node);
                        }
                    }
                    Some(SchemaNode::object(properties))
                }
            }
            Value::Array(elements) => {
                // Only the first element is inspected; element homogeneity
                // is assumed, not verified.
                let items = match elements.first() {
                    Some(first) => self.infer_value(first)?,
                    None => None,
                };
                Some(SchemaNode::array(items))
            }
            Value::Bool(_) => Some(SchemaNode::nullable(TypeName::Boolean)),
            Value::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    Some(SchemaNode::nullable(TypeName::Integer))
                } else {
                    Some(SchemaNode::nullable(TypeName::Number))
                }
            }
            Value::String(s) => Some(infer_string(s)),
        };
        Ok(node)
    }
}

/// Infer the node for a string value, recovering the real type from
/// stringly-typed sources such as CSV cells.
fn infer_string(s: &str) -> SchemaNode {
    let trimmed = s.trim();
    if trimmed.parse::<f64>().is_ok() {
        if trimmed.contains('.') {
            SchemaNode::nullable(TypeName::Number)
        } else if !trimmed.starts_with('0') {
            SchemaNode::nullable(TypeName::Integer)
        } else {
            // A leading zero marks a code such as a zipcode; integer
            // round-tripping would drop the zero.
            SchemaNode::nullable(TypeName::String)
        }
    } else {
        let node = SchemaNode::nullable(TypeName::String);
        if looks_like_datetime(s) {
            node.with_format("date-time")
        } else {
            node
        }
    }
}

/// Infer a schema from sample records with default settings (convenience function)
pub fn infer_schema(records: &[Value]) -> Result<SchemaNode> {
    SchemaInferrer::new().infer(records)
}
