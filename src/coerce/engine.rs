//! Schema-driven value coercion
//!
//! Walks a value tree alongside a schema and casts each value to its
//! declared type, e.g. `{"number": "1.0"}` becomes `{"number": 1.0}`. The
//! schema is read-only; the result is a freshly built tree.

use super::types::OnInvalid;
use crate::error::{Error, Result};
use crate::schema::{looks_like_datetime, SchemaNode, TypeName};
use crate::types::{KeyConvention, NodePath};
use serde_json::{Map, Number, Value};

/// Schema-driven coercion engine
#[derive(Debug, Clone, Default)]
pub struct Coercer {
    policy: OnInvalid,
    keys: KeyConvention,
}

impl Coercer {
    /// Create a coercer with the given invalid-value policy
    pub fn new(policy: OnInvalid) -> Self {
        Self {
            policy,
            keys: KeyConvention::identity(),
        }
    }

    /// Set the key-naming convention.
    ///
    /// Must match the convention used when the schema was inferred, so that
    /// renamed record keys line up with the schema's property names.
    #[must_use]
    pub fn with_key_convention(mut self, keys: KeyConvention) -> Self {
        self.keys = keys;
        self
    }

    /// Coerce one record against a schema.
    pub fn coerce(&self, value: &Value, schema: &SchemaNode) -> Result<Value> {
        self.coerce_node(value, schema, &NodePath::root())
    }

    fn coerce_node(&self, value: &Value, node: &SchemaNode, path: &NodePath) -> Result<Value> {
        let (type_name, nullable) = node.type_list.resolve(path)?;

        if value.is_null() {
            if nullable {
                return Ok(Value::Null);
            }
            // No policy softens a null against a non-nullable field.
            return Err(Error::NullValue { path: path.clone() });
        }

        match type_name {
            TypeName::Object => self.coerce_object(value, node, path),
            TypeName::Array => self.coerce_array(value, node, path),
            TypeName::String => self.coerce_string(value, node.format.as_deref(), path),
            TypeName::Number => self.coerce_number(value, path),
            TypeName::Integer => self.coerce_integer(value, path),
            TypeName::Boolean => self.coerce_boolean(value, path),
            TypeName::Null => Err(Error::InvalidSchemaType {
                path: path.clone(),
                name: TypeName::Null.to_string(),
            }),
        }
    }

    fn coerce_object(&self, value: &Value, node: &SchemaNode, path: &NodePath) -> Result<Value> {
        let map = value.as_object().ok_or_else(|| Error::ExpectedObject {
            path: path.clone(),
            got: type_of(value).to_string(),
        })?;

        let mut cleaned = Map::new();
        for (key, child_value) in map {
            let new_key = self.keys.convert(key);
            let child_path = path.key(&new_key);
            match node.get_property(&new_key) {
                Some(child_node) => {
                    let coerced = self.coerce_node(child_value, child_node, &child_path)?;
                    cleaned.insert(new_key, coerced);
                }
                None => match self.policy {
                    OnInvalid::Raise => {
                        return Err(Error::UnknownProperty { path: child_path });
                    }
                    // Dropped without a trace; the soft policies mask
                    // unknown-property mistakes.
                    OnInvalid::Null | OnInvalid::Force => {}
                },
            }
        }

        Ok(Value::Object(cleaned))
    }

    fn coerce_array(&self, value: &Value, node: &SchemaNode, path: &NodePath) -> Result<Value> {
        let elements = value.as_array().ok_or_else(|| Error::ExpectedArray {
            path: path.clone(),
            got: type_of(value).to_string(),
        })?;

        let Some(items) = &node.items else {
            return match self.policy {
                OnInvalid::Raise => Err(Error::UnknownProperty { path: path.clone() }),
                OnInvalid::Null | OnInvalid::Force => Ok(Value::Array(Vec::new())),
            };
        };

        let mut cleaned = Vec::with_capacity(elements.len());
        for (i, element) in elements.iter().enumerate() {
            let coerced = self.coerce_node(element, items, &path.index(i))?;
            // Null elements are filtered out, unlike object properties.
            if !coerced.is_null() {
                cleaned.push(coerced);
            }
        }

        Ok(Value::Array(cleaned))
    }

    fn coerce_string(
        &self,
        value: &Value,
        format: Option<&str>,
        path: &NodePath,
    ) -> Result<Value> {
        let cleaned = lexical(value);
        if format == Some("date-time") && !looks_like_datetime(&cleaned) {
            return self.invalid(
                Error::InvalidDatetime {
                    path: path.clone(),
                    value: cleaned,
                },
                value,
            );
        }
        Ok(Value::String(cleaned))
    }

    fn coerce_number(&self, value: &Value, path: &NodePath) -> Result<Value> {
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        };

        match parsed.and_then(Number::from_f64) {
            Some(n) => Ok(Value::Number(n)),
            None => self.invalid(
                Error::invalid_value(
                    path,
                    format!("could not convert string to float: '{}'", lexical(value)),
                ),
                value,
            ),
        }
    }

    fn coerce_integer(&self, value: &Value, path: &NodePath) -> Result<Value> {
        let parsed = match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(i)
                } else {
                    // Floating values truncate toward zero.
                    n.as_f64().map(|f| f.trunc() as i64)
                }
            }
            Value::String(s) => s.trim().parse::<i64>().ok(),
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        };

        match parsed {
            Some(i) => Ok(Value::Number(i.into())),
            None => self.invalid(
                Error::invalid_value(
                    path,
                    format!("could not convert string to integer: '{}'", lexical(value)),
                ),
                value,
            ),
        }
    }

    fn coerce_boolean(&self, value: &Value, path: &NodePath) -> Result<Value> {
        match value {
            Value::Bool(b) => Ok(Value::Bool(*b)),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(Value::Bool(true)),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(Value::Bool(false)),
            _ => self.invalid(
                Error::invalid_value(
                    path,
                    format!("{} is not a valid value for boolean type", lexical(value)),
                ),
                value,
            ),
        }
    }

    /// Apply the invalid-value policy to a conversion failure.
    fn invalid(&self, err: Error, value: &Value) -> Result<Value> {
        match self.policy {
            OnInvalid::Raise => Err(err),
            OnInvalid::Null => Ok(Value::Null),
            OnInvalid::Force => Ok(Value::String(lexical(value))),
        }
    }
}

/// Best-effort string rendering of a scalar (or, for containers, compact JSON).
fn lexical(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Human-readable name of a value's runtime type, for error messages.
fn type_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
