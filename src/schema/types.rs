//! Schema node data model
//!
//! The shapes here serialize to JSON-Schema-compatible JSON: a `type` that is
//! either a single name or a `["null", primitive]` pair, plus `format`,
//! `properties` and `items` where applicable.

use crate::error::{Error, Result};
use crate::types::NodePath;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// JSON-Schema primitive type name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeName {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Object,
    Array,
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeName::Null => write!(f, "null"),
            TypeName::Boolean => write!(f, "boolean"),
            TypeName::Integer => write!(f, "integer"),
            TypeName::Number => write!(f, "number"),
            TypeName::String => write!(f, "string"),
            TypeName::Object => write!(f, "object"),
            TypeName::Array => write!(f, "array"),
        }
    }
}

/// A schema node's `type` field: a single name or a list of alternatives.
///
/// Inference only ever produces `Single` or the two-element `["null", p]`
/// pair with null first. Longer lists can enter through externally supplied
/// schema files; [`TypeList::resolve`] rejects them when consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeList {
    Single(TypeName),
    Multiple(Vec<TypeName>),
}

impl TypeList {
    /// A bare, non-nullable type
    pub fn single(name: TypeName) -> Self {
        TypeList::Single(name)
    }

    /// A `["null", name]` pair (null always first)
    pub fn nullable(name: TypeName) -> Self {
        if name == TypeName::Null {
            TypeList::Multiple(vec![TypeName::Null])
        } else {
            TypeList::Multiple(vec![TypeName::Null, name])
        }
    }

    /// The only-null type list `["null"]`
    pub fn null_only() -> Self {
        TypeList::Multiple(vec![TypeName::Null])
    }

    /// Whether null is one of the alternatives
    pub fn is_nullable(&self) -> bool {
        match self {
            TypeList::Single(name) => *name == TypeName::Null,
            TypeList::Multiple(names) => names.contains(&TypeName::Null),
        }
    }

    /// Whether this type carries no evidence beyond null
    pub fn is_null_only(&self) -> bool {
        match self {
            TypeList::Single(name) => *name == TypeName::Null,
            TypeList::Multiple(names) => names.iter().all(|n| *n == TypeName::Null),
        }
    }

    /// The primary (non-null) type, if any
    pub fn primary(&self) -> Option<TypeName> {
        match self {
            TypeList::Single(name) => (*name != TypeName::Null).then_some(*name),
            TypeList::Multiple(names) => names.iter().copied().find(|n| *n != TypeName::Null),
        }
    }

    /// Resolve the declared type for coercion.
    ///
    /// Returns the effective primitive and whether null is permitted. A list
    /// with more than two alternatives is a fatal configuration error
    /// independent of the invalid-value policy. A two-element list without a
    /// leading null resolves to its first entry, non-nullable.
    pub fn resolve(&self, path: &NodePath) -> Result<(TypeName, bool)> {
        match self {
            TypeList::Single(name) => Ok((*name, false)),
            TypeList::Multiple(names) => {
                if names.len() > 2 {
                    return Err(Error::MultipleTypes { path: path.clone() });
                }
                let nullable = names.contains(&TypeName::Null);
                let name = match names.as_slice() {
                    [] => TypeName::Null,
                    [only] => *only,
                    [first, second] => {
                        if *first == TypeName::Null {
                            *second
                        } else {
                            *first
                        }
                    }
                    _ => unreachable!("length checked above"),
                };
                Ok((name, nullable))
            }
        }
    }
}

/// The configured fallback for fields with only-null evidence: `["null", "string"]`
pub fn default_type() -> TypeList {
    TypeList::nullable(TypeName::String)
}

/// Description of the inferred or declared type at one position in a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
    /// Declared type alternatives
    #[serde(rename = "type")]
    pub type_list: TypeList,

    /// Format hint; currently only "date-time"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Child schemas by (normalized) property name, for object nodes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, SchemaNode>>,

    /// Element schema for array nodes; `None` means no element evidence yet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,
}

impl SchemaNode {
    /// A node with the given type list and nothing else
    pub fn with_type(type_list: TypeList) -> Self {
        Self {
            type_list,
            format: None,
            properties: None,
            items: None,
        }
    }

    /// The only-null node produced for a null sample value
    pub fn null() -> Self {
        Self::with_type(TypeList::null_only())
    }

    /// A nullable scalar node
    pub fn nullable(name: TypeName) -> Self {
        Self::with_type(TypeList::nullable(name))
    }

    /// A nullable object node with the given properties
    pub fn object(properties: BTreeMap<String, SchemaNode>) -> Self {
        Self {
            type_list: TypeList::nullable(TypeName::Object),
            format: None,
            properties: Some(properties),
            items: None,
        }
    }

    /// A nullable array node; `items` is `None` when no element was seen
    pub fn array(items: Option<SchemaNode>) -> Self {
        Self {
            type_list: TypeList::nullable(TypeName::Array),
            format: None,
            properties: None,
            items: items.map(Box::new),
        }
    }

    /// The default node substituted for only-null inferences
    pub fn default_node() -> Self {
        Self::with_type(default_type())
    }

    /// Set the format hint
    #[must_use]
    pub fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }

    /// The primary (non-null) type of this node
    pub fn primary(&self) -> Option<TypeName> {
        self.type_list.primary()
    }

    /// Whether this node saw nothing but nulls
    pub fn is_null_only(&self) -> bool {
        self.type_list.is_null_only()
    }

    /// Look up a child schema by property name
    pub fn get_property(&self, name: &str) -> Option<&SchemaNode> {
        self.properties.as_ref().and_then(|props| props.get(name))
    }

    /// Serialize to a JSON value
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    /// Serialize to a pretty JSON string
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
