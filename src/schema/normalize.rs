//! Only-null schema cleanup
//!
//! After the fold, a field whose every sample was null (or an array that
//! never showed a non-null element) still has no usable type. This pass
//! substitutes the configured default, `["null", "string"]`, and warns with
//! the path so the gap is visible in logs. Normalizing an already-normalized
//! schema is a no-op.

use super::types::{SchemaNode, TypeName};
use crate::types::NodePath;
use std::collections::BTreeMap;
use tracing::warn;

/// Rewrite only-null nodes to the default type, recursively.
///
/// Pure function: the input is never aliased or mutated.
pub fn normalize(node: &SchemaNode, path: &NodePath) -> SchemaNode {
    let mut out = node.clone();

    match node.primary() {
        Some(TypeName::Object) => {
            let mut properties = BTreeMap::new();
            if let Some(props) = &node.properties {
                for (key, child) in props {
                    properties.insert(key.clone(), normalize(child, &path.key(key)));
                }
            }
            out.properties = Some(properties);
        }
        Some(TypeName::Array) => {
            let no_evidence = match &node.items {
                None => true,
                Some(items) => items.is_null_only(),
            };
            if no_evidence {
                warn!(
                    "{path} is an array without non-null values; \
                     using the default item type [\"null\", \"string\"]"
                );
                out.items = Some(Box::new(SchemaNode::default_node()));
            } else if let Some(items) = &node.items {
                out.items = Some(Box::new(normalize(items, path)));
            }
        }
        _ => {
            if node.is_null_only() {
                warn!(
                    "{path} contained null values only; \
                     using the default type [\"null\", \"string\"]"
                );
                out = SchemaNode::default_node();
            }
        }
    }

    out
}
