//! Conservative schema merging
//!
//! Combines the provisional schema from one record with the schema
//! accumulated over prior records, widening types where records disagree.
//! Both functions are pure: they return freshly owned nodes and never alias
//! or mutate their inputs.

use super::types::{SchemaNode, TypeList, TypeName};
use crate::error::{Error, Result};
use crate::types::NodePath;
use std::collections::BTreeMap;

/// One step of the left fold over per-record schemas.
///
/// `None` on either side means "no evidence" and yields the other side. For
/// two present root schemas the property key set is the union: a key seen
/// only in the accumulated (left) schema is paired with itself and survives.
pub fn merge_records(
    prev: Option<SchemaNode>,
    next: Option<SchemaNode>,
) -> Result<Option<SchemaNode>> {
    let (a, mut out) = match (prev, next) {
        (None, next) => return Ok(next),
        (prev, None) => return Ok(prev),
        (Some(a), Some(b)) => (a, b),
    };

    let mut out_props = out.properties.take().unwrap_or_default();
    if let Some(a_props) = &a.properties {
        for (key, a_node) in a_props {
            let path = NodePath::root().key(key);
            let merged = match out_props.get(key) {
                Some(b_node) => merge_nodes(a_node, b_node, &path)?,
                None => a_node.clone(),
            };
            out_props.insert(key.clone(), merged);
        }
    }
    out.properties = Some(out_props);

    Ok(Some(out))
}

/// Merge two nodes describing the same field, keeping the more conservative
/// type.
///
/// Widening rules, in order: null-dominance (only-null evidence defers to
/// the other side), container-kind conflicts are fatal, matching containers
/// recurse into `properties`/`items`, then the scalar lattice widens
/// `{integer, number}` to `number` and every other disagreement (including a
/// format mismatch) to `["null", "string"]`.
///
/// Nested object recursion iterates the right-hand node's key set; a
/// property present only on the left is dropped at this level.
pub fn merge_nodes(a: &SchemaNode, b: &SchemaNode, path: &NodePath) -> Result<SchemaNode> {
    if b.is_null_only() {
        return Ok(a.clone());
    }
    if a.is_null_only() {
        return Ok(b.clone());
    }

    let left = a.primary().unwrap_or(TypeName::Null);
    let right = b.primary().unwrap_or(TypeName::Null);

    // An object in one record and something else in another cannot be
    // reconciled by widening; same for arrays.
    if (left == TypeName::Object) != (right == TypeName::Object)
        || (left == TypeName::Array) != (right == TypeName::Array)
    {
        return Err(Error::type_mismatch(path, left, right));
    }

    let mut out = b.clone();

    if left == TypeName::Object {
        let empty = BTreeMap::new();
        let a_props = a.properties.as_ref().unwrap_or(&empty);
        let b_props = b.properties.as_ref().unwrap_or(&empty);
        let mut merged = BTreeMap::new();
        for (key, b_node) in b_props {
            let child_path = path.key(key);
            let node = match a_props.get(key) {
                Some(a_node) => merge_nodes(a_node, b_node, &child_path)?,
                None => b_node.clone(),
            };
            merged.insert(key.clone(), node);
        }
        out.properties = Some(merged);
    }

    if left == TypeName::Array {
        out.items = match (&a.items, &b.items) {
            (Some(a_items), Some(b_items)) => {
                Some(Box::new(merge_nodes(a_items, b_items, path)?))
            }
            (Some(items), None) | (None, Some(items)) => Some(items.clone()),
            (None, None) => None,
        };
    }

    if left != right || a.format != b.format {
        let numbers = [TypeName::Integer, TypeName::Number];
        if numbers.contains(&left) && numbers.contains(&right) {
            out.type_list = TypeList::nullable(TypeName::Number);
        } else {
            out.type_list = TypeList::nullable(TypeName::String);
            out.format = None;
        }
    }

    Ok(out)
}
