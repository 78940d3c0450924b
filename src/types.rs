//! Common types used throughout recast
//!
//! This module contains shared type definitions used across both the
//! inference and coercion pipelines: the key-naming convention applied to
//! record fields, and the breadcrumb path attached to errors and warnings.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Characters outside `[ A-Za-z0-9_]`, targeted by `replace_special`.
static SPECIAL_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^ a-zA-Z0-9_]").expect("special character pattern is valid")
});

// ============================================================================
// Key Convention
// ============================================================================

/// Key-normalization convention applied to record field names.
///
/// The same convention must be used when inferring a schema and when coercing
/// records against it, so that coerced record keys match the schema's
/// property names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyConvention {
    /// Convert keys to lower case
    #[serde(default)]
    pub lower: bool,
    /// Substitute this string for any character outside `[ A-Za-z0-9_]`
    #[serde(default)]
    pub replace_special: Option<String>,
    /// Trim the key and replace spaces with underscores
    #[serde(default)]
    pub snake_case: bool,
}

impl KeyConvention {
    /// A convention that leaves keys untouched
    pub fn identity() -> Self {
        Self::default()
    }

    /// Apply the convention to one key.
    ///
    /// Transforms apply in order: lower-casing, special-character
    /// substitution, snake-casing.
    pub fn convert(&self, key: &str) -> String {
        let mut new_key = key.to_string();
        if self.lower {
            new_key = new_key.to_lowercase();
        }
        if let Some(sub) = &self.replace_special {
            new_key = SPECIAL_CHARS
                .replace_all(&new_key, NoExpand(sub.as_str()))
                .into_owned();
        }
        if self.snake_case {
            new_key = new_key.trim().replace(' ', "_");
        }
        new_key
    }

    /// Whether this convention changes any key at all
    pub fn is_identity(&self) -> bool {
        !self.lower && self.replace_special.is_none() && !self.snake_case
    }
}

// ============================================================================
// Node Path
// ============================================================================

/// One step into a value tree: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object property name
    Key(String),
    /// Array element index
    Index(usize),
}

/// Immutable breadcrumb locating a node inside a record or schema.
///
/// Extending a path returns a new value; the recursion never mutates a
/// shared path, so error context is always accurate for the frame that
/// produced it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodePath {
    segments: Vec<PathSegment>,
}

impl NodePath {
    /// The path of the record root, rendered as `$`
    pub fn root() -> Self {
        Self::default()
    }

    /// Extend with an object key
    #[must_use]
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.into()));
        Self { segments }
    }

    /// Extend with an array index
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Whether this is the root path
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The path segments, outermost first
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for segment in &self.segments {
            match segment {
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(false, None, false, "First Name!", "First Name!" ; "identity")]
    #[test_case(true, None, false, "First Name!", "first name!" ; "lower only")]
    #[test_case(false, Some("_"), false, "First Name!", "First Name_" ; "replace special")]
    #[test_case(false, None, true, " First Name ", "First_Name" ; "snake case trims")]
    #[test_case(true, Some("_"), true, "First Name!", "first_name_" ; "all together")]
    #[test_case(false, Some(""), false, "a-b.c", "abc" ; "replace with empty")]
    fn test_convert_key(
        lower: bool,
        replace_special: Option<&str>,
        snake_case: bool,
        input: &str,
        expected: &str,
    ) {
        let convention = KeyConvention {
            lower,
            replace_special: replace_special.map(String::from),
            snake_case,
        };
        assert_eq!(convention.convert(input), expected);
    }

    #[test]
    fn test_underscore_and_space_survive_replace() {
        let convention = KeyConvention {
            lower: false,
            replace_special: Some("_".to_string()),
            snake_case: false,
        };
        assert_eq!(convention.convert("a_b c"), "a_b c");
    }

    #[test]
    fn test_path_display() {
        let path = NodePath::root();
        assert_eq!(path.to_string(), "$");

        let path = path.key("items").index(0).key("id");
        assert_eq!(path.to_string(), "$.items[0].id");
    }

    #[test]
    fn test_path_extension_does_not_mutate() {
        let base = NodePath::root().key("a");
        let _child = base.key("b");
        assert_eq!(base.to_string(), "$.a");
    }
}
