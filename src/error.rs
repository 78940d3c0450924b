//! Error types for recast
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! The taxonomy has three tiers: configuration errors and structural
//! mismatches are always fatal, while value-level conversion failures are
//! policy-controlled by the coercion engine (see [`crate::coerce::OnInvalid`]).

use crate::types::NodePath;
use thiserror::Error;

/// The main error type for recast
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors (always fatal)
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Unsupported input format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Multiple types are not supported at {path}")]
    MultipleTypes { path: NodePath },

    #[error("Invalid type in schema: {name} at {path}")]
    InvalidSchemaType { path: NodePath, name: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Structural Mismatch Errors (always fatal)
    // ============================================================================
    #[error("Records disagree in types at {path}: {left} vs {right}")]
    TypeMismatch {
        path: NodePath,
        left: String,
        right: String,
    },

    #[error("Expected an object at {path}, got: {got}")]
    ExpectedObject { path: NodePath, got: String },

    #[error("Expected an array at {path}, got: {got}")]
    ExpectedArray { path: NodePath, got: String },

    // ============================================================================
    // Coercion Errors
    // ============================================================================
    /// Null value against a non-nullable type. Fatal under every policy.
    #[error("Null object given at {path}")]
    NullValue { path: NodePath },

    #[error("Unknown property found at: {path}")]
    UnknownProperty { path: NodePath },

    /// Value-level conversion failure, raised only under the `raise` policy.
    #[error("{message} at {path}")]
    InvalidValue { path: NodePath, message: String },

    #[error("Not in a valid datetime format: '{value}' at {path}")]
    InvalidDatetime { path: NodePath, value: String },

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("JSONPath error: {message}")]
    JsonPath { message: String },

    #[error("CSV parsing error: {message}")]
    CsvParse { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an unsupported format error
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Create a JSONPath error
    pub fn json_path(message: impl Into<String>) -> Self {
        Self::JsonPath {
            message: message.into(),
        }
    }

    /// Create a read error carrying the offending path
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a CSV parsing error
    pub fn csv(message: impl Into<String>) -> Self {
        Self::CsvParse {
            message: message.into(),
        }
    }

    /// Create a type mismatch error between two conflicting primitives
    pub fn type_mismatch(path: &NodePath, left: impl ToString, right: impl ToString) -> Self {
        Self::TypeMismatch {
            path: path.clone(),
            left: left.to_string(),
            right: right.to_string(),
        }
    }

    /// Create a value-level conversion error
    pub fn invalid_value(path: &NodePath, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            path: path.clone(),
            message: message.into(),
        }
    }

    /// Whether the coercion policy may soften this error.
    ///
    /// Configuration and structural errors always propagate; only value-level
    /// conversion failures are subject to `on_invalid`.
    pub fn is_policy_controlled(&self) -> bool {
        matches!(
            self,
            Error::InvalidValue { .. } | Error::InvalidDatetime { .. }
        )
    }
}

/// Result type alias for recast
pub type Result<T> = std::result::Result<T, Error>;
