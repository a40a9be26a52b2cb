//! Shared types for the datakit utility crates.
//!
//! Everything here is plain data: the error taxonomy, the transformer
//! configuration, the search pattern accepted by `replace_all`, and the
//! conversion trait that lets date helpers accept loosely typed input.

pub mod calendar;
pub mod config;
pub mod pattern;

use serde_json::Value;
use thiserror::Error;

pub use calendar::AsCalendarDate;
pub use config::{DEFAULT_ELLIPSIS, DEFAULT_MAX_DEPTH, ELLIPSIS_ENV, MAX_DEPTH_ENV, TransformerConfig};
pub use pattern::SearchPattern;

/// Errors surfaced by the few operations that can fail loudly.
///
/// Type mismatches are never errors; they pass the input through. Only
/// structures that cannot be copied faithfully and malformed configuration
/// end up here.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransformError {
    /// The input cannot be represented as a detached data tree.
    #[error("unsupported structure: {reason}")]
    UnsupportedStructure { reason: String },
    /// A configuration value could not be interpreted.
    #[error("invalid configuration for {name}: {reason}")]
    InvalidConfig { name: String, reason: String },
}

impl TransformError {
    pub fn unsupported(reason: impl Into<String>) -> Self {
        Self::UnsupportedStructure { reason: reason.into() }
    }
}

/// Human-readable name of a JSON value's kind, used in diagnostics.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn value_kind_names_every_variant() {
        assert_eq!(value_kind(&Value::Null), "null");
        assert_eq!(value_kind(&json!(true)), "boolean");
        assert_eq!(value_kind(&json!(1.5)), "number");
        assert_eq!(value_kind(&json!("x")), "string");
        assert_eq!(value_kind(&json!([1])), "array");
        assert_eq!(value_kind(&json!({"a": 1})), "object");
    }

    #[test]
    fn unsupported_error_renders_reason() {
        let error = TransformError::unsupported("nesting deeper than 4 levels");
        assert_eq!(error.to_string(), "unsupported structure: nesting deeper than 4 levels");
    }
}
