//! Translation failures.

use std::fmt;

use serde_json::Value;
use treecast_core::Path;

/// What kind of failure a [`TranslationError`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A value did not have the expected shape.
    Mismatch,
    /// No alternative of a union accepted the value.
    UnionExhausted,
}

/// What the failed step was looking for.
#[derive(Debug, Clone, PartialEq)]
pub enum Expected {
    Type(String),
    /// A required literal field value of a source pattern.
    Literal(Value),
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(name) => write!(f, "type `{name}`"),
            Self::Literal(value) => write!(f, "`{value}`"),
        }
    }
}

/// Compact summary of the offending source value.
#[derive(Debug, Clone, PartialEq)]
pub enum Found {
    Missing,
    /// A tagged record, summarized by its `type`.
    Node(String),
    Value(Value),
}

impl Found {
    pub fn of(value: Option<&Value>) -> Self {
        let Some(value) = value else {
            return Self::Missing;
        };
        match value.get("type").and_then(Value::as_str) {
            Some(type_name) if value.is_object() => Self::Node(type_name.to_owned()),
            _ => Self::Value(value.clone()),
        }
    }
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("undefined"),
            Self::Node(type_name) => write!(f, "[Node {type_name}]"),
            Self::Value(Value::String(s)) => f.write_str(s),
            Self::Value(value) => write!(f, "{value}"),
        }
    }
}

/// First mismatch found in a source tree. Immutable once raised.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("expected {expected} at `{path}`, but found: {found}")]
pub struct TranslationError {
    pub kind: ErrorKind,
    pub expected: Expected,
    pub path: Path,
    pub found: Found,
}

impl TranslationError {
    pub fn mismatch(expected: Expected, path: &Path, value: Option<&Value>) -> Self {
        Self {
            kind: ErrorKind::Mismatch,
            expected,
            path: path.clone(),
            found: Found::of(value),
        }
    }

    pub fn exhausted(type_name: &str, path: &Path, value: Option<&Value>) -> Self {
        Self {
            kind: ErrorKind::UnionExhausted,
            expected: Expected::Type(type_name.to_owned()),
            path: path.clone(),
            found: Found::of(value),
        }
    }
}
