//! Intermediate representation values.
//!
//! IR trees are immutable once built. Plural fields use persistent
//! collections, so copying a value shares structure instead of cloning it.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::schema::TypeId;

/// A translated value.
#[derive(Debug, Clone, PartialEq)]
pub enum IrValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// Opaque JSON carried through an `any` field.
    Any(Value),
    List(im::Vector<IrValue>),
    StringSet(im::OrdSet<String>),
    Node(Arc<IrNode>),
}

/// A constructed product.
#[derive(Debug, Clone, PartialEq)]
pub struct IrNode {
    pub type_id: TypeId,
    pub type_name: String,
    /// Field values in schema order.
    pub fields: IndexMap<String, IrValue>,
    pub metadata: Option<SourceMetadata>,
}

impl IrValue {
    /// Convert a JSON literal. Arrays become lists; objects are kept opaque.
    pub fn from_literal(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => Self::Number(n.clone()),
            Value::String(s) => Self::String(s.clone()),
            Value::Array(items) => Self::List(items.iter().map(Self::from_literal).collect()),
            Value::Object(_) => Self::Any(value.clone()),
        }
    }

    pub fn string_set<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::StringSet(names.into_iter().map(Into::into).collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_node(&self) -> Option<&IrNode> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&im::Vector<IrValue>> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_string_set(&self) -> Option<&im::OrdSet<String>> {
        match self {
            Self::StringSet(set) => Some(set),
            _ => None,
        }
    }

    /// Short label for messages: the node type, or the value kind.
    pub fn kind_name(&self) -> &str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Any(_) => "any",
            Self::List(_) => "array",
            Self::StringSet(_) => "StringSet",
            Self::Node(node) => &node.type_name,
        }
    }

    /// Render back to JSON. Nodes carry their IR type under `type`; string
    /// sets become sorted arrays.
    pub fn to_json(&self, include_metadata: bool) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::String(s) => Value::String(s.clone()),
            Self::Any(value) => value.clone(),
            Self::List(items) => Value::Array(
                items
                    .iter()
                    .map(|item| item.to_json(include_metadata))
                    .collect(),
            ),
            Self::StringSet(set) => Value::Array(set.iter().cloned().map(Value::String).collect()),
            Self::Node(node) => node.to_json(include_metadata),
        }
    }
}

impl IrNode {
    pub fn get(&self, field: &str) -> Option<&IrValue> {
        self.fields.get(field)
    }

    pub fn to_json(&self, include_metadata: bool) -> Value {
        let mut object = Map::new();
        object.insert("type".into(), Value::String(self.type_name.clone()));
        for (name, value) in &self.fields {
            object.insert(name.clone(), value.to_json(include_metadata));
        }
        if include_metadata
            && let Some(metadata) = &self.metadata
            && let Ok(Value::Object(extra)) = serde_json::to_value(metadata)
        {
            object.extend(extra);
        }
        Value::Object(object)
    }
}

impl From<bool> for IrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for IrValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for IrValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<IrNode> for IrValue {
    fn from(node: IrNode) -> Self {
        Self::Node(Arc::new(node))
    }
}

// ============================================================================
// Source metadata
// ============================================================================

/// Source-position data copied from a parser node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leading_comments: Option<Vec<Comment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_comments: Option<Vec<Comment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailing_comments: Option<Vec<Comment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<SourceLocation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "type")]
    pub kind: CommentKind,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<SourceLocation>,
}

/// Anything not tagged `CommentBlock` reads as a line comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum CommentKind {
    #[serde(rename = "CommentBlock")]
    Block,
    #[serde(rename = "CommentLine")]
    Line,
}

impl From<String> for CommentKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "CommentBlock" => Self::Block,
            _ => Self::Line,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub start: Position,
    pub end: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl SourceMetadata {
    /// Read metadata off a source record, key by key. A malformed entry is
    /// dropped on its own; `None` when nothing usable is left.
    pub fn from_source(record: &Map<String, Value>) -> Option<Self> {
        let metadata = Self {
            leading_comments: metadata_entry(record, "leadingComments"),
            inner_comments: metadata_entry(record, "innerComments"),
            trailing_comments: metadata_entry(record, "trailingComments"),
            start: metadata_entry(record, "start"),
            end: metadata_entry(record, "end"),
            loc: metadata_entry(record, "loc"),
        };
        (metadata != Self::default()).then_some(metadata)
    }
}

fn metadata_entry<T: DeserializeOwned>(record: &Map<String, Value>, key: &str) -> Option<T> {
    let value = record.get(key).filter(|v| !v.is_null())?;
    match T::deserialize(value) {
        Ok(entry) => Some(entry),
        Err(err) => {
            tracing::debug!(key, %err, "ignoring malformed source metadata");
            None
        }
    }
}
