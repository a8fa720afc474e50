//! Grammar field descriptor definitions.

use serde_json::Value;

/// A field validation descriptor, as published by the upstream parser.
///
/// The shapes mirror the validator objects found in the grammar table. The
/// schema synthesizer decides which of them it accepts; this layer only
/// classifies them.
#[derive(Debug, Clone, PartialEq)]
pub enum Descriptor {
    /// `{"type": "string"}` and friends.
    Kind(String),
    /// `{"oneOfNodeTypes": [...]}`.
    OneOfNodeTypes(Vec<String>),
    /// `{"oneOfNodeOrValueTypes": [...]}`.
    OneOfNodeOrValueTypes(Vec<String>),
    /// `{"oneOf": [...]}`, a value enum such as a fixed set of operators.
    OneOf(Vec<Value>),
    /// `{"chainOf": [...]}`.
    ChainOf(Vec<Descriptor>),
    /// `{"each": ...}`, the element descriptor of an array chain.
    Each(Box<Descriptor>),
    /// `{"shapeOf": {...}}`, a free-form nested object shape.
    ShapeOf(Value),
    /// `{}`.
    Empty,
    /// None of the known keys; carries the keys that were present.
    Unrecognized(Vec<String>),
}

impl Descriptor {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Whether this is the `{"type": "array"}` head of an array chain.
    pub fn is_array_kind(&self) -> bool {
        matches!(self, Self::Kind(kind) if kind == "array")
    }
}

/// One field of a grammar node type.
#[derive(Debug, Clone, PartialEq)]
pub struct GrammarField {
    pub name: String,
    /// `None` when the grammar declares the field without a validator.
    pub descriptor: Option<Descriptor>,
    pub optional: bool,
    /// Explicit default literal. A `null` default is indistinguishable from
    /// no default.
    pub default: Option<Value>,
}
