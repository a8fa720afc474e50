//! JSON deserialization for grammar metadata tables.
//!
//! The table maps each node type name to its alias memberships and its
//! fields. Field validators are loosely-keyed objects; they are classified into
//! [`Descriptor`] here.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use super::types::{Descriptor, GrammarField};

/// Error during grammar parsing.
#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Raw grammar structure matching the metadata table's JSON format.
#[derive(Debug, Clone, Deserialize)]
pub struct RawGrammar {
    pub name: String,
    /// Node types, preserving definition order.
    pub types: IndexMap<String, RawType>,
}

/// Raw node type definition.
#[derive(Debug, Clone, Deserialize)]
pub struct RawType {
    /// Alias groups this type is a member of.
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub fields: IndexMap<String, RawField>,
}

/// Raw field definition.
#[derive(Debug, Clone, Deserialize)]
pub struct RawField {
    #[serde(default)]
    pub validate: Option<RawDescriptor>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub default: Option<Value>,
}

/// Raw validator object. Every known key is optional; unknown keys are kept so
/// that an unrecognized validator can be reported by name.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDescriptor {
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    one_of_node_types: Option<Vec<String>>,
    #[serde(default)]
    one_of_node_or_value_types: Option<Vec<String>>,
    #[serde(default)]
    one_of: Option<Vec<Value>>,
    #[serde(default)]
    chain_of: Option<Vec<RawDescriptor>>,
    #[serde(default)]
    each: Option<Box<RawDescriptor>>,
    #[serde(default)]
    shape_of: Option<Value>,
    #[serde(flatten)]
    other: IndexMap<String, Value>,
}

impl RawGrammar {
    /// Parse a grammar table from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, GrammarError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl RawType {
    /// Fields in declaration order, with their validators classified.
    pub fn grammar_fields(&self) -> Vec<GrammarField> {
        self.fields
            .iter()
            .map(|(name, raw)| GrammarField {
                name: name.clone(),
                descriptor: raw.validate.clone().map(Descriptor::from),
                optional: raw.optional,
                default: raw.default.clone().filter(|v| !v.is_null()),
            })
            .collect()
    }
}

impl From<RawDescriptor> for Descriptor {
    fn from(raw: RawDescriptor) -> Self {
        if let Some(chain) = raw.chain_of {
            return Descriptor::ChainOf(chain.into_iter().map(Into::into).collect());
        }
        if let Some(kind) = raw.kind {
            return Descriptor::Kind(kind);
        }
        if let Some(names) = raw.one_of_node_types {
            return Descriptor::OneOfNodeTypes(names);
        }
        if let Some(names) = raw.one_of_node_or_value_types {
            return Descriptor::OneOfNodeOrValueTypes(names);
        }
        if let Some(values) = raw.one_of {
            return Descriptor::OneOf(values);
        }
        if let Some(shape) = raw.shape_of {
            return Descriptor::ShapeOf(shape);
        }
        if let Some(each) = raw.each {
            return Descriptor::Each(Box::new(Descriptor::from(*each)));
        }
        if raw.other.is_empty() {
            Descriptor::Empty
        } else {
            Descriptor::Unrecognized(raw.other.into_keys().collect())
        }
    }
}
