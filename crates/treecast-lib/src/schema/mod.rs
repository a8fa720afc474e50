//! Target type model.
//!
//! Types are built in two phases through [`SchemaBuilder`]: names are declared
//! first and receive a stable [`TypeId`], bodies are attached later (and may be
//! replaced), then [`SchemaBuilder::finish`] validates everything and freezes
//! it into a [`Registry`].

mod builder;
mod dump;
mod error;
mod registry;

#[cfg(test)]
mod registry_tests;

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::attrs::Computed;
use crate::ir::IrValue;

pub use builder::SchemaBuilder;
pub use error::SchemaError;
pub use registry::Registry;

/// Stable handle of a declared type. Index into the registry.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TypeId(pub(crate) u32);

impl TypeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A declared type: its name and body.
#[derive(Debug, Clone)]
pub struct TypeDef {
    pub name: String,
    pub shape: Shape,
    /// Structural types (arrays, nullables, generated unions) are named after
    /// their contents and are not listed on their own in dumps.
    pub structural: bool,
}

/// Type body. Closed set: the translator matches on it exhaustively.
#[derive(Debug, Clone)]
pub enum Shape {
    Primitive(Primitive),
    Array(TypeId),
    Nullable(TypeId),
    StringSet,
    Product(ProductSchema),
    Union(UnionSchema),
    Inspect(InspectSchema),
}

impl Shape {
    pub fn as_product(&self) -> Option<&ProductSchema> {
        match self {
            Self::Product(product) => Some(product),
            _ => None,
        }
    }

    pub fn as_union(&self) -> Option<&UnionSchema> {
        match self {
            Self::Union(union) => Some(union),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Primitive {
    String,
    Number,
    Boolean,
    Null,
    Any,
}

impl Primitive {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "string" => Self::String,
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "null" => Self::Null,
            "any" => Self::Any,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Any => "any",
        }
    }

    /// Primitive matching the runtime kind of a JSON literal.
    pub fn of_literal(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) | Value::Object(_) => Self::Any,
        }
    }

    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Null => value.is_null(),
            Self::Any => true,
        }
    }

    pub fn accepts_ir(self, value: &IrValue) -> bool {
        match self {
            Self::String => matches!(value, IrValue::String(_)),
            Self::Number => matches!(value, IrValue::Number(_)),
            Self::Boolean => matches!(value, IrValue::Bool(_)),
            Self::Null => value.is_null(),
            Self::Any => true,
        }
    }
}

// ============================================================================
// Products
// ============================================================================

/// What a source record must look like to be read as a given product.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcePattern {
    /// Required value of the source `type` field.
    pub type_name: String,
    /// Further fields that must hold exactly these values.
    pub literals: Vec<(String, Value)>,
}

impl SourcePattern {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            literals: Vec::new(),
        }
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.literals.push((field.into(), value.into()));
        self
    }
}

#[derive(Debug, Clone)]
pub struct ProductSchema {
    pub source: SourcePattern,
    pub fields: Vec<FieldDescriptor>,
    /// Computed fields in evaluation order. Filled by `finish`.
    pub(crate) plan: Vec<ComputeStep>,
}

/// One computed field and the positions of its dependencies.
#[derive(Debug, Clone)]
pub(crate) struct ComputeStep {
    pub field: usize,
    pub dependencies: Vec<usize>,
}

impl ProductSchema {
    pub fn new(source: SourcePattern, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            source,
            fields,
            plan: Vec::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of computed fields in the order they are evaluated.
    pub fn evaluation_order(&self) -> impl Iterator<Item = &str> {
        self.plan
            .iter()
            .map(|step| self.fields[step.field].name.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: String,
    pub ty: TypeId,
    pub population: Population,
    pub source: FieldSource,
}

/// How a field gets its value. Exactly one mode per field.
#[derive(Debug, Clone)]
pub enum Population {
    /// Translated from the source; absence is an error unless the type
    /// accepts it.
    Required,
    /// Translated from the source; absent or `null` takes this value.
    Default(IrValue),
    /// Derived from sibling fields after they are populated.
    Computed(Computed),
}

/// Where a non-computed field reads from.
#[derive(Debug, Clone)]
pub enum FieldSource {
    Key(String),
    Extract(Extraction),
}

pub type ExtractFn = Arc<dyn Fn(&Map<String, Value>) -> Value + Send + Sync>;

/// A value transform over the whole source record.
#[derive(Clone)]
pub struct Extraction {
    pub keys: Vec<String>,
    extract: ExtractFn,
}

impl Extraction {
    pub fn new<F>(keys: Vec<String>, extract: F) -> Self
    where
        F: Fn(&Map<String, Value>) -> Value + Send + Sync + 'static,
    {
        Self {
            keys,
            extract: Arc::new(extract),
        }
    }

    pub fn apply(&self, record: &Map<String, Value>) -> Value {
        (self.extract)(record)
    }

    /// Path step under which the extracted value is reported.
    pub fn path_key(&self) -> String {
        self.keys.join(",")
    }
}

impl fmt::Debug for Extraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extraction")
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

impl FieldDescriptor {
    fn new(name: impl Into<String>, ty: TypeId, population: Population) -> Self {
        let name = name.into();
        Self {
            source: FieldSource::Key(name.clone()),
            name,
            ty,
            population,
        }
    }

    pub fn required(name: impl Into<String>, ty: TypeId) -> Self {
        Self::new(name, ty, Population::Required)
    }

    pub fn with_default(name: impl Into<String>, ty: TypeId, value: IrValue) -> Self {
        Self::new(name, ty, Population::Default(value))
    }

    pub fn computed(name: impl Into<String>, ty: TypeId, computed: Computed) -> Self {
        Self::new(name, ty, Population::Computed(computed))
    }

    /// Read from a differently-named source key.
    pub fn from_key(mut self, key: impl Into<String>) -> Self {
        self.source = FieldSource::Key(key.into());
        self
    }

    /// Read through a transform over the listed source keys.
    pub fn extract<F>(mut self, keys: &[&str], extract: F) -> Self
    where
        F: Fn(&Map<String, Value>) -> Value + Send + Sync + 'static,
    {
        let keys = keys.iter().map(|k| (*k).to_owned()).collect();
        self.source = FieldSource::Extract(Extraction::new(keys, extract));
        self
    }

    pub fn is_computed(&self) -> bool {
        matches!(self.population, Population::Computed(_))
    }

    pub fn computed_spec(&self) -> Option<&Computed> {
        match &self.population {
            Population::Computed(computed) => Some(computed),
            _ => None,
        }
    }
}

// ============================================================================
// Unions and inspect shapes
// ============================================================================

#[derive(Debug, Clone)]
pub struct UnionSchema {
    /// Resolution order.
    pub alternatives: Vec<TypeId>,
}

/// Bottom-up choice: translate `field` as `probe`, then construct the target
/// of the first arm whose test type the result belongs to.
#[derive(Debug, Clone)]
pub struct InspectSchema {
    pub field: String,
    pub probe: TypeId,
    pub arms: Vec<InspectArm>,
}

#[derive(Debug, Clone, Copy)]
pub struct InspectArm {
    pub test: TypeId,
    pub target: TypeId,
}
