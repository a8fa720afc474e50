//! IR catalogue for the builtin `estree` grammar.
//!
//! Starts from the schema synthesized from the grammar table, then redefines
//! the types the IR shapes differently:
//! - identifiers split by position (`IdentifierExpression`,
//!   `IdentifierPattern`, `PropertyName`)
//! - member expressions and object properties split by their flags
//! - rest elements lifted out of parameter and pattern lists
//! - `freeVariables` on every expression, `bindingNames` on patterns
//!
//! Grammar types the catalogue does not touch keep their synthesized shape.

mod expressions;
mod objects;
mod patterns;
mod statements;


use serde_json::{Map, Value};

use crate::attrs::{BINDING_NAMES, Computed, FREE_VARIABLES, SetExpr};
use crate::schema::{FieldDescriptor, Primitive, Registry, SchemaBuilder, SchemaError, TypeId};
use crate::synthesize::{SynthesisOptions, synthesize};
use crate::translate::is_rest;

/// The grammar schema alone, without IR overrides.
pub fn synthesized_registry() -> Result<Registry, SchemaError> {
    let mut builder = SchemaBuilder::new();
    synthesize(treecast_langs::estree(), &mut builder, &SynthesisOptions::default())?;
    builder.finish()
}

/// The full IR catalogue.
pub fn registry() -> Result<Registry, SchemaError> {
    let mut builder = SchemaBuilder::new();
    synthesize(treecast_langs::estree(), &mut builder, &SynthesisOptions::default())?;

    let common = Common::new(&mut builder);
    expressions::define(&mut builder, &common);
    objects::define(&mut builder, &common);
    patterns::define(&mut builder, &common);
    statements::define(&mut builder, &common);

    builder.finish()
}

/// Types every part of the catalogue refers to.
pub(crate) struct Common {
    pub string: TypeId,
    pub number: TypeId,
    pub boolean: TypeId,
    pub names: TypeId,
    pub expression: TypeId,
    pub pattern: TypeId,
    pub statement: TypeId,
}

impl Common {
    fn new(builder: &mut SchemaBuilder) -> Self {
        Self {
            string: builder.primitive(Primitive::String),
            number: builder.primitive(Primitive::Number),
            boolean: builder.primitive(Primitive::Boolean),
            names: builder.string_set(),
            expression: builder.declare("Expression"),
            pattern: builder.declare("Pattern"),
            statement: builder.declare("Statement"),
        }
    }

    pub fn free_variables(&self, expr: SetExpr) -> FieldDescriptor {
        FieldDescriptor::computed(FREE_VARIABLES, self.names, expr.build())
    }

    pub fn no_free_variables(&self) -> FieldDescriptor {
        FieldDescriptor::computed(FREE_VARIABLES, self.names, Computed::empty_set())
    }

    pub fn binding_names(&self, expr: SetExpr) -> FieldDescriptor {
        FieldDescriptor::computed(BINDING_NAMES, self.names, expr.build())
    }

    /// A boolean the source pattern already pins down.
    pub fn flag(&self, name: &str, value: bool) -> FieldDescriptor {
        FieldDescriptor::computed(name, self.boolean, Computed::always(value.into()))
    }
}

/// Union of an attribute over the listed fields.
pub(crate) fn union_of(attribute: &str, fields: &[&str]) -> SetExpr {
    fields
        .iter()
        .fold(SetExpr::new(), |expr, field| expr.take(field, attribute))
}

pub(crate) fn free_in(fields: &[&str]) -> SetExpr {
    union_of(FREE_VARIABLES, fields)
}

/// Extraction of the trailing rest element of the `key` array, or `null`.
pub(crate) fn rest_of(key: &'static str) -> impl Fn(&Map<String, Value>) -> Value + Send + Sync {
    move |record| match record.get(key) {
        Some(Value::Array(items)) => items
            .last()
            .filter(|last| is_rest(last))
            .cloned()
            .unwrap_or(Value::Null),
        _ => Value::Null,
    }
}
