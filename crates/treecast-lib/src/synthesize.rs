//! Schema synthesis from grammar metadata.
//!
//! Every grammar node type becomes a product whose source pattern is the type
//! name itself; every alias group becomes a union over its members. Field
//! types come from the validator descriptors.

use treecast_core::{Descriptor, Grammar, GrammarField};

use crate::ir::IrValue;
use crate::schema::{
    FieldDescriptor, Primitive, ProductSchema, SchemaBuilder, SchemaError, SourcePattern, TypeId,
};

/// Knobs for [`synthesize`].
#[derive(Debug, Clone, Default)]
pub struct SynthesisOptions {
    /// `(type, field)` pairs to leave out of the synthesized products.
    pub ignored_fields: Vec<(String, String)>,
}

impl SynthesisOptions {
    pub fn ignore(mut self, type_name: impl Into<String>, field: impl Into<String>) -> Self {
        self.ignored_fields.push((type_name.into(), field.into()));
        self
    }

    fn is_ignored(&self, type_name: &str, field: &str) -> bool {
        self.ignored_fields
            .iter()
            .any(|(t, f)| t == type_name && f == field)
    }
}

/// Declare and define every grammar type in `builder`.
///
/// Types the builder already knows keep their ids; their bodies are replaced.
/// Callers layer hand-written types on top by redefining afterwards.
pub fn synthesize<G: Grammar>(
    grammar: G,
    builder: &mut SchemaBuilder,
    options: &SynthesisOptions,
) -> Result<(), SchemaError> {
    let names = grammar.type_names();
    for name in &names {
        builder.declare(*name);
    }

    let mut synth = Synthesizer {
        grammar: &grammar,
        builder,
    };

    for name in names {
        if let Some(members) = grammar.alias_members_of(name) {
            let alternatives = members.iter().map(|m| synth.builder.declare(m.as_str())).collect();
            let id = synth.builder.declare(name);
            synth.builder.define_union(id, alternatives);
            tracing::debug!(alias = name, members = members.len(), "synthesized union");
            continue;
        }

        let Some(fields) = grammar.fields_of(name) else {
            continue;
        };
        let mut descriptors = Vec::with_capacity(fields.len());
        for field in fields {
            if options.is_ignored(name, &field.name) {
                tracing::trace!(type_name = name, field = %field.name, "ignored field");
                continue;
            }
            descriptors.push(synth.field(name, field)?);
        }

        let id = synth.builder.declare(name);
        let count = descriptors.len();
        synth
            .builder
            .define_product(id, ProductSchema::new(SourcePattern::new(name), descriptors));
        tracing::debug!(type_name = name, fields = count, "synthesized product");
    }

    Ok(())
}

struct Synthesizer<'a, G: Grammar> {
    grammar: &'a G,
    builder: &'a mut SchemaBuilder,
}

impl<G: Grammar> Synthesizer<'_, G> {
    fn field(&mut self, type_name: &str, field: &GrammarField) -> Result<FieldDescriptor, SchemaError> {
        let Some(descriptor) = &field.descriptor else {
            return Err(SchemaError::MissingDescriptor {
                type_name: type_name.to_owned(),
                field: field.name.clone(),
            });
        };

        let base = self
            .resolve(descriptor)
            .map_err(|failure| failure.into_error(type_name, &field.name))?;

        let literal = field.default.as_ref().map(IrValue::from_literal);
        Ok(match (field.optional, literal) {
            (true, default) => {
                let ty = self.builder.nullable(base);
                FieldDescriptor::with_default(&field.name, ty, default.unwrap_or(IrValue::Null))
            }
            (false, Some(default)) => FieldDescriptor::with_default(&field.name, base, default),
            (false, None) => FieldDescriptor::required(&field.name, base),
        })
    }

    fn resolve(&mut self, descriptor: &Descriptor) -> Result<TypeId, Failure> {
        match descriptor {
            Descriptor::Kind(kind) => self.kind(kind),
            Descriptor::OneOfNodeTypes(names) => {
                if names.is_empty() {
                    return Err(Failure::Unsupported("empty node type list".into()));
                }
                let members = names
                    .iter()
                    .map(|name| self.reference(name))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(self.builder.union_of(members))
            }
            Descriptor::OneOfNodeOrValueTypes(names) => {
                if names.is_empty() {
                    return Err(Failure::Unsupported("empty node or value type list".into()));
                }
                let members = names
                    .iter()
                    .map(|name| {
                        if name.chars().any(|c| c.is_ascii_uppercase()) {
                            self.reference(name)
                        } else {
                            self.kind(name)
                        }
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(self.builder.union_of(members))
            }
            Descriptor::OneOf(values) => match values.first() {
                Some(first) => Ok(self.builder.primitive(Primitive::of_literal(first))),
                None => Err(Failure::Unsupported("empty value enum".into())),
            },
            Descriptor::ChainOf(chain) => self.chain(chain),
            Descriptor::ShapeOf(_) => Ok(self.builder.primitive(Primitive::Any)),
            Descriptor::Each(_) => Err(Failure::Unsupported("`each` outside an array chain".into())),
            Descriptor::Empty => Err(Failure::Unsupported("empty validator".into())),
            Descriptor::Unrecognized(keys) => Err(Failure::Unsupported(format!(
                "unrecognized keys: {}",
                keys.join(", ")
            ))),
        }
    }

    fn chain(&mut self, chain: &[Descriptor]) -> Result<TypeId, Failure> {
        if chain.first().is_some_and(Descriptor::is_array_kind) {
            let item = match chain.get(1) {
                Some(Descriptor::Each(inner)) => self.resolve(inner)?,
                Some(other) => self.resolve(other)?,
                None => self.builder.primitive(Primitive::Any),
            };
            return Ok(self.builder.array_of(item));
        }

        match chain.iter().find(|d| !d.is_empty()) {
            Some(first) => self.resolve(first),
            None => Err(Failure::Unsupported("chain of empty validators".into())),
        }
    }

    fn kind(&mut self, kind: &str) -> Result<TypeId, Failure> {
        let primitive = match kind {
            "object" => Primitive::Any,
            "array" => {
                let any = self.builder.primitive(Primitive::Any);
                return Ok(self.builder.array_of(any));
            }
            other => Primitive::from_name(other)
                .ok_or_else(|| Failure::Unsupported(format!("unknown primitive kind `{other}`")))?,
        };
        Ok(self.builder.primitive(primitive))
    }

    fn reference(&mut self, name: &str) -> Result<TypeId, Failure> {
        let known = self.grammar.fields_of(name).is_some() || self.grammar.is_alias(name);
        if !known {
            return Err(Failure::UnknownReference(name.to_owned()));
        }
        Ok(self.builder.declare(name))
    }
}

/// Descriptor failure before the owning type and field are attached.
enum Failure {
    Unsupported(String),
    UnknownReference(String),
}

impl Failure {
    fn into_error(self, type_name: &str, field: &str) -> SchemaError {
        let (type_name, field) = (type_name.to_owned(), field.to_owned());
        match self {
            Self::Unsupported(detail) => SchemaError::UnsupportedDescriptor {
                type_name,
                field,
                detail,
            },
            Self::UnknownReference(name) => SchemaError::UnknownReference {
                type_name,
                field,
                name,
            },
        }
    }
}
