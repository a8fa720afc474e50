//! Dump helpers for registry inspection and testing.

use std::fmt::{self, Write};

use super::{FieldDescriptor, FieldSource, Population, ProductSchema, Registry, Shape};

impl Registry {
    /// Deterministic listing of every named type. Structural types
    /// (primitives, arrays, nullables, generated unions) appear only by name.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    fn format(&self, w: &mut String) -> fmt::Result {
        for (_, def) in self.iter() {
            if def.structural {
                continue;
            }
            match &def.shape {
                Shape::Primitive(_) | Shape::Array(_) | Shape::Nullable(_) | Shape::StringSet => {}
                Shape::Product(product) => self.format_product(w, &def.name, product)?,
                Shape::Union(union) => {
                    let alternatives: Vec<&str> =
                        union.alternatives.iter().map(|id| self.name(*id)).collect();
                    writeln!(w, "{} = {}", def.name, alternatives.join(" | "))?;
                }
                Shape::Inspect(inspect) => {
                    writeln!(
                        w,
                        "{} = inspect {} as {} {{",
                        def.name,
                        inspect.field,
                        self.name(inspect.probe)
                    )?;
                    for arm in &inspect.arms {
                        writeln!(w, "  {} => {}", self.name(arm.test), self.name(arm.target))?;
                    }
                    writeln!(w, "}}")?;
                }
            }
        }
        Ok(())
    }

    fn format_product(&self, w: &mut String, name: &str, product: &ProductSchema) -> fmt::Result {
        write!(w, "{} = {}", name, product.source.type_name)?;
        if !product.source.literals.is_empty() {
            let literals: Vec<String> = product
                .source
                .literals
                .iter()
                .map(|(key, value)| format!("{key} = {value}"))
                .collect();
            write!(w, "[{}]", literals.join(", "))?;
        }

        if product.fields.is_empty() {
            return writeln!(w, " {{}}");
        }

        writeln!(w, " {{")?;
        for field in &product.fields {
            self.format_field(w, field)?;
        }
        writeln!(w, "}}")
    }

    fn format_field(&self, w: &mut String, field: &FieldDescriptor) -> fmt::Result {
        write!(w, "  {}: {}", field.name, self.name(field.ty))?;

        if let Population::Computed(computed) = &field.population {
            return writeln!(w, " := ({})", computed.dependencies().join(", "));
        }

        match &field.source {
            FieldSource::Key(key) if *key == field.name => {}
            FieldSource::Key(key) => write!(w, " <- {key}")?,
            FieldSource::Extract(extraction) => {
                write!(w, " <- extract({})", extraction.path_key())?
            }
        }

        if let Population::Default(value) = &field.population {
            write!(w, " = {}", value.to_json(false))?;
        }
        writeln!(w)
    }
}
