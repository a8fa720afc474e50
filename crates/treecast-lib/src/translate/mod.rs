//! Type-directed tree translation.
//!
//! [`Translator`] walks a source tree and the registry together, one type
//! shape at a time. Unions resolve by ordered choice with commit: an
//! alternative that fails at the union's own path is rejected and the next is
//! tried; a failure anywhere deeper means the alternative matched and the
//! error is final.

mod error;

#[cfg(test)]
mod error_tests;
#[cfg(test)]
mod translate_tests;

use im::OrdSet;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use treecast_core::Path;

use crate::ir::{IrNode, IrValue, SourceMetadata};
use crate::schema::{
    FieldDescriptor, FieldSource, InspectSchema, Population, Primitive, ProductSchema, Registry,
    Shape, TypeId, UnionSchema,
};
use crate::{Error, Result};

pub use error::{ErrorKind, Expected, Found, TranslationError};

/// Default bound on nested nodes.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Translation limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Maximum number of nested nodes below the root.
    pub max_depth: usize,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl TranslateOptions {
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Read-only translator over a frozen registry.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'r> {
    registry: &'r Registry,
    options: TranslateOptions,
}

/// An already-translated field handed to an inspect target.
#[derive(Clone, Copy)]
struct Preset<'a> {
    key: &'a str,
    value: &'a IrValue,
}

impl<'r> Translator<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            options: TranslateOptions::default(),
        }
    }

    pub fn with_options(mut self, options: TranslateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn options(&self) -> TranslateOptions {
        self.options
    }

    /// Translate `source` as `ty`, starting at the `root` path.
    pub fn translate(&self, ty: TypeId, source: &Value) -> Result<IrValue> {
        if !self.registry.contains(ty) {
            return Err(Error::UnknownType(format!("{ty:?}")));
        }
        self.go(ty, Some(source), &Path::root(), None, 0)
    }

    pub fn translate_named(&self, type_name: &str, source: &Value) -> Result<IrValue> {
        let ty = self
            .registry
            .get(type_name)
            .ok_or_else(|| Error::UnknownType(type_name.to_owned()))?;
        self.translate(ty, source)
    }

    fn go(
        &self,
        ty: TypeId,
        value: Option<&Value>,
        path: &Path,
        preset: Option<Preset<'_>>,
        depth: usize,
    ) -> Result<IrValue> {
        match self.registry.shape(ty) {
            Shape::Primitive(primitive) => self.primitive(ty, *primitive, value, path),
            Shape::Array(item) => self.array(ty, *item, value, path, depth),
            Shape::Nullable(inner) => self.nullable(ty, *inner, value, path, preset, depth),
            Shape::StringSet => self.string_set(ty, value, path),
            Shape::Product(product) => self.product(ty, product, value, path, preset, depth),
            Shape::Union(union) => self.union(ty, union, value, path, preset, depth),
            Shape::Inspect(inspect) => self.inspect(ty, inspect, value, path, depth),
        }
    }

    fn primitive(
        &self,
        ty: TypeId,
        primitive: Primitive,
        value: Option<&Value>,
        path: &Path,
    ) -> Result<IrValue> {
        match (primitive, value) {
            (Primitive::Null | Primitive::Any, None) => Ok(IrValue::Null),
            (Primitive::Any, Some(value)) => Ok(IrValue::Any(value.clone())),
            (_, Some(value)) if primitive.accepts(value) => Ok(IrValue::from_literal(value)),
            _ => Err(self.mismatch(ty, path, value)),
        }
    }

    fn array(
        &self,
        ty: TypeId,
        item: TypeId,
        value: Option<&Value>,
        path: &Path,
        depth: usize,
    ) -> Result<IrValue> {
        let Some(Value::Array(items)) = value else {
            return Err(self.mismatch(ty, path, value));
        };

        let mut out = im::Vector::new();
        for (i, element) in strip_rest(items).iter().enumerate() {
            out.push_back(self.go(item, Some(element), &path.index(i), None, depth)?);
        }
        Ok(IrValue::List(out))
    }

    fn nullable(
        &self,
        ty: TypeId,
        inner: TypeId,
        value: Option<&Value>,
        path: &Path,
        preset: Option<Preset<'_>>,
        depth: usize,
    ) -> Result<IrValue> {
        if value.is_none_or(Value::is_null) {
            return Ok(IrValue::Null);
        }
        match self.go(inner, value, path, preset, depth) {
            Err(Error::Translation(err)) if err.path == *path => Err(self.mismatch(ty, path, value)),
            other => other,
        }
    }

    fn string_set(&self, ty: TypeId, value: Option<&Value>, path: &Path) -> Result<IrValue> {
        let Some(Value::Array(items)) = value else {
            return Err(self.mismatch(ty, path, value));
        };

        let mut set = OrdSet::new();
        for (i, item) in items.iter().enumerate() {
            let Some(name) = item.as_str() else {
                let expected = Expected::Type(Primitive::String.name().to_owned());
                return Err(TranslationError::mismatch(expected, &path.index(i), Some(item)).into());
            };
            set.insert(name.to_owned());
        }
        Ok(IrValue::StringSet(set))
    }

    fn product(
        &self,
        ty: TypeId,
        product: &ProductSchema,
        value: Option<&Value>,
        path: &Path,
        preset: Option<Preset<'_>>,
        depth: usize,
    ) -> Result<IrValue> {
        let Some(Value::Object(record)) = value else {
            return Err(self.mismatch(ty, path, value));
        };
        if source_type(record) != Some(product.source.type_name.as_str()) {
            return Err(self.mismatch(ty, path, value));
        }
        for (key, literal) in &product.source.literals {
            if record.get(key) != Some(literal) {
                let expected = Expected::Literal(literal.clone());
                return Err(TranslationError::mismatch(expected, path, record.get(key)).into());
            }
        }

        if depth >= self.options.max_depth {
            return Err(Error::RecursionLimitExceeded { path: path.clone() });
        }

        let mut slots: Vec<Option<IrValue>> = vec![None; product.fields.len()];
        for (slot, field) in slots.iter_mut().zip(&product.fields) {
            if field.is_computed() {
                continue;
            }
            *slot = Some(self.field(field, record, path, preset, depth)?);
        }

        for step in &product.plan {
            let Population::Computed(computed) = &product.fields[step.field].population else {
                continue;
            };
            let value = {
                let args: Vec<&IrValue> = step
                    .dependencies
                    .iter()
                    .filter_map(|&dep| slots[dep].as_ref())
                    .collect();
                computed.evaluate(&args)
            };
            slots[step.field] = Some(value);
        }

        let fields: IndexMap<String, IrValue> = product
            .fields
            .iter()
            .zip(slots)
            .map(|(field, value)| (field.name.clone(), value.unwrap_or(IrValue::Null)))
            .collect();

        Ok(IrNode {
            type_id: ty,
            type_name: self.registry.name(ty).to_owned(),
            fields,
            metadata: SourceMetadata::from_source(record),
        }
        .into())
    }

    fn field(
        &self,
        field: &FieldDescriptor,
        record: &Map<String, Value>,
        path: &Path,
        preset: Option<Preset<'_>>,
        depth: usize,
    ) -> Result<IrValue> {
        let extracted;
        let (raw, field_path) = match &field.source {
            FieldSource::Key(key) => {
                let field_path = path.field(key.as_str());
                if let Some(preset) = preset
                    && preset.key == key.as_str()
                {
                    return self.preset(field, preset.value, &field_path);
                }
                (record.get(key), field_path)
            }
            FieldSource::Extract(extraction) => {
                extracted = extraction.apply(record);
                (Some(&extracted), path.field(extraction.path_key()))
            }
        };

        if let Population::Default(default) = &field.population
            && raw.is_none_or(Value::is_null)
        {
            return Ok(default.clone());
        }
        self.go(field.ty, raw, &field_path, None, depth + 1)
    }

    /// Reuse a value translated before the owning node was chosen.
    fn preset(&self, field: &FieldDescriptor, value: &IrValue, path: &Path) -> Result<IrValue> {
        if self.registry.is_instance(field.ty, value) {
            return Ok(value.clone());
        }
        let found = match value {
            IrValue::Node(node) => Found::Node(node.type_name.clone()),
            other => Found::Value(other.to_json(false)),
        };
        Err(TranslationError {
            kind: ErrorKind::Mismatch,
            expected: Expected::Type(self.registry.name(field.ty).to_owned()),
            path: path.clone(),
            found,
        }
        .into())
    }

    fn union(
        &self,
        ty: TypeId,
        union: &UnionSchema,
        value: Option<&Value>,
        path: &Path,
        preset: Option<Preset<'_>>,
        depth: usize,
    ) -> Result<IrValue> {
        for &alternative in &union.alternatives {
            match self.go(alternative, value, path, preset, depth) {
                Err(Error::Translation(err)) if err.path == *path => {
                    tracing::trace!(
                        union = self.registry.name(ty),
                        alternative = self.registry.name(alternative),
                        %path,
                        "alternative rejected"
                    );
                }
                Err(err) => {
                    tracing::debug!(
                        union = self.registry.name(ty),
                        alternative = self.registry.name(alternative),
                        %err,
                        "committed alternative failed"
                    );
                    return Err(err);
                }
                ok => return ok,
            }
        }
        Err(TranslationError::exhausted(self.registry.name(ty), path, value).into())
    }

    fn inspect(
        &self,
        ty: TypeId,
        inspect: &InspectSchema,
        value: Option<&Value>,
        path: &Path,
        depth: usize,
    ) -> Result<IrValue> {
        let Some(Value::Object(record)) = value else {
            return Err(self.mismatch(ty, path, value));
        };
        // Only probe records one of the targets could be built from.
        let reachable = source_type(record).is_some_and(|source| {
            inspect
                .arms
                .iter()
                .any(|arm| self.builds_from(arm.target, source))
        });
        if !reachable {
            return Err(self.mismatch(ty, path, value));
        }

        let probe_path = path.field(inspect.field.as_str());
        let probed = self.go(
            inspect.probe,
            record.get(&inspect.field),
            &probe_path,
            None,
            depth + 1,
        )?;

        let Some(arm) = inspect
            .arms
            .iter()
            .find(|arm| self.registry.is_instance(arm.test, &probed))
        else {
            return Err(self.mismatch(ty, path, value));
        };
        tracing::trace!(
            inspect = self.registry.name(ty),
            probed = probed.kind_name(),
            target = self.registry.name(arm.target),
            "inspect arm chosen"
        );

        let preset = Preset {
            key: &inspect.field,
            value: &probed,
        };
        self.go(arm.target, value, path, Some(preset), depth)
    }

    /// Whether some product reachable from `ty` at the same path reads
    /// records tagged `source`.
    fn builds_from(&self, ty: TypeId, source: &str) -> bool {
        match self.registry.shape(ty) {
            Shape::Product(product) => product.source.type_name == source,
            Shape::Nullable(inner) => self.builds_from(*inner, source),
            Shape::Union(union) => union
                .alternatives
                .iter()
                .any(|alt| self.builds_from(*alt, source)),
            Shape::Inspect(inspect) => inspect
                .arms
                .iter()
                .any(|arm| self.builds_from(arm.target, source)),
            Shape::Primitive(_) | Shape::Array(_) | Shape::StringSet => false,
        }
    }

    fn mismatch(&self, ty: TypeId, path: &Path, value: Option<&Value>) -> Error {
        let expected = Expected::Type(self.registry.name(ty).to_owned());
        TranslationError::mismatch(expected, path, value).into()
    }
}

fn source_type(record: &Map<String, Value>) -> Option<&str> {
    record.get("type").and_then(Value::as_str)
}

/// Drop a trailing rest element; rest elements are lifted into their own
/// field by the owning node.
pub fn strip_rest(items: &[Value]) -> &[Value] {
    match items.split_last() {
        Some((last, init)) if is_rest(last) => init,
        _ => items,
    }
}

/// Whether `value` is a tagged record whose type starts with `Rest`.
pub fn is_rest(value: &Value) -> bool {
    value
        .get("type")
        .and_then(Value::as_str)
        .is_some_and(|type_name| type_name.starts_with("Rest"))
}
