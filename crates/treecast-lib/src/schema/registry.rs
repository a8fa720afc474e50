//! Frozen schema.

use std::collections::HashMap;

use super::{Shape, TypeDef, TypeId};
use crate::ir::IrValue;

/// Immutable set of type definitions, shared read-only by translators.
#[derive(Debug, Clone)]
pub struct Registry {
    defs: Vec<TypeDef>,
    by_name: HashMap<String, TypeId>,
    traversable: Vec<Vec<String>>,
}

impl Registry {
    pub(super) fn new(
        defs: Vec<TypeDef>,
        by_name: HashMap<String, TypeId>,
        traversable: Vec<Vec<String>>,
    ) -> Self {
        Self {
            defs,
            by_name,
            traversable,
        }
    }

    pub fn get(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    /// Whether `id` was handed out by this registry's builder.
    pub fn contains(&self, id: TypeId) -> bool {
        id.index() < self.defs.len()
    }

    pub fn def(&self, id: TypeId) -> &TypeDef {
        &self.defs[id.index()]
    }

    pub fn name(&self, id: TypeId) -> &str {
        &self.defs[id.index()].name
    }

    pub fn shape(&self, id: TypeId) -> &Shape {
        &self.defs[id.index()].shape
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// All types in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeDef)> {
        self.defs
            .iter()
            .enumerate()
            .map(|(i, def)| (TypeId(i as u32), def))
    }

    /// Fields of a product that can hold child nodes, in field order.
    /// Computed fields never count. Empty for every other shape.
    pub fn traversable(&self, id: TypeId) -> Vec<&str> {
        self.traversable[id.index()]
            .iter()
            .map(String::as_str)
            .collect()
    }

    /// Structural membership test of an IR value.
    pub fn is_instance(&self, id: TypeId, value: &IrValue) -> bool {
        match self.shape(id) {
            Shape::Primitive(primitive) => primitive.accepts_ir(value),
            Shape::Array(item) => value
                .as_list()
                .is_some_and(|items| items.iter().all(|v| self.is_instance(*item, v))),
            Shape::Nullable(inner) => value.is_null() || self.is_instance(*inner, value),
            Shape::StringSet => value.as_string_set().is_some(),
            Shape::Product(_) => value.as_node().is_some_and(|node| node.type_id == id),
            Shape::Union(union) => union
                .alternatives
                .iter()
                .any(|alt| self.is_instance(*alt, value)),
            Shape::Inspect(inspect) => inspect
                .arms
                .iter()
                .any(|arm| self.is_instance(arm.target, value)),
        }
    }
}
