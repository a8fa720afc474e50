//! Two-phase schema construction.

use std::collections::{HashMap, HashSet};

use super::{
    ComputeStep, FieldSource, InspectSchema, Primitive, ProductSchema, Registry, SchemaError,
    Shape, TypeDef, TypeId, UnionSchema,
};

/// Mutable schema under construction.
///
/// `declare` hands out stable ids before bodies exist, so mutually recursive
/// types can reference each other. Bodies may be redefined until `finish`.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    names: Vec<String>,
    shapes: Vec<Option<Shape>>,
    structural: Vec<bool>,
    by_name: HashMap<String, TypeId>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a type name, returning its id. Declaring twice returns the
    /// same id.
    pub fn declare(&mut self, name: impl Into<String>) -> TypeId {
        self.declare_with(name.into(), false)
    }

    fn declare_with(&mut self, name: String, structural: bool) -> TypeId {
        if let Some(&id) = self.by_name.get(&name) {
            return id;
        }
        let id = TypeId(self.names.len() as u32);
        self.names.push(name.clone());
        self.shapes.push(None);
        self.structural.push(structural);
        self.by_name.insert(name, id);
        id
    }

    /// Declare and define a structural type in one go. Keeps an existing body.
    fn intern(&mut self, name: String, shape: Shape) -> TypeId {
        let id = self.declare_with(name, true);
        if self.shapes[id.index()].is_none() {
            self.shapes[id.index()] = Some(shape);
        }
        id
    }

    pub fn get(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, id: TypeId) -> &str {
        &self.names[id.index()]
    }

    pub fn is_defined(&self, id: TypeId) -> bool {
        self.shapes[id.index()].is_some()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    // ------------------------------------------------------------------------
    // Structural types
    // ------------------------------------------------------------------------

    pub fn primitive(&mut self, primitive: Primitive) -> TypeId {
        self.intern(primitive.name().to_owned(), Shape::Primitive(primitive))
    }

    pub fn array_of(&mut self, item: TypeId) -> TypeId {
        let name = format!("Array<{}>", self.name(item));
        self.intern(name, Shape::Array(item))
    }

    /// `Nullable<T>`. Wrapping `null` or an already nullable type is a no-op.
    pub fn nullable(&mut self, inner: TypeId) -> TypeId {
        match &self.shapes[inner.index()] {
            Some(Shape::Nullable(_)) | Some(Shape::Primitive(Primitive::Null)) => return inner,
            _ => {}
        }
        let name = format!("Nullable<{}>", self.name(inner));
        self.intern(name, Shape::Nullable(inner))
    }

    pub fn string_set(&mut self) -> TypeId {
        self.intern("StringSet".to_owned(), Shape::StringSet)
    }

    /// Anonymous union named after its members. A single member collapses to
    /// the member itself.
    pub fn union_of(&mut self, members: impl IntoIterator<Item = TypeId>) -> TypeId {
        let mut alternatives: Vec<TypeId> = Vec::new();
        for member in members {
            if !alternatives.contains(&member) {
                alternatives.push(member);
            }
        }
        if let [single] = alternatives.as_slice() {
            return *single;
        }
        let name = alternatives
            .iter()
            .map(|&id| self.name(id))
            .collect::<Vec<_>>()
            .join(" | ");
        self.intern(name, Shape::Union(UnionSchema { alternatives }))
    }

    // ------------------------------------------------------------------------
    // Named types
    // ------------------------------------------------------------------------

    /// Attach (or replace) the body of a declared type.
    pub fn define(&mut self, id: TypeId, shape: Shape) {
        self.shapes[id.index()] = Some(shape);
    }

    pub fn define_product(&mut self, id: TypeId, product: ProductSchema) {
        self.define(id, Shape::Product(product));
    }

    pub fn define_union(&mut self, id: TypeId, alternatives: Vec<TypeId>) {
        self.define(id, Shape::Union(UnionSchema { alternatives }));
    }

    pub fn define_inspect(&mut self, id: TypeId, inspect: InspectSchema) {
        self.define(id, Shape::Inspect(inspect));
    }

    pub fn product(&mut self, name: &str, product: ProductSchema) -> TypeId {
        let id = self.declare(name);
        self.define_product(id, product);
        id
    }

    pub fn union(&mut self, name: &str, alternatives: Vec<TypeId>) -> TypeId {
        let id = self.declare(name);
        self.define_union(id, alternatives);
        id
    }

    pub fn inspect(&mut self, name: &str, inspect: InspectSchema) -> TypeId {
        let id = self.declare(name);
        self.define_inspect(id, inspect);
        id
    }

    // ------------------------------------------------------------------------
    // Freezing
    // ------------------------------------------------------------------------

    /// Validate and freeze. Computes each product's evaluation plan.
    pub fn finish(self) -> Result<Registry, SchemaError> {
        let mut defs = Vec::with_capacity(self.names.len());
        for ((name, shape), structural) in self.names.into_iter().zip(self.shapes).zip(self.structural)
        {
            let Some(shape) = shape else {
                return Err(SchemaError::Undefined(name));
            };
            defs.push(TypeDef {
                name,
                shape,
                structural,
            });
        }

        for def in &mut defs {
            match &mut def.shape {
                Shape::Product(product) => plan_product(&def.name, product)?,
                Shape::Union(union) if union.alternatives.is_empty() => {
                    return Err(SchemaError::EmptyUnion(def.name.clone()));
                }
                Shape::Inspect(inspect) if inspect.arms.is_empty() => {
                    return Err(SchemaError::EmptyUnion(def.name.clone()));
                }
                _ => {}
            }
        }

        check_same_path_cycles(&defs)?;
        check_inspect_fields(&defs)?;
        let traversable = traversable_fields(&defs);

        tracing::debug!(types = defs.len(), "schema frozen");
        Ok(Registry::new(defs, self.by_name, traversable))
    }
}

fn plan_product(type_name: &str, product: &mut ProductSchema) -> Result<(), SchemaError> {
    let mut index = HashMap::with_capacity(product.fields.len());
    for (i, field) in product.fields.iter().enumerate() {
        if index.insert(field.name.as_str(), i).is_some() {
            return Err(SchemaError::DuplicateField {
                type_name: type_name.to_owned(),
                field: field.name.clone(),
            });
        }
    }

    let mut dependencies: Vec<Option<Vec<usize>>> = vec![None; product.fields.len()];
    for (i, field) in product.fields.iter().enumerate() {
        let Some(computed) = field.computed_spec() else {
            continue;
        };
        let mut resolved = Vec::with_capacity(computed.dependencies().len());
        for dep in computed.dependencies() {
            let Some(&j) = index.get(dep.as_str()) else {
                return Err(SchemaError::UnknownDependency {
                    type_name: type_name.to_owned(),
                    field: field.name.clone(),
                    dependency: dep.clone(),
                });
            };
            resolved.push(j);
        }
        dependencies[i] = Some(resolved);
    }

    let mut planner = Planner {
        dependencies: &dependencies,
        marks: vec![Mark::New; dependencies.len()],
        stack: Vec::new(),
        plan: Vec::new(),
    };
    for i in 0..dependencies.len() {
        if dependencies[i].is_some()
            && let Err(cycle) = planner.visit(i)
        {
            return Err(SchemaError::DependencyCycle {
                type_name: type_name.to_owned(),
                fields: cycle
                    .into_iter()
                    .map(|j| product.fields[j].name.clone())
                    .collect(),
            });
        }
    }

    product.plan = planner.plan;
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    New,
    Active,
    Done,
}

/// Depth-first topological order over computed fields.
struct Planner<'a> {
    dependencies: &'a [Option<Vec<usize>>],
    marks: Vec<Mark>,
    stack: Vec<usize>,
    plan: Vec<ComputeStep>,
}

impl Planner<'_> {
    fn visit(&mut self, i: usize) -> Result<(), Vec<usize>> {
        match self.marks[i] {
            Mark::Done => return Ok(()),
            Mark::Active => {
                let start = self.stack.iter().position(|&j| j == i).unwrap_or(0);
                let mut cycle = self.stack[start..].to_vec();
                cycle.push(i);
                return Err(cycle);
            }
            Mark::New => {}
        }

        let dependencies = self.dependencies;
        let Some(deps) = &dependencies[i] else {
            return Ok(());
        };

        self.marks[i] = Mark::Active;
        self.stack.push(i);
        for &dep in deps {
            self.visit(dep)?;
        }
        self.stack.pop();
        self.marks[i] = Mark::Done;
        self.plan.push(ComputeStep {
            field: i,
            dependencies: deps.clone(),
        });
        Ok(())
    }
}

/// Unions, inspect targets and nullables resolve at the same path as their
/// members. A loop through them would never consume input.
fn check_same_path_cycles(defs: &[TypeDef]) -> Result<(), SchemaError> {
    fn successors(shape: &Shape) -> Vec<TypeId> {
        match shape {
            Shape::Union(union) => union.alternatives.clone(),
            Shape::Inspect(inspect) => inspect.arms.iter().map(|arm| arm.target).collect(),
            Shape::Nullable(inner) => vec![*inner],
            _ => Vec::new(),
        }
    }

    let mut marks = vec![Mark::New; defs.len()];
    for root in 0..defs.len() {
        if marks[root] != Mark::New {
            continue;
        }
        // Iterative DFS: (node, next successor index)
        let mut stack = vec![(root, 0usize)];
        marks[root] = Mark::Active;
        while let Some(&(node, next)) = stack.last() {
            let succ = successors(&defs[node].shape);
            if let Some(&child) = succ.get(next) {
                let top = stack.len() - 1;
                stack[top].1 += 1;
                match marks[child.index()] {
                    Mark::Active => {
                        return Err(SchemaError::UnionCycle(defs[child.index()].name.clone()));
                    }
                    Mark::New => {
                        marks[child.index()] = Mark::Active;
                        stack.push((child.index(), 0));
                    }
                    Mark::Done => {}
                }
            } else {
                marks[node] = Mark::Done;
                stack.pop();
            }
        }
    }
    Ok(())
}

/// Per type, the supplied product fields that can hold nodes. Comment
/// attachments are not children.
fn traversable_fields(defs: &[TypeDef]) -> Vec<Vec<String>> {
    defs.iter()
        .map(|def| match &def.shape {
            Shape::Product(product) => product
                .fields
                .iter()
                .filter(|field| !field.is_computed() && !field.name.ends_with("Comments"))
                .filter(|field| can_hold_node(defs, field.ty))
                .map(|field| field.name.clone())
                .collect(),
            _ => Vec::new(),
        })
        .collect()
}

fn can_hold_node(defs: &[TypeDef], ty: TypeId) -> bool {
    let mut seen = HashSet::new();
    let mut stack = vec![ty];
    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        match &defs[id.index()].shape {
            Shape::Product(_) => return true,
            Shape::Primitive(_) | Shape::StringSet => {}
            Shape::Array(inner) | Shape::Nullable(inner) => stack.push(*inner),
            Shape::Union(union) => stack.extend(&union.alternatives),
            Shape::Inspect(inspect) => stack.extend(inspect.arms.iter().map(|arm| arm.target)),
        }
    }
    false
}

/// Every product an inspect shape can construct must read the probed key.
fn check_inspect_fields(defs: &[TypeDef]) -> Result<(), SchemaError> {
    for def in defs {
        let Shape::Inspect(inspect) = &def.shape else {
            continue;
        };

        let mut seen = HashSet::new();
        let mut pending: Vec<TypeId> = inspect.arms.iter().map(|arm| arm.target).collect();
        while let Some(id) = pending.pop() {
            if !seen.insert(id) {
                continue;
            }
            let target = &defs[id.index()];
            match &target.shape {
                Shape::Union(union) => pending.extend(union.alternatives.iter().copied()),
                Shape::Product(product) => {
                    let reads_probe = product.fields.iter().any(|f| {
                        !f.is_computed()
                            && matches!(&f.source, FieldSource::Key(key) if *key == inspect.field)
                    });
                    if !reads_probe {
                        return Err(SchemaError::InspectField {
                            type_name: def.name.clone(),
                            field: inspect.field.clone(),
                            target: target.name.clone(),
                        });
                    }
                }
                _ => {}
            }
        }
    }
    Ok(())
}
