use indexmap::IndexMap;

use super::*;
use crate::attrs::Computed;
use crate::ir::{IrNode, IrValue};

struct Fixture {
    registry: Registry,
    number: TypeId,
    numbers: TypeId,
    maybe_number: TypeId,
    names: TypeId,
    leaf: TypeId,
    other: TypeId,
    choice: TypeId,
}

fn fixture() -> Fixture {
    let mut b = SchemaBuilder::new();
    let number = b.primitive(Primitive::Number);
    let numbers = b.array_of(number);
    let maybe_number = b.nullable(number);
    let names = b.string_set();
    let leaf = b.product(
        "Leaf",
        ProductSchema::new(SourcePattern::new("Leaf"), Vec::new()),
    );
    let other = b.product(
        "Other",
        ProductSchema::new(SourcePattern::new("Other"), Vec::new()),
    );
    let choice = b.union("Choice", vec![leaf, other]);

    Fixture {
        registry: b.finish().unwrap(),
        number,
        numbers,
        maybe_number,
        names,
        leaf,
        other,
        choice,
    }
}

fn node(type_id: TypeId, type_name: &str) -> IrValue {
    IrNode {
        type_id,
        type_name: type_name.into(),
        fields: IndexMap::new(),
        metadata: None,
    }
    .into()
}

fn number(n: i64) -> IrValue {
    IrValue::Number(n.into())
}

#[test]
fn lookup_by_name() {
    let f = fixture();

    assert_eq!(f.registry.get("Leaf"), Some(f.leaf));
    assert_eq!(f.registry.get("Array<number>"), Some(f.numbers));
    assert_eq!(f.registry.get("Missing"), None);
    assert_eq!(f.registry.name(f.choice), "Choice");
    assert!(f.registry.def(f.numbers).structural);
    assert!(!f.registry.def(f.leaf).structural);
}

#[test]
fn iter_in_declaration_order() {
    let f = fixture();
    let names: Vec<_> = f.registry.iter().map(|(_, def)| def.name.as_str()).collect();

    assert_eq!(
        names,
        [
            "number",
            "Array<number>",
            "Nullable<number>",
            "StringSet",
            "Leaf",
            "Other",
            "Choice"
        ]
    );
    assert_eq!(f.registry.len(), 7);
}

#[test]
fn primitive_instances() {
    let f = fixture();

    assert!(f.registry.is_instance(f.number, &number(1)));
    assert!(!f.registry.is_instance(f.number, &IrValue::from("1")));
    assert!(!f.registry.is_instance(f.number, &IrValue::Null));
}

#[test]
fn array_instances_check_every_item() {
    let f = fixture();
    let good = IrValue::List(im::vector![number(1), number(2)]);
    let bad = IrValue::List(im::vector![number(1), IrValue::Null]);

    assert!(f.registry.is_instance(f.numbers, &good));
    assert!(f.registry.is_instance(f.numbers, &IrValue::List(im::Vector::new())));
    assert!(!f.registry.is_instance(f.numbers, &bad));
    assert!(!f.registry.is_instance(f.numbers, &number(1)));
}

#[test]
fn nullable_accepts_null() {
    let f = fixture();

    assert!(f.registry.is_instance(f.maybe_number, &IrValue::Null));
    assert!(f.registry.is_instance(f.maybe_number, &number(3)));
    assert!(!f.registry.is_instance(f.maybe_number, &IrValue::Bool(true)));
}

#[test]
fn string_set_instances() {
    let f = fixture();

    assert!(f.registry.is_instance(f.names, &IrValue::string_set(["a"])));
    assert!(!f.registry.is_instance(f.names, &IrValue::from("a")));
}

#[test]
fn products_match_by_type_id() {
    let f = fixture();
    let leaf = node(f.leaf, "Leaf");

    assert!(f.registry.is_instance(f.leaf, &leaf));
    assert!(!f.registry.is_instance(f.other, &leaf));
    // Name alone does not make an instance.
    assert!(!f.registry.is_instance(f.other, &node(f.leaf, "Other")));
}

#[test]
fn unions_accept_any_alternative() {
    let f = fixture();

    assert!(f.registry.is_instance(f.choice, &node(f.leaf, "Leaf")));
    assert!(f.registry.is_instance(f.choice, &node(f.other, "Other")));
    assert!(!f.registry.is_instance(f.choice, &number(1)));
}

#[test]
fn traversable_fields_hold_nodes() {
    let mut b = SchemaBuilder::new();
    let number = b.primitive(Primitive::Number);
    let names = b.string_set();
    let leaf = b.product(
        "Leaf",
        ProductSchema::new(
            SourcePattern::new("Leaf"),
            vec![FieldDescriptor::required("value", number)],
        ),
    );
    let expr = b.declare("Expr");
    let exprs = b.array_of(expr);
    let maybe_expr = b.nullable(expr);
    let leaves = b.array_of(leaf);
    let pair = b.product(
        "Pair",
        ProductSchema::new(
            SourcePattern::new("Pair"),
            vec![
                FieldDescriptor::required("left", expr),
                FieldDescriptor::required("size", number),
                FieldDescriptor::required("items", exprs),
                FieldDescriptor::required("leadingComments", leaves),
                FieldDescriptor::with_default("right", maybe_expr, IrValue::Null),
                FieldDescriptor::computed("names", names, Computed::empty_set()),
                FieldDescriptor::computed("same", leaf, Computed::always(IrValue::Null)),
            ],
        ),
    );
    b.union("Expr", vec![leaf, pair]);
    let registry = b.finish().unwrap();

    assert_eq!(registry.traversable(pair), ["left", "items", "right"]);
    assert!(registry.traversable(leaf).is_empty());
    assert!(registry.traversable(expr).is_empty());
    assert!(registry.traversable(number).is_empty());
}
