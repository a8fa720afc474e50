use serde_json::{Value, json};

use super::*;
use crate::attrs::{FREE_VARIABLES, SetExpr};
use crate::ir::CommentKind;
use crate::schema::{FieldDescriptor, InspectArm, InspectSchema, SchemaBuilder, SourcePattern};

fn pair(b: &mut SchemaBuilder, name: &str, left: TypeId) -> TypeId {
    b.product(
        name,
        ProductSchema::new(
            SourcePattern::new("Pair"),
            vec![FieldDescriptor::required("left", left)],
        ),
    )
}

fn translation_error(result: Result<IrValue>) -> TranslationError {
    match result {
        Err(Error::Translation(err)) => *err,
        other => panic!("expected a translation error, got {other:?}"),
    }
}

fn node(value: &IrValue) -> &IrNode {
    value.as_node().expect("a node")
}

#[test]
fn ordered_choice_prefers_first_match() {
    let mut b = SchemaBuilder::new();
    let number = b.primitive(Primitive::Number);
    let first = pair(&mut b, "First", number);
    let second = pair(&mut b, "Second", number);
    let union = b.union("Either", vec![first, second]);
    let registry = b.finish().unwrap();

    let source = json!({ "type": "Pair", "left": 1 });
    let ir = Translator::new(&registry).translate(union, &source).unwrap();
    assert_eq!(node(&ir).type_name, "First");
}

#[test]
fn deeper_failure_commits_to_alternative() {
    let mut b = SchemaBuilder::new();
    let number = b.primitive(Primitive::Number);
    let string = b.primitive(Primitive::String);
    let a = pair(&mut b, "A", number);
    let b_id = pair(&mut b, "B", string);
    let ab = b.union("AB", vec![a, b_id]);
    let ba = b.union("BA", vec![b_id, a]);
    let registry = b.finish().unwrap();
    let translator = Translator::new(&registry);

    let source = json!({ "type": "Pair", "left": true });
    let err = translation_error(translator.translate(ab, &source));
    insta::assert_snapshot!(err, @"expected type `number` at `root.left`, but found: true");

    let err = translation_error(translator.translate(ba, &source));
    insta::assert_snapshot!(err, @"expected type `string` at `root.left`, but found: true");

    // B would accept this, but A already matched at the union's path.
    let source = json!({ "type": "Pair", "left": "s" });
    let err = translation_error(translator.translate(ab, &source));
    assert_eq!(err.kind, ErrorKind::Mismatch);
    assert_eq!(err.path, Path::root().field("left"));
}

#[test]
fn exhausted_union() {
    let mut b = SchemaBuilder::new();
    let number = b.primitive(Primitive::Number);
    let a = pair(&mut b, "A", number);
    let union = b.union("OnlyA", vec![a]);
    let registry = b.finish().unwrap();

    let source = json!({ "type": "Other" });
    let err = translation_error(Translator::new(&registry).translate(union, &source));
    assert_eq!(err.kind, ErrorKind::UnionExhausted);
    insta::assert_snapshot!(err, @"expected type `OnlyA` at `root`, but found: [Node Other]");
}

#[test]
fn nested_union_exhaustion_is_recoverable() {
    let mut b = SchemaBuilder::new();
    let a = b.product("A", ProductSchema::new(SourcePattern::new("A"), Vec::new()));
    let c = b.product("C", ProductSchema::new(SourcePattern::new("C"), Vec::new()));
    let inner = b.union("Inner", vec![a]);
    let outer = b.union("Outer", vec![inner, c]);
    let registry = b.finish().unwrap();

    let ir = Translator::new(&registry)
        .translate(outer, &json!({ "type": "C" }))
        .unwrap();
    assert_eq!(node(&ir).type_name, "C");
}

#[test]
fn arrays_drop_trailing_rest_element() {
    let mut b = SchemaBuilder::new();
    let item = b.product("Item", ProductSchema::new(SourcePattern::new("Item"), Vec::new()));
    let items = b.array_of(item);
    let registry = b.finish().unwrap();
    let translator = Translator::new(&registry);

    let source = json!([{ "type": "Item" }, { "type": "Item" }, { "type": "RestElement" }]);
    let ir = translator.translate(items, &source).unwrap();
    assert_eq!(ir.as_list().unwrap().len(), 2);

    // Only the last position is special.
    let source = json!([{ "type": "RestElement" }, { "type": "Item" }]);
    let err = translation_error(translator.translate(items, &source));
    insta::assert_snapshot!(err, @"expected type `Item` at `root.0`, but found: [Node RestElement]");
}

#[test]
fn nullable_and_defaults() {
    let mut b = SchemaBuilder::new();
    let number = b.primitive(Primitive::Number);
    let maybe = b.nullable(number);
    let boolean = b.primitive(Primitive::Boolean);
    let id = b.product(
        "Opts",
        ProductSchema::new(
            SourcePattern::new("Opts"),
            vec![
                FieldDescriptor::with_default("size", maybe, IrValue::Null),
                FieldDescriptor::with_default("flag", boolean, true.into()),
            ],
        ),
    );
    let registry = b.finish().unwrap();
    let translator = Translator::new(&registry);

    let ir = translator.translate(id, &json!({ "type": "Opts", "flag": null })).unwrap();
    assert_eq!(node(&ir).get("size"), Some(&IrValue::Null));
    assert_eq!(node(&ir).get("flag"), Some(&IrValue::Bool(true)));

    let ir = translator.translate(id, &json!({ "type": "Opts", "size": 3 })).unwrap();
    assert_eq!(node(&ir).get("size"), Some(&IrValue::Number(3.into())));

    let err = translation_error(translator.translate(id, &json!({ "type": "Opts", "size": "big" })));
    insta::assert_snapshot!(err, @"expected type `Nullable<number>` at `root.size`, but found: big");
}

#[test]
fn string_sets() {
    let mut b = SchemaBuilder::new();
    let names = b.string_set();
    let registry = b.finish().unwrap();
    let translator = Translator::new(&registry);

    let ir = translator.translate(names, &json!(["b", "a", "b"])).unwrap();
    assert_eq!(ir, IrValue::string_set(["a", "b"]));

    let err = translation_error(translator.translate(names, &json!(["a", 1])));
    insta::assert_snapshot!(err, @"expected type `string` at `root.1`, but found: 1");
}

#[test]
fn source_literals_discriminate() {
    let mut b = SchemaBuilder::new();
    let id = b.product(
        "Static",
        ProductSchema::new(
            SourcePattern::new("Member").with("computed", false),
            Vec::new(),
        ),
    );
    let registry = b.finish().unwrap();
    let translator = Translator::new(&registry);

    assert!(translator.translate(id, &json!({ "type": "Member", "computed": false })).is_ok());

    let err = translation_error(translator.translate(id, &json!({ "type": "Member", "computed": true })));
    insta::assert_snapshot!(err, @"expected `false` at `root`, but found: true");

    let err = translation_error(translator.translate(id, &json!({ "type": "Member" })));
    insta::assert_snapshot!(err, @"expected `false` at `root`, but found: undefined");
}

#[test]
fn renamed_and_extracted_fields() {
    let mut b = SchemaBuilder::new();
    let number = b.primitive(Primitive::Number);
    let id = b.product(
        "Sum",
        ProductSchema::new(
            SourcePattern::new("Sum"),
            vec![
                FieldDescriptor::required("first", number).from_key("a"),
                FieldDescriptor::required("total", number).extract(&["a", "b"], |record| {
                    let a = record.get("a").and_then(Value::as_i64);
                    let b = record.get("b").and_then(Value::as_i64);
                    match (a, b) {
                        (Some(a), Some(b)) => json!(a + b),
                        _ => Value::Null,
                    }
                }),
            ],
        ),
    );
    let registry = b.finish().unwrap();
    let translator = Translator::new(&registry);

    let ir = translator.translate(id, &json!({ "type": "Sum", "a": 1, "b": 2 })).unwrap();
    insta::assert_snapshot!(ir.to_json(false), @r#"{"type":"Sum","first":1,"total":3}"#);

    let err = translation_error(translator.translate(id, &json!({ "type": "Sum", "a": 1 })));
    insta::assert_snapshot!(err, @"expected type `number` at `root.a,b`, but found: null");
}

#[test]
fn computed_fields_see_translated_children() {
    let mut b = SchemaBuilder::new();
    let string = b.primitive(Primitive::String);
    let names = b.string_set();
    let name = b.product(
        "Name",
        ProductSchema::new(
            SourcePattern::new("Name"),
            vec![
                FieldDescriptor::required("name", string),
                FieldDescriptor::computed(FREE_VARIABLES, names, SetExpr::new().name("name").build()),
            ],
        ),
    );
    let list = b.array_of(name);
    let id = b.product(
        "Group",
        ProductSchema::new(
            SourcePattern::new("Group"),
            vec![
                FieldDescriptor::computed(
                    FREE_VARIABLES,
                    names,
                    SetExpr::new().take("items", FREE_VARIABLES).build(),
                ),
                FieldDescriptor::required("items", list),
            ],
        ),
    );
    let registry = b.finish().unwrap();

    let source = json!({
        "type": "Group",
        "items": [
            { "type": "Name", "name": "y" },
            { "type": "Name", "name": "x" },
            { "type": "Name", "name": "y" },
        ],
    });
    let ir = Translator::new(&registry).translate(id, &source).unwrap();
    assert_eq!(node(&ir).get(FREE_VARIABLES), Some(&IrValue::string_set(["x", "y"])));
    // Field order is schema order, not evaluation order.
    let order: Vec<_> = node(&ir).fields.keys().map(String::as_str).collect();
    assert_eq!(order, [FREE_VARIABLES, "items"]);
}

#[test]
fn inspect_chooses_by_translated_value() {
    let mut b = SchemaBuilder::new();
    let number = b.primitive(Primitive::Number);
    let string = b.primitive(Primitive::String);
    let probe = b.union_of([number, string]);
    let with_number = b.product(
        "WithNumber",
        ProductSchema::new(SourcePattern::new("Box"), vec![FieldDescriptor::required("v", number)]),
    );
    let with_string = b.product(
        "WithString",
        ProductSchema::new(SourcePattern::new("Box"), vec![FieldDescriptor::required("v", string)]),
    );
    let id = b.inspect(
        "Boxed",
        InspectSchema {
            field: "v".into(),
            probe,
            arms: vec![
                InspectArm { test: number, target: with_number },
                InspectArm { test: string, target: with_string },
            ],
        },
    );
    let only_numbers = b.inspect(
        "NumberBox",
        InspectSchema {
            field: "v".into(),
            probe,
            arms: vec![InspectArm { test: number, target: with_number }],
        },
    );
    let registry = b.finish().unwrap();
    let translator = Translator::new(&registry);

    let ir = translator.translate(id, &json!({ "type": "Box", "v": 1 })).unwrap();
    assert_eq!(node(&ir).type_name, "WithNumber");
    let ir = translator.translate(id, &json!({ "type": "Box", "v": "one" })).unwrap();
    assert_eq!(node(&ir).type_name, "WithString");

    let err = translation_error(translator.translate(id, &json!({ "type": "Box", "v": true })));
    insta::assert_snapshot!(err, @"expected type `number | string` at `root.v`, but found: true");

    let err = translation_error(translator.translate(only_numbers, &json!({ "type": "Box", "v": "one" })));
    insta::assert_snapshot!(err, @"expected type `NumberBox` at `root`, but found: [Node Box]");

    // Records no target is built from are rejected before probing.
    let err = translation_error(translator.translate(id, &json!({ "type": "Crate", "v": true })));
    insta::assert_snapshot!(err, @"expected type `Boxed` at `root`, but found: [Node Crate]");
}

#[test]
fn recursion_limit() {
    let mut b = SchemaBuilder::new();
    let tree = b.declare("Tree");
    let child = b.nullable(tree);
    b.define_product(
        tree,
        ProductSchema::new(
            SourcePattern::new("Tree"),
            vec![FieldDescriptor::with_default("child", child, IrValue::Null)],
        ),
    );
    let registry = b.finish().unwrap();

    let source = json!({
        "type": "Tree",
        "child": { "type": "Tree", "child": { "type": "Tree", "child": { "type": "Tree" } } },
    });

    let translator = Translator::new(&registry);
    assert!(translator.translate(tree, &source).is_ok());

    let shallow = translator.with_options(TranslateOptions::default().max_depth(2));
    let err = shallow.translate(tree, &source).unwrap_err();
    insta::assert_snapshot!(err, @"recursion limit exceeded at `root.child.child`");
}

#[test]
fn unknown_type_name() {
    let registry = SchemaBuilder::new().finish().unwrap();
    let err = Translator::new(&registry)
        .translate_named("Missing", &Value::Null)
        .unwrap_err();

    assert!(matches!(&err, Error::UnknownType(name) if name == "Missing"));
}

#[test]
fn metadata_is_attached() {
    let mut b = SchemaBuilder::new();
    let id = b.product("Leaf", ProductSchema::new(SourcePattern::new("Leaf"), Vec::new()));
    let registry = b.finish().unwrap();
    let translator = Translator::new(&registry);

    let source = json!({
        "type": "Leaf",
        "start": 0,
        "end": 4,
        "loc": { "start": { "line": 1, "column": 0 }, "end": { "line": 1, "column": 4 } },
        "leadingComments": [{ "type": "CommentLine", "value": " hi" }],
    });
    let ir = translator.translate(id, &source).unwrap();
    let metadata = node(&ir).metadata.as_ref().unwrap();
    assert_eq!(metadata.start, Some(0));
    assert_eq!(metadata.loc.unwrap().end.column, 4);
    assert_eq!(metadata.leading_comments.as_ref().unwrap()[0].value, " hi");

    insta::assert_snapshot!(ir.to_json(false), @r#"{"type":"Leaf"}"#);

    let ir = translator.translate(id, &json!({ "type": "Leaf" })).unwrap();
    assert!(node(&ir).metadata.is_none());
}

#[test]
fn metadata_entries_are_read_independently() {
    let mut b = SchemaBuilder::new();
    let id = b.product("Leaf", ProductSchema::new(SourcePattern::new("Leaf"), Vec::new()));
    let registry = b.finish().unwrap();
    let translator = Translator::new(&registry);

    let source = json!({
        "type": "Leaf",
        "start": 3,
        "end": 4,
        "leadingComments": [{ "type": "Line", "value": " hi" }],
        "trailingComments": [{ "type": "Block", "value": " b " }],
        "innerComments": [{ "type": "CommentBlock", "value": " c " }],
    });
    let ir = translator.translate(id, &source).unwrap();
    let metadata = node(&ir).metadata.as_ref().unwrap();
    assert_eq!((metadata.start, metadata.end), (Some(3), Some(4)));
    assert_eq!(
        metadata.leading_comments.as_ref().unwrap()[0].kind,
        CommentKind::Line
    );
    assert_eq!(
        metadata.trailing_comments.as_ref().unwrap()[0].kind,
        CommentKind::Line
    );
    assert_eq!(
        metadata.inner_comments.as_ref().unwrap()[0].kind,
        CommentKind::Block
    );

    let source = json!({
        "type": "Leaf",
        "start": 3,
        "end": 4,
        "loc": { "start": { "line": 1, "column": 3 }, "end": { "line": 1 } },
    });
    let ir = translator.translate(id, &source).unwrap();
    let metadata = node(&ir).metadata.as_ref().unwrap();
    assert_eq!((metadata.start, metadata.end), (Some(3), Some(4)));
    assert!(metadata.loc.is_none());

    let ir = translator
        .translate(id, &json!({ "type": "Leaf", "loc": "1:3" }))
        .unwrap();
    assert!(node(&ir).metadata.is_none());
}

#[test]
fn translation_is_deterministic() {
    let mut b = SchemaBuilder::new();
    let number = b.primitive(Primitive::Number);
    let a = pair(&mut b, "A", number);
    let registry = b.finish().unwrap();
    let translator = Translator::new(&registry);

    let source = json!({ "type": "Pair", "left": 7, "start": 1 });
    assert_eq!(
        translator.translate(a, &source).unwrap(),
        translator.translate(a, &source).unwrap()
    );
}

#[test]
fn foreign_type_id_is_unknown() {
    let mut b = SchemaBuilder::new();
    let number = b.primitive(Primitive::Number);
    let a = pair(&mut b, "A", number);
    let large = b.finish().unwrap();
    assert!(large.contains(a));

    let small = SchemaBuilder::new().finish().unwrap();
    assert!(!small.contains(a));

    let err = Translator::new(&small)
        .translate(a, &json!({ "type": "Pair", "left": 1 }))
        .unwrap_err();
    insta::assert_snapshot!(err, @"unknown type `TypeId(1)`");
}
