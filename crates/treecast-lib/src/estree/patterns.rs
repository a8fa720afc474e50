//! Binding and assignment patterns.

use super::{Common, free_in, rest_of, union_of};
use crate::attrs::{BINDING_NAMES, SetExpr};
use crate::schema::{FieldDescriptor, ProductSchema, SchemaBuilder, SourcePattern};

pub(super) fn define(b: &mut SchemaBuilder, t: &Common) {
    let rest = b.declare("RestElement");
    let maybe_rest = b.nullable(rest);

    let identifier = b.product(
        "IdentifierPattern",
        ProductSchema::new(
            SourcePattern::new("Identifier"),
            vec![
                FieldDescriptor::required("name", t.string),
                t.binding_names(SetExpr::new().name("name")),
                t.no_free_variables(),
            ],
        ),
    );

    let key = b.declare("PropertyKey");
    let property = b.product(
        "ObjectPropertyPattern",
        ProductSchema::new(
            SourcePattern::new("ObjectProperty").with("computed", false),
            vec![
                FieldDescriptor::required("key", key),
                FieldDescriptor::required("value", t.pattern),
                FieldDescriptor::with_default("shorthand", t.boolean, false.into()),
                t.binding_names(union_of(BINDING_NAMES, &["value"])),
                t.free_variables(free_in(&["value"])),
            ],
        ),
    );

    let computed_property = b.product(
        "ComputedObjectPropertyPattern",
        ProductSchema::new(
            SourcePattern::new("ObjectProperty").with("computed", true),
            vec![
                FieldDescriptor::required("key", t.expression),
                FieldDescriptor::required("value", t.pattern),
                t.binding_names(union_of(BINDING_NAMES, &["value"])),
                t.free_variables(free_in(&["key", "value"])),
            ],
        ),
    );

    let property = b.union("ObjectPatternProperty", vec![property, computed_property]);
    let properties = b.array_of(property);
    let object = b.product(
        "ObjectPattern",
        ProductSchema::new(
            SourcePattern::new("ObjectPattern"),
            vec![
                FieldDescriptor::required("properties", properties),
                FieldDescriptor::required("restProperty", maybe_rest)
                    .extract(&["properties"], rest_of("properties")),
                t.binding_names(union_of(BINDING_NAMES, &["properties", "restProperty"])),
                t.free_variables(free_in(&["properties", "restProperty"])),
            ],
        ),
    );

    let hole = b.nullable(t.pattern);
    let elements = b.array_of(hole);
    let array = b.product(
        "ArrayPattern",
        ProductSchema::new(
            SourcePattern::new("ArrayPattern"),
            vec![
                FieldDescriptor::required("elements", elements),
                FieldDescriptor::required("restElement", maybe_rest)
                    .extract(&["elements"], rest_of("elements")),
                t.binding_names(union_of(BINDING_NAMES, &["elements", "restElement"])),
                t.free_variables(free_in(&["elements", "restElement"])),
            ],
        ),
    );

    let assignment = b.product(
        "AssignmentPattern",
        ProductSchema::new(
            SourcePattern::new("AssignmentPattern"),
            vec![
                FieldDescriptor::required("left", t.pattern),
                FieldDescriptor::required("right", t.expression),
                t.binding_names(union_of(BINDING_NAMES, &["left"])),
                t.free_variables(free_in(&["left", "right"])),
            ],
        ),
    );

    b.product(
        "RestElement",
        ProductSchema::new(
            SourcePattern::new("RestElement"),
            vec![
                FieldDescriptor::required("argument", t.pattern),
                t.binding_names(union_of(BINDING_NAMES, &["argument"])),
                t.free_variables(free_in(&["argument"])),
            ],
        ),
    );

    // Members only ever appear in assignment positions, where they bind nothing.
    let static_member = b.declare("StaticMemberExpression");
    let computed_member = b.declare("ComputedMemberExpression");
    b.define_union(
        t.pattern,
        vec![identifier, object, array, assignment, static_member, computed_member],
    );
    b.union("DestructuringPattern", vec![object, array, assignment]);

    b.union(
        "AssignmentTarget",
        vec![identifier, object, array, static_member, computed_member],
    );
}
