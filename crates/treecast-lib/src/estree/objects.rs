//! Object literals and their members.
//!
//! The source grammar uses one `ObjectProperty` record for every member form.
//! The IR splits it by the `shorthand` and `computed` flags, and picks between
//! value and pattern properties by looking at the translated value.

use super::{Common, free_in};
use crate::schema::{
    FieldDescriptor, InspectArm, InspectSchema, ProductSchema, SchemaBuilder, SourcePattern,
};

pub(super) fn define(b: &mut SchemaBuilder, t: &Common) {
    let property_name = b.declare("PropertyName");
    let string = b.declare("StringLiteral");
    let number = b.declare("NumericLiteral");
    let key = b.union("PropertyKey", vec![property_name, string, number]);

    let longhand = b.product(
        "ObjectPropertyLonghand",
        ProductSchema::new(
            SourcePattern::new("ObjectProperty")
                .with("shorthand", false)
                .with("computed", false),
            vec![
                FieldDescriptor::required("key", key),
                FieldDescriptor::required("value", t.expression),
                t.flag("shorthand", false),
                t.flag("computed", false),
                t.free_variables(free_in(&["value"])),
            ],
        ),
    );

    let computed = b.product(
        "ComputedObjectProperty",
        ProductSchema::new(
            SourcePattern::new("ObjectProperty")
                .with("shorthand", false)
                .with("computed", true),
            vec![
                FieldDescriptor::required("key", t.expression),
                FieldDescriptor::required("value", t.expression),
                t.flag("shorthand", false),
                t.flag("computed", true),
                t.free_variables(free_in(&["key", "value"])),
            ],
        ),
    );

    let identifier = b.declare("IdentifierExpression");
    let shorthand = b.product(
        "ObjectPropertyShorthand",
        ProductSchema::new(
            SourcePattern::new("ObjectProperty").with("shorthand", true),
            vec![
                FieldDescriptor::required("key", property_name),
                FieldDescriptor::required("value", identifier),
                t.flag("shorthand", true),
                t.flag("computed", false),
                t.free_variables(free_in(&["value"])),
            ],
        ),
    );

    let property = b.union("ObjectProperty", vec![longhand, computed, shorthand]);

    // `{ a = 1 }` parses as an object literal before it is known to be a
    // pattern; the translated value decides.
    let destructuring = b.declare("DestructuringPattern");
    let value = b.union("ObjectMemberValue", vec![t.expression, destructuring]);
    let pattern_property = b.declare("ObjectPropertyPattern");
    let member = b.inspect(
        "ObjectMember",
        InspectSchema {
            field: "value".into(),
            probe: value,
            arms: vec![
                InspectArm {
                    test: destructuring,
                    target: pattern_property,
                },
                InspectArm {
                    test: t.expression,
                    target: property,
                },
            ],
        },
    );

    let spread = b.declare("SpreadElement");
    let member = b.union_of([member, spread]);
    let properties = b.array_of(member);
    b.product(
        "ObjectExpression",
        ProductSchema::new(
            SourcePattern::new("ObjectExpression"),
            vec![
                FieldDescriptor::required("properties", properties),
                t.free_variables(free_in(&["properties"])),
            ],
        ),
    );
}
