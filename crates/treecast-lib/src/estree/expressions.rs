//! Expressions.

use super::{Common, free_in, rest_of};
use crate::attrs::{BINDING_NAMES, Computed, FREE_VARIABLES, SetExpr};
use crate::ir::IrValue;
use crate::schema::{FieldDescriptor, ProductSchema, SchemaBuilder, SourcePattern};

pub(super) fn define(b: &mut SchemaBuilder, t: &Common) {
    literals(b, t);
    identifiers(b, t);
    operators(b, t);
    calls_and_members(b, t);
    compounds(b, t);
    functions(b, t);

    let alternatives = [
        "IdentifierExpression",
        "StringLiteral",
        "NumericLiteral",
        "BooleanLiteral",
        "NullLiteral",
        "TemplateLiteral",
        "TaggedTemplateExpression",
        "ThisExpression",
        "ArrayExpression",
        "ObjectExpression",
        "UnaryExpression",
        "UpdateExpression",
        "BinaryExpression",
        "LogicalExpression",
        "AssignmentExpression",
        "ConditionalExpression",
        "CallExpression",
        "NewExpression",
        "StaticMemberExpression",
        "ComputedMemberExpression",
        "SequenceExpression",
        "AwaitExpression",
        "YieldExpression",
        "FunctionExpression",
        "ArrowFunctionExpression",
    ]
    .into_iter()
    .map(|name| b.declare(name))
    .collect();
    b.define_union(t.expression, alternatives);
}

fn literals(b: &mut SchemaBuilder, t: &Common) {
    for (name, ty) in [
        ("StringLiteral", t.string),
        ("NumericLiteral", t.number),
        ("BooleanLiteral", t.boolean),
    ] {
        let fields = vec![
            FieldDescriptor::required("value", ty),
            t.no_free_variables(),
        ];
        b.product(name, ProductSchema::new(SourcePattern::new(name), fields));
    }
    b.product(
        "NullLiteral",
        ProductSchema::new(SourcePattern::new("NullLiteral"), vec![t.no_free_variables()]),
    );
}

fn identifiers(b: &mut SchemaBuilder, t: &Common) {
    b.product(
        "IdentifierExpression",
        ProductSchema::new(
            SourcePattern::new("Identifier"),
            vec![
                FieldDescriptor::required("name", t.string),
                t.free_variables(SetExpr::new().name("name")),
            ],
        ),
    );

    // Non-computed member properties and object keys: names, not references.
    b.product(
        "PropertyName",
        ProductSchema::new(
            SourcePattern::new("Identifier"),
            vec![
                FieldDescriptor::required("name", t.string),
                t.no_free_variables(),
            ],
        ),
    );
}

fn operators(b: &mut SchemaBuilder, t: &Common) {
    for (name, prefix) in [("UnaryExpression", true), ("UpdateExpression", false)] {
        let fields = vec![
            FieldDescriptor::required("operator", t.string),
            FieldDescriptor::required("argument", t.expression),
            FieldDescriptor::with_default("prefix", t.boolean, prefix.into()),
            t.free_variables(free_in(&["argument"])),
        ];
        b.product(name, ProductSchema::new(SourcePattern::new(name), fields));
    }

    for name in ["BinaryExpression", "LogicalExpression"] {
        let fields = vec![
            FieldDescriptor::required("operator", t.string),
            FieldDescriptor::required("left", t.expression),
            FieldDescriptor::required("right", t.expression),
            t.free_variables(free_in(&["left", "right"])),
        ];
        b.product(name, ProductSchema::new(SourcePattern::new(name), fields));
    }

    // Assigned names are references to bindings outside the expression.
    let target = b.declare("AssignmentTarget");
    b.product(
        "AssignmentExpression",
        ProductSchema::new(
            SourcePattern::new("AssignmentExpression"),
            vec![
                FieldDescriptor::required("operator", t.string),
                FieldDescriptor::required("left", target),
                FieldDescriptor::required("right", t.expression),
                t.free_variables(
                    free_in(&["left", "right"]).take("left", BINDING_NAMES),
                ),
            ],
        ),
    );

    b.product(
        "ConditionalExpression",
        ProductSchema::new(
            SourcePattern::new("ConditionalExpression"),
            vec![
                FieldDescriptor::required("test", t.expression),
                FieldDescriptor::required("consequent", t.expression),
                FieldDescriptor::required("alternate", t.expression),
                t.free_variables(free_in(&["test", "consequent", "alternate"])),
            ],
        ),
    );
}

fn calls_and_members(b: &mut SchemaBuilder, t: &Common) {
    let spread = b.declare("SpreadElement");
    b.product(
        "SpreadElement",
        ProductSchema::new(
            SourcePattern::new("SpreadElement"),
            vec![
                FieldDescriptor::required("argument", t.expression),
                t.free_variables(free_in(&["argument"])),
            ],
        ),
    );

    let argument = b.union_of([t.expression, spread]);
    let arguments = b.array_of(argument);
    let optional = b.nullable(t.boolean);

    b.product(
        "CallExpression",
        ProductSchema::new(
            SourcePattern::new("CallExpression"),
            vec![
                FieldDescriptor::required("callee", t.expression),
                FieldDescriptor::required("arguments", arguments),
                FieldDescriptor::with_default("optional", optional, IrValue::Null),
                t.free_variables(free_in(&["callee", "arguments"])),
            ],
        ),
    );
    b.product(
        "NewExpression",
        ProductSchema::new(
            SourcePattern::new("NewExpression"),
            vec![
                FieldDescriptor::required("callee", t.expression),
                FieldDescriptor::required("arguments", arguments),
                t.free_variables(free_in(&["callee", "arguments"])),
            ],
        ),
    );

    let property_name = b.declare("PropertyName");
    b.product(
        "StaticMemberExpression",
        ProductSchema::new(
            SourcePattern::new("MemberExpression").with("computed", false),
            vec![
                FieldDescriptor::required("object", t.expression),
                FieldDescriptor::required("property", property_name),
                FieldDescriptor::with_default("optional", optional, IrValue::Null),
                t.flag("computed", false),
                t.free_variables(free_in(&["object"])),
            ],
        ),
    );
    b.product(
        "ComputedMemberExpression",
        ProductSchema::new(
            SourcePattern::new("MemberExpression").with("computed", true),
            vec![
                FieldDescriptor::required("object", t.expression),
                FieldDescriptor::required("property", t.expression),
                FieldDescriptor::with_default("optional", optional, IrValue::Null),
                t.flag("computed", true),
                t.free_variables(free_in(&["object", "property"])),
            ],
        ),
    );
}

fn compounds(b: &mut SchemaBuilder, t: &Common) {
    let spread = b.declare("SpreadElement");
    let element = b.union_of([t.expression, spread]);
    let element = b.nullable(element);
    let elements = b.array_of(element);
    b.product(
        "ArrayExpression",
        ProductSchema::new(
            SourcePattern::new("ArrayExpression"),
            vec![
                FieldDescriptor::with_default("elements", elements, IrValue::List(im::Vector::new())),
                t.free_variables(free_in(&["elements"])),
            ],
        ),
    );

    let expressions = b.array_of(t.expression);
    b.product(
        "SequenceExpression",
        ProductSchema::new(
            SourcePattern::new("SequenceExpression"),
            vec![
                FieldDescriptor::required("expressions", expressions),
                t.free_variables(free_in(&["expressions"])),
            ],
        ),
    );

    b.product(
        "ThisExpression",
        ProductSchema::new(SourcePattern::new("ThisExpression"), vec![t.no_free_variables()]),
    );

    b.product(
        "AwaitExpression",
        ProductSchema::new(
            SourcePattern::new("AwaitExpression"),
            vec![
                FieldDescriptor::required("argument", t.expression),
                t.free_variables(free_in(&["argument"])),
            ],
        ),
    );

    let maybe_expression = b.nullable(t.expression);
    b.product(
        "YieldExpression",
        ProductSchema::new(
            SourcePattern::new("YieldExpression"),
            vec![
                FieldDescriptor::with_default("delegate", t.boolean, false.into()),
                FieldDescriptor::with_default("argument", maybe_expression, IrValue::Null),
                t.free_variables(free_in(&["argument"])),
            ],
        ),
    );

    let template_element = b.declare("TemplateElement");
    let quasis = b.array_of(template_element);
    let template = b.product(
        "TemplateLiteral",
        ProductSchema::new(
            SourcePattern::new("TemplateLiteral"),
            vec![
                FieldDescriptor::required("quasis", quasis),
                FieldDescriptor::required("expressions", expressions),
                t.free_variables(free_in(&["expressions"])),
            ],
        ),
    );
    b.product(
        "TaggedTemplateExpression",
        ProductSchema::new(
            SourcePattern::new("TaggedTemplateExpression"),
            vec![
                FieldDescriptor::required("tag", t.expression),
                FieldDescriptor::required("quasi", template),
                t.free_variables(free_in(&["tag", "quasi"])),
            ],
        ),
    );
}

fn functions(b: &mut SchemaBuilder, t: &Common) {
    let parameters = b.array_of(t.pattern);
    let rest = b.declare("RestElement");
    let rest = b.nullable(rest);
    let block = b.declare("BlockStatement");

    // Parameters bind their names for the whole function, defaults included.
    let scoped = |own: SetExpr| {
        own.take("parameters", FREE_VARIABLES)
            .take("restParameter", FREE_VARIABLES)
            .subtract("parameters", BINDING_NAMES)
            .subtract("restParameter", BINDING_NAMES)
    };

    let identifier = b.declare("IdentifierPattern");
    let id = b.nullable(identifier);
    b.product(
        "FunctionExpression",
        ProductSchema::new(
            SourcePattern::new("FunctionExpression"),
            vec![
                FieldDescriptor::with_default("id", id, IrValue::Null),
                FieldDescriptor::required("parameters", parameters).from_key("params"),
                FieldDescriptor::required("restParameter", rest).extract(&["params"], rest_of("params")),
                FieldDescriptor::required("body", block),
                FieldDescriptor::with_default("generator", t.boolean, false.into()),
                FieldDescriptor::with_default("async", t.boolean, false.into()),
                t.free_variables(
                    scoped(free_in(&["body"]))
                        .subtract("id", BINDING_NAMES)
                        .exclude(["arguments"]),
                ),
            ],
        ),
    );

    let body = b.union("ArrowFunctionBody", vec![block, t.expression]);
    b.product(
        "ArrowFunctionExpression",
        ProductSchema::new(
            SourcePattern::new("ArrowFunctionExpression"),
            vec![
                FieldDescriptor::computed("id", id, Computed::always(IrValue::Null)),
                FieldDescriptor::required("parameters", parameters).from_key("params"),
                FieldDescriptor::required("restParameter", rest).extract(&["params"], rest_of("params")),
                FieldDescriptor::required("body", body),
                FieldDescriptor::with_default("async", t.boolean, false.into()),
                FieldDescriptor::with_default("expression", t.boolean, false.into()),
                t.flag("generator", false),
                t.free_variables(scoped(free_in(&["body"]))),
            ],
        ),
    );
}
