use super::{Common, free_in};
use crate::ir::IrValue;
use crate::schema::{FieldDescriptor, ProductSchema, SchemaBuilder, SourcePattern};

pub(super) fn define(b: &mut SchemaBuilder, t: &Common) {
    let body = b.array_of(t.statement);
    let directive = b.declare("Directive");
    let directives = b.array_of(directive);
    let block = b.product(
        "BlockStatement",
        ProductSchema::new(
            SourcePattern::new("BlockStatement"),
            vec![
                FieldDescriptor::required("body", body),
                FieldDescriptor::with_default(
                    "directives",
                    directives,
                    IrValue::List(im::Vector::new()),
                ),
                t.free_variables(free_in(&["body"])),
            ],
        ),
    );

    let expression = b.product(
        "ExpressionStatement",
        ProductSchema::new(
            SourcePattern::new("ExpressionStatement"),
            vec![
                FieldDescriptor::required("expression", t.expression),
                t.free_variables(free_in(&["expression"])),
            ],
        ),
    );

    let argument = b.nullable(t.expression);
    let ret = b.product(
        "ReturnStatement",
        ProductSchema::new(
            SourcePattern::new("ReturnStatement"),
            vec![
                FieldDescriptor::with_default("argument", argument, IrValue::Null),
                t.free_variables(free_in(&["argument"])),
            ],
        ),
    );

    b.define_union(t.statement, vec![block, expression, ret]);
}
