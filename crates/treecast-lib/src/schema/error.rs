/// Failure while synthesizing or freezing a schema. Fatal at initialization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("`{type_name}.{field}` has no validator")]
    MissingDescriptor { type_name: String, field: String },

    #[error("`{type_name}.{field}`: unsupported validator ({detail})")]
    UnsupportedDescriptor {
        type_name: String,
        field: String,
        detail: String,
    },

    #[error("`{type_name}.{field}` references unknown type `{name}`")]
    UnknownReference {
        type_name: String,
        field: String,
        name: String,
    },

    #[error("type `{0}` is declared but never defined")]
    Undefined(String),

    #[error("duplicate field `{field}` in `{type_name}`")]
    DuplicateField { type_name: String, field: String },

    #[error("computed field `{type_name}.{field}` depends on unknown field `{dependency}`")]
    UnknownDependency {
        type_name: String,
        field: String,
        dependency: String,
    },

    #[error("computed fields of `{type_name}` form a cycle: {}", .fields.join(" -> "))]
    DependencyCycle {
        type_name: String,
        fields: Vec<String>,
    },

    #[error("union `{0}` has no alternatives")]
    EmptyUnion(String),

    #[error("union `{0}` contains itself")]
    UnionCycle(String),

    #[error("inspect type `{type_name}` probes `{field}`, which `{target}` does not read")]
    InspectField {
        type_name: String,
        field: String,
        target: String,
    },
}
