//! treecast: type-directed translation of loose parse trees into a validated IR.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use treecast_lib::{Translator, estree};
//!
//! let registry = estree::registry().expect("catalogue is well-formed");
//! let source = json!({
//!     "type": "BinaryExpression",
//!     "operator": "+",
//!     "left": { "type": "Identifier", "name": "x" },
//!     "right": { "type": "Identifier", "name": "y" },
//! });
//!
//! let ir = Translator::new(&registry)
//!     .translate_named("Expression", &source)
//!     .expect("well-typed source");
//! assert_eq!(ir.as_node().unwrap().type_name, "BinaryExpression");
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod attrs;
#[cfg(feature = "treecast-langs")]
pub mod estree;
pub mod ir;
pub mod schema;
pub mod synthesize;
pub mod translate;


use treecast_core::Path;

pub use ir::{IrNode, IrValue, SourceMetadata};
pub use schema::{Registry, SchemaBuilder, SchemaError, TypeId};
pub use synthesize::{SynthesisOptions, synthesize};
pub use translate::{TranslateOptions, TranslationError, Translator};

/// Errors surfaced by schema construction and translation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// First type mismatch found in the source tree.
    #[error(transparent)]
    Translation(Box<TranslationError>),

    #[error("unknown type `{0}`")]
    UnknownType(String),

    /// Source tree nested deeper than [`TranslateOptions::max_depth`].
    #[error("recursion limit exceeded at `{path}`")]
    RecursionLimitExceeded { path: Path },
}

impl From<TranslationError> for Error {
    fn from(err: TranslationError) -> Self {
        Self::Translation(Box::new(err))
    }
}

/// Result type for treecast operations.
pub type Result<T> = std::result::Result<T, Error>;
