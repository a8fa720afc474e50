pub mod check;
pub mod error;
pub mod grammar_resolver;
pub mod grammars;
pub mod run_common;
pub mod schema;
pub mod translate;
