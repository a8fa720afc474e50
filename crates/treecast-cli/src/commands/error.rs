use std::io;
use std::path::PathBuf;

use treecast_core::GrammarError;
use treecast_lib::SchemaError;

/// Failures a command reports before exiting.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("failed to read '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to read stdin: {0}")]
    Stdin(io::Error),

    #[error("invalid JSON in {origin}: {source}")]
    InvalidJson {
        origin: String,
        source: serde_json::Error,
    },

    #[error("unknown grammar: '{0}'")]
    UnknownGrammar(String),

    #[error("invalid grammar table '{}': {source}", .path.display())]
    GrammarFile { path: PathBuf, source: GrammarError },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Translate(#[from] treecast_lib::Error),
}
