//! Shared plumbing for `translate` and `check`.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use serde_json::Value;
use treecast_lib::{IrValue, Registry, TranslateOptions, Translator, estree};

use super::error::CommandError;

/// Load a source tree from inline text, a file, or stdin (`-` or no path).
pub fn load_source(text: Option<&str>, path: Option<&Path>) -> Result<Value, CommandError> {
    if let Some(text) = text {
        return parse_source(text, "inline source");
    }
    if let Some(path) = path
        && path.as_os_str() != "-"
    {
        let json = fs::read_to_string(path).map_err(|source| CommandError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        return parse_source(&json, &format!("'{}'", path.display()));
    }

    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(CommandError::Stdin)?;
    parse_source(&buf, "stdin")
}

pub fn parse_source(json: &str, origin: &str) -> Result<Value, CommandError> {
    serde_json::from_str(json).map_err(|source| CommandError::InvalidJson {
        origin: origin.to_owned(),
        source,
    })
}

/// The builtin IR catalogue.
pub fn catalogue() -> Result<Registry, CommandError> {
    let registry = estree::registry()?;
    tracing::debug!(types = registry.len(), "registry built");
    Ok(registry)
}

pub fn translate(
    registry: &Registry,
    type_name: &str,
    source: &Value,
    max_depth: Option<usize>,
) -> Result<IrValue, CommandError> {
    let mut options = TranslateOptions::default();
    if let Some(max_depth) = max_depth {
        options = options.max_depth(max_depth);
    }
    tracing::debug!(root = type_name, max_depth = options.max_depth, "translating");

    let ir = Translator::new(registry)
        .with_options(options)
        .translate_named(type_name, source)?;
    Ok(ir)
}

/// Load the source named on the command line and translate it.
pub fn translate_input(
    source_text: Option<&str>,
    source_path: Option<&Path>,
    type_name: &str,
    max_depth: Option<usize>,
) -> Result<IrValue, CommandError> {
    let registry = catalogue()?;
    let source = load_source(source_text, source_path)?;
    translate(&registry, type_name, &source, max_depth)
}

pub fn fail(err: impl std::fmt::Display) -> ! {
    eprintln!("error: {err}");
    std::process::exit(1)
}
