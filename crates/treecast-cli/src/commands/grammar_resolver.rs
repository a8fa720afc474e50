use std::fs;
use std::path::Path;

use treecast_core::{DynamicGrammar, Grammar};
use treecast_langs::Lang;

use super::error::CommandError;

pub const DEFAULT_GRAMMAR: &str = "estree";

/// Resolve a builtin grammar by name or alias.
pub fn resolve_grammar(name: &str) -> Result<Lang, CommandError> {
    treecast_langs::from_name(name).ok_or_else(|| CommandError::UnknownGrammar(name.to_owned()))
}

/// Resolve a builtin grammar, exiting with hints if the name is unknown.
pub fn require_grammar(name: &str) -> Lang {
    match resolve_grammar(name) {
        Ok(lang) => lang,
        Err(err) => {
            eprintln!("error: {err}");
            if let Some(suggestion) = suggest_grammar(name) {
                eprintln!();
                eprintln!("Did you mean '{suggestion}'?");
            }
            eprintln!();
            eprintln!("Run 'treecast grammars' for the full list.");
            std::process::exit(1);
        }
    }
}

/// Read a grammar metadata table from disk.
pub fn load_grammar_file(path: &Path) -> Result<DynamicGrammar, CommandError> {
    let json = fs::read_to_string(path).map_err(|source| CommandError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_grammar(&json, path)
}

pub fn parse_grammar(json: &str, path: &Path) -> Result<DynamicGrammar, CommandError> {
    let grammar = DynamicGrammar::from_json(json).map_err(|source| CommandError::GrammarFile {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(grammar = grammar.name(), types = grammar.len(), "grammar loaded");
    Ok(grammar)
}

/// Suggest a builtin grammar for typos, matching aliases too. Short names
/// tolerate fewer edits.
pub fn suggest_grammar(input: &str) -> Option<String> {
    let input = input.to_lowercase();
    treecast_langs::names()
        .into_iter()
        .map(|(name, lang)| (name, strsim::levenshtein(name, &input), lang))
        .filter(|(name, distance, _)| *distance <= (name.len() / 3).max(1))
        .min_by_key(|(_, distance, _)| *distance)
        .map(|(_, _, lang)| lang.name().to_owned())
}
