use std::path::PathBuf;

use treecast_core::Grammar;
use treecast_lib::{Registry, SchemaBuilder, SynthesisOptions, synthesize};

use super::error::CommandError;
use super::grammar_resolver::{DEFAULT_GRAMMAR, load_grammar_file, require_grammar};
use super::run_common::{catalogue, fail};

pub struct SchemaArgs {
    pub grammar: Option<String>,
    pub grammar_file: Option<PathBuf>,
    pub synthesized: bool,
}

pub fn run(args: SchemaArgs) {
    match build(&args) {
        Ok(registry) => print!("{}", registry.dump()),
        Err(err) => fail(err),
    }
}

fn build(args: &SchemaArgs) -> Result<Registry, CommandError> {
    if let Some(path) = &args.grammar_file {
        let grammar = load_grammar_file(path)?;
        return synthesized(&grammar);
    }

    let lang = require_grammar(args.grammar.as_deref().unwrap_or(DEFAULT_GRAMMAR));
    // Only the default grammar has an IR catalogue.
    if args.synthesized || lang.name() != DEFAULT_GRAMMAR {
        return synthesized(lang);
    }
    catalogue()
}

/// Schema synthesized from the grammar alone.
pub(crate) fn synthesized<G: Grammar>(grammar: G) -> Result<Registry, CommandError> {
    let mut builder = SchemaBuilder::new();
    synthesize(grammar, &mut builder, &SynthesisOptions::default())?;
    Ok(builder.finish()?)
}
