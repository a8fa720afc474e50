//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! `*Params` mirror the command `*Args` but are populated from clap; hidden
//! flags are parsed and then dropped here.

use std::path::PathBuf;

use clap::ArgMatches;

use crate::commands::check::CheckArgs;
use crate::commands::schema::SchemaArgs;
use crate::commands::translate::TranslateArgs;

pub struct SchemaParams {
    pub grammar: Option<String>,
    pub grammar_file: Option<PathBuf>,
    pub synthesized: bool,
}

impl SchemaParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar: m.get_one::<String>("grammar").cloned(),
            grammar_file: m.get_one::<PathBuf>("grammar_file").cloned(),
            synthesized: m.get_flag("synthesized"),
        }
    }
}

impl From<SchemaParams> for SchemaArgs {
    fn from(p: SchemaParams) -> Self {
        Self {
            grammar: p.grammar,
            grammar_file: p.grammar_file,
            synthesized: p.synthesized,
        }
    }
}

pub struct TranslateParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub type_name: String,
    pub metadata: bool,
    pub compact: bool,
    pub max_depth: Option<usize>,
}

impl TranslateParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            type_name: type_name(m),
            metadata: m.get_flag("metadata"),
            compact: m.get_flag("compact"),
            max_depth: m.get_one::<usize>("max_depth").copied(),
        }
    }
}

impl From<TranslateParams> for TranslateArgs {
    fn from(p: TranslateParams) -> Self {
        Self {
            source_path: p.source_path,
            source_text: p.source_text,
            type_name: p.type_name,
            metadata: p.metadata,
            pretty: !p.compact,
            max_depth: p.max_depth,
        }
    }
}

pub struct CheckParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub type_name: String,
    pub max_depth: Option<usize>,
    // Note: metadata and compact are parsed but not extracted (shared flags)
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            type_name: type_name(m),
            max_depth: m.get_one::<usize>("max_depth").copied(),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            source_path: p.source_path,
            source_text: p.source_text,
            type_name: p.type_name,
            max_depth: p.max_depth,
        }
    }
}

fn type_name(m: &ArgMatches) -> String {
    m.get_one::<String>("type")
        .cloned()
        .unwrap_or_else(|| "Program".to_owned())
}
