//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` so one definition can be reused
//! across commands, visible in some and hidden (via `.hide(true)`) in others.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Source tree file (positional).
pub fn source_path_arg() -> Arg {
    Arg::new("source_path")
        .value_name("SOURCE")
        .value_parser(value_parser!(PathBuf))
        .help("Source tree as JSON (use \"-\" or omit for stdin)")
}

/// Inline source tree (-s/--source).
pub fn source_text_arg() -> Arg {
    Arg::new("source_text")
        .short('s')
        .long("source")
        .value_name("JSON")
        .conflicts_with("source_path")
        .help("Inline source tree")
}

/// Root IR type (-t/--type).
pub fn type_arg() -> Arg {
    Arg::new("type")
        .short('t')
        .long("type")
        .value_name("TYPE")
        .default_value("Program")
        .help("IR type of the root node")
}

/// Builtin grammar (-g/--grammar).
pub fn grammar_arg() -> Arg {
    Arg::new("grammar")
        .short('g')
        .long("grammar")
        .value_name("GRAMMAR")
        .help("Builtin grammar name or alias (default: estree)")
}

/// Grammar metadata table on disk (--grammar-file).
pub fn grammar_file_arg() -> Arg {
    Arg::new("grammar_file")
        .long("grammar-file")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .conflicts_with("grammar")
        .help("Grammar metadata table (JSON)")
}

/// Skip the IR catalogue (--synthesized).
pub fn synthesized_arg() -> Arg {
    Arg::new("synthesized")
        .long("synthesized")
        .action(ArgAction::SetTrue)
        .help("Show only the schema synthesized from the grammar")
}

/// Keep source metadata in output (--metadata).
pub fn metadata_arg() -> Arg {
    Arg::new("metadata")
        .long("metadata")
        .action(ArgAction::SetTrue)
        .help("Include source positions and comments")
}

/// Output compact JSON (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Output compact JSON (default: pretty)")
}

/// Nesting bound (--max-depth).
pub fn max_depth_arg() -> Arg {
    Arg::new("max_depth")
        .long("max-depth")
        .value_name("N")
        .value_parser(value_parser!(usize))
        .help("Maximum node nesting depth (default: 256)")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .global(true)
        .help("Verbosity level (-v for debug, -vv for trace logging)")
}
