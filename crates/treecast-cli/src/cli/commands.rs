//! Command builders for the CLI.
//!
//! `translate` and `check` share their flags: `check` accepts the output
//! flags of `translate` but hides them from `--help`.

use clap::Command;

use super::args::*;

/// Add hidden output args (for commands that print no IR).
fn with_hidden_output_args(cmd: Command) -> Command {
    cmd.arg(metadata_arg().hide(true))
        .arg(compact_arg().hide(true))
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("treecast")
        .about("Type-directed translation of parse trees into a validated IR")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(grammars_command())
        .subcommand(schema_command())
        .subcommand(translate_command())
        .subcommand(check_command())
}

/// List builtin grammars.
pub fn grammars_command() -> Command {
    Command::new("grammars").about("List builtin grammars")
}

/// Dump a schema registry.
pub fn schema_command() -> Command {
    Command::new("schema")
        .about("Show the type registry")
        .override_usage(
            "\
  treecast schema [-g <GRAMMAR>] [--synthesized]
  treecast schema --grammar-file <FILE>",
        )
        .after_help(
            r#"EXAMPLES:
  treecast schema                        # estree IR catalogue
  treecast schema --synthesized          # grammar-only schema
  treecast schema --grammar-file g.json  # schema of a custom grammar"#,
        )
        .arg(grammar_arg())
        .arg(grammar_file_arg())
        .arg(synthesized_arg())
}

/// Translate a source tree and print the IR.
pub fn translate_command() -> Command {
    Command::new("translate")
        .about("Translate a source tree and print the IR as JSON")
        .override_usage(
            "\
  treecast translate [SOURCE] [-t <TYPE>]
  treecast translate -s <JSON> [-t <TYPE>]",
        )
        .after_help(
            r#"EXAMPLES:
  treecast translate ast.json                 # Program root
  treecast translate ast.json --metadata      # keep positions and comments
  babel-parse app.js | treecast translate     # read stdin
  treecast translate -t Expression -s '{"type":"Identifier","name":"x"}'"#,
        )
        .arg(source_path_arg())
        .arg(source_text_arg())
        .arg(type_arg())
        .arg(metadata_arg())
        .arg(compact_arg())
        .arg(max_depth_arg())
}

/// Validate a source tree against an IR type.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Check that a source tree translates")
        .override_usage(
            "\
  treecast check [SOURCE] [-t <TYPE>]
  treecast check -s <JSON> [-t <TYPE>]",
        )
        .after_help(
            r#"EXAMPLES:
  treecast check ast.json
  treecast check -t Pattern -s '{"type":"ArrayPattern","elements":[]}'"#,
        )
        .arg(source_path_arg())
        .arg(source_text_arg())
        .arg(type_arg())
        .arg(max_depth_arg());

    with_hidden_output_args(cmd)
}
