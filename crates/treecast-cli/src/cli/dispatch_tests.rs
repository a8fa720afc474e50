//! Tests for CLI dispatch logic.
//!
//! These tests verify:
//! 1. Shared flags: `check` accepts the output flags of `translate`
//! 2. Help visibility: hidden flags don't appear in --help
//! 3. Params extraction: correct fields are extracted from ArgMatches

use std::path::PathBuf;

use super::*;
use crate::cli::commands::{check_command, schema_command, translate_command};

#[test]
fn schema_defaults() {
    let m = schema_command().try_get_matches_from(["schema"]).unwrap();
    let params = SchemaParams::from_matches(&m);

    assert_eq!(params.grammar, None);
    assert_eq!(params.grammar_file, None);
    assert!(!params.synthesized);
}

#[test]
fn schema_grammar_options() {
    let m = schema_command()
        .try_get_matches_from(["schema", "-g", "babel", "--synthesized"])
        .unwrap();
    let params = SchemaParams::from_matches(&m);

    assert_eq!(params.grammar.as_deref(), Some("babel"));
    assert!(params.synthesized);
}

#[test]
fn schema_grammar_sources_conflict() {
    let result = schema_command().try_get_matches_from([
        "schema",
        "-g",
        "estree",
        "--grammar-file",
        "grammar.json",
    ]);
    assert!(result.is_err());
}

#[test]
fn translate_params() {
    let m = translate_command()
        .try_get_matches_from([
            "translate",
            "ast.json",
            "-t",
            "Expression",
            "--metadata",
            "--compact",
            "--max-depth",
            "10",
        ])
        .unwrap();
    let params = TranslateParams::from_matches(&m);

    assert_eq!(params.source_path, Some(PathBuf::from("ast.json")));
    assert_eq!(params.source_text, None);
    assert_eq!(params.type_name, "Expression");
    assert!(params.metadata);
    assert!(params.compact);
    assert_eq!(params.max_depth, Some(10));
}

#[test]
fn translate_defaults_to_program() {
    let m = translate_command()
        .try_get_matches_from(["translate", "-s", "{}"])
        .unwrap();
    let params = TranslateParams::from_matches(&m);

    assert_eq!(params.source_path, None);
    assert_eq!(params.source_text.as_deref(), Some("{}"));
    assert_eq!(params.type_name, "Program");
    assert!(!params.compact);
    assert_eq!(params.max_depth, None);
}

#[test]
fn source_inputs_conflict() {
    let result = translate_command().try_get_matches_from(["translate", "ast.json", "-s", "{}"]);
    assert!(result.is_err());
}

#[test]
fn max_depth_must_be_a_number() {
    let result =
        translate_command().try_get_matches_from(["translate", "ast.json", "--max-depth", "deep"]);
    assert!(result.is_err());
}

#[test]
fn check_accepts_output_flags() {
    let result = check_command().try_get_matches_from([
        "check",
        "ast.json",
        "--metadata",
        "--compact",
        "-t",
        "Pattern",
    ]);
    assert!(
        result.is_ok(),
        "check should accept output flags: {:?}",
        result.err()
    );

    let params = CheckParams::from_matches(&result.unwrap());
    assert_eq!(params.source_path, Some(PathBuf::from("ast.json")));
    assert_eq!(params.type_name, "Pattern");
}

#[test]
fn check_help_hides_output_flags() {
    let help = check_command().render_help().to_string();

    assert!(!help.contains("--metadata"));
    assert!(!help.contains("--compact"));
    assert!(help.contains("--max-depth"));
}

#[test]
fn translate_help_shows_output_flags() {
    let help = translate_command().render_help().to_string();

    assert!(help.contains("--metadata"));
    assert!(help.contains("--compact"));
}

#[test]
fn verbosity_is_global() {
    let m = build_cli()
        .try_get_matches_from(["treecast", "translate", "ast.json", "-vv"])
        .unwrap();
    assert_eq!(m.get_count("verbose"), 2);

    let m = build_cli()
        .try_get_matches_from(["treecast", "grammars"])
        .unwrap();
    assert_eq!(m.get_count("verbose"), 0);
}

#[test]
fn subcommand_required() {
    assert!(build_cli().try_get_matches_from(["treecast"]).is_err());
}
