use serde_json::json;
use treecast_core::Path;

use super::*;

#[test]
fn found_summaries() {
    assert_eq!(Found::of(None).to_string(), "undefined");
    assert_eq!(Found::of(Some(&json!("text"))).to_string(), "text");
    assert_eq!(Found::of(Some(&json!(1.5))).to_string(), "1.5");
    assert_eq!(Found::of(Some(&json!(null))).to_string(), "null");
    assert_eq!(
        Found::of(Some(&json!({ "type": "Identifier", "name": "x" }))).to_string(),
        "[Node Identifier]"
    );
    assert_eq!(Found::of(Some(&json!({ "name": "x" }))).to_string(), r#"{"name":"x"}"#);
    assert_eq!(Found::of(Some(&json!([1, "a"]))).to_string(), r#"[1,"a"]"#);
}

#[test]
fn expected_rendering() {
    assert_eq!(Expected::Type("Expression".into()).to_string(), "type `Expression`");
    assert_eq!(Expected::Literal(json!(true)).to_string(), "`true`");
    assert_eq!(Expected::Literal(json!("+")).to_string(), r#"`"+"`"#);
}

#[test]
fn message_format() {
    let path = Path::root().field("body").index(0).field("expression");
    let err = TranslationError::mismatch(
        Expected::Type("Expression".into()),
        &path,
        Some(&json!({ "type": "Directive" })),
    );

    insta::assert_snapshot!(
        err,
        @"expected type `Expression` at `root.body.0.expression`, but found: [Node Directive]"
    );
}

#[test]
fn exhausted_records_kind() {
    let err = TranslationError::exhausted("Pattern", &Path::root(), None);

    assert_eq!(err.kind, ErrorKind::UnionExhausted);
    assert_eq!(err.found, Found::Missing);
    insta::assert_snapshot!(err, @"expected type `Pattern` at `root`, but found: undefined");
}
