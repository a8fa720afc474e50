use std::path::PathBuf;

use super::run_common::{fail, translate_input};

pub struct TranslateArgs {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub type_name: String,
    pub metadata: bool,
    pub pretty: bool,
    pub max_depth: Option<usize>,
}

pub fn run(args: TranslateArgs) {
    let ir = translate_input(
        args.source_text.as_deref(),
        args.source_path.as_deref(),
        &args.type_name,
        args.max_depth,
    )
    .unwrap_or_else(|err| fail(err));

    let json = ir.to_json(args.metadata);
    let output = if args.pretty {
        serde_json::to_string_pretty(&json)
    } else {
        serde_json::to_string(&json)
    };

    match output {
        Ok(json) => println!("{json}"),
        Err(e) => fail(format!("JSON serialization failed: {e}")),
    }
}
