use std::path::PathBuf;

use super::run_common::{fail, translate_input};

pub struct CheckArgs {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub type_name: String,
    pub max_depth: Option<usize>,
}

pub fn run(args: CheckArgs) {
    match translate_input(
        args.source_text.as_deref(),
        args.source_path.as_deref(),
        &args.type_name,
        args.max_depth,
    ) {
        Ok(ir) => println!("ok: {}", ir.kind_name()),
        Err(err) => fail(err),
    }
}
