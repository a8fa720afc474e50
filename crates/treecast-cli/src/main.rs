mod cli;
mod commands;
mod logging;

use cli::{CheckParams, SchemaParams, TranslateParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();
    logging::init(matches.get_count("verbose"));

    match matches.subcommand() {
        Some(("grammars", _)) => commands::grammars::run(),
        Some(("schema", m)) => {
            let params = SchemaParams::from_matches(m);
            commands::schema::run(params.into());
        }
        Some(("translate", m)) => {
            let params = TranslateParams::from_matches(m);
            commands::translate::run(params.into());
        }
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
