use treecast_core::Grammar;

pub fn run() {
    let grammars = treecast_langs::all();
    println!("Builtin grammars ({}):", grammars.len());
    for grammar in grammars {
        println!("  {} ({} node types)", grammar.name(), grammar.len());
    }
}
