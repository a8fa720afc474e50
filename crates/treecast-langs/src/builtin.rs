use std::sync::LazyLock;

use treecast_core::DynamicGrammar;

use crate::Lang;

macro_rules! define_grammars {
    (
        $(
            $fn_name:ident => {
                feature: $feature:literal,
                table: $table:literal,
                names: [$($alias:literal),* $(,)?] $(,)?
            }
        ),* $(,)?
    ) => {
        $(
            #[cfg(feature = $feature)]
            pub fn $fn_name() -> Lang {
                static GRAMMAR: LazyLock<DynamicGrammar> = LazyLock::new(|| {
                    DynamicGrammar::from_json(include_str!($table))
                        .expect("embedded grammar table is valid")
                });
                &GRAMMAR
            }
        )*

        pub fn from_name(s: &str) -> Option<Lang> {
            match s.to_ascii_lowercase().as_str() {
                $(
                    #[cfg(feature = $feature)]
                    $($alias)|* => Some($fn_name()),
                )*
                _ => None,
            }
        }

        /// Every accepted name, aliases included, with its grammar.
        pub fn names() -> Vec<(&'static str, Lang)> {
            let mut names = Vec::new();
            $(
                #[cfg(feature = $feature)]
                names.extend([$($alias),*].map(|name| (name, $fn_name())));
            )*
            names
        }

        pub fn all() -> Vec<Lang> {
            vec![
                $(
                    #[cfg(feature = $feature)]
                    $fn_name(),
                )*
            ]
        }
    };
}

define_grammars! {
    estree => {
        feature: "grammar-estree",
        table: "grammars/estree.json",
        names: ["estree", "babel", "javascript", "js"],
    },
}
