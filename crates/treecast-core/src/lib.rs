#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for treecast grammar information.
//!
//! Two layers:
//! - **Deserialization layer** ([`grammar`]): 1:1 mapping to the upstream
//!   parser's metadata table
//! - **Analysis layer** ([`DynamicGrammar`]): name-indexed lookups with alias
//!   groups flipped into alias → members
//!
//! Also home to [`Path`], the location type shared by every translation step.

use indexmap::IndexMap;

pub mod grammar;
mod path;

pub use grammar::{Descriptor, GrammarError, GrammarField, RawGrammar};
pub use path::{Path, PathKey};

// ============================================================================
// Grammar Trait
// ============================================================================

/// Lookup contract over a grammar's node metadata.
///
/// Provides what schema synthesis needs:
/// - The set of node type and alias names
/// - Field metadata per node type
/// - Alias group membership
pub trait Grammar {
    fn name(&self) -> &str;

    /// Node types in declaration order, followed by alias names.
    fn type_names(&self) -> Vec<&str>;

    /// Fields of a node type; `None` if the name is not a node type.
    fn fields_of(&self, type_name: &str) -> Option<&[GrammarField]>;

    /// Members of an alias group; `None` if the name is not an alias.
    fn alias_members_of(&self, alias: &str) -> Option<&[String]>;

    fn is_alias(&self, name: &str) -> bool {
        self.alias_members_of(name).is_some()
    }
}

impl<T: Grammar + ?Sized> Grammar for &T {
    fn name(&self) -> &str {
        (*self).name()
    }
    fn type_names(&self) -> Vec<&str> {
        (*self).type_names()
    }
    fn fields_of(&self, type_name: &str) -> Option<&[GrammarField]> {
        (*self).fields_of(type_name)
    }
    fn alias_members_of(&self, alias: &str) -> Option<&[String]> {
        (*self).alias_members_of(alias)
    }
}

// ============================================================================
// Dynamic Analysis Layer (runtime construction)
// ============================================================================

/// Grammar built at runtime from a metadata table.
#[derive(Debug, Clone)]
pub struct DynamicGrammar {
    name: String,
    types: IndexMap<String, Vec<GrammarField>>,
    aliases: IndexMap<String, Vec<String>>,
}

impl DynamicGrammar {
    /// Parse a metadata table and build the grammar.
    pub fn from_json(json: &str) -> Result<Self, GrammarError> {
        Ok(Self::from_raw(RawGrammar::from_json(json)?))
    }

    /// Build from a parsed table, flipping each type's alias membership into
    /// alias → member types. Members keep the table's type order.
    pub fn from_raw(raw: RawGrammar) -> Self {
        let mut types = IndexMap::with_capacity(raw.types.len());
        let mut aliases: IndexMap<String, Vec<String>> = IndexMap::new();

        for (type_name, raw_type) in &raw.types {
            for alias in &raw_type.aliases {
                let members = aliases.entry(alias.clone()).or_default();
                if !members.contains(type_name) {
                    members.push(type_name.clone());
                }
            }
            types.insert(type_name.clone(), raw_type.grammar_fields());
        }

        Self {
            name: raw.name,
            types,
            aliases,
        }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Alias groups in first-seen order.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.aliases
            .iter()
            .map(|(alias, members)| (alias.as_str(), members.as_slice()))
    }
}

impl Grammar for DynamicGrammar {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.extend(
            self.aliases
                .keys()
                .filter(|alias| !self.types.contains_key(*alias))
                .map(String::as_str),
        );
        names
    }

    fn fields_of(&self, type_name: &str) -> Option<&[GrammarField]> {
        self.types.get(type_name).map(Vec::as_slice)
    }

    fn alias_members_of(&self, alias: &str) -> Option<&[String]> {
        self.aliases.get(alias).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod path_tests;
