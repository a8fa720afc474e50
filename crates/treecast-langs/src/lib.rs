#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Builtin grammar tables.
//!
//! Each grammar is embedded as a metadata table and parsed once on first use.
//! Grammars are gated behind `grammar-*` features.

use treecast_core::DynamicGrammar;

pub mod builtin;

pub use builtin::*;

/// User-facing grammar handle. Builtin grammars live for the whole program.
pub type Lang = &'static DynamicGrammar;
