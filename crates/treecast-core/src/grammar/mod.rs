//! Grammar metadata tables.
//!
//! This module provides types for representing the upstream parser's node
//! metadata (per-type fields, validators, optionality, defaults and alias
//! membership), with support for JSON deserialization.

mod json;
mod types;


pub use json::{GrammarError, RawDescriptor, RawField, RawGrammar, RawType};
pub use types::{Descriptor, GrammarField};
