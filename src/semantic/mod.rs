//! Scope tracking and semantic checks.
//!
//! - symbol_table: the scope manager, an arena of symbol records plus the
//!   stack of open scopes
//! - diagnostics: typed errors and warnings produced by analysis
//! - analyzer: the tree walk that resolves names and infers primitive types

pub mod analyzer;
pub mod diagnostics;
pub mod symbol_table;
