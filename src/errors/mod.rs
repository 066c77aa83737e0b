//! Error types for the front end.
//!
//! This module defines the fatal errors raised while tokenizing and
//! parsing. It includes:
//!
//! - Error structures with source line information
//! - Specific error variants for lexical and syntax failures
//! - Helpful error messages and suggestions
//!
//! Semantic diagnostics are not errors in this sense; see
//! [`crate::semantic::diagnostics`].

pub mod errors;
