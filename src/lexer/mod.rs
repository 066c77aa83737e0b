//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using an ordered table of regex patterns
//! - Recognition of the reserved words, identifiers, literals, and operators
//! - Line tracking for error reporting
//! - Line and block comments, and whitespace

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
