//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into an Abstract Syntax Tree. It uses a Pratt parser for expressions
//! with Lua operator precedence and handles:
//!
//! - Statement parsing (assignments, functions, loops, conditionals)
//! - Expression parsing (binary and unary ops, calls, indexing, tables)
//! - Fail-fast error reporting on the first unexpected token
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
