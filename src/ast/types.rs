//! Inferred value types.
//!
//! The language is dynamically typed; these are the coarse primitive types the
//! semantic analyzer infers for expressions and records on symbols. `Unknown`
//! marks a type that could not be inferred, typically because the expression
//! was already erroneous or comes from a dynamic source such as a call result.

use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LuaType {
    Number,
    String,
    Boolean,
    Nil,
    Table,
    Function,
    Unknown,
}

impl LuaType {
    /// Returns true for every type except `Unknown`.
    pub fn is_concrete(&self) -> bool {
        *self != LuaType::Unknown
    }

    pub fn name(&self) -> &'static str {
        match self {
            LuaType::Number => "number",
            LuaType::String => "string",
            LuaType::Boolean => "boolean",
            LuaType::Nil => "nil",
            LuaType::Table => "table",
            LuaType::Function => "function",
            LuaType::Unknown => "unknown",
        }
    }
}

impl Display for LuaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
