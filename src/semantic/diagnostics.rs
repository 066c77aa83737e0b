use std::fmt::Display;

use thiserror::Error;

use crate::ast::{expressions::BinaryOperator, types::LuaType};

use super::symbol_table::SymbolTableError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandSide {
    Left,
    Right,
}

impl Display for OperandSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperandSide::Left => write!(f, "left"),
            OperandSide::Right => write!(f, "right"),
        }
    }
}

/// Control expression of a numeric `for`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForPart {
    Start,
    End,
    Step,
}

impl Display for ForPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ForPart::Start => write!(f, "initial value"),
            ForPart::End => write!(f, "limit"),
            ForPart::Step => write!(f, "step"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiagnosticKind {
    #[error("variable '{name}' used before being declared")]
    UndeclaredVariable { name: String },
    #[error("function '{name}' called before being declared")]
    UndeclaredFunction { name: String },
    #[error("'{name}' is not a function but is called as one")]
    NotAFunction { name: String },
    #[error("function '{name}' expects {expected} argument(s), received {received}")]
    ArityMismatch {
        name: String,
        expected: usize,
        received: usize,
    },
    #[error("operator '{operator}': {side} operand is '{found}', expected 'number'")]
    ArithmeticOperand {
        operator: BinaryOperator,
        side: OperandSide,
        found: LuaType,
    },
    #[error("operator '-' applied to '{found}', expected 'number'")]
    NegateOperand { found: LuaType },
    #[error("for: {part} must be a number, found '{found}'")]
    ForControlType { part: ForPart, found: LuaType },
    #[error(transparent)]
    SymbolTable(#[from] SymbolTableError),
}

impl DiagnosticKind {
    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::UndeclaredVariable { .. }
            | DiagnosticKind::UndeclaredFunction { .. }
            | DiagnosticKind::ForControlType { .. }
            | DiagnosticKind::SymbolTable(_) => Severity::Error,
            DiagnosticKind::NotAFunction { .. }
            | DiagnosticKind::ArityMismatch { .. }
            | DiagnosticKind::ArithmeticOperand { .. }
            | DiagnosticKind::NegateOperand { .. } => Severity::Warning,
        }
    }
}

/// A semantic finding. Errors fail the compilation unit, warnings do not.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind) -> Self {
        Diagnostic {
            severity: kind.severity(),
            kind,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl From<DiagnosticKind> for Diagnostic {
    fn from(kind: DiagnosticKind) -> Self {
        Diagnostic::new(kind)
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.severity, self.kind)
    }
}
