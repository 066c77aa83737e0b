use std::fmt::Display;

use crate::lexer::tokens::TokenKind;

use super::ast::Block;

// LITERALS

/// Numeric literal value.
/// Hexadecimal literals are kept as integers, decimal literals as floats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberLiteral {
    Integer(i64),
    Float(f64),
}

impl Display for NumberLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumberLiteral::Integer(value) => write!(f, "{}", value),
            NumberLiteral::Float(value) => write!(f, "{:?}", value),
        }
    }
}

// OPERATORS

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate,
    Not,
    Length,
}

impl UnaryOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Dash => Some(UnaryOperator::Negate),
            TokenKind::Not => Some(UnaryOperator::Not),
            TokenKind::Hash => Some(UnaryOperator::Length),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOperator::Negate => "-",
            UnaryOperator::Not => "not ",
            UnaryOperator::Length => "#",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    And,
    Or,
}

impl BinaryOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(BinaryOperator::Add),
            TokenKind::Dash => Some(BinaryOperator::Subtract),
            TokenKind::Star => Some(BinaryOperator::Multiply),
            TokenKind::Slash => Some(BinaryOperator::Divide),
            TokenKind::Percent => Some(BinaryOperator::Modulo),
            TokenKind::Caret => Some(BinaryOperator::Power),
            TokenKind::Equals => Some(BinaryOperator::Equal),
            TokenKind::NotEquals => Some(BinaryOperator::NotEqual),
            TokenKind::Less => Some(BinaryOperator::Less),
            TokenKind::Greater => Some(BinaryOperator::Greater),
            TokenKind::LessEquals => Some(BinaryOperator::LessEqual),
            TokenKind::GreaterEquals => Some(BinaryOperator::GreaterEqual),
            TokenKind::And => Some(BinaryOperator::And),
            TokenKind::Or => Some(BinaryOperator::Or),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Power => "^",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "~=",
            BinaryOperator::Less => "<",
            BinaryOperator::Greater => ">",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::And => "and",
            BinaryOperator::Or => "or",
        }
    }

    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            BinaryOperator::Add
                | BinaryOperator::Subtract
                | BinaryOperator::Multiply
                | BinaryOperator::Divide
                | BinaryOperator::Modulo
                | BinaryOperator::Power
        )
    }

    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            BinaryOperator::Equal
                | BinaryOperator::NotEqual
                | BinaryOperator::Less
                | BinaryOperator::Greater
                | BinaryOperator::LessEqual
                | BinaryOperator::GreaterEqual
        )
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// COMPOSITES

/// What a call invokes.
#[derive(Debug, Clone, PartialEq)]
pub enum Callee {
    /// A plain name, `f(...)`. Only these are checked against the symbol table.
    Name(String),
    /// Any other prefix expression, `t.f(...)` or `(function() end)()`.
    Expr(Box<Expr>),
    /// Method call sugar, `object:method(...)`.
    Method { object: Box<Expr>, method: String },
}

/// Function Call
/// Represents a call with its ordered argument list.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Callee,
    pub arguments: Vec<Expr>,
}

/// Parameter list and body shared by declarations and anonymous functions.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionBody {
    pub parameters: Vec<String>,
    pub is_variadic: bool,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableField {
    /// `{ value }`
    Positional(Expr),
    /// `{ name = value }`
    Named(String, Expr),
    /// `{ [key] = value }`
    Keyed(Expr, Expr),
}

/// Expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(NumberLiteral),
    String(String),
    Boolean(bool),
    Nil,
    Vararg,
    Var(String),
    Unary {
        operator: UnaryOperator,
        operand: Box<Expr>,
    },
    Binary {
        operator: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Concat {
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call(CallExpr),
    Index {
        object: Box<Expr>,
        key: Box<Expr>,
    },
    Function(FunctionBody),
    Table(Vec<TableField>),
}

impl Expr {
    pub fn integer(value: i64) -> Self {
        Expr::Number(NumberLiteral::Integer(value))
    }

    pub fn float(value: f64) -> Self {
        Expr::Number(NumberLiteral::Float(value))
    }

    pub fn var(name: &str) -> Self {
        Expr::Var(String::from(name))
    }

    pub fn unary(operator: UnaryOperator, operand: Expr) -> Self {
        Expr::Unary {
            operator,
            operand: Box::new(operand),
        }
    }

    pub fn binary(operator: BinaryOperator, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn concat(left: Expr, right: Expr) -> Self {
        Expr::Concat {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn call(name: &str, arguments: Vec<Expr>) -> Self {
        Expr::Call(CallExpr {
            callee: Callee::Name(String::from(name)),
            arguments,
        })
    }

    /// Calls and `...` may produce several values.
    pub fn is_multi_valued(&self) -> bool {
        matches!(self, Expr::Call(_) | Expr::Vararg)
    }
}
