use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Position;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("and", TokenKind::And);
        map.insert("break", TokenKind::Break);
        map.insert("do", TokenKind::Do);
        map.insert("else", TokenKind::Else);
        map.insert("elseif", TokenKind::Elseif);
        map.insert("end", TokenKind::End);
        map.insert("false", TokenKind::False);
        map.insert("for", TokenKind::For);
        map.insert("function", TokenKind::Function);
        map.insert("if", TokenKind::If);
        map.insert("in", TokenKind::In);
        map.insert("local", TokenKind::Local);
        map.insert("nil", TokenKind::Nil);
        map.insert("not", TokenKind::Not);
        map.insert("or", TokenKind::Or);
        map.insert("repeat", TokenKind::Repeat);
        map.insert("return", TokenKind::Return);
        map.insert("then", TokenKind::Then);
        map.insert("true", TokenKind::True);
        map.insert("until", TokenKind::Until);
        map.insert("while", TokenKind::While);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    String,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment,    // =
    Equals,        // ==
    NotEquals,     // ~=
    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Dot,
    DotDot,        // ..
    Ellipsis,      // ...
    Semicolon,
    Colon,
    DoubleColon,   // ::
    Comma,

    Plus,
    Dash,
    Star,
    Slash,
    Percent,
    Caret,
    Hash,

    // Reserved
    And,
    Break,
    Do,
    Else,
    Elseif,
    End,
    False,
    For,
    Function,
    If,
    In,
    Local,
    Nil,
    Not,
    Or,
    Repeat,
    Return,
    Then,
    True,
    Until,
    While,
}

impl TokenKind {
    /// Tokens that close a block; a statement list stops before them.
    pub fn is_block_end(&self) -> bool {
        matches!(
            self,
            TokenKind::End | TokenKind::Else | TokenKind::Elseif | TokenKind::Until | TokenKind::EOF
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub position: Position,
}

impl Token {
    pub fn line(&self) -> u32 {
        self.position.line()
    }

    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_one_of_many(&[TokenKind::String, TokenKind::Identifier, TokenKind::Number]) {
            write!(f, "{} ({}) @ line {}", self.kind, self.value, self.line())
        } else {
            write!(f, "{} @ line {}", self.kind, self.line())
        }
    }
}
