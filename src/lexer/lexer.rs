use std::rc::Rc;

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::{errors::errors::{Error, ErrorImpl}, Position, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// Handler invoked with the text matched by its pattern at the current position.
pub type RegexHandler = fn(&mut Lexer, &str) -> Result<(), Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

fn pattern(regex: &str, handler: RegexHandler) -> RegexPattern {
    RegexPattern {
        // Every pattern is a literal of this module; a bad one is a programming error.
        regex: Regex::new(regex).expect("invalid lexer pattern"),
        handler,
    }
}

lazy_static! {
    // Order matters: the first pattern matching at the current position wins,
    // so longer lexemes come before their prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern(r"^[ \t\r\n]+", skip_handler),
        pattern(r"^--\[\[(?s:.*?)\]\]", skip_handler),
        pattern(r"^--[^\n]*", skip_handler),
        pattern(r"^[a-zA-Z_][a-zA-Z0-9_]*", symbol_handler),
        pattern(r"^0[xX][0-9a-fA-F]+", number_handler),
        pattern(r"^[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?", number_handler),
        pattern(r#"^"([^"\\\n]|(?s:\\(\r\n|.)))*""#, string_handler),
        pattern(r"^'([^'\\\n]|(?s:\\(\r\n|.)))*'", string_handler),
        pattern(r"^\.\.\.", MK_DEFAULT_HANDLER!(TokenKind::Ellipsis, "...")),
        pattern(r"^\.\.", MK_DEFAULT_HANDLER!(TokenKind::DotDot, "..")),
        pattern(r"^\.", MK_DEFAULT_HANDLER!(TokenKind::Dot, ".")),
        pattern(r"^==", MK_DEFAULT_HANDLER!(TokenKind::Equals, "==")),
        pattern(r"^~=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "~=")),
        pattern(r"^<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=")),
        pattern(r"^>=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=")),
        pattern(r"^<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
        pattern(r"^>", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
        pattern(r"^=", MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=")),
        pattern(r"^::", MK_DEFAULT_HANDLER!(TokenKind::DoubleColon, "::")),
        pattern(r"^:", MK_DEFAULT_HANDLER!(TokenKind::Colon, ":")),
        pattern(r"^;", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
        pattern(r"^,", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        pattern(r"^\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
        pattern(r"^\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
        pattern(r"^\[", MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[")),
        pattern(r"^\]", MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]")),
        pattern(r"^\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{")),
        pattern(r"^\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}")),
        pattern(r"^\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        pattern(r"^-", MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")),
        pattern(r"^\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
        pattern(r"^/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
        pattern(r"^%", MK_DEFAULT_HANDLER!(TokenKind::Percent, "%")),
        pattern(r"^\^", MK_DEFAULT_HANDLER!(TokenKind::Caret, "^")),
        pattern(r"^#", MK_DEFAULT_HANDLER!(TokenKind::Hash, "#")),
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    line: u32,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            tokens: vec![],
            source,
            pos: 0,
            line: 1,
            file: file_name,
        }
    }

    /// Moves past `text`, which must be the source at the current position.
    pub fn advance(&mut self, text: &str) {
        self.pos += text.len();
        self.line += text.matches('\n').count() as u32;
    }

    pub fn push(&mut self, token: Token) {
        trace!("token {}", token);
        self.tokens.push(token);
    }

    pub fn position(&self) -> Position {
        Position(self.line, Rc::clone(&self.file))
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }
}

fn skip_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    lexer.advance(matched);
    Ok(())
}

fn number_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    let position = lexer.position();
    lexer.push(MK_TOKEN!(TokenKind::Number, matched.to_string(), position));
    lexer.advance(matched);
    Ok(())
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    let position = lexer.position();
    let kind = RESERVED_LOOKUP.get(matched).copied().unwrap_or(TokenKind::Identifier);

    lexer.push(MK_TOKEN!(kind, matched.to_string(), position));
    lexer.advance(matched);
    Ok(())
}

fn string_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    let position = lexer.position();
    // Both quote characters are one byte wide.
    let literal = unescape(&matched[1..matched.len() - 1]);

    lexer.push(MK_TOKEN!(TokenKind::String, literal, position));
    lexer.advance(matched);
    Ok(())
}

/// Resolves backslash escapes in the body of a quoted string.
pub fn unescape(raw: &str) -> String {
    let mut result = String::new();
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        let Some(next_ch) = chars.next() else {
            // Keep the lone backslash
            result.push(ch);
            break;
        };

        match next_ch {
            'n' => result.push('\n'),
            't' => result.push('\t'),
            'r' => result.push('\r'),
            'a' => result.push('\u{07}'),
            'b' => result.push('\u{08}'),
            'f' => result.push('\u{0C}'),
            'v' => result.push('\u{0B}'),
            '\\' => result.push('\\'),
            '"' => result.push('"'),
            '\'' => result.push('\''),
            // Escaped line break
            '\n' => result.push('\n'),
            '\r' => {
                result.push('\n');
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            'x' => {
                let mut hex = String::new();
                while hex.len() < 2 {
                    match chars.peek() {
                        Some(c) if c.is_ascii_hexdigit() => {
                            hex.push(*c);
                            chars.next();
                        }
                        _ => break,
                    }
                }

                match u8::from_str_radix(&hex, 16) {
                    Ok(byte) => result.push(byte as char),
                    Err(_) => {
                        result.push_str("\\x");
                        result.push_str(&hex);
                    }
                }
            }
            digit if digit.is_ascii_digit() => {
                let mut decimal = String::from(digit);
                while decimal.len() < 3 {
                    match chars.peek() {
                        Some(c) if c.is_ascii_digit() => {
                            decimal.push(*c);
                            chars.next();
                        }
                        _ => break,
                    }
                }

                match decimal.parse::<u8>() {
                    Ok(byte) => result.push(byte as char),
                    Err(_) => {
                        result.push('\\');
                        result.push_str(&decimal);
                    }
                }
            }
            other => {
                // Unknown escape, keep it verbatim
                result.push('\\');
                result.push(other);
            }
        }
    }

    result
}

pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        let mut matched = false;

        for pattern in PATTERNS.iter() {
            let text = match pattern.regex.find(lex.remainder()) {
                Some(found) => found.as_str().to_string(),
                None => continue,
            };

            (pattern.handler)(&mut lex, &text)?;
            matched = true;
            break;
        }

        if !matched {
            let token = lex.at().map(String::from).unwrap_or_default();
            return Err(Error::new(ErrorImpl::UnrecognisedToken { token }, lex.position()));
        }
    }

    let position = lex.position();
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), position));
    Ok(lex.tokens)
}
