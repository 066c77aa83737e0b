//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Reserved words and identifiers
//! - Numeric literals (hexadecimal, integers, floats, exponents)
//! - String literals with escape sequences
//! - Operators and punctuation
//! - Comments and line tracking
//! - Error cases

use super::{
    lexer::{tokenize, unescape},
    tokens::TokenKind,
};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source.to_string(), Some("test.lua".to_string()))
        .unwrap()
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_reserved_words() {
    let source = "and break do else elseif end false for function if in local nil not or repeat return then true until while";

    assert_eq!(
        kinds(source),
        vec![
            TokenKind::And,
            TokenKind::Break,
            TokenKind::Do,
            TokenKind::Else,
            TokenKind::Elseif,
            TokenKind::End,
            TokenKind::False,
            TokenKind::For,
            TokenKind::Function,
            TokenKind::If,
            TokenKind::In,
            TokenKind::Local,
            TokenKind::Nil,
            TokenKind::Not,
            TokenKind::Or,
            TokenKind::Repeat,
            TokenKind::Return,
            TokenKind::Then,
            TokenKind::True,
            TokenKind::Until,
            TokenKind::While,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo _bar baz_123 ending iffy".to_string();
    let tokens = tokenize(source, Some("test.lua".to_string())).unwrap();

    let values: Vec<&str> = tokens.iter().map(|token| token.value.as_str()).collect();
    assert_eq!(values, vec!["foo", "_bar", "baz_123", "ending", "iffy", "EOF"]);
    assert!(tokens[..5].iter().all(|token| token.kind == TokenKind::Identifier));
}

#[test]
fn test_tokenize_numbers() {
    let source = "42 3.14 0x1F 0XaB 1e10 2.5E-3".to_string();
    let tokens = tokenize(source, Some("test.lua".to_string())).unwrap();

    let values: Vec<&str> = tokens.iter().map(|token| token.value.as_str()).collect();
    assert_eq!(values, vec!["42", "3.14", "0x1F", "0XaB", "1e10", "2.5E-3", "EOF"]);
    assert!(tokens[..6].iter().all(|token| token.kind == TokenKind::Number));
}

#[test]
fn test_tokenize_strings() {
    let source = r#""hello" 'world' "it's" 'say "hi"' """#.to_string();
    let tokens = tokenize(source, Some("test.lua".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].value, "world");
    assert_eq!(tokens[2].value, "it's");
    assert_eq!(tokens[3].value, "say \"hi\"");
    assert_eq!(tokens[4].kind, TokenKind::String);
    assert_eq!(tokens[4].value, "");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_string_escapes() {
    let source = r#""a\nb" "tab\there" "back\\slash" "q\"uote" 'it\'s' "hex\x41" "dec\65""#.to_string();
    let tokens = tokenize(source, Some("test.lua".to_string())).unwrap();

    assert_eq!(tokens[0].value, "a\nb");
    assert_eq!(tokens[1].value, "tab\there");
    assert_eq!(tokens[2].value, "back\\slash");
    assert_eq!(tokens[3].value, "q\"uote");
    assert_eq!(tokens[4].value, "it's");
    assert_eq!(tokens[5].value, "hexA");
    assert_eq!(tokens[6].value, "decA");
}

#[test]
fn test_tokenize_string_with_escaped_line_break() {
    let source = "s = \"one\\\ntwo\"\nprint('a\\\r\nb')".to_string();
    let tokens = tokenize(source, Some("test.lua".to_string())).unwrap();

    assert_eq!(tokens[2].kind, TokenKind::String);
    assert_eq!(tokens[2].value, "one\ntwo");
    assert_eq!(tokens[2].line(), 1);
    assert_eq!(tokens[3].line(), 3);
    assert_eq!(tokens[5].value, "a\nb");
}

#[test]
fn test_unescape_keeps_unknown_escapes() {
    assert_eq!(unescape(r"\q"), "\\q");
    assert_eq!(unescape(r"end\"), "end\\");
    assert_eq!(unescape(r"\xZZ"), "\\xZZ");
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("+ - * / % ^ # == ~= <= >= < > ="),
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Caret,
            TokenKind::Hash,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::Assignment,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        kinds("( ) [ ] { } ; : :: , . .. ..."),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::DoubleColon,
            TokenKind::Comma,
            TokenKind::Dot,
            TokenKind::DotDot,
            TokenKind::Ellipsis,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_concat_without_spaces() {
    assert_eq!(
        kinds("a..b...c"),
        vec![
            TokenKind::Identifier,
            TokenKind::DotDot,
            TokenKind::Identifier,
            TokenKind::Ellipsis,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    let source = "local x = 5 -- trailing comment\n--[[ block\ncomment ]] local y = 10";

    assert_eq!(
        kinds(source),
        vec![
            TokenKind::Local,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Number,
            TokenKind::Local,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Number,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_tracks_lines() {
    let source = "local x = 1\n\nprint(x)\n--[[ one\ntwo ]]\nreturn".to_string();
    let tokens = tokenize(source, Some("test.lua".to_string())).unwrap();

    assert_eq!(tokens[0].line(), 1);
    assert_eq!(tokens[4].kind, TokenKind::Identifier);
    assert_eq!(tokens[4].value, "print");
    assert_eq!(tokens[4].line(), 3);

    let last = &tokens[tokens.len() - 2];
    assert_eq!(last.kind, TokenKind::Return);
    assert_eq!(last.line(), 6);
}

#[test]
fn test_tokenize_unrecognized_token() {
    let result = tokenize("local x = @".to_string(), Some("test.lua".to_string()));

    let error = result.unwrap_err();
    assert_eq!(error.lexeme(), "@");
    assert_eq!(error.line(), 1);
}

#[test]
fn test_tokenize_unterminated_string() {
    let result = tokenize("x = 1\nprint(\"oops)".to_string(), Some("test.lua".to_string()));

    let error = result.unwrap_err();
    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.lexeme(), "\"");
    assert_eq!(error.line(), 2);
}

#[test]
fn test_tokenize_empty_source() {
    assert_eq!(kinds(""), vec![TokenKind::EOF]);
    assert_eq!(kinds("   \n\t -- nothing here"), vec![TokenKind::EOF]);
}
