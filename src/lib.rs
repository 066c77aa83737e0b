#![allow(clippy::module_inception)]

use std::{fmt::Display, rc::Rc};

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod printer;
pub mod semantic;

extern crate regex;

/// Source location: 1-based line number and the shared file name.
#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn line(&self) -> u32 {
        self.0
    }

    pub fn file(&self) -> &str {
        &self.1
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.1, self.0)
    }
}

/// Returns the text of the given 1-based line, if the source has that many lines.
pub fn get_line(source: &str, line: u32) -> Option<&str> {
    if line == 0 {
        return None;
    }

    source.lines().nth((line - 1) as usize)
}

pub fn display_error(error: &Error, source: &str) {
    /*
        Error: UnexpectedToken (Unexpected token: `then`, ...)
        -> script.lua
           |
        20 | if x then then
           | ^^^^^^^^^^^^^^
    */

    let position = error.get_position();

    let line_string = position.line().to_string();
    let padding = line_string.len() + 2;

    if let ErrorTip::None = error.get_tip() {
        println!("Error: {}", error.get_error_name());
    } else {
        println!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    println!("-> {}", position);

    let Some(line_text) = get_line(source, position.line()) else {
        return;
    };

    println!("{:>padding$}", "|");

    let (line_text_removed, _) = remove_starting_whitespace(line_text);
    let line_text_removed = line_text_removed.trim_end();
    println!("{} | {}", line_string, line_text_removed);

    let underline = "^".repeat(line_text_removed.chars().count().max(1));
    println!("{:>padding$} {}", "|", underline);
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_get_line() {
        let source = "local x = 1\nprint(x)\n\nreturn x";
        assert_eq!(super::get_line(source, 1), Some("local x = 1"));
        assert_eq!(super::get_line(source, 2), Some("print(x)"));
        assert_eq!(super::get_line(source, 3), Some(""));
        assert_eq!(super::get_line(source, 4), Some("return x"));
        assert_eq!(super::get_line(source, 5), None);
        assert_eq!(super::get_line(source, 0), None);
    }
}
