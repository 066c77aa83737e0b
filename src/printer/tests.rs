use crate::{ast::ast::Block, parser::parser::parse_source};

use super::printer::print_block;

fn parse(source: &str) -> Block {
    parse_source(source, Some("test.lua".to_string())).unwrap()
}

fn assert_round_trip(source: &str) {
    let original = parse(source);
    let printed = print_block(&original);
    let reparsed = parse_source(&printed, Some("printed.lua".to_string()))
        .unwrap_or_else(|error| panic!("printed source does not parse: {}\n{}", error, printed));

    assert_eq!(original, reparsed, "printed source:\n{}", printed);
}

#[test]
fn test_print_simple_statements() {
    let printed = print_block(&parse("local x = 1\nx = x + 0x10\nprint(\"hi\")"));

    assert_eq!(printed, "local x = 1.0\nx = (x + 0x10)\nprint(\"hi\")\n");
}

#[test]
fn test_print_parenthesises_operators() {
    let printed = print_block(&parse("y = -2^2 .. a .. b"));

    assert_eq!(printed, "y = ((-(2.0 ^ 2.0)) .. (a .. b))\n");
}

#[test]
fn test_print_indents_nested_blocks() {
    let printed = print_block(&parse(
        "function f(a, ...)\nif a then\nreturn a\nelse\nwhile true do break end\nend\nend",
    ));

    assert_eq!(
        printed,
        "function f(a, ...)\n    if a then\n        return a\n    else\n        while true do\n            break\n        end\n    end\nend\n"
    );
}

#[test]
fn test_print_escapes_strings() {
    let printed = print_block(&parse(r#"s = "a\"b\\c\n""#));

    assert_eq!(printed, "s = \"a\\\"b\\\\c\\n\"\n");
}

#[test]
fn test_print_guards_leading_paren() {
    let printed = print_block(&parse("local f = 1;\n(function() end)()"));

    assert!(printed.contains("\n;(function()"));
}

#[test]
fn test_round_trip_statements() {
    assert_round_trip(
        "local a, b = 1, 2\n\
         local c\n\
         x = a\n\
         local function g(...) return ... end\n\
         function h() return end\n\
         do local z = 3 end\n\
         repeat a = a - 1 until a <= 0\n\
         for i = 10, 1, -1 do print(i) end\n\
         for k, v in pairs({}) do print(k, v) end\n\
         if a then elseif b then print(b) else print(c) end",
    );
}

#[test]
fn test_round_trip_expressions() {
    assert_round_trip(
        "r = 1 + 2 * 3 - 4 / 5 % 6\n\
         r = -2 ^ -3 ^ 2\n\
         r = not a == b and c or d\n\
         r = #t .. \"s\" .. 'q\\t'\n\
         r = t.x[1].y\n\
         r = obj:method(1)(2)\n\
         r = (\"abc\"):upper()\n\
         r = { 1, 2; n = 3, [\"k\"] = { }, }\n\
         r = function(a, b) return a .. b end\n\
         print \"x\"\n\
         f{ 1 }",
    );
}

#[test]
fn test_print_overflowing_float() {
    let printed = print_block(&parse("x = 1e400"));

    assert_eq!(printed, "x = 1e999\n");
    assert_round_trip("x = 1e400 + -1e999");
    assert_round_trip("x = 0xFFFFFFFFFFFFFFFF + 0x8000000000000000");
}

#[test]
fn test_round_trip_control_characters() {
    assert_round_trip("s = \"bell\\a tab\\t nul\\0 1\"");
}
