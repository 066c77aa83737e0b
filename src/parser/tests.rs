//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Operator precedence and associativity
//! - Assignments and local declarations
//! - Function declarations and anonymous functions
//! - Control flow statements
//! - Calls, indexing and table constructors
//! - Syntax errors

use std::rc::Rc;

use crate::{
    ast::{
        ast::Block,
        expressions::{BinaryOperator, CallExpr, Callee, Expr, TableField, UnaryOperator},
        statements::{AssignStmt, Stmt},
    },
    errors::errors::ErrorImpl,
    lexer::lexer::tokenize,
};

use super::parser::{parse, parse_source};

fn parse_ok(source: &str) -> Block {
    parse_source(source, Some("test.lua".to_string())).unwrap()
}

/// The value of `x = <expr>`.
fn parse_value(expr: &str) -> Expr {
    let block = parse_ok(&format!("x = {}", expr));
    match &block.statements[0] {
        Stmt::Assign(assign) => assign.values[0].clone(),
        other => panic!("expected assignment, got {:?}", other),
    }
}

#[test]
fn test_parse_from_tokens() {
    let tokens = tokenize("local x = 42".to_string(), Some("test.lua".to_string())).unwrap();
    let block = parse(tokens, Rc::new("test.lua".to_string())).unwrap();

    assert_eq!(
        block.statements,
        vec![Stmt::Assign(AssignStmt::single("x", Expr::float(42.0), true))]
    );
}

#[test]
fn test_parse_empty_program() {
    assert!(parse_ok("").is_empty());
    assert!(parse_ok("-- only a comment\n;;").is_empty());
}

#[test]
fn test_power_binds_tighter_than_negation() {
    assert_eq!(
        parse_value("-2^2"),
        Expr::unary(
            UnaryOperator::Negate,
            Expr::binary(BinaryOperator::Power, Expr::float(2.0), Expr::float(2.0))
        )
    );
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    assert_eq!(
        parse_value("1 + 2 * 3"),
        Expr::binary(
            BinaryOperator::Add,
            Expr::float(1.0),
            Expr::binary(BinaryOperator::Multiply, Expr::float(2.0), Expr::float(3.0))
        )
    );
}

#[test]
fn test_concat_is_right_associative() {
    assert_eq!(
        parse_value("a .. b .. c"),
        Expr::concat(Expr::var("a"), Expr::concat(Expr::var("b"), Expr::var("c")))
    );
}

#[test]
fn test_power_is_right_associative() {
    assert_eq!(
        parse_value("2 ^ 3 ^ 2"),
        Expr::binary(
            BinaryOperator::Power,
            Expr::float(2.0),
            Expr::binary(BinaryOperator::Power, Expr::float(3.0), Expr::float(2.0))
        )
    );
}

#[test]
fn test_subtraction_is_left_associative() {
    assert_eq!(
        parse_value("a - b - c"),
        Expr::binary(
            BinaryOperator::Subtract,
            Expr::binary(BinaryOperator::Subtract, Expr::var("a"), Expr::var("b")),
            Expr::var("c")
        )
    );
}

#[test]
fn test_logical_precedence() {
    assert_eq!(
        parse_value("a or b and c == d"),
        Expr::binary(
            BinaryOperator::Or,
            Expr::var("a"),
            Expr::binary(
                BinaryOperator::And,
                Expr::var("b"),
                Expr::binary(BinaryOperator::Equal, Expr::var("c"), Expr::var("d"))
            )
        )
    );
}

#[test]
fn test_concat_between_additive_and_relational() {
    assert_eq!(
        parse_value("a + 1 .. b < c"),
        Expr::binary(
            BinaryOperator::Less,
            Expr::concat(
                Expr::binary(BinaryOperator::Add, Expr::var("a"), Expr::float(1.0)),
                Expr::var("b")
            ),
            Expr::var("c")
        )
    );
}

#[test]
fn test_unary_operators() {
    assert_eq!(
        parse_value("not #t"),
        Expr::unary(UnaryOperator::Not, Expr::unary(UnaryOperator::Length, Expr::var("t")))
    );
    assert_eq!(
        parse_value("-a * b"),
        Expr::binary(
            BinaryOperator::Multiply,
            Expr::unary(UnaryOperator::Negate, Expr::var("a")),
            Expr::var("b")
        )
    );
}

#[test]
fn test_grouping_overrides_precedence() {
    assert_eq!(
        parse_value("(1 + 2) * 3"),
        Expr::binary(
            BinaryOperator::Multiply,
            Expr::binary(BinaryOperator::Add, Expr::float(1.0), Expr::float(2.0)),
            Expr::float(3.0)
        )
    );
}

#[test]
fn test_number_literals() {
    assert_eq!(parse_value("0xFF"), Expr::integer(255));
    assert_eq!(parse_value("1.5e2"), Expr::float(150.0));
    assert_eq!(parse_value("1e400"), Expr::float(f64::INFINITY));
}

#[test]
fn test_hex_literals_wrap_around() {
    assert_eq!(parse_value("0x7FFFFFFFFFFFFFFF"), Expr::integer(i64::MAX));
    assert_eq!(parse_value("0xFFFFFFFFFFFFFFFF"), Expr::integer(-1));
    assert_eq!(parse_value("0x8000000000000000"), Expr::integer(i64::MIN));
}

#[test]
fn test_literals_and_vararg() {
    assert_eq!(parse_value("nil"), Expr::Nil);
    assert_eq!(parse_value("true"), Expr::Boolean(true));
    assert_eq!(parse_value("'hi'"), Expr::String("hi".to_string()));
    assert_eq!(parse_value("..."), Expr::Vararg);
}

#[test]
fn test_parse_global_and_local_assignment() {
    let block = parse_ok("x = 1\nlocal y = x");

    assert_eq!(
        block.statements,
        vec![
            Stmt::Assign(AssignStmt::single("x", Expr::float(1.0), false)),
            Stmt::Assign(AssignStmt::single("y", Expr::var("x"), true)),
        ]
    );
}

#[test]
fn test_parse_statements_without_separators() {
    let block = parse_ok("local x = 1 print(x) x = x + 1");
    assert_eq!(block.len(), 3);
}

#[test]
fn test_parse_multiple_assignment() {
    let block = parse_ok("a, b = 1, 2\nlocal c, d");

    assert_eq!(
        block.statements,
        vec![
            Stmt::Assign(AssignStmt {
                targets: vec!["a".to_string(), "b".to_string()],
                values: vec![Expr::float(1.0), Expr::float(2.0)],
                is_local: false,
            }),
            Stmt::Assign(AssignStmt {
                targets: vec!["c".to_string(), "d".to_string()],
                values: vec![],
                is_local: true,
            }),
        ]
    );
}

#[test]
fn test_parse_function_declaration() {
    let block = parse_ok("function add(a, b)\n  return a + b\nend");

    let Stmt::FunctionDecl(decl) = &block.statements[0] else {
        panic!("expected function declaration");
    };
    assert_eq!(decl.name, "add");
    assert!(!decl.is_local);
    assert_eq!(decl.function.parameters, vec!["a".to_string(), "b".to_string()]);
    assert!(!decl.function.is_variadic);
    assert_eq!(
        decl.function.body.statements,
        vec![Stmt::Return(vec![Expr::binary(
            BinaryOperator::Add,
            Expr::var("a"),
            Expr::var("b")
        )])]
    );
}

#[test]
fn test_parse_local_variadic_function() {
    let block = parse_ok("local function log(fmt, ...) print(fmt, ...) end");

    let Stmt::FunctionDecl(decl) = &block.statements[0] else {
        panic!("expected function declaration");
    };
    assert!(decl.is_local);
    assert!(decl.function.is_variadic);
    assert_eq!(decl.function.parameters, vec!["fmt".to_string()]);
}

#[test]
fn test_parse_if_elseif_else() {
    let block = parse_ok("if a then x = 1 elseif b then x = 2 elseif c then x = 3 else x = 4 end");

    let Stmt::If(stmt) = &block.statements[0] else {
        panic!("expected if statement");
    };
    assert_eq!(stmt.condition, Expr::var("a"));
    assert_eq!(stmt.elseif_clauses.len(), 2);
    assert_eq!(stmt.elseif_clauses[1].condition, Expr::var("c"));
    assert_eq!(stmt.else_body.as_ref().map(Block::len), Some(1));
}

#[test]
fn test_parse_loops() {
    let block = parse_ok(
        "while x < 10 do x = x + 1 end\n\
         repeat x = x - 1 until x == 0\n\
         for i = 1, 10 do end\n\
         for i = 10, 1, -1 do break end\n\
         for k, v in pairs(t) do end",
    );

    assert!(matches!(block.statements[0], Stmt::While(_)));
    assert!(matches!(block.statements[1], Stmt::RepeatUntil(_)));

    let Stmt::ForNumeric(default_step) = &block.statements[2] else {
        panic!("expected numeric for");
    };
    assert_eq!(default_step.step, None);
    assert_eq!(default_step.step_or_default(), Expr::float(1.0));

    let Stmt::ForNumeric(explicit_step) = &block.statements[3] else {
        panic!("expected numeric for");
    };
    assert_eq!(
        explicit_step.step,
        Some(Expr::unary(UnaryOperator::Negate, Expr::float(1.0)))
    );
    assert_eq!(explicit_step.body.statements, vec![Stmt::Break]);

    let Stmt::ForGeneric(generic) = &block.statements[4] else {
        panic!("expected generic for");
    };
    assert_eq!(generic.names, vec!["k".to_string(), "v".to_string()]);
    assert_eq!(generic.expressions, vec![Expr::call("pairs", vec![Expr::var("t")])]);
}

#[test]
fn test_parse_do_block_and_bare_return() {
    let block = parse_ok("do local x = 1 end\nfunction f() return end");

    assert!(matches!(&block.statements[0], Stmt::Do(body) if body.len() == 1));
    let Stmt::FunctionDecl(decl) = &block.statements[1] else {
        panic!("expected function declaration");
    };
    assert_eq!(decl.function.body.statements, vec![Stmt::Return(vec![])]);
}

#[test]
fn test_parse_calls() {
    let block = parse_ok("print(\"a\", 1)\nprint \"b\"\nf{1}\nobj:method(2)\nt.f()");

    assert_eq!(
        block.statements[0],
        Stmt::Call(CallExpr {
            callee: Callee::Name("print".to_string()),
            arguments: vec![Expr::String("a".to_string()), Expr::float(1.0)],
        })
    );
    assert_eq!(
        block.statements[1],
        Stmt::Call(CallExpr {
            callee: Callee::Name("print".to_string()),
            arguments: vec![Expr::String("b".to_string())],
        })
    );
    assert_eq!(
        block.statements[2],
        Stmt::Call(CallExpr {
            callee: Callee::Name("f".to_string()),
            arguments: vec![Expr::Table(vec![TableField::Positional(Expr::float(1.0))])],
        })
    );
    assert_eq!(
        block.statements[3],
        Stmt::Call(CallExpr {
            callee: Callee::Method {
                object: Box::new(Expr::var("obj")),
                method: "method".to_string(),
            },
            arguments: vec![Expr::float(2.0)],
        })
    );
    assert_eq!(
        block.statements[4],
        Stmt::Call(CallExpr {
            callee: Callee::Expr(Box::new(Expr::Index {
                object: Box::new(Expr::var("t")),
                key: Box::new(Expr::String("f".to_string())),
            })),
            arguments: vec![],
        })
    );
}

#[test]
fn test_parse_table_constructor() {
    assert_eq!(
        parse_value("{ 1, name = \"x\"; [k] = v, }"),
        Expr::Table(vec![
            TableField::Positional(Expr::float(1.0)),
            TableField::Named("name".to_string(), Expr::String("x".to_string())),
            TableField::Keyed(Expr::var("k"), Expr::var("v")),
        ])
    );
    assert_eq!(parse_value("{}"), Expr::Table(vec![]));
}

#[test]
fn test_parse_anonymous_function() {
    let Expr::Function(function) = parse_value("function(a) return a end") else {
        panic!("expected anonymous function");
    };
    assert_eq!(function.parameters, vec!["a".to_string()]);
    assert_eq!(function.body.len(), 1);
}

#[test]
fn test_call_binds_tighter_than_power() {
    assert_eq!(
        parse_value("f(x) ^ 2"),
        Expr::binary(
            BinaryOperator::Power,
            Expr::call("f", vec![Expr::var("x")]),
            Expr::float(2.0)
        )
    );
}

#[test]
fn test_error_unexpected_token_reports_lexeme_and_line() {
    let error = parse_source("local x = 1\nlocal = 2", Some("test.lua".to_string())).unwrap_err();

    assert_eq!(error.lexeme(), "=");
    assert_eq!(error.line(), 2);
}

#[test]
fn test_error_premature_eof() {
    let error = parse_source("while true do\n  x = 1\n", Some("test.lua".to_string())).unwrap_err();

    assert_eq!(error.get_impl(), &ErrorImpl::UnexpectedEof);
    assert_eq!(error.lexeme(), "EOF");
}

#[test]
fn test_error_missing_then() {
    let error = parse_source("if x x = 1 end", Some("test.lua".to_string())).unwrap_err();

    assert_eq!(error.lexeme(), "x");
    assert!(matches!(error.get_impl(), ErrorImpl::UnexpectedTokenDetailed { .. }));
}

#[test]
fn test_error_bare_expression_statement() {
    let error = parse_source("x\ny = 1", Some("test.lua".to_string())).unwrap_err();

    assert_eq!(error.lexeme(), "y");
    assert_eq!(error.line(), 2);
}

#[test]
fn test_error_invalid_assignment_target() {
    let error = parse_source("f() = 1", Some("test.lua".to_string())).unwrap_err();

    assert_eq!(
        error.get_impl(),
        &ErrorImpl::InvalidAssignmentTarget {
            token: "f".to_string()
        }
    );
}

#[test]
fn test_error_stray_end() {
    let error = parse_source("x = 1 end", Some("test.lua".to_string())).unwrap_err();
    assert_eq!(error.lexeme(), "end");
}

#[test]
fn test_error_hex_overflow() {
    let error = parse_source("x = 0xFFFFFFFFFFFFFFFFFF", Some("test.lua".to_string())).unwrap_err();

    assert!(matches!(error.get_impl(), ErrorImpl::NumberParseError { .. }));
}
