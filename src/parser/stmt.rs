use log::trace;

use crate::{
    ast::{
        ast::Block,
        expressions::{Expr, FunctionBody},
        statements::{
            AssignStmt, ElseIfClause, ForGenericStmt, ForNumericStmt, FunctionDeclStmt, IfStmt,
            RepeatUntilStmt, Stmt, WhileStmt,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{
    expr::{parse_expr, parse_expression_list},
    lookups::BindingPower,
    parser::Parser,
};

/// Statements up to, not including, a block terminator (`end`, `else`,
/// `elseif`, `until` or EOF). Stray `;` between statements are skipped.
pub fn parse_block(parser: &mut Parser) -> Result<Block, Error> {
    let mut statements = Vec::new();

    loop {
        while parser.accept(TokenKind::Semicolon) {}

        if parser.current_token_kind().is_block_end() {
            break;
        }

        statements.push(parse_stmt(parser)?);
    }

    Ok(Block::new(statements))
}

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    trace!("parsing statement at {}", parser.get_position());

    if let Some(stmt_fn) = parser.get_stmt_lookup().get(&parser.current_token_kind()).copied() {
        return stmt_fn(parser);
    }

    parse_expression_stmt(parser)
}

/// An expression in statement position must be a call, or the first target
/// of an assignment.
fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start_token = parser.current_token().clone();
    let expr = parse_expr(parser, BindingPower::Default)?;

    match parser.current_token_kind() {
        TokenKind::Assignment | TokenKind::Comma => parse_assignment(parser, start_token, expr),
        _ => match expr {
            Expr::Call(call) => Ok(Stmt::Call(call)),
            _ => Err(parser.unexpected_detailed("expected `=` or a function call")),
        },
    }
}

fn assignment_target(start_token: Token, expr: Expr) -> Result<String, Error> {
    match expr {
        Expr::Var(name) => Ok(name),
        _ => Err(Error::new(
            ErrorImpl::InvalidAssignmentTarget {
                token: start_token.value,
            },
            start_token.position,
        )),
    }
}

fn parse_assignment(parser: &mut Parser, start_token: Token, first: Expr) -> Result<Stmt, Error> {
    let mut targets = vec![assignment_target(start_token, first)?];

    while parser.accept(TokenKind::Comma) {
        let start_token = parser.current_token().clone();
        let target = parse_expr(parser, BindingPower::Default)?;
        targets.push(assignment_target(start_token, target)?);
    }

    parser.expect_detailed(TokenKind::Assignment, "expected `=` in assignment")?;
    let values = parse_expression_list(parser)?;

    Ok(Stmt::Assign(AssignStmt {
        targets,
        values,
        is_local: false,
    }))
}

fn parse_name_list(parser: &mut Parser) -> Result<Vec<String>, Error> {
    let mut names = vec![parser.expect_detailed(TokenKind::Identifier, "expected a name")?.value];
    while parser.accept(TokenKind::Comma) {
        names.push(parser.expect_detailed(TokenKind::Identifier, "expected a name")?.value);
    }
    Ok(names)
}

pub fn parse_local_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::Local)?;

    if parser.accept(TokenKind::Function) {
        let name = parser
            .expect_detailed(TokenKind::Identifier, "expected function name")?
            .value;
        let function = parse_function_body(parser)?;

        return Ok(Stmt::FunctionDecl(FunctionDeclStmt {
            name,
            function,
            is_local: true,
        }));
    }

    let targets = parse_name_list(parser)?;
    let values = if parser.accept(TokenKind::Assignment) {
        parse_expression_list(parser)?
    } else {
        Vec::new()
    };

    Ok(Stmt::Assign(AssignStmt {
        targets,
        values,
        is_local: true,
    }))
}

/// `( params ) block end`, shared by declarations and anonymous functions.
/// A trailing `...` marks the function variadic.
pub fn parse_function_body(parser: &mut Parser) -> Result<FunctionBody, Error> {
    parser.expect_detailed(TokenKind::OpenParen, "expected `(` before parameters")?;

    let mut parameters = Vec::new();
    let mut is_variadic = false;

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            if parser.accept(TokenKind::Ellipsis) {
                is_variadic = true;
                break;
            }

            parameters.push(
                parser
                    .expect_detailed(TokenKind::Identifier, "expected parameter name")?
                    .value,
            );

            if !parser.accept(TokenKind::Comma) {
                break;
            }
        }
    }

    parser.expect_detailed(TokenKind::CloseParen, "expected `)` after parameters")?;
    let body = parse_block(parser)?;
    parser.expect_detailed(TokenKind::End, "expected `end` to close function")?;

    Ok(FunctionBody {
        parameters,
        is_variadic,
        body,
    })
}

pub fn parse_function_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::Function)?;
    let name = parser
        .expect_detailed(TokenKind::Identifier, "expected function name")?
        .value;
    let function = parse_function_body(parser)?;

    Ok(Stmt::FunctionDecl(FunctionDeclStmt {
        name,
        function,
        is_local: false,
    }))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::If)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect_detailed(TokenKind::Then, "expected `then` after condition")?;
    let then_body = parse_block(parser)?;

    let mut elseif_clauses = Vec::new();
    while parser.accept(TokenKind::Elseif) {
        let condition = parse_expr(parser, BindingPower::Default)?;
        parser.expect_detailed(TokenKind::Then, "expected `then` after condition")?;
        let body = parse_block(parser)?;
        elseif_clauses.push(ElseIfClause { condition, body });
    }

    let else_body = if parser.accept(TokenKind::Else) {
        Some(parse_block(parser)?)
    } else {
        None
    };

    parser.expect_detailed(TokenKind::End, "expected `end` to close `if`")?;

    Ok(Stmt::If(IfStmt {
        condition,
        then_body,
        elseif_clauses,
        else_body,
    }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::While)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect_detailed(TokenKind::Do, "expected `do` after condition")?;
    let body = parse_block(parser)?;
    parser.expect_detailed(TokenKind::End, "expected `end` to close `while`")?;

    Ok(Stmt::While(WhileStmt { condition, body }))
}

pub fn parse_repeat_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::Repeat)?;
    let body = parse_block(parser)?;
    parser.expect_detailed(TokenKind::Until, "expected `until` to close `repeat`")?;
    let condition = parse_expr(parser, BindingPower::Default)?;

    Ok(Stmt::RepeatUntil(RepeatUntilStmt { body, condition }))
}

/// Numeric or generic `for`, told apart by the token after the first name.
pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::For)?;
    let first_name = parser
        .expect_detailed(TokenKind::Identifier, "expected loop variable")?
        .value;

    if parser.accept(TokenKind::Assignment) {
        let start = parse_expr(parser, BindingPower::Default)?;
        parser.expect_detailed(TokenKind::Comma, "expected `,` after loop start")?;
        let end = parse_expr(parser, BindingPower::Default)?;
        let step = if parser.accept(TokenKind::Comma) {
            Some(parse_expr(parser, BindingPower::Default)?)
        } else {
            None
        };

        parser.expect_detailed(TokenKind::Do, "expected `do` in `for`")?;
        let body = parse_block(parser)?;
        parser.expect_detailed(TokenKind::End, "expected `end` to close `for`")?;

        return Ok(Stmt::ForNumeric(ForNumericStmt {
            variable: first_name,
            start,
            end,
            step,
            body,
        }));
    }

    let mut names = vec![first_name];
    while parser.accept(TokenKind::Comma) {
        names.push(
            parser
                .expect_detailed(TokenKind::Identifier, "expected loop variable")?
                .value,
        );
    }

    parser.expect_detailed(TokenKind::In, "expected `=` or `in` in `for`")?;
    let expressions = parse_expression_list(parser)?;
    parser.expect_detailed(TokenKind::Do, "expected `do` in `for`")?;
    let body = parse_block(parser)?;
    parser.expect_detailed(TokenKind::End, "expected `end` to close `for`")?;

    Ok(Stmt::ForGeneric(ForGenericStmt {
        names,
        expressions,
        body,
    }))
}

pub fn parse_do_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::Do)?;
    let body = parse_block(parser)?;
    parser.expect_detailed(TokenKind::End, "expected `end` to close `do`")?;

    Ok(Stmt::Do(body))
}

/// `return` with an optional expression list, ending at a block terminator or `;`.
pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::Return)?;

    let kind = parser.current_token_kind();
    if kind.is_block_end() || kind == TokenKind::Semicolon {
        return Ok(Stmt::Return(Vec::new()));
    }

    Ok(Stmt::Return(parse_expression_list(parser)?))
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::Break)?;
    Ok(Stmt::Break)
}
