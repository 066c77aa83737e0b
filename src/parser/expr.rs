use crate::{
    ast::expressions::{BinaryOperator, CallExpr, Callee, Expr, TableField, UnaryOperator},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{lookups::BindingPower, parser::Parser, stmt::parse_function_body};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud_fn) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.unexpected_detailed("expected an expression"));
    };

    let mut left = nud_fn(parser)?;

    // While the current token binds tighter than `bp`, keep extending lhs
    loop {
        let token_kind = parser.current_token_kind();
        let Some(next_bp) = parser.get_bp_lookup().get(&token_kind).copied() else {
            break;
        };
        if next_bp <= bp {
            break;
        }

        let Some(led_fn) = parser.get_led_lookup().get(&token_kind).copied() else {
            return Err(parser.unexpected());
        };
        left = led_fn(parser, left, next_bp)?;
    }

    Ok(left)
}

/// Comma-separated expressions, at least one.
pub fn parse_expression_list(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    let mut expressions = vec![parse_expr(parser, BindingPower::Default)?];
    while parser.accept(TokenKind::Comma) {
        expressions.push(parse_expr(parser, BindingPower::Default)?);
    }
    Ok(expressions)
}

/// Hexadecimal literals become integers, everything else a float.
/// Hex values above `i64::MAX` wrap around modulo 2^64.
fn parse_number(token: &Token) -> Result<Expr, Error> {
    let number_error = || {
        Error::new(
            ErrorImpl::NumberParseError {
                token: token.value.clone(),
            },
            token.position.clone(),
        )
    };

    let lexeme = token.value.as_str();
    if let Some(digits) = lexeme.strip_prefix("0x").or_else(|| lexeme.strip_prefix("0X")) {
        u64::from_str_radix(digits, 16)
            .map(|value| Expr::integer(value as i64))
            .map_err(|_| number_error())
    } else {
        lexeme.parse::<f64>().map(Expr::float).map_err(|_| number_error())
    }
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::Number => {
            let token = parser.advance();
            parse_number(&token)
        }
        TokenKind::String => Ok(Expr::String(parser.advance().value)),
        TokenKind::Identifier => Ok(Expr::Var(parser.advance().value)),
        TokenKind::True => {
            parser.advance();
            Ok(Expr::Boolean(true))
        }
        TokenKind::False => {
            parser.advance();
            Ok(Expr::Boolean(false))
        }
        TokenKind::Nil => {
            parser.advance();
            Ok(Expr::Nil)
        }
        TokenKind::Ellipsis => {
            parser.advance();
            Ok(Expr::Vararg)
        }
        _ => Err(parser.unexpected()),
    }
}

fn binary_operator(token: &Token) -> Result<BinaryOperator, Error> {
    BinaryOperator::from_token(token.kind).ok_or_else(|| {
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: token.value.clone(),
            },
            token.position.clone(),
        )
    })
}

/// Left-associative binary operators: the right operand binds at the
/// operator's own level.
pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let operator = binary_operator(&operator_token)?;

    let right = parse_expr(parser, bp)?;

    Ok(Expr::binary(operator, left, right))
}

/// `^` is right-associative and binds tighter than unary operators on its left.
pub fn parse_power_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let operator = binary_operator(&operator_token)?;

    let right = parse_expr(parser, bp.predecessor())?;

    Ok(Expr::binary(operator, left, right))
}

/// `..` is right-associative: `a .. b .. c` is `a .. (b .. c)`.
pub fn parse_concat_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();

    let right = parse_expr(parser, bp.predecessor())?;

    Ok(Expr::concat(left, right))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let Some(operator) = UnaryOperator::from_token(operator_token.kind) else {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: operator_token.value,
            },
            operator_token.position,
        ));
    };

    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::unary(operator, operand))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect_detailed(TokenKind::CloseParen, "expected `)`")?;

    Ok(expr)
}

/// Arguments of a call: `(a, b)`, a single string literal, or a single table.
fn parse_call_arguments(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    match parser.current_token_kind() {
        TokenKind::OpenParen => {
            parser.advance();
            let arguments = if parser.current_token_kind() == TokenKind::CloseParen {
                Vec::new()
            } else {
                parse_expression_list(parser)?
            };
            parser.expect_detailed(TokenKind::CloseParen, "expected `)` after arguments")?;
            Ok(arguments)
        }
        TokenKind::String => Ok(vec![Expr::String(parser.advance().value)]),
        TokenKind::OpenCurly => Ok(vec![parse_table_expr(parser)?]),
        _ => Err(parser.unexpected_detailed("expected call arguments")),
    }
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let arguments = parse_call_arguments(parser)?;

    let callee = match left {
        Expr::Var(name) => Callee::Name(name),
        other => Callee::Expr(Box::new(other)),
    };

    Ok(Expr::Call(CallExpr { callee, arguments }))
}

pub fn parse_method_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.expect(TokenKind::Colon)?;
    let method = parser
        .expect_detailed(TokenKind::Identifier, "expected method name after `:`")?
        .value;
    let arguments = parse_call_arguments(parser)?;

    Ok(Expr::Call(CallExpr {
        callee: Callee::Method {
            object: Box::new(left),
            method,
        },
        arguments,
    }))
}

/// `a.b` is sugar for `a["b"]`.
pub fn parse_member_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.expect(TokenKind::Dot)?;
    let field = parser
        .expect_detailed(TokenKind::Identifier, "expected field name after `.`")?
        .value;

    Ok(Expr::Index {
        object: Box::new(left),
        key: Box::new(Expr::String(field)),
    })
}

pub fn parse_index_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenBracket)?;
    let key = parse_expr(parser, BindingPower::Default)?;
    parser.expect_detailed(TokenKind::CloseBracket, "expected `]`")?;

    Ok(Expr::Index {
        object: Box::new(left),
        key: Box::new(key),
    })
}

pub fn parse_table_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenCurly)?;
    let mut fields = Vec::new();

    while parser.current_token_kind() != TokenKind::CloseCurly {
        let field = match parser.current_token_kind() {
            TokenKind::OpenBracket => {
                parser.advance();
                let key = parse_expr(parser, BindingPower::Default)?;
                parser.expect_detailed(TokenKind::CloseBracket, "expected `]`")?;
                parser.expect_detailed(TokenKind::Assignment, "expected `=` after table key")?;
                TableField::Keyed(key, parse_expr(parser, BindingPower::Default)?)
            }
            TokenKind::Identifier if parser.peek_kind(1) == TokenKind::Assignment => {
                let name = parser.advance().value;
                parser.advance();
                TableField::Named(name, parse_expr(parser, BindingPower::Default)?)
            }
            _ => TableField::Positional(parse_expr(parser, BindingPower::Default)?),
        };
        fields.push(field);

        if !parser.accept(TokenKind::Comma) && !parser.accept(TokenKind::Semicolon) {
            break;
        }
    }

    parser.expect_detailed(TokenKind::CloseCurly, "expected `}` to close table")?;
    Ok(Expr::Table(fields))
}

pub fn parse_function_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::Function)?;
    Ok(Expr::Function(parse_function_body(parser)?))
}
