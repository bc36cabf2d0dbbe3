use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{BinaryOperator, Expr, LiteralValue, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseContext, ParseResult},
            expression::parse_expression,
            statement::parse_block,
            utils::{advance_if, check, expect, parse_arguments, parse_parameters},
        },
    },
};

/// Parses a unary expression.
///
/// Supports the right-associative prefix operators `-` (numeric negation)
/// and `!` / `not` (logical negation), so `!-x` parses as `!(-x)`. Without a
/// prefix operator the function falls through to the exponentiation level.
///
/// Grammar:
/// ```text
///     unary := ("-" | "!") unary
///            | exponent
/// ```
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>,
                                 context: &mut ParseContext<'_>)
                                 -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some(line) = advance_if(tokens, &Token::Minus) {
        let operand = parse_unary(tokens, context)?;
        return Ok(Expr::Unary { op: UnaryOperator::Negate,
                                operand: Box::new(operand),
                                line });
    }
    if let Some(line) = advance_if(tokens, &Token::Not) {
        let operand = parse_unary(tokens, context)?;
        return Ok(Expr::Unary { op: UnaryOperator::Not,
                                operand: Box::new(operand),
                                line });
    }

    parse_exponent(tokens, context)
}

/// Parses exponentiation with right-associativity: `a ^ b ^ c` parses as
/// `a ^ (b ^ c)`. Binds tighter than unary minus, so `-2^2` is `-(2^2)`.
///
/// Grammar: `exponent := postfix ("^" exponent)?`
fn parse_exponent<'a, I>(tokens: &mut Peekable<I>,
                         context: &mut ParseContext<'_>)
                         -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let base = parse_postfix(tokens, context)?;
    if let Some(line) = advance_if(tokens, &Token::Caret) {
        let power = parse_exponent(tokens, context)?;
        return Ok(Expr::Binary { left: Box::new(base),
                                 op: BinaryOperator::Pow,
                                 right: Box::new(power),
                                 line });
    }
    Ok(base)
}

/// Parses a primary expression followed by any chain of postfix operators:
/// calls and index accesses, both left-associative.
///
/// The double-bracket gather form `xs[[1, 2]]` parses its inner brackets as
/// a list literal serving as the index operand.
///
/// Grammar:
/// ```text
///     postfix := primary ( "(" arguments ")" | "[" expression "]"
///                        | "[" "[" elements "]" "]" )*
/// ```
fn parse_postfix<'a, I>(tokens: &mut Peekable<I>,
                        context: &mut ParseContext<'_>)
                        -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut expr = parse_primary(tokens, context)?;

    loop {
        if let Some(line) = advance_if(tokens, &Token::LParen) {
            let arguments = parse_arguments(tokens, context)?;
            expr = Expr::Call { callee: Box::new(expr),
                                arguments,
                                line };
            continue;
        }

        if let Some(line) = advance_if(tokens, &Token::LBracket) {
            let index = if let Some(inner_line) = advance_if(tokens, &Token::LBracket) {
                parse_list_literal(tokens, context, inner_line)?
            } else {
                parse_expression(tokens, context)?
            };
            expect(tokens, &Token::RBracket, "Expected a ']' after the index.")?;
            expr = Expr::Index { target: Box::new(expr),
                                 index: Box::new(index),
                                 line };
            continue;
        }

        break;
    }

    Ok(expr)
}

/// Parses a primary (atomic) expression: literals, identifiers, groupings,
/// lambdas and list literals.
fn parse_primary<'a, I>(tokens: &mut Peekable<I>,
                        context: &mut ParseContext<'_>)
                        -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((token, line)) = tokens.peek() else {
        return Err(ParseError::UnexpectedEndOfInput { line: 0 });
    };
    let line = *line;

    match token {
        Token::Nix => {
            tokens.next();
            Ok(Expr::Literal { value: LiteralValue::Nix,
                               line })
        },
        Token::True => {
            tokens.next();
            Ok(Expr::Literal { value: LiteralValue::Bool(true),
                               line })
        },
        Token::False => {
            tokens.next();
            Ok(Expr::Literal { value: LiteralValue::Bool(false),
                               line })
        },
        Token::Number(value) => {
            let value = *value;
            tokens.next();
            Ok(Expr::Literal { value: LiteralValue::Num(value),
                               line })
        },
        Token::Str(text) => {
            let text = text.clone();
            tokens.next();
            Ok(Expr::Literal { value: LiteralValue::Str(text),
                               line })
        },
        Token::Identifier(name) => {
            let name = name.clone();
            tokens.next();
            Ok(Expr::Variable { name,
                                line,
                                id: context.nodes.next() })
        },
        Token::LParen => {
            tokens.next();
            let inner = parse_expression(tokens, context)?;
            expect(tokens, &Token::RParen, "Expected a ')' after the expression.")?;
            Ok(Expr::Grouping { inner: Box::new(inner),
                                line })
        },
        Token::Fn => {
            tokens.next();
            parse_lambda(tokens, context, line)
        },
        Token::LBracket => {
            tokens.next();
            parse_list_literal(tokens, context, line)
        },
        Token::Eof => Err(ParseError::UnexpectedEndOfInput { line }),
        other => Err(ParseError::UnexpectedToken { message: format!("Invalid syntax at {other:?}."),
                                                   line }),
    }
}

/// Parses an anonymous function; the `fn` keyword is already consumed.
fn parse_lambda<'a, I>(tokens: &mut Peekable<I>,
                       context: &mut ParseContext<'_>,
                       line: usize)
                       -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::LParen, "Expected a '(' after 'fn'.")?;
    let params = parse_parameters(tokens, context)?;
    expect(tokens, &Token::LBrace, "Expected a '{' before the lambda body.")?;
    let body = parse_block(tokens, context)?;

    Ok(Expr::Lambda { params,
                      body: Rc::new(body),
                      line })
}

/// Parses the elements of a list literal; the opening `[` is already
/// consumed, the closing `]` is consumed here.
///
/// Grammar: `list := "[" (expression ("," expression)*)? "]"`
fn parse_list_literal<'a, I>(tokens: &mut Peekable<I>,
                             context: &mut ParseContext<'_>,
                             line: usize)
                             -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut elements = Vec::new();
    if !check(tokens, &Token::RBracket) {
        loop {
            elements.push(parse_expression(tokens, context)?);
            if advance_if(tokens, &Token::Comma).is_none() {
                break;
            }
        }
    }

    expect(tokens, &Token::RBracket, "Expected a ']' after the list.")?;
    Ok(Expr::ListLiteral { elements, line })
}
