use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{Expr, LiteralValue, Stmt},
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseContext, ParseResult},
            expression::parse_expression,
            utils::{advance_if, at_end, check, expect, parse_identifier, parse_parameters,
                    synchronize},
        },
    },
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - a `return` statement,
/// - a function declaration (`fn` followed by a name; a bare `fn` begins a
///   lambda expression instead),
/// - a braced block,
/// - an `if`, `while` or `for` statement,
/// - `break` or `continue`,
/// - an expression statement terminated by `;`.
pub(crate) fn parse_statement<'a, I>(tokens: &mut Peekable<I>,
                                     context: &mut ParseContext<'_>)
                                     -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some(line) = advance_if(tokens, &Token::Return) {
        return parse_return(tokens, context, line);
    }
    if is_function_declaration(tokens) {
        tokens.next();
        return parse_function(tokens, context);
    }
    if advance_if(tokens, &Token::LBrace).is_some() {
        return Ok(Stmt::Block { statements: parse_block(tokens, context)? });
    }
    if advance_if(tokens, &Token::If).is_some() {
        return parse_if(tokens, context);
    }
    if advance_if(tokens, &Token::While).is_some() {
        return parse_while(tokens, context);
    }
    if advance_if(tokens, &Token::For).is_some() {
        return parse_for(tokens, context);
    }
    if let Some(line) = advance_if(tokens, &Token::Break) {
        expect(tokens, &Token::Semicolon, "Expected a ';' after 'break'.")?;
        return Ok(Stmt::Break { line });
    }
    if let Some(line) = advance_if(tokens, &Token::Continue) {
        expect(tokens, &Token::Semicolon, "Expected a ';' after 'continue'.")?;
        return Ok(Stmt::Continue { line });
    }

    let expr = parse_expression(tokens, context)?;
    expect(tokens,
           &Token::Semicolon,
           "Invalid syntax. Did you miss a ';' after the expression?")?;
    Ok(Stmt::Expression { expr })
}

/// `fn` at statement position declares a function only when an identifier
/// follows; otherwise it is the start of a lambda expression.
fn is_function_declaration<'a, I>(tokens: &mut Peekable<I>) -> bool
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut lookahead = tokens.clone();
    matches!(lookahead.next(), Some((Token::Fn, _)))
    && matches!(lookahead.next(), Some((Token::Identifier(_), _)))
}

/// Parses the statements of a block; the opening `{` is already consumed,
/// the closing `}` is consumed here.
///
/// A statement that fails to parse is reported and dropped, and the stream
/// synchronizes inside the block so the remaining statements still parse.
pub(crate) fn parse_block<'a, I>(tokens: &mut Peekable<I>,
                                 context: &mut ParseContext<'_>)
                                 -> ParseResult<Vec<Stmt>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut statements = Vec::new();
    while !check(tokens, &Token::RBrace) && !at_end(tokens) {
        match parse_statement(tokens, context) {
            Ok(statement) => statements.push(statement),
            Err(error) => {
                context.diagnostics.static_error(&error);
                synchronize(tokens);
            },
        }
    }

    expect(tokens, &Token::RBrace, "Expected a '}' at the end of the block.")?;
    Ok(statements)
}

fn parse_if<'a, I>(tokens: &mut Peekable<I>, context: &mut ParseContext<'_>) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::LParen, "Expected a '(' after 'if'.")?;
    let condition = parse_expression(tokens, context)?;
    expect(tokens, &Token::RParen, "Expected a ')' after the if condition.")?;

    let then_branch = Box::new(parse_statement(tokens, context)?);
    let else_branch = if advance_if(tokens, &Token::Else).is_some() {
        Some(Box::new(parse_statement(tokens, context)?))
    } else {
        None
    };

    Ok(Stmt::If { condition,
                  then_branch,
                  else_branch })
}

fn parse_while<'a, I>(tokens: &mut Peekable<I>,
                      context: &mut ParseContext<'_>)
                      -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::LParen, "Expected a '(' after 'while'.")?;
    let condition = parse_expression(tokens, context)?;
    expect(tokens, &Token::RParen, "Expected a ')' after the while condition.")?;

    let body = Box::new(parse_statement(tokens, context)?);
    Ok(Stmt::While { condition, body })
}

/// Parses a `for` statement.
///
/// When the initializer turns out to be an `x in xs` clause, the statement
/// is a ranged loop and the clause is unpacked into it; otherwise the usual
/// three clauses follow, each optional, with `true` substituted for an
/// omitted condition.
fn parse_for<'a, I>(tokens: &mut Peekable<I>, context: &mut ParseContext<'_>) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::LParen, "Expected a '(' after 'for'.")?;

    let initializer = if advance_if(tokens, &Token::Semicolon).is_some() {
        None
    } else {
        let expr = parse_expression(tokens, context)?;

        if let Expr::In { name, iterable, line, id } = expr {
            expect(tokens,
                   &Token::RParen,
                   "Expected a ')' after the ranged for-loop clause.")?;
            let body = Box::new(parse_statement(tokens, context)?);
            return Ok(Stmt::RangedFor { name,
                                        id,
                                        iterable: *iterable,
                                        line,
                                        body });
        }

        expect(tokens,
               &Token::Semicolon,
               "Expected a ';' after the for-loop initialization clause.")?;
        Some(expr)
    };

    let condition = if check(tokens, &Token::Semicolon) {
        Expr::Literal { value: LiteralValue::Bool(true),
                        line:  0, }
    } else {
        parse_expression(tokens, context)?
    };
    expect(tokens, &Token::Semicolon, "Expected a ';' after the for-loop condition.")?;

    let increment = if check(tokens, &Token::RParen) {
        None
    } else {
        Some(parse_expression(tokens, context)?)
    };
    expect(tokens, &Token::RParen, "Expected a ')' after the for-loop clauses.")?;

    let body = Box::new(parse_statement(tokens, context)?);
    Ok(Stmt::For { initializer,
                   condition,
                   increment,
                   body })
}

/// Parses a function declaration; the `fn` keyword is already consumed.
fn parse_function<'a, I>(tokens: &mut Peekable<I>,
                         context: &mut ParseContext<'_>)
                         -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (name, line) = parse_identifier(tokens, "A function name was expected.")?;
    expect(tokens, &Token::LParen, "Expected a '(' after the function name.")?;
    let params = parse_parameters(tokens, context)?;
    expect(tokens, &Token::LBrace, "Expected a '{' before the function body.")?;
    let body = parse_block(tokens, context)?;

    Ok(Stmt::Func { name,
                    params,
                    body: Rc::new(body),
                    line })
}

fn parse_return<'a, I>(tokens: &mut Peekable<I>,
                       context: &mut ParseContext<'_>,
                       line: usize)
                       -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let value = if check(tokens, &Token::Semicolon) {
        None
    } else {
        Some(parse_expression(tokens, context)?)
    };
    expect(tokens, &Token::Semicolon, "Expected a ';' after the return value.")?;

    Ok(Stmt::Return { value, line })
}
