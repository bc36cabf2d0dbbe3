use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseContext, ParseResult},
            expression::parse_expression,
        },
    },
};

/// The source line of the next token, or 0 on an empty stream.
pub(crate) fn peek_line<'a, I>(tokens: &mut Peekable<I>) -> usize
    where I: Iterator<Item = &'a (Token, usize)>
{
    tokens.peek().map_or(0, |(_, line)| *line)
}

/// Whether the next token equals `expected`, without consuming it.
pub(crate) fn check<'a, I>(tokens: &mut Peekable<I>, expected: &Token) -> bool
    where I: Iterator<Item = &'a (Token, usize)>
{
    matches!(tokens.peek(), Some((token, _)) if token == expected)
}

/// Whether the stream has reached the end-of-file token.
pub(crate) fn at_end<'a, I>(tokens: &mut Peekable<I>) -> bool
    where I: Iterator<Item = &'a (Token, usize)>
{
    matches!(tokens.peek(), None | Some((Token::Eof, _)))
}

/// Consumes the next token if it equals `expected`, returning its line.
pub(crate) fn advance_if<'a, I>(tokens: &mut Peekable<I>, expected: &Token) -> Option<usize>
    where I: Iterator<Item = &'a (Token, usize)>
{
    if check(tokens, expected) {
        return tokens.next().map(|(_, line)| *line);
    }
    None
}

/// Consumes the next token, which must equal `expected`; otherwise reports
/// `message` at the offending token's line.
pub(crate) fn expect<'a, I>(tokens: &mut Peekable<I>,
                            expected: &Token,
                            message: &str)
                            -> ParseResult<usize>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.peek() {
        Some((token, line)) if token == expected => {
            let line = *line;
            tokens.next();
            Ok(line)
        },
        Some((_, line)) => Err(ParseError::UnexpectedToken { message: message.to_string(),
                                                             line:    *line, }),
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Consumes an identifier token and returns its name and line; `message`
/// describes the context on failure.
pub(crate) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>,
                                      message: &str)
                                      -> ParseResult<(String, usize)>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.peek() {
        Some((Token::Identifier(name), line)) => {
            let found = (name.clone(), *line);
            tokens.next();
            Ok(found)
        },
        Some((_, line)) => Err(ParseError::UnexpectedToken { message: message.to_string(),
                                                             line:    *line, }),
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses a parenthesized parameter list; the opening `(` is already
/// consumed, the closing `)` is consumed here.
///
/// Crossing the 127-parameter limit emits one diagnostic and keeps parsing.
pub(crate) fn parse_parameters<'a, I>(tokens: &mut Peekable<I>,
                                      context: &mut ParseContext<'_>)
                                      -> ParseResult<Vec<String>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut params = Vec::new();
    if !check(tokens, &Token::RParen) {
        loop {
            if params.len() == 127 {
                context.diagnostics
                       .static_error(&ParseError::TooManyParameters { line: peek_line(tokens) });
            }
            let (name, _) = parse_identifier(tokens, "Expected a parameter name.")?;
            params.push(name);
            if advance_if(tokens, &Token::Comma).is_none() {
                break;
            }
        }
    }

    expect(tokens, &Token::RParen, "Expected a ')' after the parameters.")?;
    Ok(params)
}

/// Parses a call's argument list; the opening `(` is already consumed, the
/// closing `)` is consumed here.
///
/// Crossing the 127-argument limit emits one diagnostic and keeps parsing.
pub(crate) fn parse_arguments<'a, I>(tokens: &mut Peekable<I>,
                                     context: &mut ParseContext<'_>)
                                     -> ParseResult<Vec<Expr>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut arguments = Vec::new();
    if !check(tokens, &Token::RParen) {
        loop {
            if arguments.len() == 127 {
                context.diagnostics
                       .static_error(&ParseError::TooManyArguments { line: peek_line(tokens) });
            }
            arguments.push(parse_expression(tokens, context)?);
            if advance_if(tokens, &Token::Comma).is_none() {
                break;
            }
        }
    }

    expect(tokens, &Token::RParen, "Expected a ')' after the function arguments.")?;
    Ok(arguments)
}

/// Panic-mode recovery: discards the offending token, then consumes tokens
/// until just past a `;` or just before a token that can begin a statement.
pub(crate) fn synchronize<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a (Token, usize)>
{
    if at_end(tokens) {
        return;
    }
    let mut previous = tokens.next().map(|(token, _)| token.clone());

    while let Some((token, _)) = tokens.peek() {
        if matches!(previous, Some(Token::Semicolon)) {
            return;
        }
        match token {
            Token::Eof | Token::If | Token::While | Token::For | Token::Fn | Token::Return => {
                return;
            },
            _ => previous = tokens.next().map(|(token, _)| token.clone()),
        }
    }
}
