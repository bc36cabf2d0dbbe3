use std::iter::Peekable;

use crate::{
    ast::{Expr, NodeCounter, Stmt},
    error::ParseError,
    interpreter::{
        diagnostics::Diagnostics,
        lexer::Token,
        parser::{
            expression::parse_expression,
            statement::parse_statement,
            utils::{at_end, synchronize},
        },
    },
};

/// Result type used by the parse functions. Errors bubble to the statement
/// loop, which reports them and synchronizes.
pub type ParseResult<T> = Result<T, ParseError>;

/// State threaded through every parse function alongside the token stream:
/// the diagnostic sink for non-fatal reports and the node-id counter.
pub(crate) struct ParseContext<'a> {
    pub diagnostics: &'a mut Diagnostics,
    pub nodes:       &'a mut NodeCounter,
}

/// The outcome of a parse.
#[derive(Debug)]
pub enum Parsed {
    /// A list of statements, possibly shortened by discarded erroneous ones.
    Program(Vec<Stmt>),
    /// A bare expression, produced only in single-expression mode.
    Expression(Expr),
}

/// Parses a token stream into statements.
///
/// With `allow_expression` set (the prompt's mode), the input is first
/// probed as one bare expression covering the entire stream with no trailing
/// `;`; if the probe succeeds, that expression is returned for echoing.
/// Otherwise the input parses as a statement list: each erroneous statement
/// is reported to the diagnostic sink, the stream synchronizes to the next
/// statement boundary, and parsing continues.
pub fn parse(tokens: &[(Token, usize)],
             diagnostics: &mut Diagnostics,
             nodes: &mut NodeCounter,
             allow_expression: bool)
             -> Parsed {
    if allow_expression && let Some(expr) = try_bare_expression(tokens, diagnostics, nodes) {
        return Parsed::Expression(expr);
    }

    let mut stream = tokens.iter().peekable();
    let mut context = ParseContext { diagnostics, nodes };
    let mut statements = Vec::new();

    while !at_end(&mut stream) {
        match parse_statement(&mut stream, &mut context) {
            Ok(statement) => statements.push(statement),
            Err(error) => {
                context.diagnostics.static_error(&error);
                synchronize(&mut stream);
            },
        }
    }

    Parsed::Program(statements)
}

/// Attempts to parse the whole stream as one expression. Diagnostics go to
/// a scratch sink that is merged only when the probe succeeds, so a failed
/// probe leaves no trace before the statement parse runs.
fn try_bare_expression(tokens: &[(Token, usize)],
                       diagnostics: &mut Diagnostics,
                       nodes: &mut NodeCounter)
                       -> Option<Expr> {
    let mut trial: Peekable<_> = tokens.iter().peekable();
    let mut scratch = Diagnostics::new();
    let mut context = ParseContext { diagnostics: &mut scratch,
                                     nodes };

    let expr = parse_expression(&mut trial, &mut context).ok()?;
    if !matches!(trial.peek(), Some((Token::Eof, _))) {
        return None;
    }

    diagnostics.absorb(scratch);
    Some(expr)
}
