use std::iter::Peekable;

use crate::{
    ast::{AssignOperator, BinaryOperator, Expr, LogicalOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseContext, ParseResult},
            unary::parse_unary,
            utils::advance_if,
        },
    },
};

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, assignment, and recursively descends through the
/// precedence hierarchy.
///
/// Grammar: `expression := assignment`
pub(crate) fn parse_expression<'a, I>(tokens: &mut Peekable<I>,
                                      context: &mut ParseContext<'_>)
                                      -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_assignment(tokens, context)
}

/// Parses the assignment level, which also hosts the `in` clause.
///
/// Assignment is right-associative. Plain (`=`) and strict (`` `= ``)
/// assignment accept a variable or an index expression as their target;
/// the compound operators desugar `v op= e` into ``v `= (v op e)`` and
/// accept only variables. `x in xs` requires a bare identifier on the left.
///
/// Grammar:
/// ```text
///     assignment := or (("=" | "`=" | "+=" | "-=" | "*=" | "/=") assignment)?
///                 | or "in" assignment
/// ```
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>,
                           context: &mut ParseContext<'_>)
                           -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let expr = parse_or(tokens, context)?;

    if let Some((Token::Equal | Token::StrictAssign, _)) = tokens.peek() {
        let (token, line) = match tokens.next() {
            Some((token, line)) => (token.clone(), *line),
            None => unreachable!(),
        };
        let op = if token == Token::StrictAssign {
            AssignOperator::Strict
        } else {
            AssignOperator::Lazy
        };
        let value = Box::new(parse_assignment(tokens, context)?);

        return match expr {
            Expr::Variable { name, .. } => Ok(Expr::Assign { name,
                                                             op,
                                                             value,
                                                             line,
                                                             id: context.nodes.next() }),
            Expr::Index { target, index, line: index_line } => {
                Ok(Expr::IndexAssign { target,
                                       index,
                                       op,
                                       value,
                                       line: index_line })
            },
            _ => Err(ParseError::InvalidAssignmentTarget { line }),
        };
    }

    if let Some((Token::PlusEqual | Token::MinusEqual | Token::StarEqual | Token::SlashEqual, _)) =
        tokens.peek()
    {
        let (token, line) = match tokens.next() {
            Some((token, line)) => (token.clone(), *line),
            None => unreachable!(),
        };
        let rhs = parse_assignment(tokens, context)?;

        let target_line = expr.line();
        let Expr::Variable { name, .. } = expr else {
            return Err(ParseError::InvalidAssignmentTarget { line });
        };
        let op = match token {
            Token::PlusEqual => BinaryOperator::Add,
            Token::MinusEqual => BinaryOperator::Sub,
            Token::StarEqual => BinaryOperator::Mul,
            _ => BinaryOperator::Div,
        };

        let operand = Expr::Variable { name: name.clone(),
                                       line: target_line,
                                       id:   context.nodes.next(), };
        let value = Expr::Binary { left: Box::new(operand),
                                   op,
                                   right: Box::new(rhs),
                                   line };
        return Ok(Expr::Assign { name,
                                 op: AssignOperator::Strict,
                                 value: Box::new(value),
                                 line,
                                 id: context.nodes.next() });
    }

    if let Some(line) = advance_if(tokens, &Token::In) {
        let iterable = parse_assignment(tokens, context)?;
        let Expr::Variable { name, .. } = expr else {
            return Err(ParseError::UnexpectedToken {
                message: "Missing identifier for the iterating variable.".to_string(),
                line,
            });
        };
        return Ok(Expr::In { name,
                             iterable: Box::new(iterable),
                             line,
                             id: context.nodes.next() });
    }

    Ok(expr)
}

/// Parses left-associative chains of `or`.
///
/// Grammar: `or := and ("or" and)*`
fn parse_or<'a, I>(tokens: &mut Peekable<I>, context: &mut ParseContext<'_>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut expr = parse_and(tokens, context)?;
    while let Some(line) = advance_if(tokens, &Token::Or) {
        let right = parse_and(tokens, context)?;
        expr = Expr::Logical { left: Box::new(expr),
                               op: LogicalOperator::Or,
                               right: Box::new(right),
                               line };
    }
    Ok(expr)
}

/// Parses left-associative chains of `and`.
///
/// Grammar: `and := equality ("and" equality)*`
fn parse_and<'a, I>(tokens: &mut Peekable<I>, context: &mut ParseContext<'_>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut expr = parse_equality(tokens, context)?;
    while let Some(line) = advance_if(tokens, &Token::And) {
        let right = parse_equality(tokens, context)?;
        expr = Expr::Logical { left: Box::new(expr),
                               op: LogicalOperator::And,
                               right: Box::new(right),
                               line };
    }
    Ok(expr)
}

/// Parses `==` and `!=` chains, left-associative.
///
/// Grammar: `equality := comparison (("==" | "!=") comparison)*`
fn parse_equality<'a, I>(tokens: &mut Peekable<I>,
                         context: &mut ParseContext<'_>)
                         -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    const OPERATORS: &[(Token, BinaryOperator)] = &[(Token::EqualEqual, BinaryOperator::Equal),
                                                    (Token::NotEqual, BinaryOperator::NotEqual)];

    let mut expr = parse_comparison(tokens, context)?;
    while let Some((op, line)) = match_operator(tokens, OPERATORS) {
        let right = parse_comparison(tokens, context)?;
        expr = Expr::Binary { left: Box::new(expr),
                              op,
                              right: Box::new(right),
                              line };
    }
    Ok(expr)
}

/// Parses the relational operators, left-associative.
///
/// Grammar: `comparison := range (("<" | "<=" | ">" | ">=") range)*`
fn parse_comparison<'a, I>(tokens: &mut Peekable<I>,
                           context: &mut ParseContext<'_>)
                           -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    const OPERATORS: &[(Token, BinaryOperator)] =
        &[(Token::Less, BinaryOperator::Less),
          (Token::LessEqual, BinaryOperator::LessEqual),
          (Token::Greater, BinaryOperator::Greater),
          (Token::GreaterEqual, BinaryOperator::GreaterEqual)];

    let mut expr = parse_range(tokens, context)?;
    while let Some((op, line)) = match_operator(tokens, OPERATORS) {
        let right = parse_range(tokens, context)?;
        expr = Expr::Binary { left: Box::new(expr),
                              op,
                              right: Box::new(right),
                              line };
    }
    Ok(expr)
}

/// Parses a range expression; ranges do not associate.
///
/// `a..b` runs from `a` to `b` inclusive with step 1, `a..b..c` with step
/// `c`.
///
/// Grammar: `range := additive (".." additive (".." additive)?)?`
fn parse_range<'a, I>(tokens: &mut Peekable<I>,
                      context: &mut ParseContext<'_>)
                      -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let expr = parse_additive(tokens, context)?;

    if let Some(line) = advance_if(tokens, &Token::DotDot) {
        let end = Box::new(parse_additive(tokens, context)?);
        let step = if advance_if(tokens, &Token::DotDot).is_some() {
            Some(Box::new(parse_additive(tokens, context)?))
        } else {
            None
        };
        return Ok(Expr::Range { first: Box::new(expr),
                                end,
                                step,
                                line });
    }

    Ok(expr)
}

/// Parses `+` and `-` chains, left-associative.
///
/// Grammar: `additive := multiplicative (("+" | "-") multiplicative)*`
fn parse_additive<'a, I>(tokens: &mut Peekable<I>,
                         context: &mut ParseContext<'_>)
                         -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    const OPERATORS: &[(Token, BinaryOperator)] = &[(Token::Plus, BinaryOperator::Add),
                                                    (Token::Minus, BinaryOperator::Sub)];

    let mut expr = parse_multiplicative(tokens, context)?;
    while let Some((op, line)) = match_operator(tokens, OPERATORS) {
        let right = parse_multiplicative(tokens, context)?;
        expr = Expr::Binary { left: Box::new(expr),
                              op,
                              right: Box::new(right),
                              line };
    }
    Ok(expr)
}

/// Parses `*` and `/` chains, left-associative.
///
/// Grammar: `multiplicative := unary (("*" | "/") unary)*`
fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>,
                               context: &mut ParseContext<'_>)
                               -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    const OPERATORS: &[(Token, BinaryOperator)] = &[(Token::Star, BinaryOperator::Mul),
                                                    (Token::Slash, BinaryOperator::Div)];

    let mut expr = parse_unary(tokens, context)?;
    while let Some((op, line)) = match_operator(tokens, OPERATORS) {
        let right = parse_unary(tokens, context)?;
        expr = Expr::Binary { left: Box::new(expr),
                              op,
                              right: Box::new(right),
                              line };
    }
    Ok(expr)
}

/// Consumes the next token when it is one of `accepted`, returning the
/// mapped operator and its line.
fn match_operator<'a, I>(tokens: &mut Peekable<I>,
                         accepted: &[(Token, BinaryOperator)])
                         -> Option<(BinaryOperator, usize)>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let (token, line) = tokens.peek()?;
    for (candidate, op) in accepted {
        if token == candidate {
            let found = (*op, *line);
            tokens.next();
            return Some(found);
        }
    }
    None
}
