/// The parser entry point.
///
/// Drives the statement loop with panic-mode recovery and implements the
/// single-expression probe the prompt uses.
pub mod core;
/// Expression parsing from assignment down through the additive levels.
pub mod expression;
/// Statement parsing: blocks, conditionals, loops, declarations, `return`.
pub mod statement;
/// High-precedence expression parsing: unary operators, exponentiation,
/// calls, indexing and the primary forms.
pub mod unary;
/// Shared token-stream helpers: expectation, lookahead, parameter and
/// argument lists, synchronization.
pub mod utils;

pub use self::core::{Parsed, parse};
