/// Loop execution.
///
/// Implements `while`, the three-clause `for` and the ranged `for`,
/// including the loop-scope environments and the interception of `break`
/// and `continue` signals at their catch points.
pub mod control;
/// The evaluator core.
///
/// Declares the `Interpreter` with its environment chain and resolver depth
/// table, the `Unwind` control signals, and the dispatch over expression and
/// statement nodes.
pub mod core;
/// Indexing and ranges.
///
/// Implements scalar and gather indexing, index assignment with the
/// homogeneity checks, and range materialization.
pub mod indexing;
/// Operator evaluation.
///
/// Implements the unary, arithmetic, comparison and equality operators with
/// their epsilon rules.
pub mod operators;
