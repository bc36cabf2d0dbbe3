/// Numeric helpers shared across the interpreter.
///
/// This module provides the epsilon constant used for all numeric equality
/// and integrality decisions, together with the rounding helper the list
/// indexing rules rely on.
///
/// # Responsibilities
/// - Define the crate-wide epsilon.
/// - Compare numbers and test integrality under that epsilon.
pub mod num;
