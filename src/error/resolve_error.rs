#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Represents the static errors the resolver detects while walking the tree.
pub enum ResolveError {
    /// A `break` statement appears outside any loop.
    BreakOutsideLoop {
        /// The source line of the statement.
        line: usize,
    },
    /// A `continue` statement appears outside any loop.
    ContinueOutsideLoop {
        /// The source line of the statement.
        line: usize,
    },
    /// A `return` statement appears outside any function body.
    ReturnOutsideFunction {
        /// The source line of the statement.
        line: usize,
    },
    /// An `in` clause appears somewhere other than a `for` initializer.
    StrayInClause {
        /// The source line of the `in` keyword.
        line: usize,
    },
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BreakOutsideLoop { line } => write!(f,
                                                      "[line {line}] Error: Cannot use 'break' \
                                                       outside of a loop."),
            Self::ContinueOutsideLoop { line } => write!(f,
                                                         "[line {line}] Error: Cannot use \
                                                          'continue' outside of a loop."),
            Self::ReturnOutsideFunction { line } => write!(f,
                                                           "[line {line}] Error: Cannot use \
                                                            'return' outside of a function."),
            Self::StrayInClause { line } => write!(f,
                                                   "[line {line}] Error: An 'in' expression is \
                                                    only valid inside a for-loop clause."),
        }
    }
}

impl std::error::Error for ResolveError {}
