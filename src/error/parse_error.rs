#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during scanning or parsing.
pub enum ParseError {
    /// The scanner met a character that belongs to no token.
    UnexpectedCharacter {
        /// The offending character(s) as they appeared in the source.
        character: String,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// A string literal ran to the end of the input without a closing quote.
    UnterminatedString {
        /// The source line where scanning stopped.
        line: usize,
    },
    /// The parser met a token it cannot use here. The message names what was
    /// expected instead.
    UnexpectedToken {
        /// Description of what the parser expected.
        message: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// The token stream ended in the middle of a construct.
    UnexpectedEndOfInput {
        /// The source line where the input ended.
        line: usize,
    },
    /// The left-hand side of an assignment is neither a variable nor an
    /// index expression.
    InvalidAssignmentTarget {
        /// The source line of the assignment operator.
        line: usize,
    },
    /// A function or lambda declares more than the permitted 127 parameters.
    TooManyParameters {
        /// The source line where the limit was crossed.
        line: usize,
    },
    /// A call supplies more than the permitted 127 arguments.
    TooManyArguments {
        /// The source line where the limit was crossed.
        line: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedCharacter { character, line } => {
                write!(f, "[line {line}] Error: Unexpected character: '{character}'.")
            },
            Self::UnterminatedString { line } => {
                write!(f, "[line {line}] Error: Unterminated string. Expected a '\"'.")
            },
            Self::UnexpectedToken { message, line } => {
                write!(f, "[line {line}] Error: {message}")
            },
            Self::UnexpectedEndOfInput { line } => {
                write!(f, "[line {line}] Error: Unexpected end of input.")
            },
            Self::InvalidAssignmentTarget { line } => {
                write!(f, "[line {line}] Error: Invalid assignment location.")
            },
            Self::TooManyParameters { line } => write!(f,
                                                       "[line {line}] Error: Cannot have more \
                                                        than 127 parameters."),
            Self::TooManyArguments { line } => write!(f,
                                                      "[line {line}] Error: Cannot have more \
                                                       than 127 arguments."),
        }
    }
}

impl std::error::Error for ParseError {}
