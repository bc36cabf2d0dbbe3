#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during evaluation.
pub enum RuntimeError {
    /// Tried to read a variable that is bound nowhere.
    UndefinedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A strict assignment targeted a scope that does not hold the name.
    StrictAssignToUndefined {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An arithmetic or comparison operator received a non-number.
    OperandsMustBeNumbers {
        /// The source line where the error occurred.
        line: usize,
    },
    /// `+` received operands that are neither two numbers nor two strings.
    AddOperandsMismatch {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A unary `-` received a non-number.
    OperandMustBeNumber {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The divisor of a division is zero within epsilon.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to call a value that is not callable.
    NotCallable {
        /// The source line of the call.
        line: usize,
    },
    /// A call supplied the wrong number of arguments.
    ArityMismatch {
        /// The number of parameters the callee declares.
        expected: usize,
        /// The number of arguments supplied.
        found:    usize,
        /// The source line of the call.
        line:     usize,
    },
    /// A list literal mixed values of different types.
    HeterogeneousList {
        /// The source line of the list literal.
        line: usize,
    },
    /// The index operator was applied to a non-list.
    IndexOnNonList {
        /// The source line of the index.
        line: usize,
    },
    /// The index operand is neither a number nor a list.
    BadIndexType {
        /// The source line of the index.
        line: usize,
    },
    /// A gather index list contains non-numbers.
    IndexListNotNumeric {
        /// The source line of the index.
        line: usize,
    },
    /// An index is not a whole number within epsilon.
    FractionalIndex {
        /// The source line of the index.
        line: usize,
    },
    /// An index is zero or negative; positions are 1-based.
    NonPositiveIndex {
        /// The source line of the index.
        line: usize,
    },
    /// An index exceeds the length of the list.
    IndexPastEnd {
        /// The source line of the index.
        line: usize,
    },
    /// An index assignment would break the list's homogeneity.
    ListTypeMismatch {
        /// The source line of the assignment.
        line: usize,
    },
    /// A gather assignment's right-hand side is not a list.
    GatherValueNotAList {
        /// The source line of the assignment.
        line: usize,
    },
    /// A gather assignment's value list and index list differ in length.
    GatherLengthMismatch {
        /// The source line of the assignment.
        line: usize,
    },
    /// A range bound or step evaluated to a non-number.
    RangeBoundNotNumeric {
        /// The source line of the range.
        line: usize,
    },
    /// A range step is zero within epsilon.
    RangeStepZero {
        /// The source line of the range.
        line: usize,
    },
    /// The object of an `in` clause is not a list.
    NotIterable {
        /// The source line of the `in` keyword.
        line: usize,
    },
    /// A control-flow signal reached a scope that cannot handle it. The
    /// resolver rules this out for well-formed trees.
    EscapedSignal {
        /// The source line of the offending construct.
        line: usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndefinedVariable { name, line } => {
                write!(f, "[line {line}] Error: Undefined variable '{name}'.")
            },
            Self::StrictAssignToUndefined { name, line } => write!(f,
                                                                   "[line {line}] Error: Strict \
                                                                    assignment to undefined \
                                                                    variable '{name}'."),
            Self::OperandsMustBeNumbers { line } => {
                write!(f, "[line {line}] Error: Operands must be numbers.")
            },
            Self::AddOperandsMismatch { line } => write!(f,
                                                         "[line {line}] Error: Both of the \
                                                          operands must be numbers or strings."),
            Self::OperandMustBeNumber { line } => {
                write!(f, "[line {line}] Error: Operand must be a number.")
            },
            Self::DivisionByZero { line } => {
                write!(f, "[line {line}] Error: Cannot divide by 0!")
            },
            Self::NotCallable { line } => {
                write!(f, "[line {line}] Error: Provided object is not callable.")
            },
            Self::ArityMismatch { expected, found, line } => {
                write!(f,
                       "[line {line}] Error: Expected {expected} argument(s) but got {found} \
                        argument(s).")
            },
            Self::HeterogeneousList { line } => write!(f,
                                                       "[line {line}] Error: Lists are \
                                                        homogeneous and can't contain different \
                                                        types."),
            Self::IndexOnNonList { line } => write!(f,
                                                    "[line {line}] Error: The index operator can \
                                                     only be used on lists."),
            Self::BadIndexType { line } => {
                write!(f, "[line {line}] Error: The index must be a list or a number.")
            },
            Self::IndexListNotNumeric { line } => write!(f,
                                                         "[line {line}] Error: The indexing list \
                                                          must contain numbers."),
            Self::FractionalIndex { line } => write!(f,
                                                     "[line {line}] Error: Indices must be \
                                                      positive, non-zero integers."),
            Self::NonPositiveIndex { line } => {
                write!(f, "[line {line}] Error: Indices can't be negative or zero.")
            },
            Self::IndexPastEnd { line } => write!(f,
                                                  "[line {line}] Error: One or more of the \
                                                   indices is greater than the length of the \
                                                   list."),
            Self::ListTypeMismatch { line } => {
                write!(f, "[line {line}] Error: Type mismatch for list assignment.")
            },
            Self::GatherValueNotAList { line } => {
                write!(f, "[line {line}] Error: The value must be a list.")
            },
            Self::GatherLengthMismatch { line } => write!(f,
                                                          "[line {line}] Error: The value list's \
                                                           length must be equal to the number of \
                                                           indices accessed."),
            Self::RangeBoundNotNumeric { line } => write!(f,
                                                          "[line {line}] Error: Ranges can only \
                                                           contain numeric descriptors."),
            Self::RangeStepZero { line } => {
                write!(f, "[line {line}] Error: Range step cannot be 0.")
            },
            Self::NotIterable { line } => write!(f,
                                                 "[line {line}] Error: The specified object for \
                                                  the in-expression isn't an iterable."),
            Self::EscapedSignal { line } => write!(f,
                                                   "[line {line}] Error: A control-flow signal \
                                                    escaped the scope that produced it."),
        }
    }
}

impl std::error::Error for RuntimeError {}
