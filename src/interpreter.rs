/// The callable contract and user-defined functions.
///
/// Declares the `Callable` trait every invocable value implements and the
/// `ScriptFunction` closure object created by `fn` declarations and lambdas.
///
/// # Responsibilities
/// - Expose exact arity and invocation to the call evaluator.
/// - Capture defining environments and bind parameters on invocation.
/// - Convert `return` signals into call results.
pub mod callable;
/// The diagnostic sink.
///
/// Collects every error and warning as one formatted line and tracks the
/// static and runtime error flags the entry point turns into exit codes.
pub mod diagnostics;
/// Lexical scopes.
///
/// Declares the parent-linked, handle-shared environment with lookup and the
/// depth-addressed access the resolver's tables rely on.
pub mod environment;
/// The evaluator.
///
/// Walks the resolved tree, maintaining the current environment and
/// producing values; executes statements for effect and routes the
/// non-local control-flow signals.
///
/// # Responsibilities
/// - Evaluate every expression form with the epsilon arithmetic rules.
/// - Execute statements, loops and calls with proper scope discipline.
/// - Report runtime errors with source line context.
pub mod evaluator;
/// Host stream plumbing for the built-in I/O functions.
pub mod io;
/// The scanner.
///
/// Turns source text into `(token, line)` pairs, expanding string escapes,
/// skipping comments and reporting stray characters without aborting.
pub mod lexer;
/// The host built-ins (`read`, `print`, `println`, `copy`).
pub mod natives;
/// The parser.
///
/// Builds the statement and expression trees from the token stream by
/// recursive descent, with panic-mode recovery and the prompt's
/// single-expression mode.
///
/// # Responsibilities
/// - Implement the precedence hierarchy and assignment desugaring.
/// - Recover at statement boundaries so one error does not hide the rest.
/// - Enforce the parameter and argument limits.
pub mod parser;
/// The static resolution pass.
///
/// Pre-computes lexical depths for variable accesses and rejects misplaced
/// control flow before anything runs.
pub mod resolver;
/// The session tying the pipeline together.
///
/// One `Session` owns the interpreter state, the diagnostic sink and the
/// node-id counter; it runs programs and prompt lines.
pub mod session;
/// Runtime values.
///
/// The tagged value union, homogeneous lists and the canonical string
/// rendering.
pub mod value;
