use crate::{
    ast::{NodeCounter, Stmt},
    interpreter::{
        diagnostics::Diagnostics,
        evaluator::core::Interpreter,
        io::HostIo,
        lexer,
        parser::{self, Parsed},
        resolver::Resolver,
    },
};

/// One interpreter session.
///
/// Owns the pipeline (scanner, parser, resolver, evaluator) together with
/// the diagnostic sink and the node-id counter shared by every parse. The
/// entry point creates one session per process; tests create as many
/// isolated ones as they like.
///
/// # Example
/// ```
/// use std::io::Cursor;
///
/// use rill::interpreter::{io::{HostIo, SharedWriter}, session::Session};
///
/// let writer = SharedWriter::new();
/// let io = HostIo::new(Box::new(Cursor::new(Vec::new())), Box::new(writer.clone()));
///
/// let mut session = Session::new(io);
/// session.run("println(1 + 2 * 3);");
///
/// assert!(!session.had_error() && !session.had_runtime_error());
/// assert_eq!(writer.contents(), "7\n");
/// ```
pub struct Session {
    interpreter: Interpreter,
    diagnostics: Diagnostics,
    nodes:       NodeCounter,
}

impl Session {
    /// Creates a session talking to the given host streams.
    #[must_use]
    pub fn new(io: HostIo) -> Self {
        Self { interpreter: Interpreter::new(io),
               diagnostics: Diagnostics::new(),
               nodes:       NodeCounter::new(), }
    }

    /// Creates a session wired to stdin and stdout.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(HostIo::standard())
    }

    /// Runs a whole program.
    ///
    /// Scans, parses and resolves the source; if any static error was
    /// reported the program is not executed. A runtime error aborts
    /// execution and is routed to the diagnostic sink.
    pub fn run(&mut self, source: &str) {
        let tokens = lexer::scan(source, &mut self.diagnostics);
        let parsed = parser::parse(&tokens, &mut self.diagnostics, &mut self.nodes, false);
        if self.diagnostics.had_error() {
            return;
        }

        let Parsed::Program(statements) = parsed else {
            return;
        };
        self.execute_program(&statements);
    }

    /// Runs one prompt line.
    ///
    /// The flags are reset first, then the input is tried as a single bare
    /// expression; on success the returned string is its echo text (`None`
    /// for a call producing `nix`). Anything else executes as statements
    /// with no echo.
    pub fn run_line(&mut self, source: &str) -> Option<String> {
        self.diagnostics.reset();

        let tokens = lexer::scan(source, &mut self.diagnostics);
        let parsed = parser::parse(&tokens, &mut self.diagnostics, &mut self.nodes, true);
        if self.diagnostics.had_error() {
            return None;
        }

        match parsed {
            Parsed::Expression(expr) => {
                let table = Resolver::new(&mut self.diagnostics).resolve_expression(&expr);
                if self.diagnostics.had_error() {
                    return None;
                }
                self.interpreter.add_resolutions(table);

                match self.interpreter.interpret_expression(&expr) {
                    Ok(echo) => echo,
                    Err(error) => {
                        self.diagnostics.runtime_error(&error);
                        None
                    },
                }
            },
            Parsed::Program(statements) => {
                self.execute_program(&statements);
                None
            },
        }
    }

    fn execute_program(&mut self, statements: &[Stmt]) {
        let table = Resolver::new(&mut self.diagnostics).resolve(statements);
        if self.diagnostics.had_error() {
            return;
        }
        self.interpreter.add_resolutions(table);

        if let Err(error) = self.interpreter.interpret(statements) {
            self.diagnostics.runtime_error(&error);
        }
    }

    /// Whether a static (scan, parse or resolve) error has been reported.
    #[must_use]
    pub const fn had_error(&self) -> bool {
        self.diagnostics.had_error()
    }

    /// Whether a runtime error has been reported.
    #[must_use]
    pub const fn had_runtime_error(&self) -> bool {
        self.diagnostics.had_runtime_error()
    }

    /// Takes the buffered diagnostic lines for printing or inspection.
    pub fn drain_diagnostics(&mut self) -> Vec<String> {
        self.diagnostics.drain()
    }
}
