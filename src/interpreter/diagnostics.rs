use std::fmt::Display;

use crate::error::RuntimeError;

/// The diagnostic sink.
///
/// Every scan, parse, resolve and runtime error is routed here as one
/// formatted line (`[line <n>] Error: <message>`), together with the two
/// flags the entry point consults for its exit code. The sink buffers its
/// lines; the caller drains and prints them, which also keeps tests free of
/// stderr capture.
#[derive(Debug, Default)]
pub struct Diagnostics {
    messages:          Vec<String>,
    had_error:         bool,
    had_runtime_error: bool,
}

impl Diagnostics {
    /// Creates an empty sink with clear flags.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a static (scan, parse or resolve) error.
    pub fn static_error(&mut self, error: &dyn Display) {
        self.messages.push(error.to_string());
        self.had_error = true;
    }

    /// Records a runtime error.
    pub fn runtime_error(&mut self, error: &RuntimeError) {
        self.messages.push(error.to_string());
        self.had_runtime_error = true;
    }

    /// Records a warning. Warnings set no flag and never block execution.
    pub fn warning(&mut self, line: usize, message: &str) {
        self.messages.push(format!("[line {line}] Warning: {message}"));
    }

    /// Whether a static error has been recorded since the last reset.
    #[must_use]
    pub const fn had_error(&self) -> bool {
        self.had_error
    }

    /// Whether a runtime error has been recorded since the last reset.
    #[must_use]
    pub const fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    /// Clears the flags and any undrained messages. The REPL calls this
    /// before each input line.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.had_error = false;
        self.had_runtime_error = false;
    }

    /// Takes the buffered diagnostic lines, leaving the flags untouched.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }

    /// Merges another sink's lines and flags into this one. The parser uses
    /// a scratch sink while probing for single-expression input.
    pub(crate) fn absorb(&mut self, mut other: Self) {
        self.messages.append(&mut other.messages);
        self.had_error |= other.had_error;
        self.had_runtime_error |= other.had_runtime_error;
    }
}
