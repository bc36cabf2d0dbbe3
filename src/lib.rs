//! # rill
//!
//! rill is a small, dynamically typed scripting language with first-class
//! functions, lexical scoping, homogeneous lists and ranges. This crate
//! contains the whole front-end and execution engine: scanner, parser,
//! resolver, tree-walking evaluator and the runtime value domain, plus the
//! session type the command-line binary and embedders drive.
//!
//! ```
//! use std::io::Cursor;
//!
//! use rill::{HostIo, Session, SharedWriter};
//!
//! let writer = SharedWriter::new();
//! let io = HostIo::new(Box::new(Cursor::new(Vec::new())), Box::new(writer.clone()));
//!
//! let mut session = Session::new(io);
//! session.run("fn double(n) { return n * 2; } println(double(21));");
//!
//! assert_eq!(writer.contents(), "42\n");
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Stmt` enums that represent the
/// syntactic structure of source code as a tree, the operator enums, and the
/// node identities the resolver keys its depth table by.
///
/// # Responsibilities
/// - Define expression and statement variants for every language construct.
/// - Attach source lines to nodes for error reporting.
/// - Hand out the per-session unique node ids.
pub mod ast;
/// Provides the error types for every phase.
///
/// Scan/parse errors, resolve errors and runtime errors are separate enums,
/// each variant carrying the source line; their `Display` impls produce the
/// one-line diagnostic format the sink emits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together scanning, parsing, resolution, evaluation,
/// value representation, environments, callables and diagnostics, and
/// exposes the `Session` entry point for interpreting programs and prompt
/// lines.
pub mod interpreter;
/// General numeric utilities: the epsilon constant and the comparisons built
/// on it.
pub mod util;

pub use interpreter::{
    io::{HostIo, SharedWriter},
    session::Session,
    value::core::Value,
};
