use std::rc::Rc;

use crate::{
    ast::Stmt,
    error::RuntimeError,
    interpreter::{
        environment::{EnvRef, Environment},
        evaluator::core::{EvalResult, Interpreter, Unwind},
        value::core::Value,
    },
};

/// The contract every callable value exposes.
///
/// A callable declares its exact arity and an invocation operation; the call
/// evaluator checks the argument count before invoking, so implementations
/// may index their argument vector freely. `describe` supplies the short tag
/// `stringify` shows for callable values.
pub trait Callable {
    /// The exact number of arguments the callable accepts.
    fn arity(&self) -> usize;

    /// Runs the callable with already-evaluated arguments.
    fn invoke(&self, interpreter: &mut Interpreter, arguments: Vec<Value>) -> EvalResult<Value>;

    /// A short informational tag, e.g. `<fn fib>`.
    fn describe(&self) -> String;
}

/// A user-defined function or lambda.
///
/// Holds the parameter names, the shared body statements and a handle on the
/// environment that was current at its creation. Invocation runs the body in
/// a fresh child of that captured environment, so mutations of the enclosing
/// scope stay visible to later calls.
pub struct ScriptFunction {
    name:    Option<String>,
    params:  Vec<String>,
    body:    Rc<Vec<Stmt>>,
    closure: EnvRef,
}

impl ScriptFunction {
    /// Creates the function object for a `fn name(...) { ... }` declaration.
    #[must_use]
    pub fn named(name: String, params: Vec<String>, body: Rc<Vec<Stmt>>, closure: EnvRef) -> Self {
        Self { name: Some(name),
               params,
               body,
               closure }
    }

    /// Creates the function object for an anonymous `fn (...) { ... }`.
    #[must_use]
    pub fn lambda(params: Vec<String>, body: Rc<Vec<Stmt>>, closure: EnvRef) -> Self {
        Self { name: None,
               params,
               body,
               closure }
    }
}

impl Callable for ScriptFunction {
    fn arity(&self) -> usize {
        self.params.len()
    }

    fn invoke(&self, interpreter: &mut Interpreter, arguments: Vec<Value>) -> EvalResult<Value> {
        let frame = Environment::nested(&self.closure);
        {
            let mut frame = frame.borrow_mut();
            for (param, argument) in self.params.iter().zip(arguments) {
                frame.define(param, argument);
            }
        }

        match interpreter.execute_block(&self.body, frame) {
            Ok(()) => Ok(Value::Nix),
            Err(Unwind::Return { value, .. }) => Ok(value),
            Err(Unwind::Failure(error)) => Err(error),
            Err(Unwind::Break { line } | Unwind::Continue { line }) => {
                Err(RuntimeError::EscapedSignal { line })
            },
        }
    }

    fn describe(&self) -> String {
        match &self.name {
            Some(name) => format!("<fn {name}>"),
            None => "<fn>".to_string(),
        }
    }
}
