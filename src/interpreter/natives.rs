use std::rc::Rc;

use crate::interpreter::{
    callable::Callable,
    environment::EnvRef,
    evaluator::core::{EvalResult, Interpreter},
    value::core::Value,
};

/// `read()`: reads one line from the session input and returns it as a
/// string.
struct ReadLine;

/// `print(v)`: writes the stringified value without a trailing newline and
/// returns nix.
struct Print;

/// `println(v)`: like `print` with a trailing newline.
struct Println;

/// `copy(v)`: returns a deep copy of the value.
struct CopyValue;

impl Callable for ReadLine {
    fn arity(&self) -> usize {
        0
    }

    fn invoke(&self, interpreter: &mut Interpreter, _arguments: Vec<Value>) -> EvalResult<Value> {
        Ok(Value::Str(interpreter.io.read_line()))
    }

    fn describe(&self) -> String {
        "<native fn read>".to_string()
    }
}

impl Callable for Print {
    fn arity(&self) -> usize {
        1
    }

    fn invoke(&self, interpreter: &mut Interpreter, arguments: Vec<Value>) -> EvalResult<Value> {
        let value = arguments.into_iter().next().unwrap_or(Value::Nix);
        interpreter.io.write(&value.stringify(""));
        Ok(Value::Nix)
    }

    fn describe(&self) -> String {
        "<native fn print>".to_string()
    }
}

impl Callable for Println {
    fn arity(&self) -> usize {
        1
    }

    fn invoke(&self, interpreter: &mut Interpreter, arguments: Vec<Value>) -> EvalResult<Value> {
        let value = arguments.into_iter().next().unwrap_or(Value::Nix);
        let mut text = value.stringify("");
        text.push('\n');
        interpreter.io.write(&text);
        Ok(Value::Nix)
    }

    fn describe(&self) -> String {
        "<native fn println>".to_string()
    }
}

impl Callable for CopyValue {
    fn arity(&self) -> usize {
        1
    }

    fn invoke(&self, _interpreter: &mut Interpreter, arguments: Vec<Value>) -> EvalResult<Value> {
        let value = arguments.into_iter().next().unwrap_or(Value::Nix);
        Ok(value.deep_copy())
    }

    fn describe(&self) -> String {
        "<native fn copy>".to_string()
    }
}

/// Installs the host built-ins into the global environment.
pub fn install(globals: &EnvRef) {
    let mut globals = globals.borrow_mut();
    globals.define("read", Value::Callable(Rc::new(ReadLine)));
    globals.define("print", Value::Callable(Rc::new(Print)));
    globals.define("println", Value::Callable(Rc::new(Println)));
    globals.define("copy", Value::Callable(Rc::new(CopyValue)));
}
