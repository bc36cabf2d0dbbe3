use std::{cell::RefCell, fmt, rc::Rc};

use crate::{
    ast::LiteralValue,
    interpreter::{callable::Callable, value::list::List},
    util::num::nums_equal,
};

/// Lists longer than this are abbreviated by [`Value::stringify`].
const ABBREVIATE_OVER: usize = 50;
/// How many elements an abbreviated list shows from each end.
const ABBREVIATE_CONTEXT: usize = 10;

/// Represents a runtime value in the interpreter.
///
/// This enum models every type a program can produce: the `nix` unit,
/// booleans, numbers (a single `f64` type), strings, lists and callables.
/// Lists and callables are heap-allocated and shared by handle; cloning a
/// `Value` never copies their contents.
#[derive(Clone)]
pub enum Value {
    /// The unit value, `nix`.
    Nix,
    /// A boolean value.
    Bool(bool),
    /// A numeric value (double precision floating-point).
    Num(f64),
    /// A string value.
    Str(String),
    /// A shared handle on a homogeneous list.
    List(Rc<RefCell<List>>),
    /// A shared handle on a callable object.
    Callable(Rc<dyn Callable>),
}

impl Value {
    /// Wraps a [`List`] into a fresh shared handle.
    #[must_use]
    pub fn list(list: List) -> Self {
        Self::List(Rc::new(RefCell::new(list)))
    }

    /// Applies the language's truthiness rule.
    ///
    /// `nix` is false, a boolean is itself, a number is false exactly when it
    /// is zero within epsilon, and everything else is true, including the
    /// empty string and the empty list.
    ///
    /// # Example
    /// ```
    /// use rill::interpreter::value::core::Value;
    ///
    /// assert!(!Value::Nix.truthy());
    /// assert!(!Value::Num(0.0).truthy());
    /// assert!(Value::Str(String::new()).truthy());
    /// ```
    #[must_use]
    pub fn truthy(&self) -> bool {
        match self {
            Self::Nix => false,
            Self::Bool(b) => *b,
            Self::Num(n) => !nums_equal(*n, 0.0),
            _ => true,
        }
    }

    /// Structural equality as exposed by the `==` operator.
    ///
    /// Numbers compare within epsilon; lists compare by tag, length and
    /// pairwise element equality (recursively); callables compare by handle
    /// identity; values of different variants are never equal.
    ///
    /// # Example
    /// ```
    /// use rill::interpreter::value::{core::Value, list::List};
    ///
    /// let a = Value::list(List::numbers(vec![1.0, 2.0]));
    /// let b = Value::list(List::numbers(vec![1.0, 2.0]));
    /// assert!(a.equals(&b));
    /// assert!(!a.equals(&Value::Num(1.0)));
    /// ```
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nix, Self::Nix) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Num(a), Self::Num(b)) => nums_equal(*a, *b),
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                let (a, b) = (a.borrow(), b.borrow());
                a.tag == b.tag
                && a.items.len() == b.items.len()
                && a.items.iter().zip(&b.items).all(|(x, y)| x.equals(y))
            },
            (Self::Callable(a), Self::Callable(b)) => {
                std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
            },
            _ => false,
        }
    }

    /// Returns a structurally independent copy: lists are cloned recursively,
    /// scalars are cloned, callables are returned as-is.
    ///
    /// # Example
    /// ```
    /// use rill::interpreter::value::{core::Value, list::List};
    ///
    /// let original = Value::list(List::numbers(vec![1.0]));
    /// let copy = original.deep_copy();
    /// assert!(original.equals(&copy));
    /// ```
    #[must_use]
    pub fn deep_copy(&self) -> Self {
        match self {
            Self::List(handle) => Self::list(handle.borrow().deep_copy()),
            other => other.clone(),
        }
    }

    /// Returns `true` if the value is [`Nix`].
    ///
    /// [`Nix`]: Value::Nix
    #[must_use]
    pub const fn is_nix(&self) -> bool {
        matches!(self, Self::Nix)
    }

    /// Converts the value to `f64`, or returns the supplied error.
    ///
    /// Call sites choose the error so that ranges, indices and arithmetic
    /// each report their own diagnostic.
    ///
    /// # Errors
    /// Returns `error` when the value is not a number.
    pub fn as_num<E>(&self, error: E) -> Result<f64, E> {
        match self {
            Self::Num(n) => Ok(*n),
            _ => Err(error),
        }
    }

    /// Renders the value the way `print` and the REPL show it.
    ///
    /// `delimiter` surrounds string content: the host printers pass `""` so
    /// strings print bare, the REPL echo passes `"\""`. Lists render as
    /// `[a, b, c]` with elements stringified recursively under the same
    /// delimiter; lists longer than 50 elements show ten from each end around
    /// an ellipsis.
    ///
    /// # Example
    /// ```
    /// use rill::interpreter::value::{core::Value, list::List};
    ///
    /// assert_eq!(Value::Nix.stringify(""), "nix");
    /// assert_eq!(Value::Num(2.5).stringify(""), "2.5");
    /// assert_eq!(Value::Str("hi".into()).stringify("\""), "\"hi\"");
    /// assert_eq!(Value::list(List::numbers(vec![1.0, 2.0])).stringify(""), "[1, 2]");
    /// ```
    #[must_use]
    pub fn stringify(&self, delimiter: &str) -> String {
        match self {
            Self::Nix => "nix".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Num(n) => n.to_string(),
            Self::Str(s) => format!("{delimiter}{s}{delimiter}"),
            Self::Callable(c) => c.describe(),
            Self::List(handle) => stringify_list(&handle.borrow(), delimiter),
        }
    }
}

fn stringify_list(list: &List, delimiter: &str) -> String {
    let items = &list.items;
    let mut text = String::from("[");

    if items.len() > ABBREVIATE_OVER {
        for value in &items[..ABBREVIATE_CONTEXT] {
            text += &value.stringify(delimiter);
            text += ", ";
        }
        text += "..., ";
        for value in &items[items.len() - ABBREVIATE_CONTEXT..] {
            text += &value.stringify(delimiter);
            text += ", ";
        }
        text.truncate(text.len() - 2);
    } else {
        for (index, value) in items.iter().enumerate() {
            if index > 0 {
                text += ", ";
            }
            text += &value.stringify(delimiter);
        }
    }

    text += "]";
    text
}

impl From<&LiteralValue> for Value {
    fn from(literal: &LiteralValue) -> Self {
        match literal {
            LiteralValue::Nix => Self::Nix,
            LiteralValue::Bool(b) => Self::Bool(*b),
            LiteralValue::Num(n) => Self::Num(*n),
            LiteralValue::Str(s) => Self::Str(s.clone()),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Num(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stringify("\""))
    }
}
