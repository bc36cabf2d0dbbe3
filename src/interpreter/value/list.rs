use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// The type tag of a homogeneous list.
///
/// A list fixes its tag at construction and keeps it for life; every element
/// carries the tagged variant. The empty list has the distinct [`Empty`]
/// sentinel and never mixes with populated tags.
///
/// [`Empty`]: ListTag::Empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListTag {
    /// The tag of a list with no elements.
    Empty,
    /// All elements are numbers.
    Num,
    /// All elements are strings.
    Str,
    /// All elements are booleans.
    Bool,
    /// All elements are `nix`.
    Nix,
    /// All elements are lists themselves.
    List,
    /// All elements are callables.
    Callable,
}

impl ListTag {
    /// Classifies a value into the tag its containing list must carry.
    ///
    /// # Example
    /// ```
    /// use rill::interpreter::value::{core::Value, list::ListTag};
    ///
    /// assert_eq!(ListTag::of(&Value::Num(1.0)), ListTag::Num);
    /// assert_eq!(ListTag::of(&Value::Nix), ListTag::Nix);
    /// ```
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Nix => Self::Nix,
            Value::Bool(_) => Self::Bool,
            Value::Num(_) => Self::Num,
            Value::Str(_) => Self::Str,
            Value::List(_) => Self::List,
            Value::Callable(_) => Self::Callable,
        }
    }
}

/// A growable ordered sequence of same-typed values.
///
/// Lists are shared by handle (`Rc<RefCell<List>>` inside [`Value::List`])
/// and mutable in place: element assignment through any handle is observable
/// through all of them.
#[derive(Debug, Clone)]
pub struct List {
    /// The elements, all of the variant named by `tag`.
    pub items: Vec<Value>,
    /// The fixed type tag.
    pub tag:   ListTag,
}

impl List {
    /// Creates the empty list.
    #[must_use]
    pub const fn empty() -> Self {
        Self { items: Vec::new(),
               tag:   ListTag::Empty, }
    }

    /// Builds a list from already-evaluated elements, checking homogeneity.
    ///
    /// The first element fixes the tag; any element of a different variant is
    /// a runtime error. An empty input produces the [`ListTag::Empty`] list.
    ///
    /// # Errors
    /// Returns [`RuntimeError::HeterogeneousList`] when elements disagree on
    /// their variant.
    ///
    /// # Example
    /// ```
    /// use rill::interpreter::value::{core::Value, list::{List, ListTag}};
    ///
    /// let list = List::from_values(vec![Value::Num(1.0), Value::Num(2.0)], 1).unwrap();
    /// assert_eq!(list.tag, ListTag::Num);
    ///
    /// let mixed = List::from_values(vec![Value::Num(1.0), Value::Bool(true)], 1);
    /// assert!(mixed.is_err());
    /// ```
    pub fn from_values(items: Vec<Value>, line: usize) -> EvalResult<Self> {
        let Some(first) = items.first() else {
            return Ok(Self::empty());
        };

        let tag = ListTag::of(first);
        if items.iter().any(|value| ListTag::of(value) != tag) {
            return Err(RuntimeError::HeterogeneousList { line });
        }

        Ok(Self { items, tag })
    }

    /// Builds a numeric list without per-element checks. Used by range
    /// materialization, which only ever produces numbers.
    #[must_use]
    pub fn numbers(values: Vec<f64>) -> Self {
        if values.is_empty() {
            return Self::empty();
        }
        Self { items: values.into_iter().map(Value::Num).collect(),
               tag:   ListTag::Num, }
    }

    /// Returns a structurally independent clone: nested lists are copied
    /// recursively, scalars are cloned, callables keep their identity.
    #[must_use]
    pub fn deep_copy(&self) -> Self {
        Self { items: self.items.iter().map(Value::deep_copy).collect(),
               tag:   self.tag, }
    }
}
