use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::interpreter::value::core::Value;

/// Shared handle on an environment. Blocks, loops and function invocations
/// hold these; closures capture their defining environment through one.
pub type EnvRef = Rc<RefCell<Environment>>;

/// A single lexical scope: a mapping from names to values plus a handle on
/// the enclosing scope (`None` at the global root).
///
/// Environments form a tree shared by handle. Lookups walk the parent chain;
/// names are unique within one environment; any child may shadow its parent.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    parent: Option<EnvRef>,
}

impl Environment {
    /// Creates a fresh global (root) environment.
    #[must_use]
    pub fn global() -> EnvRef {
        Rc::new(RefCell::new(Self::default()))
    }

    /// Creates a child environment enclosed by `parent`.
    ///
    /// # Example
    /// ```
    /// use rill::interpreter::{environment::Environment, value::core::Value};
    ///
    /// let global = Environment::global();
    /// global.borrow_mut().define("x", Value::Num(1.0));
    ///
    /// let child = Environment::nested(&global);
    /// assert!(child.borrow().get("x").is_some());
    /// ```
    #[must_use]
    pub fn nested(parent: &EnvRef) -> EnvRef {
        Rc::new(RefCell::new(Self { values: HashMap::new(),
                                    parent: Some(Rc::clone(parent)), }))
    }

    /// Creates or updates a binding in this environment exactly.
    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Looks a name up, walking the parent chain outward.
    ///
    /// # Example
    /// ```
    /// use rill::interpreter::{environment::Environment, value::core::Value};
    ///
    /// let global = Environment::global();
    /// let child = Environment::nested(&global);
    ///
    /// global.borrow_mut().define("x", Value::Num(1.0));
    /// child.borrow_mut().define("x", Value::Num(2.0));
    ///
    /// assert_eq!(child.borrow().get("x"), Some(Value::Num(2.0)));
    /// assert_eq!(global.borrow().get("x"), Some(Value::Num(1.0)));
    /// assert_eq!(child.borrow().get("y"), None);
    /// ```
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.values.get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|parent| parent.borrow().get(name))
    }

    /// Walks `depth` parent links up from `env`.
    ///
    /// The resolver guarantees that every recorded depth stays within the
    /// chain, so a missing ancestor is an interpreter bug, not a user error.
    fn ancestor(env: &EnvRef, depth: usize) -> EnvRef {
        let mut current = Rc::clone(env);
        for _ in 0..depth {
            let parent = current.borrow()
                                .parent
                                .clone()
                                .expect("resolved depth stays within the scope chain");
            current = parent;
        }
        current
    }

    /// Reads a name from the environment exactly `depth` hops up the chain.
    #[must_use]
    pub fn get_at(env: &EnvRef, depth: usize, name: &str) -> Option<Value> {
        Self::ancestor(env, depth).borrow().values.get(name).cloned()
    }

    /// Lazy assignment at a resolved depth: creates or updates the binding in
    /// that environment.
    pub fn define_at(env: &EnvRef, depth: usize, name: &str, value: Value) {
        Self::ancestor(env, depth).borrow_mut().define(name, value);
    }

    /// Strict assignment at a resolved depth: updates the binding and reports
    /// whether it existed.
    ///
    /// # Example
    /// ```
    /// use rill::interpreter::{environment::Environment, value::core::Value};
    ///
    /// let global = Environment::global();
    /// assert!(!Environment::strict_assign_at(&global, 0, "x", Value::Num(1.0)));
    ///
    /// global.borrow_mut().define("x", Value::Num(1.0));
    /// assert!(Environment::strict_assign_at(&global, 0, "x", Value::Num(2.0)));
    /// assert_eq!(global.borrow().get("x"), Some(Value::Num(2.0)));
    /// ```
    #[must_use]
    pub fn strict_assign_at(env: &EnvRef, depth: usize, name: &str, value: Value) -> bool {
        let target = Self::ancestor(env, depth);
        let mut target = target.borrow_mut();
        if !target.values.contains_key(name) {
            return false;
        }
        target.define(name, value);
        true
    }
}
