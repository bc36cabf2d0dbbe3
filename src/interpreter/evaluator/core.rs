use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::{AssignOperator, Expr, LogicalOperator, NodeId, Stmt},
    error::RuntimeError,
    interpreter::{
        callable::ScriptFunction,
        environment::{EnvRef, Environment},
        io::HostIo,
        natives,
        value::{core::Value, list::List},
    },
};

/// Result type used by callable implementations and value-level helpers.
///
/// Plain runtime failures travel here; the richer [`Unwind`] channel is
/// reserved for the tree walk itself.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// A signal unwinding the evaluator's recursion.
///
/// `Break` and `Continue` unwind to the nearest enclosing loop, `Return` to
/// the enclosing function invocation, and `Failure` to the top of the
/// interpret call. Carrying them in the `Err` channel makes the scope
/// restore discipline mechanical: every frame that installed an environment
/// restores it before propagating.
#[derive(Debug)]
pub enum Unwind {
    /// A `break` statement reached its loop.
    Break {
        /// The source line of the statement.
        line: usize,
    },
    /// A `continue` statement reached its loop.
    Continue {
        /// The source line of the statement.
        line: usize,
    },
    /// A `return` statement unwinding to the active function invocation.
    Return {
        /// The returned value, `nix` when none was written.
        value: Value,
        /// The source line of the statement.
        line:  usize,
    },
    /// A runtime error aborting the interpret call.
    Failure(RuntimeError),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Self::Failure(error)
    }
}

/// Result type threaded through the tree walk.
pub(crate) type Flow<T> = Result<T, Unwind>;

/// The tree-walking execution engine.
///
/// Holds the global environment (with the host built-ins installed), the
/// environment current at this point of the walk, the resolver's depth table
/// and the host streams. One interpreter lives for a whole session, so REPL
/// inputs accumulate global state.
pub struct Interpreter {
    pub(crate) globals: EnvRef,
    pub(crate) env:     EnvRef,
    pub(crate) locals:  HashMap<NodeId, usize>,
    pub(crate) io:      HostIo,
}

impl Interpreter {
    /// Creates an interpreter with a fresh global scope and the built-ins
    /// `read`, `print`, `println` and `copy` installed.
    #[must_use]
    pub fn new(io: HostIo) -> Self {
        let globals = Environment::global();
        natives::install(&globals);
        Self { env: Rc::clone(&globals),
               globals,
               locals: HashMap::new(),
               io }
    }

    /// Merges a resolver run's depth table into the interpreter.
    ///
    /// Node ids are unique per session, so tables from successive REPL
    /// inputs never collide.
    pub fn add_resolutions(&mut self, table: HashMap<NodeId, usize>) {
        self.locals.extend(table);
    }

    /// Executes a program. The first runtime error aborts the remaining
    /// statements and is returned to the caller.
    ///
    /// # Errors
    /// Returns the runtime error that aborted execution.
    pub fn interpret(&mut self, statements: &[Stmt]) -> EvalResult<()> {
        for statement in statements {
            if let Err(unwind) = self.execute(statement) {
                return Err(Self::into_runtime_error(unwind));
            }
        }
        Ok(())
    }

    /// Evaluates a single expression for the REPL and returns its echo text.
    ///
    /// Returns `None` when the expression is a call that produced `nix`, so
    /// statements like `println(x)` do not echo a useless `nix` line.
    ///
    /// # Errors
    /// Returns the runtime error raised during evaluation.
    pub fn interpret_expression(&mut self, expr: &Expr) -> EvalResult<Option<String>> {
        let value = self.eval(expr).map_err(Self::into_runtime_error)?;
        if matches!(expr, Expr::Call { .. }) && value.is_nix() {
            return Ok(None);
        }
        Ok(Some(value.stringify("\"")))
    }

    fn into_runtime_error(unwind: Unwind) -> RuntimeError {
        match unwind {
            Unwind::Failure(error) => error,
            Unwind::Break { line } | Unwind::Continue { line } | Unwind::Return { line, .. } => {
                RuntimeError::EscapedSignal { line }
            },
        }
    }

    /// Evaluates an expression into a value.
    pub(crate) fn eval(&mut self, expr: &Expr) -> Flow<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Variable { name, line, id } => Ok(self.lookup_variable(name, *line, *id)?),
            Expr::Grouping { inner, .. } => self.eval(inner),
            Expr::Unary { op, operand, line } => {
                let value = self.eval(operand)?;
                Ok(Self::eval_unary(*op, &value, *line)?)
            },
            Expr::Binary { left, op, right, line } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Ok(Self::eval_binary(&left, *op, &right, *line)?)
            },
            Expr::Logical { left, op, right, .. } => self.eval_logical(left, *op, right),
            Expr::Assign { name, op, value, line, id } => {
                self.eval_assign(name, *op, value, *line, *id)
            },
            Expr::Call { callee, arguments, line } => self.eval_call(callee, arguments, *line),
            Expr::Lambda { params, body, .. } => {
                let function =
                    ScriptFunction::lambda(params.clone(), Rc::clone(body), Rc::clone(&self.env));
                Ok(Value::Callable(Rc::new(function)))
            },
            Expr::ListLiteral { elements, line } => self.eval_list_literal(elements, *line),
            Expr::Index { target, index, line } => self.eval_index(target, index, *line),
            Expr::IndexAssign { target, index, value, line, .. } => {
                self.eval_index_assign(target, index, value, *line)
            },
            Expr::Range { first, end, step, line } => {
                self.eval_range(first, end, step.as_deref(), *line)
            },
            Expr::In { iterable, line, .. } => self.eval_in(iterable, *line),
        }
    }

    /// Executes a statement for its effect.
    pub(crate) fn execute(&mut self, statement: &Stmt) -> Flow<()> {
        match statement {
            Stmt::Expression { expr } => {
                self.eval(expr)?;
                Ok(())
            },
            Stmt::Block { statements } => {
                let scope = Environment::nested(&self.env);
                self.execute_block(statements, scope)
            },
            Stmt::If { condition, then_branch, else_branch } => {
                if self.eval(condition)?.truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(())
                }
            },
            Stmt::While { condition, body } => self.execute_while(condition, body),
            Stmt::For { initializer, condition, increment, body } => {
                self.execute_for(initializer.as_ref(), condition, increment.as_ref(), body)
            },
            Stmt::RangedFor { name, id, iterable, line, body } => {
                self.execute_ranged_for(name, *id, iterable, *line, body)
            },
            Stmt::Break { line } => Err(Unwind::Break { line: *line }),
            Stmt::Continue { line } => Err(Unwind::Continue { line: *line }),
            Stmt::Func { name, params, body, .. } => {
                let function = ScriptFunction::named(name.clone(),
                                                     params.clone(),
                                                     Rc::clone(body),
                                                     Rc::clone(&self.env));
                self.env.borrow_mut().define(name, Value::Callable(Rc::new(function)));
                Ok(())
            },
            Stmt::Return { value, line } => {
                let value = match value {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Nix,
                };
                Err(Unwind::Return { value, line: *line })
            },
        }
    }

    /// Runs statements with `scope` installed as the current environment,
    /// restoring the previous environment on every exit path.
    pub(crate) fn execute_block(&mut self, statements: &[Stmt], scope: EnvRef) -> Flow<()> {
        let parent = std::mem::replace(&mut self.env, scope);
        let result = statements.iter().try_for_each(|statement| self.execute(statement));
        self.env = parent;
        result
    }

    fn lookup_variable(&self, name: &str, line: usize, id: NodeId) -> EvalResult<Value> {
        let found = match self.locals.get(&id) {
            Some(&depth) => Environment::get_at(&self.env, depth, name),
            None => self.globals.borrow().get(name),
        };
        found.ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_string(),
                                                              line })
    }

    fn eval_assign(&mut self,
                   name: &str,
                   op: AssignOperator,
                   value: &Expr,
                   line: usize,
                   id: NodeId)
                   -> Flow<Value> {
        let value = self.eval(value)?;
        match self.locals.get(&id).copied() {
            Some(depth) => match op {
                AssignOperator::Lazy => {
                    Environment::define_at(&self.env, depth, name, value.clone());
                },
                AssignOperator::Strict => {
                    if !Environment::strict_assign_at(&self.env, depth, name, value.clone()) {
                        return Err(RuntimeError::StrictAssignToUndefined { name:
                                                                               name.to_string(),
                                                                           line }.into());
                    }
                },
            },
            // An unresolved name targets the global scope; both assignment
            // flavors create the binding there when it is absent.
            None => self.globals.borrow_mut().define(name, value.clone()),
        }
        Ok(value)
    }

    fn eval_logical(&mut self,
                    left: &Expr,
                    op: LogicalOperator,
                    right: &Expr)
                    -> Flow<Value> {
        let left = self.eval(left)?;
        let result = match op {
            LogicalOperator::Or => left.truthy() || self.eval(right)?.truthy(),
            LogicalOperator::And => left.truthy() && self.eval(right)?.truthy(),
        };
        Ok(Value::Bool(result))
    }

    fn eval_call(&mut self, callee: &Expr, arguments: &[Expr], line: usize) -> Flow<Value> {
        let callee = self.eval(callee)?;

        let mut args = Vec::with_capacity(arguments.len());
        for argument in arguments {
            args.push(self.eval(argument)?);
        }

        let Value::Callable(callable) = callee else {
            return Err(RuntimeError::NotCallable { line }.into());
        };
        if callable.arity() != args.len() {
            return Err(RuntimeError::ArityMismatch { expected: callable.arity(),
                                                     found:    args.len(),
                                                     line }.into());
        }

        Ok(callable.invoke(self, args)?)
    }

    fn eval_list_literal(&mut self, elements: &[Expr], line: usize) -> Flow<Value> {
        let mut values = Vec::with_capacity(elements.len());
        for element in elements {
            values.push(self.eval(element)?);
        }
        Ok(Value::list(List::from_values(values, line)?))
    }

    fn eval_in(&mut self, iterable: &Expr, line: usize) -> Flow<Value> {
        let iterable = self.eval(iterable)?;
        if !matches!(iterable, Value::List(_)) {
            return Err(RuntimeError::NotIterable { line }.into());
        }
        Ok(iterable)
    }
}
