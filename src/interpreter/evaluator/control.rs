use std::rc::Rc;

use crate::{
    ast::{Expr, NodeId, Stmt},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{Flow, Interpreter, Unwind},
        value::core::Value,
    },
};

impl Interpreter {
    /// Runs a `while` loop.
    ///
    /// The condition is re-evaluated by truthiness before each iteration.
    /// `break` ends the loop; `continue` jumps to the next condition check.
    /// The body introduces no scope of its own here; a block body creates
    /// its child scope the ordinary way.
    pub(crate) fn execute_while(&mut self, condition: &Expr, body: &Stmt) -> Flow<()> {
        while self.eval(condition)?.truthy() {
            match self.execute(body) {
                Ok(()) | Err(Unwind::Continue { .. }) => {},
                Err(Unwind::Break { .. }) => break,
                Err(other) => return Err(other),
            }
        }
        Ok(())
    }

    /// Runs a three-clause `for` loop.
    ///
    /// The whole loop lives in one fresh child scope: the initializer runs
    /// in it once, and a block body executes its statements directly in it
    /// rather than opening another scope. `continue` skips to the increment.
    pub(crate) fn execute_for(&mut self,
                              initializer: Option<&Expr>,
                              condition: &Expr,
                              increment: Option<&Expr>,
                              body: &Stmt)
                              -> Flow<()> {
        let parent = Rc::clone(&self.env);
        self.env = Environment::nested(&parent);
        let result = self.run_for(initializer, condition, increment, body);
        self.env = parent;
        result
    }

    fn run_for(&mut self,
               initializer: Option<&Expr>,
               condition: &Expr,
               increment: Option<&Expr>,
               body: &Stmt)
               -> Flow<()> {
        if let Some(initializer) = initializer {
            self.eval(initializer)?;
        }

        while self.eval(condition)?.truthy() {
            match self.execute_loop_body(body) {
                Ok(()) | Err(Unwind::Continue { .. }) => {},
                Err(Unwind::Break { .. }) => return Ok(()),
                Err(other) => return Err(other),
            }
            if let Some(increment) = increment {
                self.eval(increment)?;
            }
        }
        Ok(())
    }

    /// Runs a ranged `for` loop over a list.
    ///
    /// The loop owns one child scope for its whole lifetime; each iteration
    /// assigns the next element to the bound name at the resolved depth and
    /// then executes the body in that same scope.
    pub(crate) fn execute_ranged_for(&mut self,
                                     name: &str,
                                     id: NodeId,
                                     iterable: &Expr,
                                     line: usize,
                                     body: &Stmt)
                                     -> Flow<()> {
        let parent = Rc::clone(&self.env);
        self.env = Environment::nested(&parent);
        let result = self.run_ranged_for(name, id, iterable, line, body);
        self.env = parent;
        result
    }

    fn run_ranged_for(&mut self,
                      name: &str,
                      id: NodeId,
                      iterable: &Expr,
                      line: usize,
                      body: &Stmt)
                      -> Flow<()> {
        let iterable = self.eval(iterable)?;
        let Value::List(handle) = iterable else {
            return Err(RuntimeError::NotIterable { line }.into());
        };

        let depth = self.locals.get(&id).copied().unwrap_or(0);

        let mut position = 0;
        loop {
            let element = handle.borrow().items.get(position).cloned();
            let Some(element) = element else { break };
            position += 1;

            Environment::define_at(&self.env, depth, name, element);
            match self.execute_loop_body(body) {
                Ok(()) | Err(Unwind::Continue { .. }) => {},
                Err(Unwind::Break { .. }) => break,
                Err(other) => return Err(other),
            }
        }
        Ok(())
    }

    /// Executes a loop body; a block body runs its statements in the loop's
    /// scope instead of opening a nested one, matching the resolver.
    fn execute_loop_body(&mut self, body: &Stmt) -> Flow<()> {
        match body {
            Stmt::Block { statements } => {
                statements.iter().try_for_each(|statement| self.execute(statement))
            },
            other => self.execute(other),
        }
    }
}
