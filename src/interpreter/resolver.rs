use std::collections::{HashMap, HashSet};

use crate::{
    ast::{Expr, NodeId, Stmt},
    error::ResolveError,
    interpreter::diagnostics::Diagnostics,
};

/// The static resolution pass.
///
/// Walks the tree once in pre-order, maintaining a stack of lexical frames.
/// For every variable reference, assignment and `in` clause it records the
/// number of frames between the use and the frame holding the name; names
/// found in no frame are left out of the table and treated as global by the
/// evaluator.
///
/// Frames gain names from the constructs that bind them: function and lambda
/// parameters, function names (declared in the enclosing frame before the
/// body, so a function can call itself) and ranged-loop variables. Plain
/// assignment never declares; an unresolved assignment falls through to the
/// global scope.
///
/// Alongside resolution, the pass tracks loop and function nesting to reject
/// `break`/`continue` outside loops, `return` outside functions, and `in`
/// clauses outside a `for` initializer. Errors go to the diagnostic sink and
/// the walk continues, so one mistake does not hide the next.
pub struct Resolver<'d> {
    scopes:         Vec<HashSet<String>>,
    locals:         HashMap<NodeId, usize>,
    loop_depth:     usize,
    function_depth: usize,
    diagnostics:    &'d mut Diagnostics,
}

impl<'d> Resolver<'d> {
    /// Creates a resolver reporting into `diagnostics`.
    pub fn new(diagnostics: &'d mut Diagnostics) -> Self {
        Self { scopes: Vec::new(),
               locals: HashMap::new(),
               loop_depth: 0,
               function_depth: 0,
               diagnostics }
    }

    /// Resolves a program and returns the depth table.
    #[must_use]
    pub fn resolve(mut self, statements: &[Stmt]) -> HashMap<NodeId, usize> {
        for statement in statements {
            self.resolve_statement(statement);
        }
        self.locals
    }

    /// Resolves a bare expression (the prompt's single-expression mode) and
    /// returns the depth table.
    #[must_use]
    pub fn resolve_expression(mut self, expr: &Expr) -> HashMap<NodeId, usize> {
        self.resolve_expr(expr);
        self.locals
    }

    fn resolve_statement(&mut self, statement: &Stmt) {
        match statement {
            Stmt::Expression { expr } => self.resolve_expr(expr),
            Stmt::Block { statements } => {
                self.scopes.push(HashSet::new());
                for statement in statements {
                    self.resolve_statement(statement);
                }
                self.scopes.pop();
            },
            Stmt::If { condition, then_branch, else_branch } => {
                self.resolve_expr(condition);
                self.resolve_statement(then_branch);
                if let Some(else_branch) = else_branch {
                    self.resolve_statement(else_branch);
                }
            },
            Stmt::While { condition, body } => {
                self.resolve_expr(condition);
                self.loop_depth += 1;
                self.resolve_statement(body);
                self.loop_depth -= 1;
            },
            Stmt::For { initializer, condition, increment, body } => {
                self.scopes.push(HashSet::new());
                if let Some(initializer) = initializer {
                    self.resolve_expr(initializer);
                }
                self.resolve_expr(condition);
                if let Some(increment) = increment {
                    self.resolve_expr(increment);
                }
                self.loop_depth += 1;
                self.resolve_loop_body(body);
                self.loop_depth -= 1;
                self.scopes.pop();
            },
            Stmt::RangedFor { name, id, iterable, body, .. } => {
                self.scopes.push(HashSet::new());
                self.resolve_expr(iterable);
                self.declare(name);
                self.resolve_local(*id, name);
                self.loop_depth += 1;
                self.resolve_loop_body(body);
                self.loop_depth -= 1;
                self.scopes.pop();
            },
            Stmt::Break { line } => {
                if self.loop_depth == 0 {
                    self.diagnostics
                        .static_error(&ResolveError::BreakOutsideLoop { line: *line });
                }
            },
            Stmt::Continue { line } => {
                if self.loop_depth == 0 {
                    self.diagnostics
                        .static_error(&ResolveError::ContinueOutsideLoop { line: *line });
                }
            },
            Stmt::Func { name, params, body, .. } => {
                self.declare(name);
                self.resolve_function(params, body);
            },
            Stmt::Return { value, line } => {
                if self.function_depth == 0 {
                    self.diagnostics
                        .static_error(&ResolveError::ReturnOutsideFunction { line: *line });
                }
                if let Some(value) = value {
                    self.resolve_expr(value);
                }
            },
        }
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal { .. } => {},
            Expr::Variable { name, id, .. } => self.resolve_local(*id, name),
            Expr::Grouping { inner, .. } => self.resolve_expr(inner),
            Expr::Unary { operand, .. } => self.resolve_expr(operand),
            Expr::Binary { left, right, .. } | Expr::Logical { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            },
            Expr::Assign { name, value, id, .. } => {
                self.resolve_expr(value);
                self.resolve_local(*id, name);
            },
            Expr::Call { callee, arguments, .. } => {
                self.resolve_expr(callee);
                for argument in arguments {
                    self.resolve_expr(argument);
                }
            },
            Expr::Lambda { params, body, .. } => self.resolve_function(params, body),
            Expr::ListLiteral { elements, .. } => {
                for element in elements {
                    self.resolve_expr(element);
                }
            },
            Expr::Index { target, index, .. } => {
                self.resolve_expr(target);
                self.resolve_expr(index);
            },
            Expr::IndexAssign { target, index, value, .. } => {
                self.resolve_expr(target);
                self.resolve_expr(index);
                self.resolve_expr(value);
            },
            Expr::Range { first, end, step, .. } => {
                self.resolve_expr(first);
                self.resolve_expr(end);
                if let Some(step) = step {
                    self.resolve_expr(step);
                }
            },
            Expr::In { line, .. } => {
                self.diagnostics
                    .static_error(&ResolveError::StrayInClause { line: *line });
            },
        }
    }

    /// Resolves a function or lambda body in a fresh frame holding the
    /// parameters. The loop depth is zeroed for the duration: a `break`
    /// inside a function body cannot target a loop outside it.
    fn resolve_function(&mut self, params: &[String], body: &[Stmt]) {
        self.scopes.push(HashSet::new());
        for param in params {
            self.declare(param);
        }

        let enclosing_loops = std::mem::replace(&mut self.loop_depth, 0);
        self.function_depth += 1;
        for statement in body {
            self.resolve_statement(statement);
        }
        self.function_depth -= 1;
        self.loop_depth = enclosing_loops;

        self.scopes.pop();
    }

    /// Resolves a loop body. A block body shares the loop's frame, since the
    /// evaluator executes it in the loop environment, so its statements are
    /// walked without opening another frame.
    fn resolve_loop_body(&mut self, body: &Stmt) {
        match body {
            Stmt::Block { statements } => {
                for statement in statements {
                    self.resolve_statement(statement);
                }
            },
            other => self.resolve_statement(other),
        }
    }

    fn declare(&mut self, name: &str) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string());
        }
    }

    fn resolve_local(&mut self, id: NodeId, name: &str) {
        for (depth, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains(name) {
                self.locals.insert(id, depth);
                return;
            }
        }
    }
}
