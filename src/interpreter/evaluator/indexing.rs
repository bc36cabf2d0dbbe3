use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Flow, Interpreter},
        value::{
            core::Value,
            list::{List, ListTag},
        },
    },
    util::num::{is_integral, nums_equal, round_to_int},
};

impl Interpreter {
    /// Evaluates `xs[i]` and `xs[[is]]`.
    ///
    /// The target must be a list. A numeric index reads one element; a
    /// numeric-list index gathers the named positions into a new list that
    /// keeps the container's tag. Positions are 1-based, epsilon-integral
    /// and bounds-checked.
    pub(crate) fn eval_index(&mut self, target: &Expr, index: &Expr, line: usize) -> Flow<Value> {
        let target = self.eval(target)?;
        let Value::List(list) = target else {
            return Err(RuntimeError::IndexOnNonList { line }.into());
        };

        let index = self.eval(index)?;
        match index {
            Value::Num(position) => {
                let position = checked_position(position, list.borrow().items.len(), line)?;
                let value = list.borrow().items[position - 1].clone();
                Ok(value)
            },
            Value::List(indices) => {
                let positions =
                    gather_positions(&indices.borrow(), list.borrow().items.len(), line)?;
                let source = list.borrow();
                let items: Vec<Value> =
                    positions.iter().map(|&position| source.items[position - 1].clone()).collect();
                if items.is_empty() {
                    return Ok(Value::list(List::empty()));
                }
                Ok(Value::list(List { items,
                                      tag: source.tag }))
            },
            _ => Err(RuntimeError::BadIndexType { line }.into()),
        }
    }

    /// Evaluates `xs[i] = v` and `xs[[is]] = vs`, mutating the list in
    /// place.
    ///
    /// Indices are verified before the value is evaluated. A scalar
    /// assignment requires the value's variant to match the list's tag; a
    /// gather assignment requires a value list of the same length as the
    /// index list whose tag matches the container's. The assigned value is
    /// the result of the whole expression.
    pub(crate) fn eval_index_assign(&mut self,
                                    target: &Expr,
                                    index: &Expr,
                                    value: &Expr,
                                    line: usize)
                                    -> Flow<Value> {
        let target = self.eval(target)?;
        let Value::List(list) = target else {
            return Err(RuntimeError::IndexOnNonList { line }.into());
        };

        let index = self.eval(index)?;
        match index {
            Value::Num(position) => {
                let position = checked_position(position, list.borrow().items.len(), line)?;
                let value = self.eval(value)?;
                if ListTag::of(&value) != list.borrow().tag {
                    return Err(RuntimeError::ListTypeMismatch { line }.into());
                }
                list.borrow_mut().items[position - 1] = value.clone();
                Ok(value)
            },
            Value::List(indices) => {
                let positions =
                    gather_positions(&indices.borrow(), list.borrow().items.len(), line)?;
                let value = self.eval(value)?;
                let Value::List(source) = &value else {
                    return Err(RuntimeError::GatherValueNotAList { line }.into());
                };

                let (source_items, source_tag) = {
                    let source = source.borrow();
                    (source.items.clone(), source.tag)
                };
                if positions.len() != source_items.len() {
                    return Err(RuntimeError::GatherLengthMismatch { line }.into());
                }
                if !source_items.is_empty() && source_tag != list.borrow().tag {
                    return Err(RuntimeError::ListTypeMismatch { line }.into());
                }

                {
                    let mut destination = list.borrow_mut();
                    for (position, item) in positions.iter().zip(source_items) {
                        destination.items[position - 1] = item;
                    }
                }
                Ok(value)
            },
            _ => Err(RuntimeError::BadIndexType { line }.into()),
        }
    }

    /// Materializes `a..b` / `a..b..c` into a numeric list.
    ///
    /// All descriptors must be numbers and the step must not be zero within
    /// epsilon. A positive step ascends while the value stays at or below
    /// the end bound; a negative step descends while it stays at or above
    /// it. Both bounds are epsilon-inclusive. An empty progression yields
    /// the empty list.
    pub(crate) fn eval_range(&mut self,
                             first: &Expr,
                             end: &Expr,
                             step: Option<&Expr>,
                             line: usize)
                             -> Flow<Value> {
        let first = self.eval(first)?
                        .as_num(RuntimeError::RangeBoundNotNumeric { line })?;
        let end = self.eval(end)?
                      .as_num(RuntimeError::RangeBoundNotNumeric { line })?;
        let step = match step {
            Some(expr) => {
                let step = self.eval(expr)?
                               .as_num(RuntimeError::RangeBoundNotNumeric { line })?;
                if nums_equal(step, 0.0) {
                    return Err(RuntimeError::RangeStepZero { line }.into());
                }
                step
            },
            None => 1.0,
        };

        let mut values = Vec::new();
        let mut current = first;
        if step > 0.0 {
            while current < end || nums_equal(current, end) {
                values.push(current);
                current += step;
            }
        } else {
            while current > end || nums_equal(current, end) {
                values.push(current);
                current += step;
            }
        }

        Ok(Value::list(List::numbers(values)))
    }
}

/// Validates one 1-based position against a list length.
fn checked_position(value: f64, len: usize, line: usize) -> EvalResult<usize> {
    if !is_integral(value) {
        return Err(RuntimeError::FractionalIndex { line });
    }
    let position = round_to_int(value);
    if position <= 0 {
        return Err(RuntimeError::NonPositiveIndex { line });
    }
    #[allow(clippy::cast_sign_loss)]
    let position = position as usize;
    if position > len {
        return Err(RuntimeError::IndexPastEnd { line });
    }
    Ok(position)
}

/// Validates a gather index list and converts it to 1-based positions. The
/// list must carry the numeric tag; the empty list gathers nothing.
fn gather_positions(indices: &List, len: usize, line: usize) -> EvalResult<Vec<usize>> {
    if indices.tag == ListTag::Empty {
        return Ok(Vec::new());
    }
    if indices.tag != ListTag::Num {
        return Err(RuntimeError::IndexListNotNumeric { line });
    }

    indices.items
           .iter()
           .map(|value| {
               let number = value.as_num(RuntimeError::IndexListNotNumeric { line })?;
               checked_position(number, len, line)
           })
           .collect()
}
