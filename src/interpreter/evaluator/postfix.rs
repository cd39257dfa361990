use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use crate::{
    ast::{Expression, LogicalOperator, PostfixItem},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            method::core::dispatch,
        },
        value::{core::Value, set_value::SetValue},
    },
};

/// A value on the evaluation stack, remembering the variable it was read
/// from.
///
/// Method calls write a mutated receiver back through `origin`, and
/// by-reference parameters write their final value back the same way.
/// Anything computed has no origin.
#[derive(Debug, Clone)]
pub(crate) struct Slot {
    pub(crate) value:  Value,
    pub(crate) origin: Option<String>,
}

impl Slot {
    const fn computed(value: Value) -> Self {
        Self { value,
               origin: None }
    }
}

/// Removes the top `count` slots, in push order.
fn pop_slots(stack: &mut Vec<Slot>, count: usize, what: &str, line: usize) -> EvalResult<Vec<Slot>> {
    if stack.len() < count {
        return Err(RuntimeError::StackUnderflow { what: what.to_string(),
                                                  line });
    }
    Ok(stack.split_off(stack.len() - count))
}

fn pop_values(stack: &mut Vec<Slot>, count: usize, what: &str, line: usize) -> EvalResult<Vec<Value>> {
    Ok(pop_slots(stack, count, what, line)?.into_iter().map(|slot| slot.value).collect())
}

/// Parses a numeric literal.
///
/// Literals without a decimal point are integers.
///
/// # Errors
/// `InvalidNumber` for an integer literal that does not fit an `i64`.
fn parse_number(text: &str, line: usize) -> EvalResult<Value> {
    let invalid = || RuntimeError::InvalidNumber { literal: text.to_string(),
                                                   line };
    if text.contains('.') {
        text.parse::<f64>().map(Value::Real).map_err(|_| invalid())
    } else {
        text.parse::<i64>().map(Value::Integer).map_err(|_| invalid())
    }
}

impl Context {
    /// Evaluates an expression and returns the resulting value.
    ///
    /// Short-circuit nodes evaluate their right side only when the left side
    /// does not decide the result, and always yield a boolean. Postfix
    /// sequences run on a value stack.
    ///
    /// # Parameters
    /// - `expression`: Expression to evaluate.
    ///
    /// # Returns
    /// The value left on top of the stack, or `None` for an empty sequence.
    ///
    /// # Example
    /// ```
    /// use scriptit::{
    ///     ast::{BinaryOperator, Expression, PostfixItem},
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let mut context = Context::new();
    ///
    /// // 2 + 3
    /// let expression = Expression::Postfix(vec![PostfixItem::Number { text: "2".into(),
    ///                                                                  line: 1, },
    ///                                           PostfixItem::Number { text: "3".into(),
    ///                                                                  line: 1, },
    ///                                           PostfixItem::Binary { op:   BinaryOperator::Add,
    ///                                                                 line: 1, }]);
    ///
    /// assert_eq!(context.evaluate(&expression).unwrap(), Value::Integer(5));
    /// ```
    pub fn evaluate(&mut self, expression: &Expression) -> EvalResult<Value> {
        match expression {
            Expression::Postfix(items) => self.eval_postfix(items),
            Expression::Logical { op, left, right, .. } => self.eval_logical(*op, left, right),
        }
    }

    /// Evaluates `left && right` or `left || right`, running `right` only
    /// when `left` leaves the result open.
    fn eval_logical(&mut self, op: LogicalOperator, left: &Expression, right: &Expression) -> EvalResult<Value> {
        let left = self.evaluate(left)?.is_truthy();
        let decided = match op {
            LogicalOperator::And => !left,
            LogicalOperator::Or => left,
        };
        if decided {
            return Ok(Value::Bool(left));
        }
        Ok(Value::Bool(self.evaluate(right)?.is_truthy()))
    }

    /// Runs a postfix sequence.
    ///
    /// # Errors
    /// `StackUnderflow` when an item finds fewer operands than it needs and
    /// `MalformedExpression` when more than one value is left at the end.
    fn eval_postfix(&mut self, items: &[PostfixItem]) -> EvalResult<Value> {
        let mut stack: Vec<Slot> = Vec::new();

        for item in items {
            let slot = match item {
                PostfixItem::Number { text, line } => Slot::computed(parse_number(text, *line)?),
                PostfixItem::Str { value, .. } => Slot::computed(Value::Str(value.clone())),
                PostfixItem::Identifier { name, .. } => match name.as_str() {
                    "True" => Slot::computed(Value::Bool(true)),
                    "False" => Slot::computed(Value::Bool(false)),
                    "None" => Slot::computed(Value::None),
                    _ => Slot { value:  self.scope.get(name),
                                origin: Some(name.clone()), },
                },
                PostfixItem::Unary { op, line } => {
                    let operand = pop_values(&mut stack, 1, "unary operator", *line)?;
                    Slot::computed(Self::eval_unary(*op, &operand[0], *line)?)
                },
                PostfixItem::Binary { op, line } => {
                    let operands = pop_values(&mut stack, 2, &format!("operator {op}"), *line)?;
                    Slot::computed(Self::eval_binary(*op, &operands[0], &operands[1], *line)?)
                },
                PostfixItem::Call { name, argc, line } => {
                    let args = pop_slots(&mut stack, *argc, &format!("function {name}"), *line)?;
                    Slot::computed(self.call_function(name, args, *line)?)
                },
                PostfixItem::MethodCall { name, argc, line } => {
                    let args = pop_values(&mut stack, *argc, &format!("method {name}"), *line)?;
                    let mut receiver = pop_slots(&mut stack, 1, &format!("method {name}"), *line)?.remove(0);
                    let result = dispatch(&mut receiver.value, name, &args, *line)?;

                    if let Some(origin) = &receiver.origin
                       && self.scope.set(origin, receiver.value).is_err()
                    {
                        trace!(variable = %origin, method = %name, "receiver not written back");
                    }
                    Slot::computed(result)
                },
                PostfixItem::List { count, line } => {
                    Slot::computed(Value::from(pop_values(&mut stack, *count, "list literal", *line)?))
                },
                PostfixItem::Set { count, line } => {
                    let elements = pop_values(&mut stack, *count, "set literal", *line)?;
                    Slot::computed(Value::from(elements.iter().map(SetValue::from).collect::<BTreeSet<_>>()))
                },
                PostfixItem::Dict { count, line } => {
                    let entries = pop_values(&mut stack, count * 2, "dict literal", *line)?;
                    let dict = entries.chunks_exact(2)
                                      .map(|pair| (pair[0].dict_key(), pair[1].clone()))
                                      .collect::<BTreeMap<_, _>>();
                    Slot::computed(Value::from(dict))
                },
                PostfixItem::Logical { op, left, right, .. } => Slot::computed(self.eval_logical(*op, left, right)?),
            };
            stack.push(slot);
        }

        if stack.len() > 1 {
            let line = items.last().map_or(0, PostfixItem::line);
            return Err(RuntimeError::MalformedExpression { count: stack.len(),
                                                           line });
        }
        Ok(stack.pop().map(|slot| slot.value).unwrap_or_default())
    }
}
