use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
    util::num::i64_to_f64,
};

impl Context {
    /// Applies `-x` or `!x`.
    ///
    /// `-` keeps integers as integers, except `-i64::MIN`, which becomes a
    /// real. `True` and `False` negate to `-1` and `0`. `!` inverts
    /// truthiness and accepts any value.
    ///
    /// # Errors
    /// `NotANumber` when negating a string, container or `None`.
    ///
    /// # Example
    /// ```
    /// use scriptit::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let negated = Context::eval_unary(UnaryOperator::Negate, &Value::Integer(5), 1).unwrap();
    /// assert_eq!(negated, Value::Integer(-5));
    ///
    /// let empty_is_falsy = Context::eval_unary(UnaryOperator::Not, &Value::from(""), 1).unwrap();
    /// assert_eq!(empty_is_falsy, Value::Bool(true));
    /// assert!(Context::eval_unary(UnaryOperator::Negate, &Value::None, 1).is_err());
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value, line: usize) -> EvalResult<Value> {
        match op {
            UnaryOperator::Negate => match value {
                Value::Integer(n) => {
                    Ok(n.checked_neg().map_or_else(|| Value::Real(-i64_to_f64(*n)), Value::Integer))
                },
                Value::Bool(b) => Ok(Value::Integer(-i64::from(*b))),
                Value::Real(r) => Ok(Value::Real(-r)),
                _ => Err(RuntimeError::NotANumber { type_name: value.type_name(),
                                                    line }),
            },
            UnaryOperator::Not => Ok(Value::Bool(!value.is_truthy())),
        }
    }
}
