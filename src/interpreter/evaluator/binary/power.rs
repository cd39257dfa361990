use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::{
            binary::{core::unsupported, scalar::Number},
            core::{Context, EvalResult},
        },
        value::core::Value,
    },
    util::num::i64_to_u32_checked,
};

impl Context {
    /// `base ** exponent`.
    ///
    /// An integer base with a non-negative integer exponent uses checked
    /// arithmetic and stays an integer. Negative exponents, real operands and
    /// results that overflow `i64` are computed in floating point with
    /// `powf`.
    ///
    /// # Example
    /// ```
    /// use scriptit::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// let result = Context::eval_pow(&Value::Integer(2), &Value::Integer(10), 1).unwrap();
    /// assert_eq!(result, Value::Integer(1024));
    ///
    /// let result = Context::eval_pow(&Value::Integer(2), &Value::Integer(-1), 1).unwrap();
    /// assert_eq!(result, Value::Real(0.5));
    /// ```
    pub fn eval_pow(base: &Value, exponent: &Value, line: usize) -> EvalResult<Value> {
        let (Some(b), Some(e)) = (Number::from_value(base), Number::from_value(exponent)) else {
            return Err(unsupported(BinaryOperator::Pow, base, exponent, line));
        };

        if let (Number::Integer(b), Number::Integer(e)) = (b, e)
           && let Some(e) = i64_to_u32_checked(e)
           && let Some(result) = b.checked_pow(e)
        {
            return Ok(Value::Integer(result));
        }

        Ok(Value::Real(b.as_f64().powf(e.as_f64())))
    }
}
