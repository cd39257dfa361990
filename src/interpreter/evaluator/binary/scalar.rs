use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            binary::core::unsupported,
            core::{Context, EvalResult},
        },
        value::core::Value,
    },
    util::num::i64_to_f64,
};

/// A numeric operand, with booleans already read as `0` or `1`.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Number {
    Integer(i64),
    Real(f64),
}

impl Number {
    /// Reads a number out of a value, or `None` when it is not numeric.
    pub(crate) fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(n) => Some(Self::Integer(*n)),
            Value::Bool(b) => Some(Self::Integer(i64::from(*b))),
            Value::Real(r) => Some(Self::Real(*r)),
            _ => None,
        }
    }

    pub(crate) const fn as_f64(self) -> f64 {
        match self {
            Self::Integer(n) => i64_to_f64(n),
            Self::Real(r) => r,
        }
    }
}

/// Remainder whose sign follows the divisor.
fn floor_mod_f64(a: f64, b: f64) -> f64 {
    let r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) { r + b } else { r }
}

impl Context {
    /// Evaluates a numeric arithmetic operation.
    ///
    /// The function handles integer and real operands; booleans count as `0`
    /// and `1`. Integer `+`, `-` and `*` continue in floating point when the
    /// result does not fit an `i64`. `/` always produces a real. `%` takes
    /// the sign of the divisor, as in `-7 % 3 == 2`. The operator must be one
    /// of `Add`, `Sub`, `Mul`, `Div` or `Mod`.
    ///
    /// # Parameters
    /// - `op`: The arithmetic operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the computed number.
    ///
    /// # Example
    /// ```
    /// use scriptit::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let half = Context::eval_scalar_op(BinaryOperator::Div, &Value::Integer(1), &Value::Integer(2), 1);
    /// assert_eq!(half.unwrap(), Value::Real(0.5));
    ///
    /// let big = Context::eval_scalar_op(BinaryOperator::Mul,
    ///                                   &Value::Integer(i64::MAX),
    ///                                   &Value::Integer(2),
    ///                                   1);
    /// assert!(matches!(big.unwrap(), Value::Real(_)));
    /// ```
    pub fn eval_scalar_op(op: BinaryOperator,
                          left: &Value,
                          right: &Value,
                          line: usize)
                          -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, Mod, Mul, Sub};

        let (Some(a), Some(b)) = (Number::from_value(left), Number::from_value(right)) else {
            return Err(unsupported(op, left, right, line));
        };

        if let (Number::Integer(x), Number::Integer(y)) = (a, b) {
            let exact = match op {
                Add => x.checked_add(y),
                Sub => x.checked_sub(y),
                Mul => x.checked_mul(y),
                Mod => {
                    if y == 0 {
                        return Err(RuntimeError::ModuloByZero { line });
                    }
                    x.checked_rem_euclid(y).map(|r| if r != 0 && y < 0 { r + y } else { r })
                },
                Div => None,
                _ => return Err(unsupported(op, left, right, line)),
            };
            if let Some(n) = exact {
                return Ok(Value::Integer(n));
            }
        }

        let (x, y) = (a.as_f64(), b.as_f64());
        Ok(Value::Real(match op {
                           Add => x + y,
                           Sub => x - y,
                           Mul => x * y,
                           Div => {
                               if y == 0.0 {
                                   return Err(RuntimeError::DivisionByZero { line });
                               }
                               x / y
                           },
                           Mod => {
                               if y == 0.0 {
                                   return Err(RuntimeError::ModuloByZero { line });
                               }
                               floor_mod_f64(x, y)
                           },
                           _ => return Err(unsupported(op, left, right, line)),
                       }))
    }
}
