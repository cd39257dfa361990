use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::{
            binary::scalar::Number,
            core::{Context, EPSILON, EvalResult},
        },
        value::core::Value,
    },
};

/// Equality as used by `==`, `is` and the container methods that search
/// for an element.
///
/// Numbers (booleans included) are equal when they differ by less than
/// [`EPSILON`]. Strings compare exactly, `None` equals only `None`, and
/// containers compare element by element. Values of any other pair of types
/// are unequal.
///
/// # Example
/// ```
/// use scriptit::interpreter::{evaluator::binary::comparison::values_equal, value::core::Value};
///
/// assert!(values_equal(&Value::Real(0.1 + 0.2), &Value::Real(0.3)));
/// assert!(values_equal(&Value::Bool(true), &Value::Integer(1)));
/// assert!(!values_equal(&Value::from("1"), &Value::Integer(1)));
/// ```
#[must_use]
pub fn values_equal(left: &Value, right: &Value) -> bool {
    if let (Some(a), Some(b)) = (Number::from_value(left), Number::from_value(right)) {
        return match (a, b) {
            (Number::Integer(x), Number::Integer(y)) => x == y,
            _ => (a.as_f64() - b.as_f64()).abs() < EPSILON,
        };
    }

    match (left, right) {
        (Value::None, Value::None) => true,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::List(a), Value::List(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| values_equal(x, y))
        },
        (Value::Set(a), Value::Set(b)) => a == b,
        (Value::Dict(a), Value::Dict(b)) => {
            a.len() == b.len()
            && a.iter()
                .zip(b.iter())
                .all(|((ka, va), (kb, vb))| ka == kb && values_equal(va, vb))
        },
        _ => false,
    }
}

/// Equality as used by `points`: same runtime type and exactly the same
/// value.
///
/// # Example
/// ```
/// use scriptit::interpreter::{evaluator::binary::comparison::strict_equal, value::core::Value};
///
/// assert!(strict_equal(&Value::Integer(1), &Value::Integer(1)));
/// assert!(!strict_equal(&Value::Integer(1), &Value::Real(1.0)));
/// ```
#[must_use]
pub fn strict_equal(left: &Value, right: &Value) -> bool {
    left.type_name() == right.type_name() && left == right
}

impl Context {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// `==`, `!=`, `is` and `is not` use [`values_equal`]; `points` and
    /// `not points` use [`strict_equal`]. The relational operators require
    /// both operands to be numbers.
    ///
    /// # Parameters
    /// - `op`: The comparison operator.
    /// - `left`: The left-hand value.
    /// - `right`: The right-hand value.
    /// - `line`: Current line number used for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing a boolean result.
    ///
    /// # Example
    /// ```
    /// use scriptit::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let a = Value::Real(3.0);
    /// let b = Value::Integer(5);
    ///
    /// let result = Context::eval_comparison(BinaryOperator::Less, &a, &b, 1);
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    ///
    /// let result = Context::eval_comparison(BinaryOperator::Less, &Value::from("a"), &b, 1);
    /// assert!(result.is_err());
    /// ```
    pub fn eval_comparison(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           line: usize)
                           -> EvalResult<Value> {
        use BinaryOperator::{
            Equal, Greater, GreaterEqual, Is, IsNot, Less, LessEqual, NotEqual, NotPoints, Points,
        };

        let result = match op {
            Equal | Is => values_equal(left, right),
            NotEqual | IsNot => !values_equal(left, right),
            Points => strict_equal(left, right),
            NotPoints => !strict_equal(left, right),
            _ => {
                let (a, b) = (left.as_number(line)?, right.as_number(line)?);
                match op {
                    Less => a < b,
                    LessEqual => a <= b,
                    Greater => a > b,
                    GreaterEqual => a >= b,
                    _ => return Err(super::core::unsupported(op, left, right, line)),
                }
            },
        };

        Ok(Value::Bool(result))
    }
}
