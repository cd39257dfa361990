use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a binary operation between two values.
    ///
    /// This function routes the operation to specialized handlers depending on
    /// the operator and operand types. `+` concatenates when either side is a
    /// string or both are lists, `*` repeats a string or list by an integer,
    /// and otherwise the arithmetic operators work on numbers. Equality and
    /// relational operators use `eval_comparison`. `&&` and `||` never reach
    /// this function; they short-circuit in [`Context::evaluate`].
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use scriptit::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let sum = Context::eval_binary(BinaryOperator::Add, &Value::Integer(3), &Value::Integer(4), 1);
    /// assert_eq!(sum.unwrap(), Value::Integer(7));
    ///
    /// let text = Context::eval_binary(BinaryOperator::Add, &Value::from("a"), &Value::Integer(1), 1);
    /// assert_eq!(text.unwrap(), Value::from("a1"));
    /// ```
    pub fn eval_binary(op: BinaryOperator, left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
        use BinaryOperator::{
            Add, Div, Equal, Greater, GreaterEqual, Is, IsNot, Less, LessEqual, Mod, Mul, NotEqual,
            NotPoints, Points, Pow, Sub,
        };
        use Value::{Integer, List, Str};

        match op {
            Add => match (left, right) {
                (Str(_), _) | (_, Str(_)) => Ok(Str(format!("{left}{right}"))),
                (List(a), List(b)) => Ok(Self::concat_lists(a, b)),
                _ => Self::eval_scalar_op(op, left, right, line),
            },

            Mul => match (left, right) {
                (Str(s), Integer(n)) | (Integer(n), Str(s)) => Ok(Self::repeat_string(s, *n)),
                (List(l), Integer(n)) | (Integer(n), List(l)) => Ok(Self::repeat_list(l, *n)),
                _ => Self::eval_scalar_op(op, left, right, line),
            },

            Sub | Div | Mod => Self::eval_scalar_op(op, left, right, line),

            Pow => Self::eval_pow(left, right, line),

            Equal | NotEqual | Is | IsNot | Points | NotPoints | Less | LessEqual | Greater
            | GreaterEqual => Self::eval_comparison(op, left, right, line),
        }
    }
}

/// The error for an operator that does not accept this pair of types.
pub(crate) const fn unsupported(op: BinaryOperator, left: &Value, right: &Value, line: usize) -> RuntimeError {
    RuntimeError::UnsupportedOperands { operator: op.symbol(),
                                        left: left.type_name(),
                                        right: right.type_name(),
                                        line }
}
