use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
    util::num::{f64_truncate_checked, i64_to_f64},
};

/// Absolute value; integers stay integers.
///
/// # Example
/// ```
/// use scriptit::interpreter::{
///     evaluator::{core::Context, function::math::abs},
///     value::core::Value,
/// };
///
/// let mut context = Context::new();
/// assert_eq!(abs(&mut context, &[Value::Integer(-4)], 1).unwrap(), Value::Integer(4));
/// assert_eq!(abs(&mut context, &[Value::Real(-0.5)], 1).unwrap(), Value::Real(0.5));
/// ```
pub fn abs(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    match &args[0] {
        Value::Integer(n) => Ok(n.checked_abs().map_or_else(|| Value::Real(i64_to_f64(*n).abs()), Value::Integer)),
        other => Ok(Value::Real(other.as_number(line)?.abs())),
    }
}

/// Returns whichever of the two arguments is smaller (`min`) or larger
/// (`max`), keeping its type. Ties return the first argument.
pub fn min_max(name: &str, args: &[Value], line: usize) -> EvalResult<Value> {
    let a = args[0].as_number(line)?;
    let b = args[1].as_number(line)?;

    let first = if name == "min" { a <= b } else { a >= b };
    Ok(if first { args[0].clone() } else { args[1].clone() })
}

/// Applies a one-argument real function.
///
/// # Errors
/// `InvalidArgument` when the argument lies outside the function's domain,
/// such as `sqrt(-1)` or `log(0)`; `DivisionByZero` for `cot`, `sec` and
/// `csc` at their poles.
///
/// # Example
/// ```
/// use scriptit::interpreter::{evaluator::function::math::unary, value::core::Value};
///
/// assert_eq!(unary("sqrt", &[Value::Integer(16)], 1).unwrap(), Value::Real(4.0));
/// assert!(unary("log", &[Value::Integer(0)], 1).is_err());
/// ```
pub fn unary(name: &str, args: &[Value], line: usize) -> EvalResult<Value> {
    let x = args[0].as_number(line)?;

    let domain = |ok: bool| {
        if ok {
            Ok(())
        } else {
            Err(RuntimeError::InvalidArgument { details: format!("{name}() math domain error for {}", args[0]),
                                                line })
        }
    };
    let reciprocal = |denominator: f64| {
        if denominator == 0.0 {
            Err(RuntimeError::DivisionByZero { line })
        } else {
            Ok(1.0 / denominator)
        }
    };

    let result = match name {
        "sin" => x.sin(),
        "cos" => x.cos(),
        "tan" => x.tan(),
        "asin" => {
            domain((-1.0..=1.0).contains(&x))?;
            x.asin()
        },
        "acos" => {
            domain((-1.0..=1.0).contains(&x))?;
            x.acos()
        },
        "atan" => x.atan(),
        "log" | "log2" | "log10" => {
            domain(x > 0.0)?;
            match name {
                "log" => x.ln(),
                "log2" => x.log2(),
                _ => x.log10(),
            }
        },
        "sqrt" => {
            domain(x >= 0.0)?;
            x.sqrt()
        },
        "cot" => reciprocal(x.tan())?,
        "sec" => reciprocal(x.cos())?,
        "csc" => reciprocal(x.sin())?,
        _ => {
            return Err(RuntimeError::UnknownFunction { name: name.to_string(),
                                                       line });
        },
    };

    Ok(Value::Real(result))
}

/// `ceil`, `floor` and `round`, returning integers. `round` rounds halves
/// away from zero.
///
/// # Example
/// ```
/// use scriptit::interpreter::{evaluator::function::math::rounding, value::core::Value};
///
/// assert_eq!(rounding("round", &[Value::Real(3.7)], 1).unwrap(), Value::Integer(4));
/// assert_eq!(rounding("floor", &[Value::Real(-1.5)], 1).unwrap(), Value::Integer(-2));
/// ```
pub fn rounding(name: &str, args: &[Value], line: usize) -> EvalResult<Value> {
    if let Value::Integer(n) = args[0] {
        return Ok(Value::Integer(n));
    }

    let x = args[0].as_number(line)?;
    let rounded = match name {
        "ceil" => x.ceil(),
        "floor" => x.floor(),
        _ => x.round(),
    };
    Ok(Value::Integer(f64_truncate_checked(rounded, line)?))
}
