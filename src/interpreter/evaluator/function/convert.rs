use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
    util::num::{f64_truncate_checked, usize_to_i64},
};

/// The number of characters in a string or elements in a container.
///
/// # Errors
/// `InvalidArgument` for values without a length.
///
/// # Example
/// ```
/// use scriptit::interpreter::{evaluator::function::convert::len, value::core::Value};
///
/// assert_eq!(len(&Value::from("héllo"), 1).unwrap(), Value::Integer(5));
/// assert!(len(&Value::Integer(5), 1).is_err());
/// ```
pub fn len(value: &Value, line: usize) -> EvalResult<Value> {
    let len = match value {
        Value::Str(s) => s.chars().count(),
        Value::List(list) => list.len(),
        Value::Set(set) => set.len(),
        Value::Dict(dict) => dict.len(),
        other => {
            return Err(RuntimeError::InvalidArgument { details: format!("Object of type {} has no len()",
                                                                        other.type_name()),
                                                       line });
        },
    };
    Ok(Value::Integer(usize_to_i64(len)))
}

/// Converts to an integer, truncating reals toward zero.
///
/// Strings are parsed after trimming whitespace; a string holding a real
/// such as `"3.7"` is truncated as well.
///
/// # Errors
/// `InvalidArgument` for unparsable strings, containers, `None`, and reals
/// that are not finite or do not fit an `i64`.
///
/// # Example
/// ```
/// use scriptit::interpreter::{evaluator::function::convert::to_int, value::core::Value};
///
/// assert_eq!(to_int(&Value::Real(3.7), 1).unwrap(), Value::Integer(3));
/// assert_eq!(to_int(&Value::from(" 42 "), 1).unwrap(), Value::Integer(42));
/// assert!(to_int(&Value::from("abc"), 1).is_err());
/// ```
pub fn to_int(value: &Value, line: usize) -> EvalResult<Value> {
    match value {
        Value::Integer(n) => Ok(Value::Integer(*n)),
        Value::Bool(b) => Ok(Value::Integer(i64::from(*b))),
        Value::Real(r) => Ok(Value::Integer(f64_truncate_checked(*r, line)?)),
        Value::Str(s) => {
            let text = s.trim();
            if let Ok(n) = text.parse::<i64>() {
                return Ok(Value::Integer(n));
            }
            text.parse::<f64>()
                .map_err(|_| cannot_convert(value, "int", line))
                .and_then(|r| f64_truncate_checked(r, line))
                .map(Value::Integer)
        },
        other => Err(cannot_convert(other, "int", line)),
    }
}

/// Converts to a real.
///
/// # Errors
/// `InvalidArgument` for unparsable strings, containers and `None`.
pub fn to_float(value: &Value, line: usize) -> EvalResult<Value> {
    match value {
        Value::Str(s) => s.trim()
                          .parse::<f64>()
                          .map(Value::Real)
                          .map_err(|_| cannot_convert(value, "float", line)),
        Value::Integer(_) | Value::Real(_) | Value::Bool(_) => Ok(Value::Real(value.as_number(line)?)),
        other => Err(cannot_convert(other, "float", line)),
    }
}

fn cannot_convert(value: &Value, target: &str, line: usize) -> RuntimeError {
    RuntimeError::InvalidArgument { details: format!("Cannot convert {} to {target}", value.repr()),
                                    line }
}

/// `isinstance(value, type_name)` compares against the name `type()`
/// returns.
pub fn isinstance(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let type_name = args[1].as_str("isinstance()", line)?;
    Ok(Value::Bool(args[0].type_name() == type_name))
}
