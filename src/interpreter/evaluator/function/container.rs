use std::collections::{BTreeMap, BTreeSet};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            utils::expect_list,
        },
        value::{core::Value, set_value::SetValue},
    },
};

/// `list()` is empty; `list(x)` copies the elements of a list, string or
/// set, or the keys of a dict.
pub fn list(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    match args.first() {
        None => Ok(Value::from(Vec::new())),
        Some(Value::Dict(dict)) => Ok(dict.keys().map(|k| Value::from(k.as_str())).collect()),
        Some(value) => Ok(Value::from(value.elements(line)?)),
    }
}

/// `set()` is empty; `set(x)` collects the distinct elements of a list,
/// string or set, or the keys of a dict.
pub fn set(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let elements = match args.first() {
        None => Vec::new(),
        Some(Value::Dict(dict)) => dict.keys().map(|k| Value::from(k.as_str())).collect(),
        Some(value) => value.elements(line)?,
    };
    Ok(Value::from(elements.iter().map(SetValue::from).collect::<BTreeSet<_>>()))
}

/// `dict()` is empty; `dict(d)` copies a dict and `dict(pairs)` builds one
/// from a list of `[key, value]` lists.
///
/// # Example
/// ```
/// use scriptit::{interpreter::{evaluator::core::Context, io::SharedOutput}, run_program};
///
/// let output = SharedOutput::new();
/// let mut context = Context::with_io(output.clone(), std::io::empty());
///
/// run_program("print(dict([[\"a\", 1], [\"b\", 2]])).", &mut context).unwrap();
/// assert_eq!(output.contents(), "{\"a\": 1, \"b\": 2}\n");
/// ```
pub fn dict(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    match args.first() {
        None => Ok(Value::from(BTreeMap::new())),
        Some(Value::Dict(dict)) => Ok(Value::Dict(dict.clone())),
        Some(Value::List(pairs)) => {
            let mut dict = BTreeMap::new();
            for pair in pairs.iter() {
                match pair {
                    Value::List(kv) if kv.len() == 2 => {
                        dict.insert(kv[0].dict_key(), kv[1].clone());
                    },
                    other => {
                        return Err(RuntimeError::InvalidArgument { details: format!("dict() expects [key, value] pairs, got {}",
                                                                                    other.repr()),
                                                                   line });
                    },
                }
            }
            Ok(Value::from(dict))
        },
        Some(other) => Err(RuntimeError::InvalidArgument { details: format!("dict() cannot convert {}", other.type_name()),
                                                           line }),
    }
}

/// `range_list(a, b)` is the list of integers from `a` to `b` inclusive,
/// counting down when `b < a`.
///
/// # Example
/// ```
/// use scriptit::interpreter::{
///     evaluator::{core::Context, function::container::range_list},
///     value::core::Value,
/// };
///
/// let mut context = Context::new();
/// let list = range_list(&mut context, &[Value::Integer(3), Value::Integer(1)], 1).unwrap();
///
/// assert_eq!(list, Value::from(vec![Value::Integer(3), Value::Integer(2), Value::Integer(1)]));
/// ```
pub fn range_list(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let start = args[0].as_integer(line)?;
    let end = args[1].as_integer(line)?;

    if start <= end {
        Ok((start..=end).map(Value::Integer).collect())
    } else {
        Ok((end..=start).rev().map(Value::Integer).collect())
    }
}

/// `append(list, item)` returns a copy of `list` with `item` at the end.
pub fn append(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let list = expect_list(&args[0], "append()", line)?;
    Ok(list.iter().chain([&args[1]]).cloned().collect())
}

/// `pop(list)` returns the last element.
pub fn pop(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    expect_list(&args[0], "pop()", line)?.last()
                                         .cloned()
                                         .ok_or_else(|| RuntimeError::InvalidArgument { details: "pop from empty list".to_string(),
                                                                                        line })
}
