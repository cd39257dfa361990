use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            utils::expect_list,
        },
        value::core::Value,
    },
};

/// The elements of a list or set, for helpers that accept either.
fn collection(value: &Value, what: &str, line: usize) -> EvalResult<Vec<Value>> {
    match value {
        Value::Set(_) => value.elements(line),
        other => Ok(expect_list(other, what, line)?.to_vec()),
    }
}

/// `sum(items[, start])` adds the elements to `start` (default `0`) with
/// the `+` operator, so a list of strings concatenates.
///
/// # Example
/// ```
/// use scriptit::interpreter::{
///     evaluator::{core::Context, function::functional::sum},
///     value::core::Value,
/// };
///
/// let mut context = Context::new();
/// let items = Value::from(vec![Value::Integer(1), Value::Real(2.5)]);
///
/// assert_eq!(sum(&mut context, &[items], 1).unwrap(), Value::Real(3.5));
/// ```
pub fn sum(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let start = args.get(1).cloned().unwrap_or(Value::Integer(0));
    collection(&args[0], "sum()", line)?.iter()
                                        .try_fold(start, |total, item| {
                                            Context::eval_binary(BinaryOperator::Add, &total, item, line)
                                        })
}

/// `sorted(items[, reverse])` returns a new sorted list.
pub fn sorted(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let mut items = collection(&args[0], "sorted()", line)?;
    items.sort_by(Value::total_cmp);
    if args.get(1).is_some_and(Value::is_truthy) {
        items.reverse();
    }
    Ok(Value::from(items))
}

/// `reversed(x)` reverses a list or a string.
pub fn reversed(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    match &args[0] {
        Value::Str(s) => Ok(Value::Str(s.chars().rev().collect())),
        Value::List(list) => Ok(list.iter().rev().cloned().collect()),
        other => Err(RuntimeError::InvalidArgument { details: format!("reversed() expects a list or str, got {}",
                                                                      other.type_name()),
                                                     line }),
    }
}

/// `all(items)` when `every` is set, `any(items)` otherwise.
pub fn all_any(every: bool, items: &Value, line: usize) -> EvalResult<Value> {
    let what = if every { "all()" } else { "any()" };
    let items = collection(items, what, line)?;
    Ok(Value::Bool(if every {
                       items.iter().all(Value::is_truthy)
                   } else {
                       items.iter().any(Value::is_truthy)
                   }))
}

/// `enumerate(items)` pairs every element with its position:
/// `[[0, a], [1, b], ...]`.
pub fn enumerate(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(args[0].elements(line)?
              .into_iter()
              .enumerate()
              .map(|(index, item)| Value::from(vec![Value::from(index), item]))
              .collect())
}

/// `zip(a, b)` pairs the elements of two lists up to the shorter length.
pub fn zip(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let left = expect_list(&args[0], "zip()", line)?;
    let right = expect_list(&args[1], "zip()", line)?;
    Ok(left.iter()
           .zip(right)
           .map(|(a, b)| Value::from(vec![a.clone(), b.clone()]))
           .collect())
}
