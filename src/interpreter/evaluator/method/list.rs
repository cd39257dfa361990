use std::rc::Rc;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            binary::comparison::values_equal,
            core::EvalResult,
            utils::{resolve_index, slice_arguments, slice_positions},
        },
        value::core::Value,
    },
    util::num::{i64_to_usize_checked, usize_to_i64},
};

/// Names of the list methods.
pub const NAMES: &[&str] = &["front", "back", "pop", "clear", "empty", "size", "sort", "reverse", "keys", "append",
                             "extend", "remove", "contains", "has", "count", "index", "at", "slice", "insert"];

/// Runs a list method, or returns `None` when `name` with this many
/// arguments is not a list method.
///
/// `append`, `extend`, `remove`, `sort`, `reverse` and `insert` change the
/// list in place and return it; `pop` removes and returns the last element;
/// `clear` empties it and returns `None`. Element searches use `==`
/// equality.
///
/// # Example
/// ```
/// use std::rc::Rc;
///
/// use scriptit::interpreter::{evaluator::method::list::call, value::core::Value};
///
/// let mut items = Rc::new(vec![Value::Integer(1), Value::Integer(2)]);
/// let result = call(&mut items, "insert", &[Value::Integer(0), Value::from("a")], 1).unwrap().unwrap();
///
/// assert_eq!(result.to_string(), "[a, 1, 2]");
/// assert_eq!(items.len(), 3);
/// ```
pub fn call(items: &mut Rc<Vec<Value>>, name: &str, args: &[Value], line: usize) -> Option<EvalResult<Value>> {
    let result = match (name, args) {
        ("front", []) => non_empty(items.as_slice(), "front", line).map(|items| items[0].clone()),
        ("back", []) => non_empty(items.as_slice(), "back", line).map(|items| items[items.len() - 1].clone()),
        ("pop", []) => Rc::make_mut(items).pop().ok_or_else(|| empty_error("pop", line)),
        ("clear", []) => {
            Rc::make_mut(items).clear();
            Ok(Value::None)
        },
        ("empty", []) => Ok(Value::Bool(items.is_empty())),
        ("size", []) => Ok(Value::from(items.len())),
        ("sort", []) => {
            Rc::make_mut(items).sort_by(Value::total_cmp);
            Ok(Value::List(Rc::clone(items)))
        },
        ("reverse", []) => {
            Rc::make_mut(items).reverse();
            Ok(Value::List(Rc::clone(items)))
        },
        ("keys", []) => Ok((0..items.len()).map(Value::from).collect()),
        ("append", [item]) => {
            Rc::make_mut(items).push(item.clone());
            Ok(Value::List(Rc::clone(items)))
        },
        ("extend", [other]) => other.elements(line).map(|other| {
                                                       Rc::make_mut(items).extend(other);
                                                       Value::List(Rc::clone(items))
                                                   }),
        ("remove", [item]) => remove(items, item, line),
        ("contains" | "has", [item]) => Ok(Value::Bool(items.iter().any(|x| values_equal(x, item)))),
        ("count", [item]) => Ok(Value::from(items.iter().filter(|x| values_equal(x, item)).count())),
        ("index", [item]) => {
            Ok(Value::Integer(items.iter()
                                   .position(|x| values_equal(x, item))
                                   .map_or(-1, usize_to_i64)))
        },
        ("at", [index]) => {
            index.as_integer(line)
                 .and_then(|index| resolve_index(index, items.len(), line))
                 .map(|position| items[position].clone())
        },
        ("slice", [_, _] | [_, _, _]) => slice(items.as_slice(), args, line),
        ("insert", [index, item]) => insert(items, index, item, line),
        _ => return None,
    };
    Some(result)
}

fn empty_error(method: &str, line: usize) -> RuntimeError {
    RuntimeError::InvalidArgument { details: format!("list.{method}() on an empty list"),
                                    line }
}

fn non_empty<'a>(items: &'a [Value], method: &str, line: usize) -> EvalResult<&'a [Value]> {
    if items.is_empty() { Err(empty_error(method, line)) } else { Ok(items) }
}

/// Removes the first element equal to `item`.
fn remove(items: &mut Rc<Vec<Value>>, item: &Value, line: usize) -> EvalResult<Value> {
    let Some(position) = items.iter().position(|x| values_equal(x, item)) else {
        return Err(RuntimeError::InvalidArgument { details: format!("list.remove(x): {} not in list", item.repr()),
                                                   line });
    };
    Rc::make_mut(items).remove(position);
    Ok(Value::List(Rc::clone(items)))
}

/// Inserts before `index`. Negative indices count from the end and
/// out-of-range indices are clamped to the ends of the list.
fn insert(items: &mut Rc<Vec<Value>>, index: &Value, item: &Value, line: usize) -> EvalResult<Value> {
    let len = usize_to_i64(items.len());
    let index = index.as_integer(line)?;
    let index = if index < 0 { index + len } else { index };
    let position = i64_to_usize_checked(index.clamp(0, len), line)?;

    Rc::make_mut(items).insert(position, item.clone());
    Ok(Value::List(Rc::clone(items)))
}

fn slice(items: &[Value], args: &[Value], line: usize) -> EvalResult<Value> {
    let (start, end, step) = slice_arguments(args, line)?;
    Ok(slice_positions(items.len(), start, end, step, line)?.into_iter()
                                                            .map(|i| items[i].clone())
                                                            .collect())
}
