use tracing::trace;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::EvalResult,
            method::{dict, list, set, string, universal},
        },
        value::core::Value,
    },
};

/// Calls the method `name` on `receiver`.
///
/// The type table for the receiver is consulted first, then the universal
/// table. Mutating methods change `receiver` in place; the caller writes
/// it back to the variable it came from.
///
/// # Parameters
/// - `receiver`: The value left of the dot.
/// - `name`: The method name.
/// - `args`: The evaluated arguments.
/// - `line`: Source line number for error reporting.
///
/// # Errors
/// - `UnknownMethod` when neither table knows the name.
/// - `MethodArity` when the name is known but not with `args.len()`
///   arguments.
/// - Whatever the method itself reports.
///
/// # Example
/// ```
/// use scriptit::interpreter::{evaluator::method::core::dispatch, value::core::Value};
///
/// let mut list = Value::from(vec![Value::Integer(3), Value::Integer(1)]);
/// dispatch(&mut list, "append", &[Value::Integer(2)], 1).unwrap();
/// dispatch(&mut list, "sort", &[], 1).unwrap();
///
/// assert_eq!(list.to_string(), "[1, 2, 3]");
/// assert_eq!(dispatch(&mut list, "size", &[], 1).unwrap(), Value::Integer(3));
/// assert!(dispatch(&mut list, "upper", &[], 1).is_err());
/// ```
pub fn dispatch(receiver: &mut Value, name: &str, args: &[Value], line: usize) -> EvalResult<Value> {
    trace!(method = name, receiver = receiver.type_name(), argc = args.len(), "dispatching method");

    let typed = match &mut *receiver {
        Value::Str(s) => string::call(s, name, args, line),
        Value::List(items) => list::call(items, name, args, line),
        Value::Set(items) => set::call(items, name, args, line),
        Value::Dict(entries) => dict::call(entries, name, args, line),
        _ => None,
    };
    if let Some(result) = typed {
        return result;
    }
    if let Some(result) = universal::call(receiver, name, args, line) {
        return result;
    }

    let type_name = receiver.type_name();
    if type_methods(receiver).contains(&name) || universal::NAMES.contains(&name) {
        Err(RuntimeError::MethodArity { method: name.to_string(),
                                        type_name,
                                        count: args.len(),
                                        line })
    } else {
        Err(RuntimeError::UnknownMethod { method: name.to_string(),
                                          type_name,
                                          line })
    }
}

const fn type_methods(receiver: &Value) -> &'static [&'static str] {
    match receiver {
        Value::Str(_) => string::NAMES,
        Value::List(_) => list::NAMES,
        Value::Set(_) => set::NAMES,
        Value::Dict(_) => dict::NAMES,
        _ => &[],
    }
}
