use crate::interpreter::{evaluator::{core::EvalResult, function::convert}, value::core::Value};

/// Names of the methods available on every value.
pub const NAMES: &[&str] = &["type", "str", "len", "repr", "is_none", "is_bool", "is_int", "is_float", "is_string",
                             "is_list", "is_set", "is_dict", "is_numeric", "toInt", "toDouble", "toBool",
                             "toString"];

/// Runs a universal method, or returns `None` when `name` with this many
/// arguments is not one of them.
///
/// All universal methods take no arguments.
pub fn call(receiver: &Value, name: &str, args: &[Value], line: usize) -> Option<EvalResult<Value>> {
    if !args.is_empty() {
        return None;
    }

    let result = match name {
        "type" => Ok(Value::from(receiver.type_name())),
        "str" | "toString" => Ok(Value::Str(receiver.to_string())),
        "repr" => Ok(Value::Str(receiver.repr())),
        "len" => convert::len(receiver, line),
        "is_none" => Ok(Value::Bool(receiver.is_none())),
        "is_bool" => Ok(Value::Bool(matches!(receiver, Value::Bool(_)))),
        "is_int" => Ok(Value::Bool(matches!(receiver, Value::Integer(_)))),
        "is_float" => Ok(Value::Bool(matches!(receiver, Value::Real(_)))),
        "is_string" => Ok(Value::Bool(matches!(receiver, Value::Str(_)))),
        "is_list" => Ok(Value::Bool(matches!(receiver, Value::List(_)))),
        "is_set" => Ok(Value::Bool(matches!(receiver, Value::Set(_)))),
        "is_dict" => Ok(Value::Bool(matches!(receiver, Value::Dict(_)))),
        "is_numeric" => Ok(Value::Bool(receiver.is_numeric())),
        "toInt" => convert::to_int(receiver, line),
        "toDouble" => convert::to_float(receiver, line),
        "toBool" => Ok(Value::Bool(receiver.is_truthy())),
        _ => return None,
    };
    Some(result)
}
