use std::{collections::BTreeMap, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Names of the dict methods.
pub const NAMES: &[&str] = &["keys", "values", "items", "clear", "empty", "size", "contains", "has", "update", "get"];

/// Runs a dict method, or returns `None` when `name` with this many
/// arguments is not a dict method.
///
/// Keys given as arguments go through the same conversion as keys in a
/// dict literal, so `d.get(1)` looks up `"1"`.
///
/// # Example
/// ```
/// use std::{collections::BTreeMap, rc::Rc};
///
/// use scriptit::interpreter::{evaluator::method::dict::call, value::core::Value};
///
/// let mut entries = Rc::new(BTreeMap::from([("a".to_string(), Value::Integer(1))]));
///
/// let hit = call(&mut entries, "get", &[Value::from("a")], 1).unwrap().unwrap();
/// let miss = call(&mut entries, "get", &[Value::from("b"), Value::Integer(0)], 1).unwrap().unwrap();
///
/// assert_eq!(hit, Value::Integer(1));
/// assert_eq!(miss, Value::Integer(0));
/// ```
pub fn call(entries: &mut Rc<BTreeMap<String, Value>>,
            name: &str,
            args: &[Value],
            line: usize)
            -> Option<EvalResult<Value>> {
    let result = match (name, args) {
        ("keys", []) => Ok(entries.keys().map(|k| Value::from(k.as_str())).collect()),
        ("values", []) => Ok(entries.values().cloned().collect()),
        ("items", []) => {
            Ok(entries.iter()
                      .map(|(k, v)| Value::from(vec![Value::from(k.as_str()), v.clone()]))
                      .collect())
        },
        ("clear", []) => {
            Rc::make_mut(entries).clear();
            Ok(Value::None)
        },
        ("empty", []) => Ok(Value::Bool(entries.is_empty())),
        ("size", []) => Ok(Value::from(entries.len())),
        ("contains" | "has", [key]) => Ok(Value::Bool(entries.contains_key(&key.dict_key()))),
        ("update", [other]) => update(entries, other, line),
        ("get", [key]) => Ok(entries.get(&key.dict_key()).cloned().unwrap_or_default()),
        ("get", [key, default]) => Ok(entries.get(&key.dict_key()).cloned().unwrap_or_else(|| default.clone())),
        _ => return None,
    };
    Some(result)
}

/// Copies every entry of `other` into the dict, replacing existing keys.
fn update(entries: &mut Rc<BTreeMap<String, Value>>, other: &Value, line: usize) -> EvalResult<Value> {
    let Value::Dict(other) = other else {
        return Err(RuntimeError::InvalidArgument { details: format!("dict.update() expects a dict, got {}",
                                                                    other.type_name()),
                                                   line });
    };
    Rc::make_mut(entries).extend(other.iter().map(|(k, v)| (k.clone(), v.clone())));
    Ok(Value::Dict(Rc::clone(entries)))
}
