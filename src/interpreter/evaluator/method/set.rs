use std::{collections::BTreeSet, rc::Rc};

use crate::interpreter::{
    evaluator::core::EvalResult,
    value::{core::Value, set_value::SetValue},
};

/// Names of the set methods.
pub const NAMES: &[&str] = &["clear", "empty", "size", "add", "remove", "contains", "has", "extend", "update"];

/// Runs a set method, or returns `None` when `name` with this many
/// arguments is not a set method.
///
/// `add`, `remove`, `extend` and `update` change the set in place and
/// return it. Removing a missing element does nothing.
///
/// # Example
/// ```
/// use std::{collections::BTreeSet, rc::Rc};
///
/// use scriptit::interpreter::{evaluator::method::set::call, value::core::Value};
///
/// let mut items = Rc::new(BTreeSet::new());
/// call(&mut items, "add", &[Value::Integer(2)], 1).unwrap().unwrap();
/// call(&mut items, "add", &[Value::Real(2.0)], 1).unwrap().unwrap();
///
/// assert_eq!(items.len(), 1);
/// ```
pub fn call(items: &mut Rc<BTreeSet<SetValue>>,
            name: &str,
            args: &[Value],
            line: usize)
            -> Option<EvalResult<Value>> {
    let result = match (name, args) {
        ("clear", []) => {
            Rc::make_mut(items).clear();
            Ok(Value::None)
        },
        ("empty", []) => Ok(Value::Bool(items.is_empty())),
        ("size", []) => Ok(Value::from(items.len())),
        ("add", [item]) => {
            Rc::make_mut(items).insert(SetValue::from(item));
            Ok(Value::Set(Rc::clone(items)))
        },
        ("remove", [item]) => {
            Rc::make_mut(items).remove(&SetValue::from(item));
            Ok(Value::Set(Rc::clone(items)))
        },
        ("contains" | "has", [item]) => Ok(Value::Bool(items.contains(&SetValue::from(item)))),
        ("extend" | "update", [other]) => other.elements(line).map(|other| {
                                                                 Rc::make_mut(items).extend(other.iter()
                                                                                                 .map(SetValue::from));
                                                                 Value::Set(Rc::clone(items))
                                                             }),
        _ => return None,
    };
    Some(result)
}
