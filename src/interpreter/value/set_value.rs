use std::{
    cmp::Ordering,
    collections::{BTreeMap, BTreeSet},
    fmt::Display,
    rc::Rc,
};

use ordered_float::OrderedFloat;

use crate::{interpreter::value::core::Value, util::num::i64_to_f64};

/// Enum representing values allowed in sets.
///
/// Every runtime value can be a set element. Floats are wrapped in
/// [`OrderedFloat`] so the whole enum has a total order, which keeps sets
/// sorted and makes their display deterministic. Integers and reals compare
/// by numeric value, so `{1, 1.0}` holds a single element.
#[derive(Clone, Debug)]
pub enum SetValue {
    /// `None`.
    None,
    /// A boolean such as `True`.
    Bool(bool),
    /// An integer such as `-4` or `42`.
    Integer(i64),
    /// A real such as `3.14`.
    Real(OrderedFloat<f64>),
    /// A string such as `"abc"`.
    Str(String),
    /// A list such as `[1, 2, 2]`.
    List(Vec<SetValue>),
    /// A set such as `{1, 2}`.
    Set(BTreeSet<SetValue>),
    /// A dict such as `{"a" -> 1}`.
    Dict(BTreeMap<String, SetValue>),
}

impl SetValue {
    const fn rank(&self) -> u8 {
        match self {
            Self::None => 0,
            Self::Bool(_) => 1,
            Self::Integer(_) | Self::Real(_) => 2,
            Self::Str(_) => 3,
            Self::List(_) => 4,
            Self::Set(_) => 5,
            Self::Dict(_) => 6,
        }
    }
}

impl Ord for SetValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (Self::Real(a), Self::Real(b)) => a.cmp(b),
            (Self::Integer(a), Self::Real(b)) => OrderedFloat(i64_to_f64(*a)).cmp(b),
            (Self::Real(a), Self::Integer(b)) => a.cmp(&OrderedFloat(i64_to_f64(*b))),
            (Self::Str(a), Self::Str(b)) => a.cmp(b),
            (Self::List(a), Self::List(b)) => a.cmp(b),
            (Self::Set(a), Self::Set(b)) => a.cmp(b),
            (Self::Dict(a), Self::Dict(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SetValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SetValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SetValue {}

impl From<&Value> for SetValue {
    fn from(v: &Value) -> Self {
        match v {
            Value::None => Self::None,
            Value::Bool(b) => Self::Bool(*b),
            Value::Integer(i) => Self::Integer(*i),
            Value::Real(r) => Self::Real(OrderedFloat(*r)),
            Value::Str(s) => Self::Str(s.clone()),
            Value::List(list) => Self::List(list.iter().map(Self::from).collect()),
            Value::Set(set) => Self::Set(set.as_ref().clone()),
            Value::Dict(dict) => Self::Dict(dict.iter().map(|(k, v)| (k.clone(), Self::from(v))).collect()),
        }
    }
}

impl From<SetValue> for Value {
    fn from(s: SetValue) -> Self {
        match s {
            SetValue::None => Self::None,
            SetValue::Bool(b) => Self::Bool(b),
            SetValue::Integer(i) => Self::Integer(i),
            SetValue::Real(r) => Self::Real(r.into_inner()),
            SetValue::Str(s) => Self::Str(s),
            SetValue::List(list) => Self::List(Rc::new(list.into_iter().map(Self::from).collect())),
            SetValue::Set(set) => Self::Set(Rc::new(set)),
            SetValue::Dict(dict) => Self::Dict(Rc::new(dict.into_iter().map(|(k, v)| (k, Self::from(v))).collect())),
        }
    }
}

impl Display for SetValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value: Value = self.clone().into();
        write!(f, "{value}")
    }
}
