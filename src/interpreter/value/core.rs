use std::{
    cmp::Ordering,
    collections::{BTreeMap, BTreeSet},
    rc::Rc,
};

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::set_value::SetValue},
    util::num::{f64_to_i64_checked, i64_to_f64, usize_to_i64},
};

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible types that can appear in expressions,
/// assignments, function returns, and conditional evaluations. Containers are
/// reference counted; mutation goes through [`Rc::make_mut`], so a copy held
/// by another variable is never changed behind its back.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// The absence of a value. Unknown variables read as `None`.
    #[default]
    None,
    /// A boolean value (`True` or `False`).
    /// Produced by comparisons and logical operators, and counts as `0`/`1`
    /// in arithmetic.
    Bool(bool),
    /// A integer value (64 bit integer).
    Integer(i64),
    /// A numeric value (double precision floating-point).
    Real(f64),
    /// A string.
    Str(String),
    /// An ordered list of values.
    List(Rc<Vec<Self>>),
    /// A set of unique values, kept sorted.
    Set(Rc<BTreeSet<SetValue>>),
    /// A mapping from string keys to values, kept sorted by key.
    Dict(Rc<BTreeMap<String, Self>>),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Self::Integer(usize_to_i64(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::List(Rc::new(v))
    }
}

impl From<BTreeSet<SetValue>> for Value {
    fn from(v: BTreeSet<SetValue>) -> Self {
        Self::Set(Rc::new(v))
    }
}

impl From<BTreeMap<String, Self>> for Value {
    fn from(v: BTreeMap<String, Self>) -> Self {
        Self::Dict(Rc::new(v))
    }
}

impl FromIterator<Self> for Value {
    fn from_iter<T: IntoIterator<Item = Self>>(iter: T) -> Self {
        Self::List(Rc::new(iter.into_iter().collect()))
    }
}

impl Value {
    /// The user-visible type name, as returned by `type(x)`.
    ///
    /// # Example
    /// ```
    /// use scriptit::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Integer(1).type_name(), "int");
    /// assert_eq!(Value::None.type_name(), "NoneType");
    /// ```
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::None => "NoneType",
            Self::Bool(_) => "bool",
            Self::Integer(_) => "int",
            Self::Real(_) => "float",
            Self::Str(_) => "str",
            Self::List(_) => "list",
            Self::Set(_) => "set",
            Self::Dict(_) => "dict",
        }
    }

    /// Truthiness used by conditions and logical operators.
    ///
    /// `None`, `False`, zero and empty strings or containers are falsy;
    /// everything else is truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::None => false,
            Self::Bool(b) => *b,
            Self::Integer(n) => *n != 0,
            Self::Real(r) => *r != 0.0,
            Self::Str(s) => !s.is_empty(),
            Self::List(l) => !l.is_empty(),
            Self::Set(s) => !s.is_empty(),
            Self::Dict(d) => !d.is_empty(),
        }
    }

    /// Returns `true` for `int` and `float`.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Real(_))
    }

    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// Accepts `Value::Real`, `Value::Integer` and `Value::Bool` (as `0`/`1`).
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(f64)`: If value is numeric.
    /// - `Err(RuntimeError::NotANumber)`: Otherwise.
    ///
    /// # Example
    /// ```
    /// use scriptit::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Integer(10).as_number(1).unwrap(), 10.0);
    /// assert_eq!(Value::Bool(true).as_number(1).unwrap(), 1.0);
    /// assert!(Value::from("x").as_number(1).is_err());
    /// ```
    pub fn as_number(&self, line: usize) -> EvalResult<f64> {
        match self {
            Self::Real(r) => Ok(*r),
            Self::Integer(n) => Ok(i64_to_f64(*n)),
            Self::Bool(b) => Ok(f64::from(u8::from(*b))),
            _ => Err(RuntimeError::NotANumber { type_name: self.type_name(),
                                                line }),
        }
    }

    /// Converts the value to `i64`, or returns an error if it is not a whole
    /// number.
    ///
    /// Reals are accepted when they have no fractional part.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    pub fn as_integer(&self, line: usize) -> EvalResult<i64> {
        match self {
            Self::Integer(n) => Ok(*n),
            Self::Bool(b) => Ok(i64::from(*b)),
            Self::Real(r) => f64_to_i64_checked(*r, line),
            _ => Err(RuntimeError::NotANumber { type_name: self.type_name(),
                                                line }),
        }
    }

    /// Returns the string contents, or an `InvalidArgument` error naming
    /// `what` was expected.
    pub fn as_str(&self, what: &str, line: usize) -> EvalResult<&str> {
        match self {
            Self::Str(s) => Ok(s),
            _ => Err(RuntimeError::InvalidArgument { details: format!("{what} expects a str, got {}", self.type_name()),
                                                     line }),
        }
    }

    /// The elements visited by `for x in value`.
    ///
    /// Lists yield their elements, strings their characters and sets their
    /// elements in sorted order.
    ///
    /// # Errors
    /// `NotIterable` for any other type.
    pub fn elements(&self, line: usize) -> EvalResult<Vec<Self>> {
        match self {
            Self::List(list) => Ok(list.as_ref().clone()),
            Self::Str(s) => Ok(s.chars().map(|c| Self::Str(c.to_string())).collect()),
            Self::Set(set) => Ok(set.iter().cloned().map(Self::from).collect()),
            _ => Err(RuntimeError::NotIterable { type_name: self.type_name(),
                                                 line }),
        }
    }

    /// The key used when this value indexes a dict.
    ///
    /// Dict keys are strings; any other value is keyed by its display form.
    #[must_use]
    pub fn dict_key(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// A total order over all values, used for sorting.
    ///
    /// Numbers compare by value (booleans sort before them), strings
    /// lexicographically, and values of unrelated types by a fixed type
    /// rank.
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        SetValue::from(self).cmp(&SetValue::from(other))
    }

    /// Returns `true` if the value is [`Value::None`].
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}
