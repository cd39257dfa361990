use crate::interpreter::{evaluator::core::Context, value::core::Value};

impl Context {
    /// Joins two lists into a new list.
    #[must_use]
    pub fn concat_lists(left: &[Value], right: &[Value]) -> Value {
        left.iter().chain(right).cloned().collect()
    }

    /// Repeats a string `count` times; a count below one gives `""`.
    ///
    /// # Example
    /// ```
    /// use scriptit::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// assert_eq!(Context::repeat_string("ab", 3), Value::from("ababab"));
    /// assert_eq!(Context::repeat_string("ab", -1), Value::from(""));
    /// ```
    #[must_use]
    pub fn repeat_string(text: &str, count: i64) -> Value {
        Value::Str(text.repeat(usize::try_from(count).unwrap_or(0)))
    }

    /// Repeats the elements of a list `count` times; a count below one
    /// gives an empty list.
    #[must_use]
    pub fn repeat_list(list: &[Value], count: i64) -> Value {
        let count = usize::try_from(count).unwrap_or(0);
        list.iter().cycle().take(list.len().saturating_mul(count)).cloned().collect()
    }
}
