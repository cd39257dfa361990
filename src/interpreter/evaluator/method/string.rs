use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::EvalResult,
            utils::{resolve_index, slice_arguments, slice_positions},
        },
        value::core::Value,
    },
    util::num::{i64_to_usize_checked, usize_to_i64},
};

/// Names of the string methods.
pub const NAMES: &[&str] = &["upper", "lower", "strip", "lstrip", "rstrip", "capitalize", "title", "reverse",
                             "isdigit", "isalpha", "isalnum", "isspace", "empty", "size", "split", "find", "count",
                             "startswith", "endswith", "contains", "has", "join", "zfill", "at", "replace",
                             "center", "slice"];

/// Runs a string method, or returns `None` when `name` with this many
/// arguments is not a string method.
///
/// Positions and lengths count characters, not bytes.
///
/// # Example
/// ```
/// use scriptit::interpreter::{evaluator::method::string::call, value::core::Value};
///
/// let upper = call("héllo", "upper", &[], 1).unwrap().unwrap();
/// assert_eq!(upper, Value::from("HÉLLO"));
///
/// let found = call("héllo", "find", &[Value::from("l")], 1).unwrap().unwrap();
/// assert_eq!(found, Value::Integer(2));
///
/// assert!(call("abc", "upper", &[Value::Integer(1)], 1).is_none());
/// ```
pub fn call(s: &str, name: &str, args: &[Value], line: usize) -> Option<EvalResult<Value>> {
    let result = match (name, args) {
        ("upper", []) => Ok(Value::from(s.to_uppercase())),
        ("lower", []) => Ok(Value::from(s.to_lowercase())),
        ("strip", []) => Ok(Value::from(s.trim())),
        ("lstrip", []) => Ok(Value::from(s.trim_start())),
        ("rstrip", []) => Ok(Value::from(s.trim_end())),
        ("capitalize", []) => Ok(Value::from(capitalize(s))),
        ("title", []) => Ok(Value::from(title(s))),
        ("reverse", []) => Ok(Value::Str(s.chars().rev().collect())),
        ("isdigit", []) => Ok(Value::Bool(all_chars(s, |c| c.is_ascii_digit()))),
        ("isalpha", []) => Ok(Value::Bool(all_chars(s, char::is_alphabetic))),
        ("isalnum", []) => Ok(Value::Bool(all_chars(s, char::is_alphanumeric))),
        ("isspace", []) => Ok(Value::Bool(all_chars(s, char::is_whitespace))),
        ("empty", []) => Ok(Value::Bool(s.is_empty())),
        ("size", []) => Ok(Value::from(s.chars().count())),
        ("split", []) => Ok(s.split_whitespace().map(Value::from).collect()),
        ("split", [separator]) => split(s, separator, line),
        ("find", [needle]) => find(s, needle, line),
        ("count", [needle]) => count(s, needle, line),
        ("startswith", [prefix]) => argument(prefix, "startswith", line).map(|p| Value::Bool(s.starts_with(p))),
        ("endswith", [suffix]) => argument(suffix, "endswith", line).map(|p| Value::Bool(s.ends_with(p))),
        ("contains" | "has", [needle]) => argument(needle, name, line).map(|n| Value::Bool(s.contains(n))),
        ("join", [items]) => join(s, items, line),
        ("zfill", [width]) => zfill(s, width, line),
        ("at", [index]) => at(s, index, line),
        ("replace", [from, to]) => {
            argument(from, "replace", line).and_then(|from| {
                                                let to = argument(to, "replace", line)?;
                                                Ok(Value::from(s.replace(from, to)))
                                            })
        },
        ("center", [width, fill]) => center(s, width, fill, line),
        ("slice", [_, _] | [_, _, _]) => slice(s, args, line),
        _ => return None,
    };
    Some(result)
}

fn argument<'a>(value: &'a Value, method: &str, line: usize) -> EvalResult<&'a str> {
    value.as_str(&format!("str.{method}()"), line)
}

fn all_chars(s: &str, predicate: impl Fn(char) -> bool) -> bool {
    !s.is_empty() && s.chars().all(predicate)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next()
         .map(|first| first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect())
         .unwrap_or_default()
}

/// Uppercases the first letter of every run of letters and lowercases the
/// rest.
fn title(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

fn split(s: &str, separator: &Value, line: usize) -> EvalResult<Value> {
    let separator = argument(separator, "split", line)?;
    if separator.is_empty() {
        return Err(RuntimeError::InvalidArgument { details: "str.split() separator cannot be empty".to_string(),
                                                   line });
    }
    Ok(s.split(separator).map(Value::from).collect())
}

/// Character position of the first occurrence, or `-1`.
fn find(s: &str, needle: &Value, line: usize) -> EvalResult<Value> {
    let needle = argument(needle, "find", line)?;
    Ok(Value::Integer(s.find(needle)
                       .map_or(-1, |byte| usize_to_i64(s[..byte].chars().count()))))
}

/// Non-overlapping occurrences. The empty string occurs between every pair
/// of characters and at both ends.
fn count(s: &str, needle: &Value, line: usize) -> EvalResult<Value> {
    let needle = argument(needle, "count", line)?;
    let count = if needle.is_empty() {
        s.chars().count() + 1
    } else {
        s.matches(needle).count()
    };
    Ok(Value::from(count))
}

/// Joins the display forms of the elements with `s` between them.
fn join(s: &str, items: &Value, line: usize) -> EvalResult<Value> {
    let parts = items.elements(line)?
                     .iter()
                     .map(ToString::to_string)
                     .collect::<Vec<_>>();
    Ok(Value::from(parts.join(s)))
}

/// Pads with leading zeros to `width` characters, keeping a leading sign in
/// front.
fn zfill(s: &str, width: &Value, line: usize) -> EvalResult<Value> {
    let width = i64_to_usize_checked(width.as_integer(line)?.max(0), line)?;
    let len = s.chars().count();
    if len >= width {
        return Ok(Value::from(s));
    }

    let zeros = "0".repeat(width - len);
    let padded = match s.strip_prefix(['+', '-']) {
        Some(rest) => format!("{}{zeros}{rest}", &s[..1]),
        None => format!("{zeros}{s}"),
    };
    Ok(Value::from(padded))
}

fn at(s: &str, index: &Value, line: usize) -> EvalResult<Value> {
    let chars = s.chars().collect::<Vec<_>>();
    let position = resolve_index(index.as_integer(line)?, chars.len(), line)?;
    Ok(Value::from(chars[position].to_string()))
}

/// Centers `s` in a field of `width` characters using the single character
/// `fill`. Odd padding puts the extra character on the right.
fn center(s: &str, width: &Value, fill: &Value, line: usize) -> EvalResult<Value> {
    let width = i64_to_usize_checked(width.as_integer(line)?.max(0), line)?;
    let fill = argument(fill, "center", line)?;
    let mut fill_chars = fill.chars();
    let (Some(fill), None) = (fill_chars.next(), fill_chars.next()) else {
        return Err(RuntimeError::InvalidArgument { details: "str.center() fill must be exactly one character".to_string(),
                                                   line });
    };

    let len = s.chars().count();
    if len >= width {
        return Ok(Value::from(s));
    }
    let left = (width - len) / 2;
    let right = width - len - left;

    let mut out = String::with_capacity(width);
    out.extend(std::iter::repeat_n(fill, left));
    out.push_str(s);
    out.extend(std::iter::repeat_n(fill, right));
    Ok(Value::from(out))
}

fn slice(s: &str, args: &[Value], line: usize) -> EvalResult<Value> {
    let (start, end, step) = slice_arguments(args, line)?;
    let chars = s.chars().collect::<Vec<_>>();
    Ok(Value::Str(slice_positions(chars.len(), start, end, step, line)?.into_iter()
                                                                         .map(|i| chars[i])
                                                                         .collect()))
}
