use std::fmt::{self, Display, Write};

use crate::interpreter::value::core::Value;

/// Formats a real the way `%g` does with six significant digits.
///
/// Trailing zeros are dropped, so whole reals print without a decimal point.
/// Exponents below `-4` or of at least `6` switch to scientific notation.
///
/// # Example
/// ```
/// use scriptit::interpreter::value::display::format_real;
///
/// assert_eq!(format_real(3.15), "3.15");
/// assert_eq!(format_real(5.0), "5");
/// assert_eq!(format_real(3.14159265), "3.14159");
/// assert_eq!(format_real(1e6), "1e+06");
/// assert_eq!(format_real(0.0001), "0.0001");
/// ```
#[must_use]
pub fn format_real(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let scientific = format!("{value:.5e}");
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if !(-4..6).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}e{sign}{:02}", trim_zeros(mantissa), exponent.unsigned_abs());
    }

    let decimals = usize::try_from(5 - exponent).unwrap_or(0);
    trim_zeros(&format!("{value:.decimals$}")).to_string()
}

fn trim_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

fn write_joined<I>(f: &mut fmt::Formatter<'_>, open: char, items: I, close: char) -> fmt::Result
    where I: Iterator<Item = String>
{
    f.write_char(open)?;
    for (index, item) in items.enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        f.write_str(&item)?;
    }
    f.write_char(close)
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bool(b) => f.write_str(if *b { "True" } else { "False" }),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => f.write_str(&format_real(*r)),
            Self::Str(s) => f.write_str(s),
            Self::List(list) => write_joined(f, '[', list.iter().map(ToString::to_string), ']'),
            Self::Set(set) => write_joined(f, '{', set.iter().map(ToString::to_string), '}'),
            Self::Dict(dict) => write_joined(f, '{', dict.iter().map(|(k, v)| format!("\"{k}\": {v}")), '}'),
        }
    }
}

impl Value {
    /// The display form with strings wrapped in double quotes, as returned
    /// by `repr(x)`.
    ///
    /// # Example
    /// ```
    /// use scriptit::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::from("hi").repr(), "\"hi\"");
    /// assert_eq!(Value::Integer(3).repr(), "3");
    /// ```
    #[must_use]
    pub fn repr(&self) -> String {
        match self {
            Self::Str(s) => format!("\"{s}\""),
            other => other.to_string(),
        }
    }

    /// A multi-line rendering used by `pprint`.
    ///
    /// Non-empty containers put one element per line, indented by two
    /// spaces per nesting level. Strings are quoted.
    #[must_use]
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        self.write_pretty(&mut out, 0);
        out
    }

    fn write_pretty(&self, out: &mut String, indent: usize) {
        const STEP: usize = 2;

        let owned: Vec<Self>;
        let entries: Vec<(Option<&str>, &Self)>;
        let (open, close) = match self {
            Self::List(list) if !list.is_empty() => {
                entries = list.iter().map(|v| (None, v)).collect();
                ('[', ']')
            },
            Self::Set(set) if !set.is_empty() => {
                owned = set.iter().cloned().map(Self::from).collect();
                entries = owned.iter().map(|v| (None, v)).collect();
                ('{', '}')
            },
            Self::Dict(dict) if !dict.is_empty() => {
                entries = dict.iter().map(|(k, v)| (Some(k.as_str()), v)).collect();
                ('{', '}')
            },
            other => {
                out.push_str(&other.repr());
                return;
            },
        };

        let inner = " ".repeat(indent + STEP);
        out.push(open);
        out.push('\n');
        for (index, (key, value)) in entries.iter().enumerate() {
            out.push_str(&inner);
            if let Some(key) = key {
                out.push('"');
                out.push_str(key);
                out.push_str("\": ");
            }
            value.write_pretty(out, indent + STEP);
            if index + 1 < entries.len() {
                out.push(',');
            }
            out.push('\n');
        }
        out.push_str(&" ".repeat(indent));
        out.push(close);
    }
}
