use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Converts an `i64` to `f64`, rounding to the nearest representable value.
///
/// Integer arithmetic that overflows continues in floating point, so the
/// conversion is allowed to lose precision for very large magnitudes.
///
/// ## Example
/// ```
/// use scriptit::util::num::i64_to_f64;
///
/// assert_eq!(i64_to_f64(42), 42.0);
/// ```
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn i64_to_f64(value: i64) -> f64 {
    value as f64
}

/// Converts a collection length or position to `i64`, saturating at
/// `i64::MAX`.
///
/// ## Example
/// ```
/// use scriptit::util::num::usize_to_i64;
///
/// assert_eq!(usize_to_i64(3), 3);
/// ```
#[must_use]
pub fn usize_to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Returns `true` when `value` is finite, has no fractional part and fits an
/// `i64`.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64
}

/// Safely converts an `f64` to `i64` if the value is finite, within range, and
/// not fractional.
///
/// ## Errors
/// Returns `InvalidArgument` for non-finite, out-of-range, or fractional
/// values.
///
/// # Parameters
/// - `value`: The floating-point value to convert.
/// - `line`: Source code line number for error reporting.
///
/// # Example
/// ```
/// use scriptit::util::num::f64_to_i64_checked;
///
/// assert_eq!(f64_to_i64_checked(1000.0, 1).unwrap(), 1000);
/// assert!(f64_to_i64_checked(1.5, 1).is_err());
/// assert!(f64_to_i64_checked(1e20, 1).is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
pub fn f64_to_i64_checked(value: f64, line: usize) -> EvalResult<i64> {
    if !is_integral(value) {
        return Err(RuntimeError::InvalidArgument { details: format!("Expected an integer, got {value}"),
                                                   line });
    }
    Ok(value as i64)
}

/// Converts an `f64` to `i64` by truncating toward zero.
///
/// ## Errors
/// Returns `InvalidArgument` for NaN, infinities and magnitudes outside the
/// `i64` range.
///
/// # Example
/// ```
/// use scriptit::util::num::f64_truncate_checked;
///
/// assert_eq!(f64_truncate_checked(3.7, 1).unwrap(), 3);
/// assert_eq!(f64_truncate_checked(-3.7, 1).unwrap(), -3);
/// assert!(f64_truncate_checked(f64::NAN, 1).is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_truncate_checked(value: f64, line: usize) -> EvalResult<i64> {
    let truncated = value.trunc();
    if !truncated.is_finite() || truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return Err(RuntimeError::InvalidArgument { details: format!("Cannot convert {value} to int"),
                                                   line });
    }
    Ok(truncated as i64)
}

/// Safely converts an `i64` to `u32`.
///
/// ## Errors
/// Returns `None` if the value is negative or exceeds `u32::MAX`.
///
/// # Example
/// ```
/// use scriptit::util::num::i64_to_u32_checked;
///
/// assert_eq!(i64_to_u32_checked(45), Some(45));
/// assert_eq!(i64_to_u32_checked(-1), None);
/// ```
#[must_use]
pub fn i64_to_u32_checked(value: i64) -> Option<u32> {
    u32::try_from(value).ok()
}

/// Safely converts an `i64` to a `usize` if and only if it can be represented
/// exactly.
///
/// ## Errors
/// Returns `InvalidArgument` if the value is negative or exceeds the maximum
/// representable `usize`.
///
/// ## Example
/// ```
/// use scriptit::util::num::i64_to_usize_checked;
///
/// assert_eq!(i64_to_usize_checked(42, 0).unwrap(), 42);
/// assert!(i64_to_usize_checked(-1, 5).is_err());
/// ```
pub fn i64_to_usize_checked(value: i64, line: usize) -> EvalResult<usize> {
    usize::try_from(value).map_err(|_| RuntimeError::InvalidArgument { details: format!("Expected a non-negative count, got {value}"),
                                                                         line })
}
