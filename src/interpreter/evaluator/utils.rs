use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    util::num::{i64_to_usize_checked, usize_to_i64},
};

/// Maps a possibly negative index onto `0..len`.
///
/// Negative indices count from the end, so `-1` is the last position.
///
/// # Errors
/// `IndexOutOfRange` when the index falls outside the sequence.
///
/// # Example
/// ```
/// use scriptit::interpreter::evaluator::utils::resolve_index;
///
/// assert_eq!(resolve_index(1, 3, 1).unwrap(), 1);
/// assert_eq!(resolve_index(-1, 3, 1).unwrap(), 2);
/// assert!(resolve_index(3, 3, 1).is_err());
/// ```
pub fn resolve_index(index: i64, len: usize, line: usize) -> EvalResult<usize> {
    let signed_len = usize_to_i64(len);
    let resolved = if index < 0 { index + signed_len } else { index };

    if (0..signed_len).contains(&resolved) {
        i64_to_usize_checked(resolved, line)
    } else {
        Err(RuntimeError::IndexOutOfRange { index, len, line })
    }
}

/// The positions selected by `slice(start, end[, step])` over a sequence of
/// `len` elements.
///
/// Bounds behave like Python slices: negative values count from the end,
/// out-of-range bounds are clamped, and a negative step walks backwards.
///
/// # Errors
/// `InvalidArgument` when `step` is zero.
///
/// # Example
/// ```
/// use scriptit::interpreter::evaluator::utils::slice_positions;
///
/// assert_eq!(slice_positions(5, 1, 3, 1, 1).unwrap(), vec![1, 2]);
/// assert_eq!(slice_positions(5, -2, 10, 1, 1).unwrap(), vec![3, 4]);
/// assert_eq!(slice_positions(5, 4, 0, -2, 1).unwrap(), vec![4, 2]);
/// ```
pub fn slice_positions(len: usize, start: i64, end: i64, step: i64, line: usize) -> EvalResult<Vec<usize>> {
    if step == 0 {
        return Err(RuntimeError::InvalidArgument { details: "slice step cannot be zero".to_string(),
                                                   line });
    }

    let len = usize_to_i64(len);
    let clamp = |bound: i64, low: i64, high: i64| {
        let bound = if bound < 0 { bound + len } else { bound };
        bound.clamp(low, high)
    };

    let mut positions = Vec::new();
    if step > 0 {
        let (mut current, end) = (clamp(start, 0, len), clamp(end, 0, len));
        while current < end {
            positions.push(i64_to_usize_checked(current, line)?);
            let Some(next) = current.checked_add(step) else {
                break;
            };
            current = next;
        }
    } else {
        let (mut current, end) = (clamp(start, -1, len - 1), clamp(end, -1, len - 1));
        while current > end {
            positions.push(i64_to_usize_checked(current, line)?);
            let Some(next) = current.checked_add(step) else {
                break;
            };
            current = next;
        }
    }
    Ok(positions)
}

/// Reads the bounds of a `slice(start, end[, step])` call.
pub fn slice_arguments(args: &[Value], line: usize) -> EvalResult<(i64, i64, i64)> {
    let start = args[0].as_integer(line)?;
    let end = args[1].as_integer(line)?;
    let step = args.get(2).map_or(Ok(1), |step| step.as_integer(line))?;
    Ok((start, end, step))
}

/// Returns the list inside `value`, or an `InvalidArgument` error naming the
/// builtin that needed it.
pub fn expect_list<'a>(value: &'a Value, what: &str, line: usize) -> EvalResult<&'a [Value]> {
    match value {
        Value::List(list) => Ok(list),
        other => Err(RuntimeError::InvalidArgument { details: format!("{what} requires a list, got {}", other.type_name()),
                                                     line }),
    }
}
