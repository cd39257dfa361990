/// Numeric conversion helpers.
///
/// This module provides the conversions between `i64`, `usize` and `f64` used
/// by the evaluator. Conversions that can fail return a `Result` carrying a
/// runtime error with the source line, so callers only need `?`.
pub mod num;
