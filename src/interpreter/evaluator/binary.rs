/// Operator routing.
///
/// Picks the handler for each binary operator from the operand types.
pub mod core;
/// Numeric arithmetic.
///
/// Integer arithmetic with promotion to reals on overflow, true division and
/// a modulo that follows the sign of the divisor.
pub mod scalar;
/// Exponentiation.
pub mod power;
/// Equality, identity and ordering.
///
/// Tolerant equality for `==` and `is`, strict equality for `points`, and
/// numeric relational operators.
pub mod comparison;
/// String and list concatenation and repetition.
pub mod sequence;
