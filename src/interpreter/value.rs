/// Set value representation.
///
/// Defines the `SetValue` type, which is used for the elements of a
/// `Value::Set`. Gives every runtime value a total order so that sets stay
/// sorted and deduplicated, with integers and reals compared numerically.
pub mod set_value;

/// Display, `repr` and pretty-printing for runtime values.
///
/// Reals use six significant digits in the style of C's `%g`, containers
/// print their elements with their display form, and `pprint` gets an
/// indented multi-line layout.
pub mod display;

pub mod core;
