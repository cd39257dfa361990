/// Builtin registry and the call protocol.
///
/// Declares the builtin tables with their arities and resolves a call to a
/// math builtin, a general builtin or a user function, in that order.
pub mod core;
/// Output, input and file builtins.
///
/// `print`, `pprint`, `input`, `read`, `readLine`, `write`, `open` and
/// `close`.
pub mod io;
/// Conversion and type inspection builtins.
///
/// `len`, `type`, `str`, `int`, `float`, `bool`, `repr` and `isinstance`.
pub mod convert;
/// Container constructors and free-function container helpers.
///
/// `list`, `set`, `dict`, `range_list`, `append` and `pop`.
pub mod container;
/// Iteration helpers.
///
/// `sum`, `sorted`, `reversed`, `all`, `any`, `enumerate` and `zip`.
pub mod functional;
/// Math builtins.
///
/// Trigonometry, logarithms, roots, rounding, `abs`, `min` and `max`.
pub mod math;
