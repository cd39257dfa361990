/// Method dispatch.
///
/// Looks the method up in the receiver's type table, then in the universal
/// table, and reports unknown names and wrong argument counts.
pub mod core;
/// Methods every value supports: type checks and conversions.
pub mod universal;
/// String methods. Strings are never mutated; every method returns a new
/// value.
pub mod string;
/// List methods, including the ones that mutate the receiver in place.
pub mod list;
/// Set methods.
pub mod set;
/// Dict methods.
pub mod dict;
