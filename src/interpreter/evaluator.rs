/// Binary operator evaluation logic.
///
/// Handles the execution of all binary operations in postfix sequences:
/// arithmetic with overflow promotion, string and list concatenation and
/// repetition, tolerant and strict equality, and relational comparisons.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation and logical NOT.
pub mod unary;

/// Core evaluation logic and context management.
///
/// Contains the runtime context, the control-flow signal used for `give`,
/// two-pass block execution and the scoped frame helper.
pub mod core;

/// Statement execution.
///
/// Assignments, branches, loops, function definitions, `give` and `let`
/// resource blocks.
pub mod statement;

/// Postfix sequence evaluation.
///
/// Runs a postfix sequence on a value stack, resolving calls to builtins and
/// user functions and writing mutated receivers and by-reference arguments
/// back to their variables.
pub mod postfix;

/// Evaluation of for-loop statements.
///
/// Supports numeric range loops and loops over the elements of a list,
/// string or set.
pub mod for_loop;

/// Utility functions for evaluation.
///
/// Provides helpers and reusable routines shared by the builtins and the
/// method tables.
pub mod utils;

/// Function evaluation.
///
/// Handles user-defined and built-in function calls, argument checking, and
/// return value computation.
pub mod function;

/// Dot-method dispatch.
///
/// Routes `value.method(args)` to the table for the receiver's type, falling
/// back to the methods every value supports.
pub mod method;
