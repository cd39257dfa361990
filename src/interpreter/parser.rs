/// Core parsing entry points.
///
/// Contains the token cursor, the program and expression entry points, and
/// the `of` call sugar.
pub mod core;

/// Short-circuit layers and the operator pass.
///
/// Builds `&&`/`||` nodes and turns everything below them into postfix
/// sequences with a shunting-yard pass.
pub mod binary;

/// Unary operator placement.
///
/// Decides whether a `-` or `!` is a prefix operator or a binary one.
pub mod unary;

/// Block parsing.
///
/// Parses statement blocks and the compound statements that own them:
/// conditionals and loops.
pub mod block;

/// Utility functions for the parser.
///
/// Provides helpers for argument lists, literal contents, method-call
/// lookahead and statement terminators.
pub mod utils;

/// Statement parsing.
///
/// Implements declarations, assignments, function definitions, returns and
/// expression statements.
pub mod statement;
