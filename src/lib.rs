//! # scriptit
//!
//! scriptit is a tree-walking interpreter for ScriptIt, a small scripting
//! language whose statements end with a dot. It supports variables with
//! lexical frames, functions overloaded by arity with by-reference
//! parameters, range and collection loops, lists, sets and dicts with dot
//! methods, and scoped file resources.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use tracing::debug;

use crate::{
    error::Error,
    interpreter::{
        evaluator::core::Context,
        lexer::{Token, tokenize},
        parser::core::parse_program,
        value::core::Value,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the statement and expression types produced by the
/// parser. Expressions are postfix sequences, so the evaluator runs them on
/// a value stack instead of walking a tree; statements form a tree of
/// blocks.
///
/// # Responsibilities
/// - Defines statement and expression types for all language constructs.
/// - Attaches source lines to every postfix item and statement for error
///   reporting.
/// - Records operator precedence for the postfix conversion.
pub mod ast;
/// Lexing, parsing and runtime errors.
///
/// Each stage has its own enum and every variant records the source line it
/// was raised on. [`error::Error`] wraps all three for the entry points, and
/// its `Display` output is what the CLI prints after `Error: `.
pub mod error;
/// The ScriptIt runtime.
///
/// Source text goes through the [`lexer`](interpreter::lexer), the
/// [`parser`](interpreter::parser) and finally the
/// [`evaluator`](interpreter::evaluator), whose `Context` owns the scope
/// chain, the I/O streams and the open files.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// This module provides conversions between `i64`, `usize`, `u32` and `f64`
/// used by the evaluator, so no conversion silently loses data.
pub mod util;

/// Runs a complete program.
///
/// The source is tokenized and parsed in full before anything executes, so
/// a syntax error anywhere means no statement runs. Statements then execute
/// in the root frame of `context`; variables and functions they define stay
/// there after the call returns.
///
/// # Errors
/// Returns the lexing, parsing or runtime error that stopped the program.
///
/// # Examples
/// ```
/// use scriptit::{
///     interpreter::{evaluator::core::Context, io::SharedOutput},
///     run_program,
/// };
///
/// let output = SharedOutput::new();
/// let mut context = Context::with_io(output.clone(), std::io::empty());
///
/// let source = "fn add(x, y): give(x + y). ;\nprint(add(2, 3)).";
/// assert!(run_program(source, &mut context).is_ok());
/// assert_eq!(output.contents(), "5\n");
///
/// // `y` was never declared, so assigning to it fails.
/// assert!(run_program("y = 1.", &mut context).is_err());
/// ```
pub fn run_program(source: &str, context: &mut Context) -> Result<(), Error> {
    let tokens = tokenize(source)?;
    debug!(tokens = tokens.len(), "tokenized program");

    let program = parse_program(&tokens)?;
    context.run_program(&program)?;
    Ok(())
}

/// Runs the statements in `tokens` as one interactive unit.
///
/// Unlike [`run_program`], a trailing expression statement is not printed:
/// its value is returned so the caller can show it (the REPL stores it in
/// `ans`). `None` results come back as `Ok(None)`.
///
/// # Errors
/// Returns the parsing or runtime error that stopped execution.
///
/// # Examples
/// ```
/// use scriptit::{
///     interpreter::{evaluator::core::Context, lexer::tokenize, value::core::Value},
///     run_statement,
/// };
///
/// let mut context = Context::new();
///
/// let tokens = tokenize("var x = 4.").unwrap();
/// assert_eq!(run_statement(&tokens, &mut context).unwrap(), None);
///
/// let tokens = tokenize("x * 2").unwrap();
/// assert_eq!(run_statement(&tokens, &mut context).unwrap(), Some(Value::Integer(8)));
/// ```
pub fn run_statement(tokens: &[Token], context: &mut Context) -> Result<Option<Value>, Error> {
    let program = parse_program(tokens)?;
    Ok(context.run_interactive(&program)?)
}
