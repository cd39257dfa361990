/// Lexing errors.
///
/// Raised by the tokenizer for characters that cannot start any token and
/// for string literals that never close. Always carries the source line.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while turning a token stream into
/// statements: missing terminators, unexpected tokens, malformed function
/// definitions and unbalanced brackets.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation and
/// execution. Runtime errors include things like division by zero, type
/// mismatches, barrier violations and calls to unknown functions.
pub mod runtime_error;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
use thiserror::Error;

/// Any error produced while running source code.
///
/// The three tiers stay distinct: lexing and parsing errors abort before any
/// statement runs, runtime errors abort the current top-level unit.
#[derive(Debug, Error)]
pub enum Error {
    /// The source text could not be tokenized.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// The token stream did not form a valid program.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Execution failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
