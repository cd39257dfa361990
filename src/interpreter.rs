/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks statements, runs postfix expression sequences on a
/// value stack, performs arithmetic and logical operations, calls builtins,
/// methods and user functions, and reports runtime errors. It is the core
/// execution engine of the interpreter.
///
/// # Responsibilities
/// - Executes statements with two-pass blocks and explicit `give` flow.
/// - Resolves variables and functions through the scope chain.
/// - Reports runtime errors such as division by zero or unknown functions.
pub mod evaluator;
/// In-memory output capture.
///
/// Provides a cloneable writer that collects program output, for embedding
/// the interpreter and for tests.
pub mod io;
/// Turns source text into [`Token`](lexer::Token)s.
///
/// Keywords, operators, numbers and strings with escapes become tokens;
/// `#` and `--> <--` comments and backtick line continuations are dropped.
/// Every token carries its line.
pub mod lexer;
/// Builds statements from tokens.
///
/// Block statements are parsed by recursive descent. Expressions are
/// converted to postfix with a shunting-yard pass, which also joins `is
/// not` and `not points`, inserts implicit multiplication and desugars compound assignments, increments
/// and the `of` call form.
pub mod parser;
/// Open file handles.
///
/// Tracks the files opened by `open` until `close` or the end of a `let`
/// block releases them.
pub mod resource;
/// The chain of variable and function frames.
///
/// Frames are pushed for blocks, loops and calls. Function call frames are
/// mutation barriers.
pub mod scope;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares all the value types used during interpretation and
/// execution: none, booleans, integers, reals, strings, lists, sets and
/// dicts. It also provides conversions, truthiness and display formatting.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Gives set elements a total order.
/// - Formats values for `print`, `repr` and `pprint`.
pub mod value;
