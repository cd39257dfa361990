use thiserror::Error;

/// Represents all errors that can occur during evaluation and runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Assignment to a name that is neither local nor reachable without
    /// crossing a function-call barrier.
    #[error("Undefined variable '{name}' in current scope (cannot mutate outer scope).")]
    UndefinedForMutation {
        /// The name of the variable.
        name: String,
    },
    /// A forward declaration for a key that already has a body.
    #[error("Function '{name}' with {arity} params is already defined (cannot re-declare)")]
    AlreadyDefined {
        /// The name of the function.
        name:  String,
        /// The number of parameters.
        arity: usize,
    },
    /// No builtin and no user function matches the name and argument count.
    #[error("Unknown function call: {name} at line {line}")]
    UnknownFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The function was declared with `fn name(...).` but never given a body.
    #[error("Function '{name}' was forward-declared but never defined at line {line}")]
    ForwardDeclared {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Too many nested user function calls.
    #[error("Maximum call depth of {limit} exceeded at line {line}")]
    CallDepthExceeded {
        /// The configured limit.
        limit: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Attempted division by zero.
    #[error("Division by zero at line {line}")]
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted modulo by zero.
    #[error("Modulo by zero at line {line}")]
    ModuloByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A numeric value was expected, but not found.
    #[error("Cannot convert {type_name} to number at line {line}")]
    NotANumber {
        /// Type name of the offending value.
        type_name: &'static str,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// A binary operator does not support this pair of operand types.
    #[error("Unsupported operand types for '{operator}': {left} and {right} at line {line}")]
    UnsupportedOperands {
        /// The operator symbol.
        operator: &'static str,
        /// Type name of the left operand.
        left:     &'static str,
        /// Type name of the right operand.
        right:    &'static str,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A numeric literal that cannot be represented.
    #[error("Invalid numeric literal '{literal}' at line {line}")]
    InvalidNumber {
        /// The literal as written.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A range loop with a step of zero.
    #[error("Step cannot be zero in range at line {line}")]
    ZeroStep {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A collection loop over something that cannot be iterated.
    #[error("for-in requires a list, string, or set; got {type_name} at line {line}")]
    NotIterable {
        /// Type name of the offending value.
        type_name: &'static str,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// The receiver type has no method of this name.
    #[error("Unknown method '{method}' on type '{type_name}' at line {line}")]
    UnknownMethod {
        /// The method name.
        method:    String,
        /// Type name of the receiver.
        type_name: &'static str,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// The method exists for this type but not with this many arguments.
    #[error("Method '{method}' on {type_name} does not accept {count} argument(s) at line {line}")]
    MethodArity {
        /// The method name.
        method:    String,
        /// Type name of the receiver.
        type_name: &'static str,
        /// The number of arguments supplied.
        count:     usize,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// A builtin was called with an unsupported number of arguments.
    #[error("{name}() takes {expected} argument(s), got {found} at line {line}")]
    BuiltinArity {
        /// The builtin name.
        name:     &'static str,
        /// Human readable description of the accepted counts.
        expected: String,
        /// The number of arguments supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An argument was invalid or out of range.
    #[error("{details} at line {line}")]
    InvalidArgument {
        /// Details about why the argument is invalid.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// An index outside the bounds of a string or list.
    #[error("Index {index} out of range for length {len} at line {line}")]
    IndexOutOfRange {
        /// The requested index.
        index: i64,
        /// The length of the indexed value.
        len:   usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A file operation failed.
    #[error("{details} at line {line}")]
    Io {
        /// What failed, including the path.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A postfix sequence did not leave enough operands on the stack.
    #[error("Stack underflow for {what} at line {line}")]
    StackUnderflow {
        /// What was being evaluated.
        what: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A postfix sequence left more than one value on the stack.
    #[error("Malformed expression: {count} values left on the stack at line {line}")]
    MalformedExpression {
        /// How many values were left.
        count: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
}
