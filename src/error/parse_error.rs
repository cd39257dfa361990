use thiserror::Error;

/// Represents all errors that can occur during parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A specific token was required but something else was found.
    #[error("{expected} at line {line}")]
    Expected {
        /// What the grammar required, phrased for the user
        /// (e.g. `Expected : after if condition`).
        expected: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Two statements share a line without a `.` between them.
    #[error("Expected '.' at line {line}")]
    MissingTerminator {
        /// The line of the last consumed token.
        line: usize,
    },
    /// A token that cannot start a statement or expression.
    #[error("Unexpected token '{token}' at line {line}")]
    UnexpectedToken {
        /// The token text.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// The same parameter name appears twice in one function signature.
    #[error("Duplicate parameter name '{parameter}' in function '{function}'")]
    DuplicateParameter {
        /// The repeated parameter.
        parameter: String,
        /// The function being defined.
        function:  String,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// A function body with no statements.
    #[error("Empty function body not allowed, use 'pass'.")]
    EmptyFunctionBody {
        /// The function being defined.
        function: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An opening parenthesis was never closed.
    #[error("Mismatched parens at end")]
    MismatchedParens {
        /// The source line where the error occurred.
        line: usize,
    },
    /// `of` followed something that is not a call.
    #[error("Expected a function or method call before 'of' at line {line}")]
    InvalidOfTarget {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl ParseError {
    /// Returns the source line the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Expected { line, .. }
            | Self::MissingTerminator { line }
            | Self::UnexpectedToken { line, .. }
            | Self::DuplicateParameter { line, .. }
            | Self::EmptyFunctionBody { line, .. }
            | Self::MismatchedParens { line }
            | Self::InvalidOfTarget { line } => *line,
        }
    }
}
