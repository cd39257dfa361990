use crate::{ast::UnaryOperator, interpreter::lexer::TokenKind};

/// What the operator pass consumed most recently.
///
/// The category decides two things: whether a `-`/`!` is a prefix operator
/// and whether an implicit `*` goes in front of the next operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(in crate::interpreter::parser) enum Previous {
    /// Nothing yet.
    Start,
    /// A number, a name, a call, a group or a list. Adjacent operands
    /// multiply.
    Operand,
    /// A string, set or dict. Never multiplied implicitly.
    Literal,
    /// A binary or unary operator.
    Operator,
}

impl Previous {
    /// Returns `true` when a prefix operator may appear here.
    pub(in crate::interpreter::parser) const fn expects_operand(self) -> bool {
        matches!(self, Self::Start | Self::Operator)
    }
}

/// Maps a token in prefix position to its unary operator.
///
/// `!`/`not` is always a prefix operator. `-` is one only where an operand is
/// expected, so `a - b` stays a subtraction while `(-b)` and `a * -b`
/// negate.
///
/// # Parameters
/// - `kind`: The operator token.
/// - `previous`: What the pass consumed before it.
///
/// # Returns
/// The unary operator, or `None` when the token is a binary operator here.
pub(in crate::interpreter::parser) const fn prefix_operator(kind: &TokenKind,
                                                            previous: Previous)
                                                            -> Option<UnaryOperator> {
    match kind {
        TokenKind::Bang => Some(UnaryOperator::Not),
        TokenKind::Minus if previous.expects_operand() => Some(UnaryOperator::Negate),
        _ => None,
    }
}
