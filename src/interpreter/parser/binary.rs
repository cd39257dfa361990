use crate::{
    ast::{BinaryOperator, Expression, LogicalOperator, PostfixItem, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{ParseResult, TokenCursor},
            unary::{Previous, prefix_operator},
            utils::{parse_brace_literal, parse_comma_separated, starts_method_call},
        },
    },
};

/// Parses a logical OR chain.
///
/// Grammar: `logical_or := logical_and ("||" logical_and)*`
///
/// # Parameters
/// - `cursor`: Token cursor positioned at the start of the operand.
///
/// # Returns
/// The left operand alone, or a `Logical` node that only evaluates its right
/// side when the left one is falsy.
pub(in crate::interpreter::parser) fn parse_logical_or(cursor: &mut TokenCursor) -> ParseResult<Expression> {
    let mut left = parse_logical_and(cursor)?;

    while let Some(token) = cursor.peek()
          && token.kind == TokenKind::OrOr
    {
        cursor.advance();
        let right = parse_logical_and(cursor)?;
        left = Expression::Logical { op:    LogicalOperator::Or,
                                     left:  Box::new(left),
                                     right: Box::new(right),
                                     line:  token.line, };
    }

    Ok(left)
}

/// Parses a logical AND chain.
///
/// Grammar: `logical_and := operators ("&&" operators)*`
pub(in crate::interpreter::parser) fn parse_logical_and(cursor: &mut TokenCursor) -> ParseResult<Expression> {
    let mut left = Expression::Postfix(parse_operators(cursor)?);

    while let Some(token) = cursor.peek()
          && token.kind == TokenKind::AndAnd
    {
        cursor.advance();
        let right = Expression::Postfix(parse_operators(cursor)?);
        left = Expression::Logical { op:    LogicalOperator::And,
                                     left:  Box::new(left),
                                     right: Box::new(right),
                                     line:  token.line, };
    }

    Ok(left)
}

/// An operator waiting on the shunting-yard stack.
#[derive(Debug, Clone, Copy)]
enum Pending {
    Binary(BinaryOperator, usize),
    Unary(UnaryOperator, usize),
}

impl Pending {
    const fn precedence(self) -> u8 {
        match self {
            Self::Binary(op, _) => op.precedence(),
            Self::Unary(..) => UnaryOperator::PRECEDENCE,
        }
    }

    const fn into_item(self) -> PostfixItem {
        match self {
            Self::Binary(op, line) => PostfixItem::Binary { op, line },
            Self::Unary(op, line) => PostfixItem::Unary { op, line },
        }
    }
}

/// Maps an arithmetic or comparison token to its operator.
const fn binary_operator(kind: &TokenKind) -> Option<BinaryOperator> {
    Some(match kind {
        TokenKind::Plus => BinaryOperator::Add,
        TokenKind::Minus => BinaryOperator::Sub,
        TokenKind::Star => BinaryOperator::Mul,
        TokenKind::Slash => BinaryOperator::Div,
        TokenKind::Percent => BinaryOperator::Mod,
        TokenKind::Caret => BinaryOperator::Pow,
        TokenKind::EqualEqual => BinaryOperator::Equal,
        TokenKind::NotEqual => BinaryOperator::NotEqual,
        TokenKind::Less => BinaryOperator::Less,
        TokenKind::LessEqual => BinaryOperator::LessEqual,
        TokenKind::Greater => BinaryOperator::Greater,
        TokenKind::GreaterEqual => BinaryOperator::GreaterEqual,
        _ => return None,
    })
}

/// Tokens that end an expression wherever they appear.
const fn ends_expression(kind: &TokenKind) -> bool {
    matches!(kind,
             TokenKind::Colon
             | TokenKind::Semicolon
             | TokenKind::In
             | TokenKind::To
             | TokenKind::Step
             | TokenKind::Elif
             | TokenKind::Else
             | TokenKind::Be
             | TokenKind::Assign
             | TokenKind::Newline
             | TokenKind::Of
             | TokenKind::Arrow
             | TokenKind::PlusAssign
             | TokenKind::MinusAssign
             | TokenKind::StarAssign
             | TokenKind::SlashAssign
             | TokenKind::PercentAssign
             | TokenKind::PlusPlus
             | TokenKind::MinusMinus
             | TokenKind::RParen
             | TokenKind::RBracket
             | TokenKind::RBrace
             | TokenKind::Comma
             | TokenKind::AndAnd
             | TokenKind::OrOr)
}

/// Pops every pending operator that binds at least as tightly as `op`, then
/// pushes `op`.
fn push_binary(out: &mut Vec<PostfixItem>, pending: &mut Vec<Pending>, op: BinaryOperator, line: usize) {
    while let Some(&top) = pending.last()
          && top.precedence() >= op.precedence()
    {
        out.push(top.into_item());
        pending.pop();
    }
    pending.push(Pending::Binary(op, line));
}

/// Checks that an operand may start here.
///
/// After a number, name, call or group, an operand that allows it gets an
/// implicit `*` in front (`2x`, `3(4)`). Any other operand directly after
/// an operand is rejected.
fn begin_operand(out: &mut Vec<PostfixItem>,
                 pending: &mut Vec<Pending>,
                 previous: Previous,
                 implicit: bool,
                 token: &Token)
                 -> ParseResult<()> {
    match previous {
        Previous::Operand if implicit => {
            push_binary(out, pending, BinaryOperator::Mul, token.line);
            Ok(())
        },
        Previous::Operand | Previous::Literal => Err(ParseError::UnexpectedToken { token: token.text.clone(),
                                                                                   line:  token.line, }),
        Previous::Start | Previous::Operator => Ok(()),
    }
}

/// Converts everything between the short-circuit operators into a postfix
/// sequence.
///
/// This is a shunting-yard pass. Operands go straight to the output, binary
/// operators wait on a stack until something of lower or equal precedence
/// arrives, and prefix operators are stacked without popping so that they
/// apply to the operand that follows them. Calls, method calls and literal
/// containers parse their elements recursively and leave a counting marker.
///
/// A parenthesized group is parsed as a full logical expression and lands
/// in the output as one operand.
///
/// The pass stops, without consuming, at any token that cannot continue the
/// expression: statement punctuation, assignment operators, keywords, a `.`
/// that does not start a method call, `,` `)` `&&` and `||`.
///
/// # Parameters
/// - `cursor`: Token cursor positioned at the start of the operand.
///
/// # Returns
/// The postfix sequence; empty when the first token cannot start an
/// expression.
///
/// # Errors
/// - `MismatchedParens` if a group is not closed by `)`.
/// - `UnexpectedToken` for an operand directly after another operand, such
///   as `"a" x`.
/// - Propagates errors from argument and literal parsing.
pub(in crate::interpreter::parser) fn parse_operators(cursor: &mut TokenCursor) -> ParseResult<Vec<PostfixItem>> {
    let mut out = Vec::new();
    let mut pending: Vec<Pending> = Vec::new();
    let mut previous = Previous::Start;

    while let Some(token) = cursor.peek() {
        let line = token.line;

        match &token.kind {
            kind if ends_expression(kind) => break,
            TokenKind::Dot => {
                if !starts_method_call(cursor, 0) {
                    break;
                }
                cursor.advance();
                let (name, line) = cursor.expect_identifier("Expected method name")?;
                cursor.advance();
                let argc = parse_comma_separated(cursor, &TokenKind::RParen, "Expected ) after method arguments", &mut out)?;
                out.push(PostfixItem::MethodCall { name: name.to_string(),
                                                   argc,
                                                   line });
                previous = Previous::Operand;
            },
            TokenKind::Is => {
                cursor.advance();
                let op = if cursor.check(&TokenKind::Bang) {
                    cursor.advance();
                    BinaryOperator::IsNot
                } else {
                    BinaryOperator::Is
                };
                push_binary(&mut out, &mut pending, op, line);
                previous = Previous::Operator;
            },
            TokenKind::Points => {
                cursor.advance();
                push_binary(&mut out, &mut pending, BinaryOperator::Points, line);
                previous = Previous::Operator;
            },
            TokenKind::Bang if cursor.peek_at(1).is_some_and(|t| t.kind == TokenKind::Points) => {
                cursor.advance();
                cursor.advance();
                push_binary(&mut out, &mut pending, BinaryOperator::NotPoints, line);
                previous = Previous::Operator;
            },
            TokenKind::LParen => {
                begin_operand(&mut out, &mut pending, previous, true, token)?;
                cursor.advance();
                let group = parse_logical_or(cursor)?;
                if !cursor.matches(&TokenKind::RParen) {
                    return Err(ParseError::MismatchedParens { line: cursor.last_line() });
                }
                group.flatten_into(&mut out);
                previous = Previous::Operand;
            },
            TokenKind::Identifier(_) if cursor.peek_at(1).is_some_and(|t| t.kind == TokenKind::Assign) => break,
            TokenKind::Identifier(name) => {
                begin_operand(&mut out, &mut pending, previous, true, token)?;
                cursor.advance();
                if cursor.check(&TokenKind::LParen) {
                    cursor.advance();
                    let argc = parse_comma_separated(cursor, &TokenKind::RParen, "Expected ) after arguments", &mut out)?;
                    out.push(PostfixItem::Call { name: name.clone(),
                                                 argc,
                                                 line });
                } else {
                    out.push(PostfixItem::Identifier { name: name.clone(),
                                                       line });
                }
                previous = Previous::Operand;
            },
            TokenKind::Number(text) => {
                begin_operand(&mut out, &mut pending, previous, true, token)?;
                cursor.advance();
                out.push(PostfixItem::Number { text: text.clone(),
                                               line });
                previous = Previous::Operand;
            },
            TokenKind::Str(value) => {
                begin_operand(&mut out, &mut pending, previous, false, token)?;
                cursor.advance();
                out.push(PostfixItem::Str { value: value.clone(),
                                            line });
                previous = Previous::Literal;
            },
            TokenKind::LBracket => {
                begin_operand(&mut out, &mut pending, previous, false, token)?;
                cursor.advance();
                let count = parse_comma_separated(cursor, &TokenKind::RBracket, "Expected ] to close list", &mut out)?;
                out.push(PostfixItem::List { count, line });
                previous = Previous::Operand;
            },
            TokenKind::LBrace => {
                begin_operand(&mut out, &mut pending, previous, false, token)?;
                cursor.advance();
                parse_brace_literal(cursor, line, &mut out)?;
                previous = Previous::Literal;
            },
            kind => {
                if let Some(op) = prefix_operator(kind, previous) {
                    if !previous.expects_operand() {
                        return Err(ParseError::UnexpectedToken { token: token.text.clone(),
                                                                 line });
                    }
                    cursor.advance();
                    pending.push(Pending::Unary(op, line));
                } else if let Some(op) = binary_operator(kind) {
                    cursor.advance();
                    push_binary(&mut out, &mut pending, op, line);
                } else {
                    break;
                }
                previous = Previous::Operator;
            },
        }
    }

    out.extend(pending.into_iter().rev().map(Pending::into_item));

    Ok(out)
}
