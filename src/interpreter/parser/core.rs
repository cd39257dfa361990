use tracing::debug;

use crate::{
    ast::{Block, Expression, PostfixItem},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{binary::parse_logical_or, statement::parse_statement},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// A read position over a token slice.
///
/// The parser needs to look a few tokens ahead (method calls, multiple
/// declarations) so it walks a slice instead of an iterator. The cursor also
/// remembers the line of the last consumed token, which decides whether a
/// missing `.` can be forgiven.
#[derive(Debug, Clone)]
pub struct TokenCursor<'a> {
    tokens:    &'a [Token],
    pos:       usize,
    last_line: usize,
}

impl<'a> TokenCursor<'a> {
    /// Creates a cursor positioned at the first token.
    #[must_use]
    pub const fn new(tokens: &'a [Token]) -> Self {
        Self { tokens,
               pos: 0,
               last_line: 1 }
    }

    /// The next token, newlines included.
    #[must_use]
    pub fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    /// The token `offset` places after the next one, newlines included.
    #[must_use]
    pub fn peek_at(&self, offset: usize) -> Option<&'a Token> {
        self.tokens.get(self.pos + offset)
    }

    /// The first non-newline token after the next one.
    #[must_use]
    pub fn peek_next(&self) -> Option<&'a Token> {
        self.tokens
            .get(self.pos + 1..)
            .and_then(|rest| rest.iter().find(|t| t.kind != TokenKind::Newline))
    }

    /// Consumes and returns the next token.
    pub fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        self.last_line = token.line;
        Some(token)
    }

    /// Returns `true` when every token has been consumed.
    #[must_use]
    pub const fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Index of the next token.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// The line of the most recently consumed token.
    #[must_use]
    pub const fn last_line(&self) -> usize {
        self.last_line
    }

    /// The line of the next token, or of the last consumed one at the end.
    #[must_use]
    pub fn current_line(&self) -> usize {
        self.peek().map_or(self.last_line, |t| t.line)
    }

    /// Tests the raw next token without consuming it.
    #[must_use]
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.peek().is_some_and(|t| &t.kind == kind)
    }

    /// Consumes any newline tokens.
    pub fn skip_newlines(&mut self) {
        while self.check(&TokenKind::Newline) {
            self.advance();
        }
    }

    /// Skips newlines, then consumes the next token if it is `kind`.
    pub fn matches(&mut self, kind: &TokenKind) -> bool {
        self.skip_newlines();
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Skips newlines, then requires the next token to be `kind`.
    ///
    /// # Errors
    /// `ParseError::Expected` carrying `expected` when the token differs.
    pub fn expect(&mut self, kind: &TokenKind, expected: &str) -> ParseResult<&'a Token> {
        self.skip_newlines();
        if self.check(kind)
           && let Some(token) = self.advance()
        {
            return Ok(token);
        }
        Err(ParseError::Expected { expected: expected.to_string(),
                                   line:     self.current_line(), })
    }

    /// Skips newlines, then requires an identifier and returns its name and
    /// line.
    ///
    /// # Errors
    /// `ParseError::Expected` carrying `expected` when the token is not an
    /// identifier.
    pub fn expect_identifier(&mut self, expected: &str) -> ParseResult<(&'a str, usize)> {
        self.skip_newlines();
        if let Some(token) = self.peek()
           && let TokenKind::Identifier(name) = &token.kind
        {
            self.advance();
            return Ok((name.as_str(), token.line));
        }
        Err(ParseError::Expected { expected: expected.to_string(),
                                   line:     self.current_line(), })
    }
}

/// Parses a whole program.
///
/// Grammar: `program := statement*`
///
/// # Parameters
/// - `tokens`: The tokens produced by
///   [`tokenize`](crate::interpreter::lexer::tokenize).
///
/// # Returns
/// The top-level block.
///
/// # Errors
/// The first [`ParseError`] met; nothing after it is parsed.
///
/// # Example
/// ```
/// use scriptit::interpreter::{lexer::tokenize, parser::core::parse_program};
///
/// let tokens = tokenize("var x = 1.\nprint(x)").unwrap();
/// let program = parse_program(&tokens).unwrap();
///
/// assert_eq!(program.statements.len(), 2);
/// ```
pub fn parse_program(tokens: &[Token]) -> ParseResult<Block> {
    let mut cursor = TokenCursor::new(tokens);
    let mut statements = Vec::new();

    loop {
        cursor.skip_newlines();
        if cursor.is_at_end() {
            break;
        }
        statements.push(parse_statement(&mut cursor)?);
    }

    debug!(statements = statements.len(), "parsed program");
    Ok(Block { statements })
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, logical OR, and then applies the `of` sugar:
/// `f(args) of t` calls `t.f(args)` and `m of t` calls `t.m()`.
///
/// Grammar: `expression := logical_or ("of" logical_or)?`
///
/// # Parameters
/// - `cursor`: Token cursor positioned at the start of the expression.
///
/// # Returns
/// The parsed expression. It is empty when the next token cannot start an
/// expression.
///
/// # Errors
/// - `InvalidOfTarget` if `of` follows something other than a call or a
///   bare name.
/// - Propagates any errors from sub-expression parsing.
pub fn parse_expression(cursor: &mut TokenCursor) -> ParseResult<Expression> {
    let expression = parse_logical_or(cursor)?;

    let Some(of) = cursor.peek().filter(|t| t.kind == TokenKind::Of) else {
        return Ok(expression);
    };
    cursor.advance();

    let target = parse_logical_or(cursor)?;
    let mut call = expression.into_postfix();
    let mut items = target.into_postfix();

    match call.pop() {
        Some(PostfixItem::Call { name, argc, line }) => {
            items.extend(call);
            items.push(PostfixItem::MethodCall { name, argc, line });
        },
        Some(PostfixItem::Identifier { name, line }) if call.is_empty() => {
            items.push(PostfixItem::MethodCall { name,
                                                 argc: 0,
                                                 line });
        },
        Some(method @ PostfixItem::MethodCall { .. }) => {
            items.extend(call);
            items.push(method);
        },
        _ => return Err(ParseError::InvalidOfTarget { line: of.line }),
    }

    Ok(Expression::Postfix(items))
}
