use crate::{
    ast::PostfixItem,
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, TokenCursor, parse_expression},
    },
};

/// Parses a comma-separated list of expressions until a closing token.
///
/// This utility is shared by call arguments, method arguments, list literals
/// and set literals. Every element is appended to `out` in order, a
/// short-circuit node as one lazy item, so the caller only has to push the
/// counting marker afterwards.
///
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := (expression ("," expression)*)? closing`
///
/// # Parameters
/// - `cursor`: Token cursor positioned after the opening token.
/// - `closing`: The token that terminates the list (e.g. `]` or `)`).
/// - `expected`: Message used when the closing token is missing.
/// - `out`: The postfix sequence receiving the elements.
///
/// # Returns
/// The number of elements parsed.
///
/// # Errors
/// Returns a `ParseError` if an element fails to parse or the closing token
/// is missing.
pub(in crate::interpreter::parser) fn parse_comma_separated(cursor: &mut TokenCursor,
                                                            closing: &TokenKind,
                                                            expected: &str,
                                                            out: &mut Vec<PostfixItem>)
                                                            -> ParseResult<usize> {
    let mut count = 0;

    cursor.skip_newlines();
    if !cursor.check(closing) {
        loop {
            parse_expression(cursor)?.flatten_into(out);
            count += 1;
            if !cursor.matches(&TokenKind::Comma) {
                break;
            }
        }
    }

    cursor.expect(closing, expected)?;
    Ok(count)
}

/// Parses the contents of a `{ ... }` literal after the opening brace.
///
/// The first element decides the literal kind: an `->` after it makes a dict
/// of key/value pairs, anything else a set. `{}` is an empty set.
///
/// Grammar:
/// ```text
///     braces := "}"
///             | expression ("," expression)* "}"
///             | expression "->" expression ("," expression "->" expression)* "}"
/// ```
///
/// # Parameters
/// - `cursor`: Token cursor positioned after `{`.
/// - `line`: Line of the opening brace.
/// - `out`: The postfix sequence receiving the elements and the marker.
///
/// # Errors
/// Returns a `ParseError` if an element fails to parse, a dict entry lacks
/// its `->`, or the closing brace is missing.
pub(in crate::interpreter::parser) fn parse_brace_literal(cursor: &mut TokenCursor,
                                                          line: usize,
                                                          out: &mut Vec<PostfixItem>)
                                                          -> ParseResult<()> {
    cursor.skip_newlines();
    if cursor.check(&TokenKind::RBrace) {
        cursor.advance();
        out.push(PostfixItem::Set { count: 0, line });
        return Ok(());
    }

    let first = parse_expression(cursor)?;
    if !cursor.matches(&TokenKind::Arrow) {
        first.flatten_into(out);
        let mut count = 1;
        while cursor.matches(&TokenKind::Comma) {
            parse_expression(cursor)?.flatten_into(out);
            count += 1;
        }
        cursor.expect(&TokenKind::RBrace, "Expected } to close set")?;
        out.push(PostfixItem::Set { count, line });
        return Ok(());
    }

    first.flatten_into(out);
    parse_expression(cursor)?.flatten_into(out);
    let mut count = 1;
    while cursor.matches(&TokenKind::Comma) {
        parse_expression(cursor)?.flatten_into(out);
        cursor.expect(&TokenKind::Arrow, "Expected -> in dict literal")?;
        parse_expression(cursor)?.flatten_into(out);
        count += 1;
    }
    cursor.expect(&TokenKind::RBrace, "Expected } to close dict")?;
    out.push(PostfixItem::Dict { count, line });
    Ok(())
}

/// Returns `true` when the tokens at `offset` form `.name(` with the dot
/// touching the name.
///
/// A dot followed by anything else is a statement terminator.
pub(in crate::interpreter::parser) fn starts_method_call(cursor: &TokenCursor, offset: usize) -> bool {
    let (Some(dot), Some(name), Some(paren)) =
        (cursor.peek_at(offset), cursor.peek_at(offset + 1), cursor.peek_at(offset + 2))
    else {
        return false;
    };

    dot.kind == TokenKind::Dot
    && matches!(name.kind, TokenKind::Identifier(_))
    && dot.end() == name.offset
    && paren.kind == TokenKind::LParen
}

/// Consumes the statement terminator.
///
/// A `.` is always accepted. A missing `.` is forgiven at the end of input,
/// before `;`, `elif` or `else`, and when the next token starts on a later
/// line than the last consumed one.
///
/// # Errors
/// `MissingTerminator` when another statement follows on the same line.
pub(in crate::interpreter::parser) fn consume_terminator(cursor: &mut TokenCursor) -> ParseResult<()> {
    if cursor.matches(&TokenKind::Dot) {
        return Ok(());
    }

    match cursor.peek() {
        None => Ok(()),
        Some(token) if matches!(token.kind, TokenKind::Semicolon | TokenKind::Elif | TokenKind::Else) => Ok(()),
        Some(token) if token.line > cursor.last_line() => Ok(()),
        Some(_) => Err(ParseError::MissingTerminator { line: cursor.last_line() }),
    }
}
