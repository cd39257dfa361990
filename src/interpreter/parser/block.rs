use crate::{
    ast::{Block, Branch, Expression, PostfixItem, Statement},
    interpreter::{
        lexer::TokenKind,
        parser::{
            core::{ParseResult, TokenCursor, parse_expression},
            statement::parse_statement,
        },
    },
};

/// Parses statements until one of `terminators` (or the end of input) is
/// next.
///
/// The terminator itself is left for the caller, which knows whether it is
/// the `;` closing a body or an `elif`/`else` continuing a conditional.
///
/// Grammar: `block := statement*`
///
/// # Parameters
/// - `cursor`: Token cursor positioned after the `:` opening the block.
/// - `terminators`: Tokens that end the block.
///
/// # Returns
/// The statements of the block; possibly empty.
pub fn parse_block(cursor: &mut TokenCursor, terminators: &[TokenKind]) -> ParseResult<Block> {
    let mut statements = Vec::new();

    loop {
        cursor.skip_newlines();
        match cursor.peek() {
            Some(token) if !terminators.contains(&token.kind) => statements.push(parse_statement(cursor)?),
            _ => break,
        }
    }

    Ok(Block { statements })
}

/// Parses an `if` statement with optional `elif` and `else` branches.
///
/// Syntax:
/// ```text
///     if <condition>:
///         ...
///     elif <condition>:
///         ...
///     else:
///         ...
///     ;
/// ```
/// The whole structure is closed by a single `;`.
///
/// # Parameters
/// - `cursor`: Token cursor positioned after the `if` keyword.
///
/// # Returns
/// A `Statement::If` node.
///
/// # Errors
/// - `Expected` if a `:` or the closing `;` is missing.
/// - Propagates any errors from condition and block parsing.
pub fn parse_if(cursor: &mut TokenCursor) -> ParseResult<Statement> {
    let mut branches = vec![parse_branch(cursor, "Expected : after if condition")?];

    while cursor.matches(&TokenKind::Elif) {
        branches.push(parse_branch(cursor, "Expected : after elif condition")?);
    }

    let else_block = if cursor.matches(&TokenKind::Else) {
        cursor.expect(&TokenKind::Colon, "Expected : after else")?;
        Some(parse_block(cursor, &[TokenKind::Semicolon])?)
    } else {
        None
    };

    cursor.expect(&TokenKind::Semicolon, "Expected ; at end of if-structure")?;
    Ok(Statement::If { branches, else_block })
}

fn parse_branch(cursor: &mut TokenCursor, expected: &str) -> ParseResult<Branch> {
    let condition = parse_expression(cursor)?;
    cursor.expect(&TokenKind::Colon, expected)?;
    let block = parse_block(cursor, &[TokenKind::Elif, TokenKind::Else, TokenKind::Semicolon])?;
    Ok(Branch { condition, block })
}

/// Parses a `for` loop.
///
/// Two forms are supported:
/// ```text
///     for i in range(10): ... ;
///     for i in range(from 1 to 10 step 2): ... ;
///     for x in items: ... ;
/// ```
/// `range(n)` counts from 0 to `n` inclusive. The `step` clause is optional
/// and defaults to one step toward the bound.
///
/// # Parameters
/// - `cursor`: Token cursor positioned after the `for` keyword.
///
/// # Returns
/// A `Statement::ForRange` or `Statement::ForIn` node.
///
/// # Errors
/// - `Expected` for a missing iterator name, `in`, `to`, `)`, `:` or `;`.
/// - Propagates any errors from expression and block parsing.
pub fn parse_for(cursor: &mut TokenCursor) -> ParseResult<Statement> {
    let (iterator, line) = cursor.expect_identifier("Expected iterator name after for")?;
    let iterator = iterator.to_string();
    cursor.expect(&TokenKind::In, "Expected 'in' after for iterator")?;

    cursor.skip_newlines();
    if !cursor.check(&TokenKind::Range) {
        let iterable = parse_expression(cursor)?;
        let body = parse_loop_body(cursor)?;
        return Ok(Statement::ForIn { iterator,
                                     iterable,
                                     body,
                                     line });
    }

    cursor.advance();
    cursor.expect(&TokenKind::LParen, "Expected ( after range")?;

    let (start, end, step) = if cursor.matches(&TokenKind::From) {
        let start = parse_expression(cursor)?;
        cursor.expect(&TokenKind::To, "Expected 'to' in range")?;
        let end = parse_expression(cursor)?;
        let step = if cursor.matches(&TokenKind::Step) {
            Some(parse_expression(cursor)?)
        } else {
            None
        };
        (start, end, step)
    } else {
        let zero = Expression::Postfix(vec![PostfixItem::Number { text: "0".to_string(),
                                                                  line }]);
        (zero, parse_expression(cursor)?, None)
    };

    cursor.expect(&TokenKind::RParen, "Expected ) to close range")?;
    let body = parse_loop_body(cursor)?;

    Ok(Statement::ForRange { iterator,
                             start,
                             end,
                             step,
                             body,
                             line })
}

/// Parses `while <condition>: ... ;`.
pub fn parse_while(cursor: &mut TokenCursor) -> ParseResult<Statement> {
    let condition = parse_expression(cursor)?;
    let body = parse_loop_body(cursor)?;
    Ok(Statement::While { condition, body })
}

fn parse_loop_body(cursor: &mut TokenCursor) -> ParseResult<Block> {
    cursor.expect(&TokenKind::Colon, "Expected : before loop body")?;
    let body = parse_block(cursor, &[TokenKind::Semicolon])?;
    cursor.expect(&TokenKind::Semicolon, "Expected ; after loop body")?;
    Ok(body)
}
