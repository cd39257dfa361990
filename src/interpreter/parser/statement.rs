use std::rc::Rc;

use crate::{
    ast::{Assignment, BinaryOperator, Expression, FunctionDef, PostfixItem, Statement},
    error::ParseError,
    interpreter::{
        evaluator::function::core::is_builtin_name,
        lexer::TokenKind,
        parser::{
            block::{parse_block, parse_for, parse_if, parse_while},
            core::{ParseResult, TokenCursor, parse_expression},
            utils::{consume_terminator, starts_method_call},
        },
    },
};

/// Parses a single statement.
///
/// The leading token decides the form:
/// - `if`, `for`, `while`: compound statements, see [`super::block`].
/// - `fn`: a function definition or forward declaration.
/// - `give`, `pass`, `let`, `var`.
/// - `x += e.` and the other compound assignments.
/// - `++x.`, `--x.`, `x++.`, `x--.`.
/// - `x = e.`: assignment to an existing variable.
///
/// Anything else is parsed as an expression statement.
///
/// # Parameters
/// - `cursor`: Token cursor positioned at the first token of the statement.
///
/// # Returns
/// A parsed [`Statement`] node.
///
/// # Errors
/// - `UnexpectedToken` if nothing can be parsed at this position.
/// - Propagates any errors from sub-parsers.
pub fn parse_statement(cursor: &mut TokenCursor) -> ParseResult<Statement> {
    cursor.skip_newlines();
    let Some(token) = cursor.peek() else {
        return Err(ParseError::Expected { expected: "Expected statement".to_string(),
                                          line:     cursor.last_line(), });
    };

    match &token.kind {
        TokenKind::If => {
            cursor.advance();
            parse_if(cursor)
        },
        TokenKind::For => {
            cursor.advance();
            parse_for(cursor)
        },
        TokenKind::While => {
            cursor.advance();
            parse_while(cursor)
        },
        TokenKind::Fn => {
            cursor.advance();
            parse_function_definition(cursor)
        },
        TokenKind::Give => {
            cursor.advance();
            parse_give(cursor, token.line)
        },
        TokenKind::Pass => {
            cursor.advance();
            consume_terminator(cursor)?;
            Ok(Statement::Pass)
        },
        TokenKind::Let => {
            cursor.advance();
            parse_let(cursor)
        },
        TokenKind::Var => {
            cursor.advance();
            parse_var(cursor)
        },
        TokenKind::PlusPlus | TokenKind::MinusMinus => {
            cursor.advance();
            let (name, line) = cursor.expect_identifier("Expected identifier after ++/--")?;
            consume_terminator(cursor)?;
            Ok(increment(name, step_operator(&token.kind), line))
        },
        TokenKind::Identifier(name) => {
            let next = cursor.peek_next().map(|t| &t.kind);
            if let Some(op) = next.and_then(compound_operator) {
                parse_compound_assignment(cursor, name, op, token.line)
            } else if next == Some(&TokenKind::Assign) {
                cursor.advance();
                cursor.matches(&TokenKind::Assign);
                let value = parse_expression(cursor)?;
                consume_terminator(cursor)?;
                Ok(Statement::Assign(Assignment { name: name.clone(),
                                                  value,
                                                  declaration: false,
                                                  line: token.line }))
            } else if let Some(kind @ (TokenKind::PlusPlus | TokenKind::MinusMinus)) = next {
                cursor.advance();
                cursor.matches(kind);
                consume_terminator(cursor)?;
                Ok(increment(name, step_operator(kind), token.line))
            } else {
                parse_expression_statement(cursor)
            }
        },
        _ => parse_expression_statement(cursor),
    }
}

/// Parses an expression evaluated for its value.
///
/// # Errors
/// `UnexpectedToken` if the expression consumed nothing, which happens when
/// the statement starts with a token such as `)` or `elif`.
fn parse_expression_statement(cursor: &mut TokenCursor) -> ParseResult<Statement> {
    let start = cursor.position();
    let expression = parse_expression(cursor)?;

    if cursor.position() == start
       && let Some(token) = cursor.peek()
    {
        return Err(ParseError::UnexpectedToken { token: token.text.clone(),
                                                 line:  token.line, });
    }

    consume_terminator(cursor)?;
    Ok(Statement::Expression(expression))
}

/// Parses `var` declarations.
///
/// Several declarations may share one statement, separated by commas or
/// just written one after another on the same line:
/// ```text
///     var a = 1, b.
///     var x = 1 y = 2 z = 3.
/// ```
/// A declaration without `=` binds `None`.
///
/// # Parameters
/// - `cursor`: Token cursor positioned after `var`.
///
/// # Returns
/// `Statement::Assign` for a single declaration, `Statement::MultiAssign`
/// otherwise.
fn parse_var(cursor: &mut TokenCursor) -> ParseResult<Statement> {
    let mut assignments = vec![parse_declaration(cursor)?];

    loop {
        if cursor.check(&TokenKind::Comma) {
            cursor.advance();
        } else if !continues_declarations(cursor) {
            break;
        }
        assignments.push(parse_declaration(cursor)?);
    }

    consume_terminator(cursor)?;

    if assignments.len() == 1
       && let Some(assignment) = assignments.pop()
    {
        return Ok(Statement::Assign(assignment));
    }
    Ok(Statement::MultiAssign(assignments))
}

/// Parses `name` or `name = expression` inside a `var` statement.
fn parse_declaration(cursor: &mut TokenCursor) -> ParseResult<Assignment> {
    let (name, line) = cursor.expect_identifier("Expected identifier after var")?;

    let value = if cursor.check(&TokenKind::Assign) {
        cursor.advance();
        parse_expression(cursor)?
    } else {
        Expression::none(line)
    };

    Ok(Assignment { name: name.to_string(),
                    value,
                    declaration: true,
                    line })
}

/// Decides whether another declaration follows without a comma.
///
/// The next token must be a plain identifier on the same line that is not a
/// builtin or a literal name, and the token after it must be one that can
/// follow a declared name.
fn continues_declarations(cursor: &TokenCursor) -> bool {
    let Some(token) = cursor.peek() else {
        return false;
    };
    let TokenKind::Identifier(name) = &token.kind else {
        return false;
    };
    if token.line != cursor.last_line() || is_builtin_name(name) || matches!(name.as_str(), "True" | "False" | "None") {
        return false;
    }

    match cursor.peek_next().map(|t| &t.kind) {
        None | Some(TokenKind::Assign | TokenKind::Comma | TokenKind::Identifier(_)) => true,
        Some(TokenKind::Dot) => !starts_method_call(cursor, 1),
        Some(_) => false,
    }
}

/// Parses `let name be expression.` or the resource form
/// `let name be expression: block ;`.
fn parse_let(cursor: &mut TokenCursor) -> ParseResult<Statement> {
    let (name, line) = cursor.expect_identifier("Expected identifier after let")?;
    cursor.expect(&TokenKind::Be, "Expected 'be' after let name")?;
    let value = parse_expression(cursor)?;

    if cursor.check(&TokenKind::Colon) {
        cursor.advance();
        let body = parse_block(cursor, &[TokenKind::Semicolon])?;
        cursor.expect(&TokenKind::Semicolon, "Expected ; after let block")?;
        return Ok(Statement::LetContext { name: name.to_string(),
                                          resource: value,
                                          body,
                                          line });
    }

    consume_terminator(cursor)?;
    Ok(Statement::Assign(Assignment { name: name.to_string(),
                                      value,
                                      declaration: true,
                                      line }))
}

/// Parses a function definition.
///
/// Syntax:
/// ```text
///     fn name(a, @b): block ;
///     fn name(a, b).
/// ```
/// `@` marks a by-reference parameter. The second form, with a terminator or
/// a line break where the `:` would be, is a forward declaration.
///
/// # Parameters
/// - `cursor`: Token cursor positioned after `fn`.
///
/// # Returns
/// A `Statement::FunctionDef` whose body is `None` for forward declarations.
///
/// # Errors
/// - `DuplicateParameter` if a parameter name repeats.
/// - `EmptyFunctionBody` if the body has no statements.
/// - `Expected` for a malformed signature or a missing `;`.
fn parse_function_definition(cursor: &mut TokenCursor) -> ParseResult<Statement> {
    let (name, line) = cursor.expect_identifier("Expected function name")?;
    cursor.expect(&TokenKind::LParen, "Expected ( after function name")?;

    let mut params: Vec<String> = Vec::new();
    let mut by_ref = Vec::new();
    cursor.skip_newlines();
    if !cursor.check(&TokenKind::RParen) {
        loop {
            let reference = cursor.matches(&TokenKind::At);
            let (param, param_line) = cursor.expect_identifier("Expected parameter name")?;
            if params.iter().any(|p| p == param) {
                return Err(ParseError::DuplicateParameter { parameter: param.to_string(),
                                                            function:  name.to_string(),
                                                            line:      param_line, });
            }
            params.push(param.to_string());
            by_ref.push(reference);
            if !cursor.matches(&TokenKind::Comma) {
                break;
            }
        }
    }
    cursor.expect(&TokenKind::RParen, "Expected ) after parameters")?;

    let forward = cursor.peek()
                        .is_none_or(|t| matches!(t.kind, TokenKind::Dot | TokenKind::Newline));
    let body = if forward {
        consume_terminator(cursor)?;
        None
    } else {
        cursor.expect(&TokenKind::Colon, "Expected : to start function body")?;
        let body = parse_block(cursor, &[TokenKind::Semicolon])?;
        cursor.expect(&TokenKind::Semicolon, "Expected ; after function body")?;
        if body.statements.is_empty() {
            return Err(ParseError::EmptyFunctionBody { function: name.to_string(),
                                                       line });
        }
        Some(Rc::new(body))
    };

    Ok(Statement::FunctionDef(Rc::new(FunctionDef { name: name.to_string(),
                                                    params,
                                                    by_ref,
                                                    body,
                                                    line })))
}

/// Parses `give e.`, `give(e).` or a bare `give.`, which returns `None`.
fn parse_give(cursor: &mut TokenCursor, line: usize) -> ParseResult<Statement> {
    let value = parse_expression(cursor)?;
    consume_terminator(cursor)?;

    if value.is_empty() {
        return Ok(Statement::Return(Expression::none(line)));
    }
    Ok(Statement::Return(value))
}

/// Parses `name op= expression.` as `name = name op expression`.
fn parse_compound_assignment(cursor: &mut TokenCursor,
                             name: &str,
                             op: BinaryOperator,
                             line: usize)
                             -> ParseResult<Statement> {
    cursor.advance();
    cursor.skip_newlines();
    cursor.advance();

    let mut items = vec![PostfixItem::Identifier { name: name.to_string(),
                                                   line }];
    parse_expression(cursor)?.flatten_into(&mut items);
    items.push(PostfixItem::Binary { op, line });
    consume_terminator(cursor)?;

    Ok(Statement::Assign(Assignment { name: name.to_string(),
                                      value: Expression::Postfix(items),
                                      declaration: false,
                                      line }))
}

const fn compound_operator(kind: &TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::PlusAssign => Some(BinaryOperator::Add),
        TokenKind::MinusAssign => Some(BinaryOperator::Sub),
        TokenKind::StarAssign => Some(BinaryOperator::Mul),
        TokenKind::SlashAssign => Some(BinaryOperator::Div),
        TokenKind::PercentAssign => Some(BinaryOperator::Mod),
        _ => None,
    }
}

const fn step_operator(kind: &TokenKind) -> BinaryOperator {
    match kind {
        TokenKind::MinusMinus => BinaryOperator::Sub,
        _ => BinaryOperator::Add,
    }
}

/// Desugars `x++`/`++x` and `x--`/`--x` into `x = x + 1` / `x = x - 1`.
fn increment(name: &str, op: BinaryOperator, line: usize) -> Statement {
    let value = Expression::Postfix(vec![PostfixItem::Identifier { name: name.to_string(),
                                                                   line },
                                         PostfixItem::Number { text: "1".to_string(),
                                                               line },
                                         PostfixItem::Binary { op, line },]);

    Statement::Assign(Assignment { name: name.to_string(),
                                   value,
                                   declaration: false,
                                   line })
}
