use logos::{Lexer, Logos, Skip};
use tracing::debug;

use crate::error::LexError;

/// Classifies the raw failures reported by the generated lexer.
///
/// Logos needs a `Default` error for input that matches no rule at all; the
/// callbacks report the more specific cases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LexErrorKind {
    /// No token starts with this character.
    #[default]
    UnexpectedCharacter,
    /// A string literal ran to the end of input.
    UnterminatedString,
}

/// State carried through the lexer while it scans.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexerExtras {
    /// The current source line, starting at 1.
    pub line: usize,
}

/// Represents the kind of a lexical token.
///
/// This enum defines every token the language recognizes. Whitespace,
/// comments and escaped newlines are skipped by the lexer and never reach
/// the parser.
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\f]+")]
pub enum TokenKind {
    /// Numeric literal tokens, such as `42`, `3.14` or `.5`. The source text
    /// is kept verbatim; conversion happens at evaluation time.
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().to_string())]
    #[regex(r"\.[0-9]+", |lex| lex.slice().to_string())]
    Number(String),
    /// String literal tokens in single or double quotes, already unescaped.
    #[token("\"", |lex| string_literal(lex, '"'))]
    #[token("'", |lex| string_literal(lex, '\''))]
    Str(String),
    /// Identifier tokens; variable or function names such as `x` or `square`.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `var`
    #[token("var")]
    Var,
    /// `fn`
    #[token("fn")]
    Fn,
    /// `give`
    #[token("give")]
    Give,
    /// `if`
    #[token("if")]
    If,
    /// `elif`
    #[token("elif")]
    Elif,
    /// `else`
    #[token("else")]
    Else,
    /// `for`
    #[token("for")]
    For,
    /// `in`
    #[token("in")]
    In,
    /// `while`
    #[token("while")]
    While,
    /// `let`
    #[token("let")]
    Let,
    /// `be`
    #[token("be")]
    Be,
    /// `of`
    #[token("of")]
    Of,
    /// `is`
    #[token("is")]
    Is,
    /// `points`
    #[token("points")]
    Points,
    /// `pass`
    #[token("pass")]
    Pass,
    /// `range`
    #[token("range")]
    Range,
    /// `from`
    #[token("from")]
    From,
    /// `to`
    #[token("to")]
    To,
    /// `step`
    #[token("step")]
    Step,
    /// `&&` or `and`
    #[token("&&")]
    #[token("and")]
    AndAnd,
    /// `||` or `or`
    #[token("||")]
    #[token("or")]
    OrOr,
    /// `!` or `not`
    #[token("!")]
    #[token("not")]
    Bang,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `^`
    #[token("^")]
    Caret,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    NotEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `=`
    #[token("=")]
    Assign,
    /// `+=`
    #[token("+=")]
    PlusAssign,
    /// `-=`
    #[token("-=")]
    MinusAssign,
    /// `*=`
    #[token("*=")]
    StarAssign,
    /// `/=`
    #[token("/=")]
    SlashAssign,
    /// `%=`
    #[token("%=")]
    PercentAssign,
    /// `++`
    #[token("++")]
    PlusPlus,
    /// `--`
    #[token("--")]
    MinusMinus,
    /// `->`, the key/value separator of dict literals.
    #[token("->")]
    Arrow,
    /// `.`, the statement terminator and method-call dot.
    #[token(".")]
    Dot,
    /// `:`
    #[token(":")]
    Colon,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `,`
    #[token(",")]
    Comma,
    /// `@`, marks a by-reference parameter.
    #[token("@")]
    At,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// A line break; acts as an implicit statement separator.
    #[token("\n", |lex| lex.extras.line += 1)]
    Newline,
    /// A backtick right before a line break joins the two lines.
    #[regex(r"`[ \t\r]*\n", |lex| {
        lex.extras.line += 1;
        Skip
    })]
    LineContinuation,
    /// A stray backtick is ignored.
    #[token("`", logos::skip)]
    Backtick,
    /// ```text
    /// --> Block comments. <--
    /// ```
    #[token("-->", block_comment)]
    BlockComment,
    /// `# Comments.`
    #[regex(r"#[^\n]*", logos::skip, allow_greedy = true)]
    LineComment,
}

/// A token together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What the token is.
    pub kind:   TokenKind,
    /// The exact source slice the token was read from.
    pub text:   String,
    /// Byte offset of the first byte of `text`.
    pub offset: usize,
    /// The line the token starts on.
    pub line:   usize,
}

impl Token {
    /// Byte offset one past the last byte of the token.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset + self.text.len()
    }
}

/// Converts source text into a flat token sequence.
///
/// Besides running the generated lexer this attaches byte offsets and line
/// numbers and merges multi-word type names (`long long`, `unsigned int`,
/// ...) into single identifiers.
///
/// # Errors
/// Returns a [`LexError`] for a character that cannot start a token or an
/// unterminated string literal.
///
/// # Example
/// ```
/// use scriptit::interpreter::lexer::{TokenKind, tokenize};
///
/// let tokens = tokenize("3.14.").unwrap();
/// let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
///
/// assert_eq!(kinds, vec![TokenKind::Number("3.14".into()), TokenKind::Dot]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = TokenKind::lexer_with_extras(source, LexerExtras { line: 1 });
    let mut tokens: Vec<Token> = Vec::new();

    while let Some(result) = lexer.next() {
        let text = lexer.slice();
        match result {
            Ok(kind) => {
                let line = lexer.extras.line - text.matches('\n').count();
                let token = Token { kind,
                                    text: text.to_string(),
                                    offset: lexer.span().start,
                                    line };
                push_merging(source, &mut tokens, token);
            },
            Err(LexErrorKind::UnterminatedString) => {
                return Err(LexError::UnterminatedString { line: lexer.extras.line });
            },
            Err(LexErrorKind::UnexpectedCharacter) => {
                return Err(LexError::UnexpectedCharacter { character: text.chars()
                                                                          .next()
                                                                          .unwrap_or_default(),
                                                           line:      lexer.extras.line, });
            },
        }
    }

    debug!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}

fn push_merging(source: &str, tokens: &mut Vec<Token>, token: Token) {
    if let TokenKind::Identifier(word) = &token.kind
       && let Some(previous) = tokens.last_mut()
       && let TokenKind::Identifier(prior) = &previous.kind
       && source[previous.end()..token.offset].bytes().all(|b| b == b' ')
       && let Some(merged) = merged_type_name(prior, &previous.text, word)
    {
        previous.kind = TokenKind::Identifier(merged.to_string());
        previous.text = source[previous.offset..token.end()].to_string();
        return;
    }
    tokens.push(token);
}

fn merged_type_name(prior: &str, prior_text: &str, word: &str) -> Option<&'static str> {
    match (prior, word) {
        ("long", "double") => Some("long_double"),
        ("long", "long") => Some("long_long"),
        ("unsigned", "int") => Some("uint"),
        ("unsigned", "long") => Some("ulong"),
        ("ulong", "long") if prior_text.starts_with("unsigned") => Some("ulong_long"),
        _ => None,
    }
}

fn string_literal(lex: &mut Lexer<TokenKind>, quote: char) -> Result<String, LexErrorKind> {
    let rest: &str = lex.remainder();
    let mut value = String::new();
    let mut chars = rest.char_indices();

    while let Some((index, c)) = chars.next() {
        match c {
            c if c == quote => {
                lex.bump(index + c.len_utf8());
                return Ok(value);
            },
            '\\' => match chars.next() {
                Some((_, 'n')) => value.push('\n'),
                Some((_, 't')) => value.push('\t'),
                Some((_, escaped)) => {
                    if escaped == '\n' {
                        lex.extras.line += 1;
                    }
                    value.push(escaped);
                },
                None => break,
            },
            '\n' => {
                lex.extras.line += 1;
                value.push('\n');
            },
            other => value.push(other),
        }
    }

    lex.bump(rest.len());
    Err(LexErrorKind::UnterminatedString)
}

fn block_comment(lex: &mut Lexer<TokenKind>) -> Skip {
    let rest: &str = lex.remainder();
    let consumed = rest.find("<--").map_or(rest.len(), |close| close + "<--".len());

    lex.extras.line += rest[..consumed].matches('\n').count();
    lex.bump(consumed);
    Skip
}
