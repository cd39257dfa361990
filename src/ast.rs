use std::rc::Rc;

/// One element of a postfix (reverse Polish) expression sequence.
///
/// Operands push a value, operators pop their operands and push a result,
/// and the counted markers (calls, method calls and aggregate construction)
/// pop exactly as many values as they carry. A `Logical` item is an operand
/// whose right side only runs when the left side leaves the result open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostfixItem {
    /// A numeric literal, kept as written (e.g. `42`, `3.14`, `.5`).
    Number {
        /// The literal text.
        text: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A string literal, already unescaped.
    Str {
        /// The string contents.
        value: String,
        /// Line number in the source code.
        line:  usize,
    },
    /// A variable reference, or one of `True`, `False`, `None`.
    Identifier {
        /// The name as written.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A prefix operator applied to the value on top of the stack.
    Unary {
        /// The operator.
        op:   UnaryOperator,
        /// Line number in the source code.
        line: usize,
    },
    /// An infix operator applied to the two values on top of the stack.
    Binary {
        /// The operator.
        op:   BinaryOperator,
        /// Line number in the source code.
        line: usize,
    },
    /// A free-function call consuming `argc` arguments.
    Call {
        /// The function name.
        name: String,
        /// The number of arguments below this marker.
        argc: usize,
        /// Line number in the source code.
        line: usize,
    },
    /// A method call consuming `argc` arguments plus the receiver below
    /// them.
    MethodCall {
        /// The method name.
        name: String,
        /// The number of arguments, not counting the receiver.
        argc: usize,
        /// Line number in the source code.
        line: usize,
    },
    /// Builds a list from the `count` values below it (e.g. `[1, 2]`).
    List {
        /// The number of elements.
        count: usize,
        /// Line number in the source code.
        line:  usize,
    },
    /// Builds a set from the `count` values below it (e.g. `{1, 2}`).
    Set {
        /// The number of elements.
        count: usize,
        /// Line number in the source code.
        line:  usize,
    },
    /// Builds a dict from the `count` key/value pairs below it
    /// (e.g. `{"a" -> 1}`).
    Dict {
        /// The number of pairs.
        count: usize,
        /// Line number in the source code.
        line:  usize,
    },
    /// A parenthesized or embedded `&&`/`||`, pushed as one value.
    Logical {
        /// `&&` or `||`.
        op:    LogicalOperator,
        /// Always evaluated.
        left:  Box<Expression>,
        /// Evaluated only when `left` does not decide the result.
        right: Box<Expression>,
        /// Line number of the operator.
        line:  usize,
    },
}

impl PostfixItem {
    /// Returns the line number where the item was written.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Number { line, .. }
            | Self::Str { line, .. }
            | Self::Identifier { line, .. }
            | Self::Unary { line, .. }
            | Self::Binary { line, .. }
            | Self::Call { line, .. }
            | Self::MethodCall { line, .. }
            | Self::List { line, .. }
            | Self::Set { line, .. }
            | Self::Dict { line, .. }
            | Self::Logical { line, .. } => *line,
        }
    }
}

/// An expression as produced by the parser.
///
/// Most expressions are a flat postfix sequence. `&&`/`||` keep their
/// operands as separate subtrees so the right side is only evaluated when
/// the left side does not decide the result, also when they are nested in
/// a postfix sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// A postfix sequence evaluated with a value stack.
    Postfix(Vec<PostfixItem>),
    /// A short-circuit node.
    Logical {
        /// `&&` or `||`.
        op:    LogicalOperator,
        /// Always evaluated.
        left:  Box<Self>,
        /// Evaluated only when `left` does not decide the result.
        right: Box<Self>,
        /// Line number of the operator.
        line:  usize,
    },
}

impl Expression {
    /// An expression that evaluates to `None`.
    #[must_use]
    pub fn none(line: usize) -> Self {
        Self::Postfix(vec![PostfixItem::Identifier { name: "None".to_string(),
                                                     line }])
    }

    /// Returns `true` when nothing was parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Postfix(items) if items.is_empty())
    }

    /// Appends this expression to a postfix sequence.
    ///
    /// Used wherever an expression is embedded inside another postfix
    /// sequence, such as parentheses, call arguments and list elements. A
    /// short-circuit node becomes a single [`PostfixItem::Logical`] operand.
    pub fn flatten_into(self, out: &mut Vec<PostfixItem>) {
        match self {
            Self::Postfix(items) => out.extend(items),
            Self::Logical { op, left, right, line } => out.push(PostfixItem::Logical { op,
                                                                                         left,
                                                                                         right,
                                                                                         line }),
        }
    }

    /// Converts the expression into a single postfix sequence.
    #[must_use]
    pub fn into_postfix(self) -> Vec<PostfixItem> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }
}

/// A sequence of statements executed in its own scope frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    /// The statements in source order.
    pub statements: Vec<Statement>,
}

/// A single `name = value` binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// The variable being bound.
    pub name:        String,
    /// The value expression.
    pub value:       Expression,
    /// `true` for `var`/`let` declarations, which always bind in the current
    /// frame; `false` for plain assignment, which mutates an existing name.
    pub declaration: bool,
    /// Line number in the source code.
    pub line:        usize,
}

/// One `if`/`elif` arm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    /// The condition tested for this arm.
    pub condition: Expression,
    /// The block executed when the condition is truthy.
    pub block:     Block,
}

/// Represents a user-defined function definition.
///
/// The same record is stored in the scope when the definition executes, so
/// the body is reference counted instead of copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDef {
    /// The name of the function.
    pub name:   String,
    /// The parameter names.
    pub params: Vec<String>,
    /// Parallel to `params`; `true` for `@param` (by-reference) parameters.
    pub by_ref: Vec<bool>,
    /// The body, or `None` for a forward declaration.
    pub body:   Option<Rc<Block>>,
    /// Line number in the source code.
    pub line:   usize,
}

impl FunctionDef {
    /// The number of parameters.
    #[must_use]
    pub const fn arity(&self) -> usize {
        self.params.len()
    }

    /// The scope key for a function of this name and arity (`name/arity`).
    ///
    /// # Example
    /// ```
    /// use scriptit::ast::FunctionDef;
    ///
    /// assert_eq!(FunctionDef::key("add", 2), "add/2");
    /// ```
    #[must_use]
    pub fn key(name: &str, arity: usize) -> String {
        format!("{name}/{arity}")
    }
}

/// Represents a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// A nested block.
    Block(Block),
    /// `var x = e.`, `let x be e.`, `x = e.` and the desugared compound and
    /// increment forms.
    Assign(Assignment),
    /// `var a = 1, b = 2.`
    MultiAssign(Vec<Assignment>),
    /// `if ... elif ... else ... ;`
    If {
        /// The `if` and `elif` arms in order.
        branches:   Vec<Branch>,
        /// The `else` block, if present.
        else_block: Option<Block>,
    },
    /// `for i in range(from a to b step s): ... ;`
    ForRange {
        /// The loop variable.
        iterator: String,
        /// The first value.
        start:    Expression,
        /// The inclusive bound.
        end:      Expression,
        /// The step, defaulting to 1 toward `end`.
        step:     Option<Expression>,
        /// The loop body.
        body:     Block,
        /// Line number in the source code.
        line:     usize,
    },
    /// `for x in e: ... ;`
    ForIn {
        /// The loop variable.
        iterator: String,
        /// The list, string or set iterated over.
        iterable: Expression,
        /// The loop body.
        body:     Block,
        /// Line number in the source code.
        line:     usize,
    },
    /// `while c: ... ;`
    While {
        /// Tested before every iteration.
        condition: Expression,
        /// The loop body.
        body:      Block,
    },
    /// `fn name(params): ... ;` or the forward declaration `fn name(params).`
    FunctionDef(Rc<FunctionDef>),
    /// `give e.`
    Return(Expression),
    /// `pass.`
    Pass,
    /// `let f be open(...): ... ;`
    LetContext {
        /// The name bound to the resource inside the body.
        name:     String,
        /// The expression producing the resource.
        resource: Expression,
        /// The body.
        body:     Block,
        /// Line number in the source code.
        line:     usize,
    },
    /// A standalone expression evaluated for its result.
    Expression(Expression),
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition and concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication and repetition (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Modulo (`%`)
    Mod,
    /// Exponentiation (`^`)
    Pow,
    /// Tolerant equality (`==`)
    Equal,
    /// Tolerant inequality (`!=`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Tolerant equality spelled `is`
    Is,
    /// Tolerant inequality spelled `is not`
    IsNot,
    /// Strict same-type, same-value equality (`points`)
    Points,
    /// Negation of `points` (`not points`)
    NotPoints,
}

impl BinaryOperator {
    /// Binding strength used by the shunting-yard pass; higher binds
    /// tighter.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Equal
            | Self::NotEqual
            | Self::Is
            | Self::IsNot
            | Self::Points
            | Self::NotPoints => 3,
            Self::Less | Self::LessEqual | Self::Greater | Self::GreaterEqual => 4,
            Self::Add | Self::Sub => 5,
            Self::Mul | Self::Div | Self::Mod => 6,
            Self::Pow => 7,
        }
    }

    /// The operator as written in source.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "^",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Is => "is",
            Self::IsNot => "is not",
            Self::Points => "points",
            Self::NotPoints => "not points",
        }
    }
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `!x` or `not x`).
    Not,
}

impl UnaryOperator {
    /// Unary operators bind tighter than every binary operator.
    pub const PRECEDENCE: u8 = 8;
}

/// The operator of a short-circuit node.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogicalOperator {
    /// `&&`
    And,
    /// `||`
    Or,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
