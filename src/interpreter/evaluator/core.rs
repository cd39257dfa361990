use std::{
    io::{self, BufRead, Write},
    rc::Rc,
};

use tracing::debug;

use crate::{
    ast::{Block, Statement},
    error::RuntimeError,
    interpreter::{resource::FileRegistry, scope::Scope, value::core::Value},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Numbers closer than this compare equal under `==` and `is`, and range
/// loops over reals include an end bound they miss by less than this.
pub const EPSILON: f64 = 1e-9;

/// How a statement or block finished.
///
/// `give` does not unwind through an error: it turns into
/// [`Flow::Returned`], which every block and loop checks and hands to its
/// caller unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Execution reached the end normally.
    Normal,
    /// A `give` statement produced this value.
    Returned(Value),
}

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state: the scope chain with every
/// variable and user function, the open file handles, and the output and
/// input streams used by `print`, `input` and auto-printed expression
/// statements.
///
/// ## Usage
///
/// `Context` is created once and reused for every program or REPL line.
/// Variables and functions defined at the top level persist between runs.
///
/// # Example
/// ```
/// use scriptit::{
///     interpreter::{evaluator::core::Context, io::SharedOutput},
///     run_program,
/// };
///
/// let output = SharedOutput::new();
/// let mut context = Context::with_io(output.clone(), std::io::empty());
///
/// run_program("var x = 2.\nprint(x * PI).", &mut context).unwrap();
/// assert_eq!(output.contents(), "6.28319\n");
/// ```
pub struct Context {
    /// Variables and functions.
    pub scope:  Scope,
    /// Files opened with `open` and not yet closed.
    pub files:  FileRegistry,
    output:     Box<dyn Write>,
    input:      Box<dyn BufRead>,
    call_depth: usize,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Deepest nesting of user function calls before evaluation fails.
    pub const MAX_CALL_DEPTH: usize = 256;

    /// Creates a context that prints to stdout and reads from stdin.
    #[must_use]
    pub fn new() -> Self {
        Self::with_io(io::stdout(), io::BufReader::new(io::stdin()))
    }

    /// Creates a context with custom output and input streams.
    ///
    /// # Parameters
    /// - `output`: Receives everything the program prints.
    /// - `input`: Supplies the lines returned by `input()`.
    #[must_use]
    pub fn with_io(output: impl Write + 'static, input: impl BufRead + 'static) -> Self {
        let mut context = Self { scope:      Scope::new(),
                                 files:      FileRegistry::default(),
                                 output:     Box::new(output),
                                 input:      Box::new(input),
                                 call_depth: 0, };
        context.define_constants();
        context
    }

    fn define_constants(&mut self) {
        self.scope.define("PI", Value::Real(3.141_592_65));
        self.scope.define("e", Value::Real(2.718_281_8));
    }

    /// Forgets every variable and function and closes all files.
    ///
    /// The predefined constants are restored afterwards.
    pub fn reset(&mut self) {
        self.scope.clear();
        self.files.clear();
        self.call_depth = 0;
        self.define_constants();
        debug!("context reset");
    }

    /// Writes `text` followed by a newline to the output stream.
    ///
    /// # Errors
    /// `Io` when the stream rejects the write.
    pub fn write_line(&mut self, text: &str, line: usize) -> EvalResult<()> {
        writeln!(self.output, "{text}").map_err(|e| RuntimeError::Io { details: format!("Cannot write output: {e}"),
                                                                          line })
    }

    /// Writes `text` without a newline and flushes, as used for prompts.
    pub fn write_prompt(&mut self, text: &str, line: usize) -> EvalResult<()> {
        write!(self.output, "{text}").and_then(|()| self.output.flush())
                                     .map_err(|e| RuntimeError::Io { details: format!("Cannot write output: {e}"),
                                                                     line })
    }

    /// Reads one line from the input stream without its line ending.
    ///
    /// End of input reads as an empty string.
    pub fn read_input_line(&mut self, line: usize) -> EvalResult<String> {
        Ok(self.next_input_line(line)?.unwrap_or_default())
    }

    /// Reads one line from the input stream without its line ending, or
    /// `None` at end of input.
    ///
    /// The REPL reads its commands through this, so `input()` calls made by
    /// the commands share the same buffered stream.
    pub fn next_input_line(&mut self, line: usize) -> EvalResult<Option<String>> {
        let mut buffer = String::new();
        let read = self.input
                       .read_line(&mut buffer)
                       .map_err(|e| RuntimeError::Io { details: format!("Cannot read input: {e}"),
                                                       line })?;
        if read == 0 {
            return Ok(None);
        }
        let trimmed = buffer.trim_end_matches(['\n', '\r']).len();
        buffer.truncate(trimmed);
        Ok(Some(buffer))
    }

    /// Runs `body` inside a new frame and pops the frame afterwards, whether
    /// `body` succeeded or not.
    ///
    /// # Parameters
    /// - `barrier`: Whether assignments inside may reach enclosing frames.
    /// - `body`: The code to run with the frame pushed.
    pub(crate) fn scoped<T>(&mut self,
                            barrier: bool,
                            body: impl FnOnce(&mut Self) -> EvalResult<T>)
                            -> EvalResult<T> {
        self.scope.push_frame(barrier);
        let result = body(self);
        self.scope.pop_frame();
        result
    }

    /// Runs `body` one call level deeper.
    ///
    /// # Errors
    /// `CallDepthExceeded` when [`Context::MAX_CALL_DEPTH`] calls are
    /// already active.
    pub(crate) fn nested_call<T>(&mut self,
                                 line: usize,
                                 body: impl FnOnce(&mut Self) -> EvalResult<T>)
                                 -> EvalResult<T> {
        if self.call_depth >= Self::MAX_CALL_DEPTH {
            return Err(RuntimeError::CallDepthExceeded { limit: Self::MAX_CALL_DEPTH,
                                                         line });
        }
        self.call_depth += 1;
        let result = body(self);
        self.call_depth -= 1;
        result
    }

    /// Executes a block in a fresh frame.
    ///
    /// The frame is not a barrier, so the block can assign to variables of
    /// the code around it.
    pub fn execute_block(&mut self, block: &Block) -> EvalResult<Flow> {
        self.scoped(false, |ctx| ctx.run_statements(&block.statements))
    }

    /// Executes statements in the current frame with two passes.
    ///
    /// The first pass registers every function with a body among
    /// `statements`, so calls may appear before the definition. The second
    /// pass executes the statements in order and stops at the first `give`.
    pub fn run_statements(&mut self, statements: &[Statement]) -> EvalResult<Flow> {
        for statement in statements {
            if let Statement::FunctionDef(def) = statement
               && def.body.is_some()
            {
                self.scope.define_function(Rc::clone(def));
            }
        }

        for statement in statements {
            if let Flow::Returned(value) = self.execute(statement)? {
                return Ok(Flow::Returned(value));
            }
        }

        Ok(Flow::Normal)
    }

    /// Runs a parsed program in the root frame.
    ///
    /// A top-level `give` prints its value and ends the program.
    ///
    /// # Errors
    /// The first runtime error; everything executed before it keeps its
    /// effect.
    pub fn run_program(&mut self, program: &Block) -> EvalResult<()> {
        debug!(statements = program.statements.len(), "running program");

        if let Flow::Returned(value) = self.run_statements(&program.statements)? {
            self.write_line(&value.to_string(), 0)?;
        }
        Ok(())
    }

    /// Runs a parsed REPL line in the root frame.
    ///
    /// Works like [`Context::run_program`], except that when the last
    /// statement is an expression its value is returned instead of printed.
    /// `None` results are never returned.
    pub fn run_interactive(&mut self, program: &Block) -> EvalResult<Option<Value>> {
        let (last, rest) = match program.statements.split_last() {
            Some((Statement::Expression(expression), rest)) => (Some(expression), rest),
            _ => (None, program.statements.as_slice()),
        };

        if let Flow::Returned(value) = self.run_statements(rest)? {
            self.write_line(&value.to_string(), 0)?;
            return Ok(None);
        }

        match last {
            Some(expression) => {
                let value = self.evaluate(expression)?;
                Ok((!value.is_none()).then_some(value))
            },
            None => Ok(None),
        }
    }
}
