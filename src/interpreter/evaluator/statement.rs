use std::rc::Rc;

use tracing::debug;

use crate::{
    ast::{Assignment, Block, Branch, Expression, FunctionDef, Statement},
    interpreter::evaluator::core::{Context, EvalResult, Flow},
};

impl Context {
    /// Executes a single statement.
    ///
    /// Expression statements print their value unless it is `None`. Blocks,
    /// branches and loops hand a [`Flow::Returned`] from their body straight
    /// back to the caller.
    ///
    /// # Parameters
    /// - `statement`: Statement to execute.
    ///
    /// # Returns
    /// [`Flow::Returned`] when a `give` ran, [`Flow::Normal`] otherwise.
    ///
    /// # Example
    /// ```
    /// use scriptit::{
    ///     ast::{Expression, PostfixItem, Statement},
    ///     interpreter::{
    ///         evaluator::core::{Context, Flow},
    ///         io::SharedOutput,
    ///     },
    /// };
    ///
    /// let output = SharedOutput::new();
    /// let mut context = Context::with_io(output.clone(), std::io::empty());
    ///
    /// let statement =
    ///     Statement::Expression(Expression::Postfix(vec![PostfixItem::Number { text: "7".into(),
    ///                                                                           line: 1, }]));
    ///
    /// assert_eq!(context.execute(&statement).unwrap(), Flow::Normal);
    /// assert_eq!(output.contents(), "7\n");
    /// ```
    pub fn execute(&mut self, statement: &Statement) -> EvalResult<Flow> {
        match statement {
            Statement::Block(block) => self.execute_block(block),
            Statement::Assign(assignment) => {
                self.assign(assignment)?;
                Ok(Flow::Normal)
            },
            Statement::MultiAssign(assignments) => {
                for assignment in assignments {
                    self.assign(assignment)?;
                }
                Ok(Flow::Normal)
            },
            Statement::If { branches, else_block } => self.execute_if(branches, else_block.as_ref()),
            Statement::ForRange { iterator,
                                  start,
                                  end,
                                  step,
                                  body,
                                  line, } => {
                self.execute_for_range(iterator, start, end, step.as_ref(), body, *line)
            },
            Statement::ForIn { iterator,
                               iterable,
                               body,
                               line, } => self.execute_for_in(iterator, iterable, body, *line),
            Statement::While { condition, body } => self.execute_while(condition, body),
            Statement::FunctionDef(def) => {
                self.register_function(def)?;
                Ok(Flow::Normal)
            },
            Statement::Return(expression) => Ok(Flow::Returned(self.evaluate(expression)?)),
            Statement::Pass => Ok(Flow::Normal),
            Statement::LetContext { name,
                                    resource,
                                    body,
                                    line, } => self.execute_let_context(name, resource, body, *line),
            Statement::Expression(expression) => {
                let value = self.evaluate(expression)?;
                if !value.is_none() {
                    self.write_line(&value.to_string(), expression_line(expression))?;
                }
                Ok(Flow::Normal)
            },
        }
    }

    /// Binds a declaration in the current frame, or mutates an existing
    /// variable for a plain assignment.
    fn assign(&mut self, assignment: &Assignment) -> EvalResult<()> {
        let value = self.evaluate(&assignment.value)?;
        if assignment.declaration {
            self.scope.define(&assignment.name, value);
            Ok(())
        } else {
            self.scope.set(&assignment.name, value)
        }
    }

    fn execute_if(&mut self, branches: &[Branch], else_block: Option<&Block>) -> EvalResult<Flow> {
        for branch in branches {
            if self.evaluate(&branch.condition)?.is_truthy() {
                return self.execute_block(&branch.block);
            }
        }

        else_block.map_or(Ok(Flow::Normal), |block| self.execute_block(block))
    }

    fn execute_while(&mut self, condition: &Expression, body: &Block) -> EvalResult<Flow> {
        while self.evaluate(condition)?.is_truthy() {
            if let Flow::Returned(value) = self.execute_block(body)? {
                return Ok(Flow::Returned(value));
            }
        }
        Ok(Flow::Normal)
    }

    /// Registers a definition when its statement executes.
    ///
    /// Bodies were already registered by the block's first pass, so this
    /// only matters for redefinitions. A forward declaration registers only
    /// when the frame does not hold the key yet.
    fn register_function(&mut self, def: &Rc<FunctionDef>) -> EvalResult<()> {
        if def.body.is_some() {
            self.scope.define_function(Rc::clone(def));
            return Ok(());
        }

        if self.scope.has_local_function(&def.name, def.arity()) {
            return Ok(());
        }
        self.scope.declare_function(Rc::clone(def))
    }

    /// Runs `let name be resource: body ;`.
    ///
    /// The resource is bound in a child frame. A file handle that is still
    /// open when the body finishes is closed, also when the body failed.
    fn execute_let_context(&mut self,
                           name: &str,
                           resource: &Expression,
                           body: &Block,
                           line: usize)
                           -> EvalResult<Flow> {
        let resource = self.evaluate(resource)?;

        let outcome = self.scoped(false, |ctx| {
                              ctx.scope.define(name, resource.clone());
                              ctx.execute_block(body)
                          });

        if let Some(id) = self.files.handle_id(&resource)
           && self.files.is_open(id)
        {
            self.files.release(id);
            debug!(id, line, "released let resource");
        }

        outcome
    }
}

/// The line of the first item of an expression, used for output errors.
fn expression_line(expression: &Expression) -> usize {
    match expression {
        Expression::Postfix(items) => items.first().map_or(0, crate::ast::PostfixItem::line),
        Expression::Logical { line, .. } => *line,
    }
}
