use crate::{
    ast::{Block, Expression},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EPSILON, EvalResult, Flow},
        value::core::Value,
    },
    util::num::{f64_to_i64_checked, is_integral},
};

/// The bounds of a range loop after evaluation.
enum Range {
    Integer { start: i64, end: i64, step: i64 },
    Real { start: f64, end: f64, step: f64 },
}

impl Range {
    fn new(start: f64, end: f64, step: f64, line: usize) -> EvalResult<Self> {
        if is_integral(start) && is_integral(end) && is_integral(step) {
            return Ok(Self::Integer { start: f64_to_i64_checked(start, line)?,
                                      end:   f64_to_i64_checked(end, line)?,
                                      step:  f64_to_i64_checked(step, line)?, });
        }
        Ok(Self::Real { start, end, step })
    }
}

impl Context {
    /// Executes `for i in range(...): body ;`.
    ///
    /// Start, end and step are evaluated once, before the first iteration.
    /// The end bound is inclusive. Without a step the loop counts by `1`
    /// toward `end`, downward when `end < start`. A step pointing away from
    /// `end` runs the body zero times. When all three bounds are whole
    /// numbers the loop variable holds integers, otherwise reals, and real
    /// loops include an end bound missed by less than [`EPSILON`].
    ///
    /// The loop variable lives in its own frame around the body, so it does
    /// not outlive the loop.
    ///
    /// # Parameters
    /// - `iterator`: Name of the loop variable.
    /// - `start`, `end`, `step`: The range bounds.
    /// - `body`: The block run for every value.
    /// - `line`: Line number for error reporting.
    ///
    /// # Errors
    /// - `ZeroStep` when the step is zero.
    /// - `NotANumber` when a bound is not numeric.
    /// - Anything raised by the body.
    ///
    /// # Example
    /// ```
    /// use scriptit::{interpreter::{evaluator::core::Context, io::SharedOutput}, run_program};
    ///
    /// let output = SharedOutput::new();
    /// let mut context = Context::with_io(output.clone(), std::io::empty());
    ///
    /// run_program("for i in range(from 3 to 1): print(i). ;", &mut context).unwrap();
    /// assert_eq!(output.contents(), "3\n2\n1\n");
    /// ```
    pub fn execute_for_range(&mut self,
                             iterator: &str,
                             start: &Expression,
                             end: &Expression,
                             step: Option<&Expression>,
                             body: &Block,
                             line: usize)
                             -> EvalResult<Flow> {
        let start = self.evaluate(start)?.as_number(line)?;
        let end = self.evaluate(end)?.as_number(line)?;
        let step = match step {
            Some(step) => {
                let step = self.evaluate(step)?.as_number(line)?;
                if step == 0.0 {
                    return Err(RuntimeError::ZeroStep { line });
                }
                step
            },
            None if end >= start => 1.0,
            None => -1.0,
        };

        let range = Range::new(start, end, step, line)?;

        self.scoped(false, |ctx| match range {
                Range::Integer { start, end, step } => {
                    let mut current = start;
                    while (step > 0 && current <= end) || (step < 0 && current >= end) {
                        ctx.scope.define(iterator, Value::Integer(current));
                        if let Flow::Returned(value) = ctx.execute_block(body)? {
                            return Ok(Flow::Returned(value));
                        }
                        let Some(next) = current.checked_add(step) else {
                            break;
                        };
                        current = next;
                    }
                    Ok(Flow::Normal)
                },
                Range::Real { start, end, step } => {
                    let mut current = start;
                    while (step > 0.0 && current <= end + EPSILON) || (step < 0.0 && current >= end - EPSILON) {
                        ctx.scope.define(iterator, Value::Real(current));
                        if let Flow::Returned(value) = ctx.execute_block(body)? {
                            return Ok(Flow::Returned(value));
                        }
                        current += step;
                    }
                    Ok(Flow::Normal)
                },
            })
    }

    /// Executes `for x in iterable: body ;`.
    ///
    /// Lists yield their elements, strings their characters as one-character
    /// strings and sets their elements in sorted order. The elements are
    /// taken before the first iteration, so the body may change the
    /// collection without affecting the loop.
    ///
    /// # Errors
    /// `NotIterable` for any other type, or anything raised by the body.
    pub fn execute_for_in(&mut self,
                          iterator: &str,
                          iterable: &Expression,
                          body: &Block,
                          line: usize)
                          -> EvalResult<Flow> {
        let elements = self.evaluate(iterable)?.elements(line)?;

        self.scoped(false, |ctx| {
                for element in elements {
                    ctx.scope.define(iterator, element);
                    if let Flow::Returned(value) = ctx.execute_block(body)? {
                        return Ok(Flow::Returned(value));
                    }
                }
                Ok(Flow::Normal)
            })
    }
}
