use std::io::Write;

use log::trace;

use crate::{
    ast::GuardedCommand,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator, Signal},
        memory::Memory,
    },
};

impl<W: Write> Evaluator<W> {
    /// Executes a `do ... od` loop.
    ///
    /// The guard is evaluated before every iteration; the loop ends as soon as
    /// it is false. A `break` in the body ends the loop, a `continue` skips to
    /// the next guard check. Either way the loop itself finishes with
    /// `Signal::Normal`, so the signal never escapes to an outer loop.
    ///
    /// There is no iteration limit: a guard that never becomes false runs
    /// forever.
    ///
    /// # Parameters
    /// - `body`: The guarded loop body.
    /// - `memory`: The program state, updated in place.
    ///
    /// # Errors
    /// - `UnsupportedConstruct` for several alternatives joined by `[]`.
    /// - `TypeMismatch` if the guard is not a boolean.
    /// - Any error raised by the body.
    ///
    /// # Example
    /// ```
    /// use gcl::interpreter::{
    ///     evaluator::core::{Evaluator, Signal},
    ///     memory::Memory,
    ///     parser::core::parse_source,
    /// };
    ///
    /// let program = parse_source("i := 0; do true -> i := i + 1; if i = 3 -> break fi od").unwrap();
    /// let mut memory = Memory::new();
    ///
    /// let signal = Evaluator::with_output(std::io::sink()).exec(&program, &mut memory)
    ///                                                      .unwrap();
    ///
    /// assert_eq!(signal, Signal::Normal);
    /// assert_eq!(memory.read_var("i"), Some(3));
    /// ```
    pub fn exec_repetition(&mut self,
                           body: &GuardedCommand,
                           memory: &mut Memory)
                           -> EvalResult<Signal> {
        let (guard, command) = Self::single_guard(body)?;

        let mut iteration = 0usize;
        while self.eval_bool(guard, memory)? {
            iteration += 1;
            trace!("line {}: loop iteration {iteration}", body.line_number());

            match self.exec(command, memory)? {
                Signal::Break => break,
                Signal::Continue | Signal::Normal => {},
            }
        }

        Ok(Signal::Normal)
    }
}
