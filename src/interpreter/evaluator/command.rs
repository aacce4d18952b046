use std::io::Write;

use log::debug;

use crate::{
    ast::{Command, GuardedCommand},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator, Signal},
        memory::Memory,
    },
};

impl<W: Write> Evaluator<W> {
    /// Executes a command against `memory`, in place.
    ///
    /// Handles every command form:
    /// - `c1; c2` runs `c1`, and runs `c2` only if `c1` finished with
    ///   `Signal::Normal`; a `Break` or `Continue` from `c1` is returned as is.
    ///   The right spine of a sequence is walked in a loop.
    /// - `x := a` and `A[i] := a` store integers. An array write outside the
    ///   array is ignored.
    /// - `if` runs its command when the guard holds.
    /// - `do` loops, see [`Evaluator::exec_repetition`].
    /// - `break` and `continue` return their signal.
    /// - `print a` writes the value and a newline to the output.
    /// - `skip` does nothing.
    /// - `read` and `write` leave the channels untouched; they only evaluate
    ///   their operands.
    ///
    /// # Parameters
    /// - `command`: Command to execute.
    /// - `memory`: The program state, updated in place.
    ///
    /// # Returns
    /// The control signal the command finished with.
    pub fn exec(&mut self, command: &Command, memory: &mut Memory) -> EvalResult<Signal> {
        match command {
            Command::Sequence { .. } => {
                let mut current = command;
                while let Command::Sequence { first, second } = current {
                    let signal = self.exec(first, memory)?;
                    if signal != Signal::Normal {
                        return Ok(signal);
                    }
                    current = second.as_ref();
                }
                self.exec(current, memory)
            },
            Command::Assign { name, value, line } => {
                let value = self.eval(value, memory)?.as_integer(*line)?;
                memory.update_var(name, value);
                Ok(Signal::Normal)
            },
            Command::ArrayAssign { array,
                                   index,
                                   value,
                                   line, } => {
                let index = self.eval_integer(index, memory)?;
                let value = self.eval(value, memory)?.as_integer(*line)?;
                if !memory.update_array(array, index, value) {
                    debug!("line {line}: ignoring write to {array}[{index}], outside the array");
                }
                Ok(Signal::Normal)
            },
            Command::ReadVar { name, line } => {
                Self::eval_variable(name, *line, memory)?;
                Ok(Signal::Normal)
            },
            Command::ReadArray { index, .. } => {
                self.eval_integer(index, memory)?;
                Ok(Signal::Normal)
            },
            Command::Write { value, .. } => {
                self.eval(value, memory)?;
                Ok(Signal::Normal)
            },
            Command::Print { value, line } => {
                let value = self.eval(value, memory)?;
                writeln!(self.out, "{value}").map_err(|e| {
                                                 RuntimeError::OutputFailed { details:
                                                                                  e.to_string(),
                                                                              line: *line, }
                                             })?;
                Ok(Signal::Normal)
            },
            Command::Skip { .. } => Ok(Signal::Normal),
            Command::Break { .. } => Ok(Signal::Break),
            Command::Continue { .. } => Ok(Signal::Continue),
            Command::If { body, .. } => self.exec_alternation(body, memory),
            Command::Do { body, .. } => self.exec_repetition(body, memory),
        }
    }

    /// Executes the body of an `if ... fi`.
    ///
    /// With the guard true, the command runs and its signal is returned, so a
    /// `break` inside an `if` reaches the enclosing loop. With the guard false
    /// nothing happens.
    ///
    /// # Errors
    /// - `UnsupportedConstruct` for several alternatives joined by `[]`.
    /// - `TypeMismatch` if the guard is not a boolean.
    pub fn exec_alternation(&mut self,
                            body: &GuardedCommand,
                            memory: &mut Memory)
                            -> EvalResult<Signal> {
        let (guard, command) = Self::single_guard(body)?;

        if self.eval_bool(guard, memory)? {
            return self.exec(command, memory);
        }
        Ok(Signal::Normal)
    }
}
