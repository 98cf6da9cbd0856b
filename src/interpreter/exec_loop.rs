//! Core execution loop
//!
//! `step()` is the per-tick entry point. Each call resumes the command in
//! flight and, when it completes, binds its value, advances the cursor and
//! starts the next command whose guard holds. Guard-unmet commands are
//! skipped inside the same call, so they never cost a tick.

use super::errors::ScriptError;
use super::expressions::{begin_command, Scope};
use super::registry::CommandContext;
use super::types::{Resume, StepResult};
use super::vm::{Active, Interpreter};

impl Interpreter {
    /// Run one tick
    ///
    /// Completes at most one command. On error the cursor stays on the
    /// failing command; calling `step()` again retries it. A command that
    /// cannot start right after a completion fails on the following step.
    pub fn step(&mut self) -> Result<StepResult, ScriptError> {
        if self.is_finished() {
            return Ok(StepResult::Finished);
        }

        if self.active.is_none() {
            // First tick (the implicit start counts as complete), or the
            // command at the cursor failed to start on an earlier tick.
            let index = self.cursor.unwrap_or(0);
            if !self.start_from(index)? {
                return Ok(StepResult::Finished);
            }
        }

        loop {
            let Some(active) = self.active.as_mut() else {
                return Ok(StepResult::Finished);
            };
            let ctx = CommandContext::new(self.clock.as_ref(), &self.namespace);
            let resumed = active.suspension.resume(&ctx)?;

            let index = self.cursor.unwrap_or(0);
            match resumed {
                Resume::Unfinished => return Ok(StepResult::StillRunning),

                Resume::GuardUnmet => {
                    tracing::trace!(index, "command reported unmet guard, skipping");
                    self.active = None;
                    if !self.start_from(index + 1)? {
                        return Ok(StepResult::Finished);
                    }
                }

                Resume::Done(value) => {
                    let binding = self.active.take().and_then(|a| a.binding);
                    tracing::debug!(index, value = %value, "command completed");
                    if let Some(name) = binding {
                        self.namespace.bind(name, value);
                    }
                    // The completion stands even if the next command fails
                    // to start; the next step retries the start and reports it.
                    if let Err(err) = self.start_from(index + 1) {
                        tracing::debug!(
                            index = self.cursor.unwrap_or(index + 1),
                            code = err.code(),
                            error = %err,
                            "next command failed to start"
                        );
                    }
                    return Ok(StepResult::Completed);
                }
            }
        }
    }

    /// Step until finished, at most `max_steps` times
    ///
    /// Returns the number of `step()` calls that did work. Mostly useful for
    /// scripts without multi-tick commands and for tests.
    pub fn run_to_completion(&mut self, max_steps: usize) -> Result<usize, ScriptError> {
        let mut steps = 0;
        while steps < max_steps && !self.is_finished() {
            if self.step()? == StepResult::Finished {
                break;
            }
            steps += 1;
        }
        Ok(steps)
    }

    /// Move the cursor to `index` and start the first command from there
    /// whose guard holds
    ///
    /// Returns false when the end of the script was reached instead.
    fn start_from(&mut self, mut index: usize) -> Result<bool, ScriptError> {
        loop {
            self.cursor = Some(index);
            let Some(command) = self.script.get(index) else {
                tracing::debug!(len = self.script.len(), "script complete");
                return Ok(false);
            };

            let mut scope = Scope {
                registry: &self.registry,
                namespace: &mut self.namespace,
                clock: self.clock.as_ref(),
            };
            match begin_command(command, &mut scope)? {
                Some(suspension) => {
                    tracing::debug!(index, command = command.name(), "command started");
                    self.active = Some(Active {
                        suspension,
                        binding: command.binding().map(str::to_owned),
                    });
                    return Ok(true);
                }
                None => {
                    tracing::trace!(index, command = command.name(), "guard unmet, skipping");
                    index += 1;
                }
            }
        }
    }
}
