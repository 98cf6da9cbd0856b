//! wait(ms) - the built-in multi-tick command

use crate::interpreter::errors::ScriptError;
use crate::interpreter::registry::{CommandContext, Handler, Invocation, Suspension};
use crate::interpreter::timer::Timer;
use crate::interpreter::types::{Resume, Val};
use std::time::Duration;

/// Factory for `wait` suspensions
#[derive(Debug, Clone, Copy, Default)]
pub struct WaitHandler;

impl Handler for WaitHandler {
    fn invoke(
        &self,
        call: Invocation,
        ctx: &CommandContext<'_>,
    ) -> Result<Box<dyn Suspension>, ScriptError> {
        let [amount] = call.exact_args(1)? else {
            unreachable!("arity checked")
        };
        let millis = amount
            .as_f64()
            .filter(|ms| ms.is_finite() && *ms >= 0.0)
            .ok_or_else(|| {
                ScriptError::wrong_arg_type(
                    &call.name,
                    format!("expected a non-negative number of milliseconds, got {}", amount),
                )
            })?;

        let duration = Duration::from_nanos((millis * 1_000_000.0).round() as u64);
        Ok(Box::new(Wait {
            timer: Timer::new(duration, ctx.now()),
        }))
    }
}

/// Waits until the timer started at invocation has run out
#[derive(Debug)]
pub struct Wait {
    timer: Timer,
}

impl Suspension for Wait {
    fn resume(&mut self, ctx: &CommandContext<'_>) -> Result<Resume, ScriptError> {
        if self.timer.update(ctx.now()) {
            Ok(Resume::Done(Val::Bool(true)))
        } else {
            Ok(Resume::Unfinished)
        }
    }
}
