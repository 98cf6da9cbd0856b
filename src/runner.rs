//! Host tick loop
//!
//! Drives an `Interpreter` from a tokio interval, one `step()` per tick,
//! until the script finishes or the tick budget runs out.

use anyhow::Result;
use tokio::time::{Instant, MissedTickBehavior};

use crate::config::RunnerConfig;
use crate::interpreter::{Clock, Interpreter, Namespace, StepResult};

/// Clock backed by tokio's time source
///
/// Follows paused and auto-advanced time in tests.
#[derive(Debug, Clone, Copy)]
pub struct TokioClock {
    epoch: Instant,
}

impl TokioClock {
    pub fn new() -> Self {
        TokioClock {
            epoch: Instant::now(),
        }
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn now(&self) -> std::time::Duration {
        self.epoch.elapsed()
    }
}

/// Outcome of a run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Ticks spent, including ticks that ended in an error
    pub ticks: u64,
    pub finished: bool,
    /// Script errors seen (only ever 0 or 1 with stop_on_error)
    pub errors: u64,
    /// Bindings at the end of the run
    pub namespace: Namespace,
}

/// Step the interpreter once per tick until it finishes
///
/// Script errors are logged. With `stop_on_error` the run aborts with the
/// error; otherwise the failing command is retried on the next tick.
pub async fn run_script(interpreter: &mut Interpreter, config: &RunnerConfig) -> Result<RunSummary> {
    let mut interval = tokio::time::interval(config.tick_interval());
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut ticks = 0;
    let mut errors = 0;

    tracing::info!(
        commands = interpreter.script().len(),
        tick_ms = config.tick_interval_ms,
        "starting script"
    );

    while !interpreter.is_finished() {
        if config.tick_limit().is_some_and(|limit| ticks >= limit) {
            tracing::warn!(ticks, cursor = interpreter.cursor(), "tick limit reached");
            break;
        }

        interval.tick().await;
        ticks += 1;

        match interpreter.step() {
            Ok(StepResult::StillRunning) => {}
            Ok(result) => {
                tracing::trace!(tick = ticks, cursor = interpreter.cursor(), ?result, "tick");
            }
            Err(err) => {
                errors += 1;
                let cursor = interpreter.cursor();
                tracing::warn!(
                    tick = ticks,
                    cursor,
                    code = err.code(),
                    error = %err,
                    "script error"
                );
                if config.stop_on_error {
                    return Err(anyhow::Error::new(err)
                        .context(format!("script aborted at command {} after {} ticks", cursor, ticks)));
                }
            }
        }
    }

    let finished = interpreter.is_finished();
    tracing::info!(ticks, finished, errors, "script run ended");

    Ok(RunSummary {
        ticks,
        finished,
        errors,
        namespace: interpreter.namespace().clone(),
    })
}
