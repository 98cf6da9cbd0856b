//! Resume and step outcomes

use super::values::Val;

/// Result of resuming a suspension once
#[derive(Debug, Clone, PartialEq)]
pub enum Resume {
    /// The command needs more ticks
    Unfinished,
    /// The command was skipped because its guard evaluated false
    GuardUnmet,
    /// The command completed with a value (offered for binding)
    Done(Val),
}

/// Result of one host tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// The in-flight command needs more ticks
    StillRunning,
    /// A command completed during this tick
    Completed,
    /// Nothing left to run; the call was a no-op
    Finished,
}

/// Lifecycle state of an interpreter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpreterState {
    /// `step()` has never been called (cursor = -1)
    NotStarted,
    /// A command at the cursor is live or about to start
    Running,
    /// Cursor reached the end of the script
    Complete,
}
