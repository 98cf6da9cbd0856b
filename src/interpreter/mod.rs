//! # Interpreter - Tick-Driven Script Engine
//!
//! Runs a script of commands one tick at a time.
//!
//! ## Core Principles
//!
//! 1. **Host-driven**: nothing runs unless the host calls `step()`
//! 2. **One completion per tick**: a tick completes at most one command;
//!    guard-unmet commands are skipped for free
//! 3. **Explicit suspensions**: multi-tick commands are `Suspension` state
//!    machines that keep their own progress (e.g. a deadline)
//! 4. **Capability table**: commands are looked up by name in a
//!    `CommandRegistry`; hosts override by re-registering
//!
//! ## Example
//!
//! ```
//! use cadence_core::interpreter::{CommandRegistry, Interpreter, Script, StepResult, Val};
//!
//! let script: Script = r#"[
//!     {"action": "sum", "args": [1, 2, 3], ":VAR": "total"},
//!     ["print", "total is", "total"]
//! ]"#.parse().unwrap();
//!
//! let mut interp = Interpreter::new(script, CommandRegistry::new());
//! assert_eq!(interp.step().unwrap(), StepResult::Completed);
//! assert_eq!(interp.namespace().get("total"), Some(&Val::Int(6)));
//! ```

pub mod clock;
pub mod errors;
pub mod exec_loop;
pub mod expressions;
pub mod loader;
pub mod namespace;
pub mod registry;
pub mod stdlib;
pub mod timer;
pub mod types;
pub mod vm;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use clock::{Clock, ManualClock, SystemClock};
pub use errors::{LoadError, ScriptError};
pub use loader::Script;
pub use namespace::Namespace;
pub use registry::{immediate, CommandContext, CommandRegistry, Handler, Invocation, Ready, Suspension};
pub use timer::Timer;
pub use types::{Command, Expr, InterpreterState, Resume, StepResult, Val};
pub use vm::Interpreter;
