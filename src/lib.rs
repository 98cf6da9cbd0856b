pub mod cli;
pub mod config;
pub mod interpreter;
pub mod runner;
pub mod state;

// Re-export main types
pub use config::Config;
pub use interpreter::{CommandRegistry, Interpreter, Script, ScriptError, StepResult, Val};
pub use runner::{run_script, RunSummary};
pub use state::{ExecutionState, StateStack};
