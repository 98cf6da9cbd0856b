//! Type definitions for the interpreter
//!
//! - Script nodes (Command, Expr)
//! - Runtime values (Val)
//! - Resume/step outcomes

pub mod ast;
pub mod outcome;
pub mod values;

pub use ast::{Command, Expr};
pub use outcome::{InterpreterState, Resume, StepResult};
pub use values::Val;
