//! Execution state stack
//!
//! Hosts keep their high-level behaviours ("patrol", "chase", a cut-scene)
//! on a `StateStack`. The top state is the active one; it typically owns an
//! `Interpreter` that the host steps once per tick. The stack knows nothing
//! about what a state contains beyond its entry/exit hooks.

pub mod stack;


pub use stack::{CapacityError, EmptyStackError, ExecutionState, StackState, StateStack};
