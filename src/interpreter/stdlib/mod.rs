//! Built-in command implementations
//!
//! Organized by category. `register_builtins` is what both
//! `CommandRegistry::with_builtins` and `CommandRegistry::reset` call.

pub mod compare;
pub mod math;
pub mod print;
pub mod wait;

use super::registry::CommandRegistry;
use std::rc::Rc;

/* ===================== Registration ===================== */

/// Insert every built-in command, replacing existing entries with the same name
pub fn register_builtins(registry: &mut CommandRegistry) {
    // Comparison and logic
    registry.register_fn("eq", compare::eq);
    registry.register_fn("neq", compare::neq);
    registry.register_fn("or", compare::or);
    registry.register_fn("and", compare::and);
    registry.register_fn(">", compare::gt);
    registry.register_fn(">=", compare::ge);
    registry.register_fn("<", compare::lt);
    registry.register_fn("<=", compare::le);

    // Arithmetic
    registry.register_fn("max", math::max);
    registry.register_fn("min", math::min);
    registry.register_fn("sum", math::sum);
    registry.register_fn("diff", math::diff);

    // Diagnostics
    registry.register_fn("print", print::print);

    // Multi-tick
    registry.register("wait", Rc::new(wait::WaitHandler));
}
