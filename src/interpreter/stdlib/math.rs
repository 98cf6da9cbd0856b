//! Arithmetic commands

use crate::interpreter::errors::ScriptError;
use crate::interpreter::registry::Invocation;
use crate::interpreter::types::Val;
use std::cmp::Ordering;

/// max(a, b, ...) or max([a, b, ...])
pub fn max(call: &Invocation) -> Result<Val, ScriptError> {
    extreme(call, Ordering::Greater)
}

/// min(a, b, ...) or min([a, b, ...])
pub fn min(call: &Invocation) -> Result<Val, ScriptError> {
    extreme(call, Ordering::Less)
}

/// sum(a, b, ...) - list arguments are flattened one level
///
/// Stays an int unless a float is involved. The empty sum is 0.
pub fn sum(call: &Invocation) -> Result<Val, ScriptError> {
    let mut total = Val::Int(0);
    for arg in &call.args {
        match arg {
            Val::List(items) => {
                for item in items {
                    total = add(&call.name, &total, item)?;
                }
            }
            other => total = add(&call.name, &total, other)?,
        }
    }
    Ok(total)
}

/// diff(x, y) - x minus y
pub fn diff(call: &Invocation) -> Result<Val, ScriptError> {
    let [x, y] = call.exact_args(2)? else {
        unreachable!("arity checked")
    };
    match (x, y) {
        (Val::Int(a), Val::Int(b)) => a
            .checked_sub(*b)
            .map(Val::Int)
            .ok_or_else(|| ScriptError::wrong_arg_type(&call.name, "integer overflow")),
        (a, b) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => Ok(Val::Float(a - b)),
            _ => Err(not_numbers(&call.name, a, b)),
        },
    }
}

/* ===================== Helpers ===================== */

fn add(command: &str, total: &Val, item: &Val) -> Result<Val, ScriptError> {
    match (total, item) {
        (Val::Int(a), Val::Int(b)) => a
            .checked_add(*b)
            .map(Val::Int)
            .ok_or_else(|| ScriptError::wrong_arg_type(command, "integer overflow")),
        (a, b) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => Ok(Val::Float(a + b)),
            _ => Err(not_numbers(command, a, b)),
        },
    }
}

fn extreme(call: &Invocation, want: Ordering) -> Result<Val, ScriptError> {
    let values: &[Val] = match call.args.as_slice() {
        [Val::List(items)] => items,
        args => args,
    };

    let (first, rest) = values.split_first().ok_or_else(|| {
        ScriptError::wrong_arg_count(&call.name, "at least 1", 0)
    })?;

    let mut best = first;
    for candidate in rest {
        let order = candidate.compare(best).ok_or_else(|| {
            ScriptError::wrong_arg_type(
                &call.name,
                format!(
                    "cannot compare {} with {}",
                    candidate.type_name(),
                    best.type_name()
                ),
            )
        })?;
        if order == want {
            best = candidate;
        }
    }
    Ok(best.clone())
}

fn not_numbers(command: &str, a: &Val, b: &Val) -> ScriptError {
    ScriptError::wrong_arg_type(
        command,
        format!("expected numbers, got {} and {}", a.type_name(), b.type_name()),
    )
}
