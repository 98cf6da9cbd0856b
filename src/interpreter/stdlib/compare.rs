//! Equality, logic and ordering commands

use crate::interpreter::errors::ScriptError;
use crate::interpreter::registry::Invocation;
use crate::interpreter::types::Val;
use std::cmp::Ordering;

/// eq(x, y) - value equality, numbers compare across int/float
pub fn eq(call: &Invocation) -> Result<Val, ScriptError> {
    let [x, y] = call.exact_args(2)? else {
        unreachable!("arity checked")
    };
    Ok(Val::Bool(x == y))
}

/// neq(x, y)
pub fn neq(call: &Invocation) -> Result<Val, ScriptError> {
    let [x, y] = call.exact_args(2)? else {
        unreachable!("arity checked")
    };
    Ok(Val::Bool(x != y))
}

/// or(x, y) - x when truthy, otherwise y
pub fn or(call: &Invocation) -> Result<Val, ScriptError> {
    let [x, y] = call.exact_args(2)? else {
        unreachable!("arity checked")
    };
    Ok(if x.is_truthy() { x.clone() } else { y.clone() })
}

/// and(x, y) - x when falsy, otherwise y
pub fn and(call: &Invocation) -> Result<Val, ScriptError> {
    let [x, y] = call.exact_args(2)? else {
        unreachable!("arity checked")
    };
    Ok(if x.is_truthy() { y.clone() } else { x.clone() })
}

pub fn gt(call: &Invocation) -> Result<Val, ScriptError> {
    ordering(call, |o| o == Ordering::Greater)
}

pub fn ge(call: &Invocation) -> Result<Val, ScriptError> {
    ordering(call, |o| o != Ordering::Less)
}

pub fn lt(call: &Invocation) -> Result<Val, ScriptError> {
    ordering(call, |o| o == Ordering::Less)
}

pub fn le(call: &Invocation) -> Result<Val, ScriptError> {
    ordering(call, |o| o != Ordering::Greater)
}

fn ordering(call: &Invocation, accept: impl Fn(Ordering) -> bool) -> Result<Val, ScriptError> {
    let [x, y] = call.exact_args(2)? else {
        unreachable!("arity checked")
    };
    let order = x.compare(y).ok_or_else(|| {
        ScriptError::wrong_arg_type(
            &call.name,
            format!("cannot compare {} with {}", x.type_name(), y.type_name()),
        )
    })?;
    Ok(Val::Bool(accept(order)))
}
