//! Expression evaluation
//!
//! Resolves literals, names and nested commands to values. Nested commands
//! run to completion inside the current tick: they are started and resumed
//! exactly once, and a nested command that asks for more ticks is an error.

use super::clock::Clock;
use super::errors::ScriptError;
use super::namespace::Namespace;
use super::registry::{CommandContext, CommandRegistry, Invocation, Suspension};
use super::types::{Command, Expr, Resume, Val};
use std::collections::HashMap;

/// Prefix marking a strict variable reference (`$name`)
pub const VAR_PREFIX: char = '$';

/// Borrowed pieces of interpreter state needed to evaluate expressions
pub struct Scope<'a> {
    pub registry: &'a CommandRegistry,
    pub namespace: &'a mut Namespace,
    pub clock: &'a dyn Clock,
}

/// Evaluate an expression to a value
pub fn eval_expr(expr: &Expr, scope: &mut Scope<'_>) -> Result<Val, ScriptError> {
    match expr {
        Expr::Lit { v } => Ok(v.clone()),
        Expr::Name { name } => resolve_name(name, scope.namespace),
        Expr::Call { command } => eval_call(command, scope),
    }
}

/// Resolve a bare name
///
/// Order: strict `$name` reference, namespace binding, integer, float,
/// string literal.
pub fn resolve_name(name: &str, namespace: &Namespace) -> Result<Val, ScriptError> {
    if let Some(var) = name.strip_prefix(VAR_PREFIX) {
        return namespace
            .get(var)
            .cloned()
            .ok_or_else(|| ScriptError::evaluation(name, format!("variable '{}' is not bound", var)));
    }

    if let Some(v) = namespace.get(name) {
        return Ok(v.clone());
    }

    let text = name.trim();
    if let Ok(i) = text.parse::<i64>() {
        return Ok(Val::Int(i));
    }
    if let Ok(f) = text.parse::<f64>() {
        return Ok(Val::Float(f));
    }

    Ok(Val::Str(name.to_string()))
}

/// Evaluate a nested command synchronously
fn eval_call(command: &Command, scope: &mut Scope<'_>) -> Result<Val, ScriptError> {
    let Some(mut suspension) = begin_command(command, scope)? else {
        // Guard unmet: the nested command contributes nothing
        return Ok(Val::Null);
    };

    let ctx = CommandContext::new(scope.clock, scope.namespace);
    let value = match suspension.resume(&ctx)? {
        Resume::Done(v) => v,
        Resume::GuardUnmet => Val::Null,
        Resume::Unfinished => {
            return Err(ScriptError::evaluation(
                command.name(),
                "command did not finish within the tick; only top-level commands may wait",
            ));
        }
    };

    if let Some(name) = command.binding() {
        scope.namespace.bind(name, value.clone());
    }
    Ok(value)
}

/// Evaluate guard and arguments, then invoke the handler
///
/// Returns `None` when the guard is unmet. In that case neither the
/// arguments nor the handler are touched.
pub fn begin_command(
    command: &Command,
    scope: &mut Scope<'_>,
) -> Result<Option<Box<dyn Suspension>>, ScriptError> {
    let Some(call) = prepare_invocation(command, scope)? else {
        return Ok(None);
    };

    let handler = scope.registry.resolve(command.name())?;
    let ctx = CommandContext::new(scope.clock, scope.namespace);
    handler.invoke(call, &ctx).map(Some)
}

/// Evaluate the guard, then the positional and named arguments
pub fn prepare_invocation(
    command: &Command,
    scope: &mut Scope<'_>,
) -> Result<Option<Invocation>, ScriptError> {
    if let Some(guard) = command.guard() {
        if !eval_expr(guard, scope)?.is_truthy() {
            return Ok(None);
        }
    }

    let args = command
        .args()
        .iter()
        .map(|arg| eval_expr(arg, scope))
        .collect::<Result<Vec<_>, _>>()?;

    let mut kwargs = HashMap::new();
    if let Command::Keyword { kwargs: exprs, .. } = command {
        for (key, expr) in exprs {
            kwargs.insert(key.clone(), eval_expr(expr, scope)?);
        }
    }

    Ok(Some(Invocation {
        name: command.name().to_string(),
        args,
        kwargs,
    }))
}
