//! Diagnostic output

use crate::interpreter::errors::ScriptError;
use crate::interpreter::registry::Invocation;
use crate::interpreter::types::Val;

/// print(value, ...) - log the arguments, evaluate to null
pub fn print(call: &Invocation) -> Result<Val, ScriptError> {
    let message = call
        .args
        .iter()
        .map(Val::to_string)
        .collect::<Vec<_>>()
        .join(" ");

    if call.kwargs.is_empty() {
        tracing::info!(target: "cadence::script", "{}", message);
    } else {
        let mut extras: Vec<_> = call.kwargs.iter().collect();
        extras.sort_by(|a, b| a.0.cmp(b.0));
        let extras = extras
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ");
        tracing::info!(target: "cadence::script", extras = %extras, "{}", message);
    }

    Ok(Val::Null)
}
