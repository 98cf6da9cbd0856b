//! Tests for error propagation
//!
//! Script errors abort the current step, leave the cursor on the failing
//! command and let the host retry.

use super::helpers::{build, recording};
use crate::interpreter::errors;
use crate::interpreter::{
    CommandContext, CommandRegistry, Handler, Invocation, InterpreterState, Resume, ScriptError,
    StepResult, Suspension, Val,
};
use serde_json::json;
use std::cell::Cell;
use std::rc::Rc;

#[test]
fn test_unknown_command_fails_and_holds_cursor() {
    let (mut interp, _clock) = build(
        json!([
            {"action": "sum", "args": [1, 2], ":VAR": "before"},
            ["frobnicate", 1],
            ["print", "after"]
        ]),
        CommandRegistry::new(),
    );

    // The first command completes; the second cannot start, but that only
    // surfaces on the next tick
    assert_eq!(interp.step().unwrap(), StepResult::Completed);
    assert_eq!(interp.namespace().get("before"), Some(&Val::Int(3)));
    assert_eq!(interp.cursor(), 1);
    assert_eq!(interp.state(), InterpreterState::Running);

    let Err(err) = interp.step() else {
        unreachable!("expected a resolution error");
    };
    assert_eq!(err, ScriptError::resolution("frobnicate"));
    assert_eq!(err.code(), errors::RESOLUTION_ERROR);
    assert_eq!(interp.cursor(), 1);
    assert_eq!(interp.namespace().get("before"), Some(&Val::Int(3)));

    // Retrying without a fix fails the same way
    assert!(matches!(
        interp.step(),
        Err(ScriptError::Resolution { ref name }) if name == "frobnicate"
    ));
    assert_eq!(interp.cursor(), 1);

    // Register the command and retry
    let calls = recording(interp.registry_mut(), "frobnicate", Val::Null);
    assert_eq!(interp.step().unwrap(), StepResult::Completed);
    assert_eq!(calls.borrow().len(), 1);
    assert_eq!(interp.cursor(), 2);

    assert_eq!(interp.step().unwrap(), StepResult::Completed);
    assert!(interp.is_finished());
}

#[test]
fn test_unknown_first_command() {
    let (mut interp, _clock) = build(json!([["frobnicate"]]), CommandRegistry::new());

    let Err(ScriptError::Resolution { name }) = interp.step() else {
        unreachable!("expected a resolution error");
    };
    assert_eq!(name, "frobnicate");
    assert_eq!(interp.cursor(), 0);
    assert_eq!(interp.state(), InterpreterState::Running);
    assert!(!interp.is_finished());
}

#[test]
fn test_unknown_nested_command() {
    let (mut interp, _clock) = build(
        json!([["print", ["nope", 1]]]),
        CommandRegistry::new(),
    );

    let Err(err) = interp.step() else {
        unreachable!("expected a resolution error");
    };
    assert_eq!(err, ScriptError::resolution("nope"));
}

#[test]
fn test_unbound_strict_reference_fails() {
    let (mut interp, _clock) = build(
        json!([["print", "$missing"]]),
        CommandRegistry::new(),
    );

    let Err(ScriptError::Evaluation { expr, reason }) = interp.step() else {
        unreachable!("expected an evaluation error");
    };
    assert_eq!(expr, "$missing");
    assert!(reason.contains("'missing' is not bound"));
    assert_eq!(interp.cursor(), 0);
}

#[test]
fn test_guard_evaluation_error_propagates() {
    let mut extra = CommandRegistry::new();
    let calls = recording(&mut extra, "guarded", Val::Null);
    let (mut interp, _clock) = build(
        json!([{"action": "guarded", ":IF": "$flag"}]),
        extra,
    );

    assert!(matches!(interp.step(), Err(ScriptError::Evaluation { .. })));
    assert!(calls.borrow().is_empty());
}

#[test]
fn test_argument_error_from_builtin() {
    let (mut interp, _clock) = build(json!([[">", 1, "apple"]]), CommandRegistry::new());

    let Err(ScriptError::Argument { command, code, message }) = interp.step() else {
        unreachable!("expected an argument error");
    };
    assert_eq!(command, ">");
    assert_eq!(code, errors::WRONG_ARG_TYPE);
    assert_eq!(message, "cannot compare int with string");
}

#[test]
fn test_error_display() {
    assert_eq!(
        ScriptError::resolution("jump").to_string(),
        "unknown command 'jump'"
    );
    assert_eq!(
        ScriptError::evaluation("$x", "variable 'x' is not bound").to_string(),
        "cannot evaluate '$x': variable 'x' is not bound"
    );
    assert_eq!(
        ScriptError::wrong_arg_count("eq", 2, 3).to_string(),
        "eq: expected 2 argument(s), got 3"
    );
}

/* ===================== Resume Failures ===================== */

/// Command whose suspension fails until `healthy` is set
struct Flaky {
    healthy: Rc<Cell<bool>>,
}

struct FlakyRun {
    healthy: Rc<Cell<bool>>,
    resumes: u32,
}

impl Handler for Flaky {
    fn invoke(
        &self,
        _call: Invocation,
        _ctx: &CommandContext<'_>,
    ) -> Result<Box<dyn Suspension>, ScriptError> {
        Ok(Box::new(FlakyRun {
            healthy: self.healthy.clone(),
            resumes: 0,
        }))
    }
}

impl Suspension for FlakyRun {
    fn resume(&mut self, _ctx: &CommandContext<'_>) -> Result<Resume, ScriptError> {
        self.resumes += 1;
        if !self.healthy.get() {
            return Err(ScriptError::wrong_arg_type("flaky", "not ready"));
        }
        Ok(Resume::Done(Val::Int(self.resumes as i64)))
    }
}

#[test]
fn test_resume_error_keeps_suspension() {
    let healthy = Rc::new(Cell::new(false));
    let mut extra = CommandRegistry::new();
    extra.register(
        "flaky",
        Rc::new(Flaky {
            healthy: healthy.clone(),
        }),
    );

    let (mut interp, _clock) = build(
        json!([{"action": "flaky", ":VAR": "attempts"}]),
        extra,
    );

    assert!(interp.step().is_err());
    assert!(interp.step().is_err());
    assert_eq!(interp.cursor(), 0);

    healthy.set(true);
    assert_eq!(interp.step().unwrap(), StepResult::Completed);

    // Same suspension resumed three times
    assert_eq!(interp.namespace().get("attempts"), Some(&Val::Int(3)));
}
