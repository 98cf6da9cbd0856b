//! Tests for result bindings and the namespace

use super::helpers::{build, Countdown};
use crate::interpreter::{CommandRegistry, Namespace, StepResult, Val};
use serde_json::json;
use std::rc::Rc;

#[test]
fn test_namespace_seeded_with_booleans() {
    let namespace = Namespace::new();
    assert_eq!(namespace.get("true"), Some(&Val::Bool(true)));
    assert_eq!(namespace.get("false"), Some(&Val::Bool(false)));
    assert_eq!(namespace.len(), 2);
}

#[test]
fn test_binding_appears_only_after_completion() {
    let mut extra = CommandRegistry::new();
    extra.register("countdown", Rc::new(Countdown));

    let (mut interp, _clock) = build(
        json!([{"action": "countdown", "args": [1], ":VAR": "result"}]),
        extra,
    );

    assert_eq!(interp.step().unwrap(), StepResult::StillRunning);
    assert!(!interp.namespace().contains("result"));

    assert_eq!(interp.step().unwrap(), StepResult::Completed);
    assert_eq!(
        interp.namespace().get("result"),
        Some(&Val::Str("done".into()))
    );
}

#[test]
fn test_bound_values_flow_into_later_commands() {
    let (mut interp, _clock) = build(
        json!([
            {"action": "sum", "args": [2, 3], ":VAR": "x"},
            {"action": "diff", "args": ["x", 1], ":VAR": "y"},
            {"action": "max", "args": ["x", "y", 1], ":VAR": "z"}
        ]),
        CommandRegistry::new(),
    );

    interp.step().unwrap();
    assert_eq!(interp.namespace().get("x"), Some(&Val::Int(5)));
    assert!(!interp.namespace().contains("y"));

    interp.step().unwrap();
    assert_eq!(interp.namespace().get("y"), Some(&Val::Int(4)));

    interp.step().unwrap();
    assert_eq!(interp.namespace().get("z"), Some(&Val::Int(5)));
}

#[test]
fn test_rebinding_overwrites() {
    let (mut interp, _clock) = build(
        json!([
            {"action": "sum", "args": [1], ":VAR": "n"},
            {"action": "sum", "args": ["n", 1], ":VAR": "n"},
            {"action": "sum", "args": ["n", 1], ":VAR": "n"}
        ]),
        CommandRegistry::new(),
    );

    interp.run_to_completion(10).unwrap();
    assert_eq!(interp.namespace().get("n"), Some(&Val::Int(3)));
}

#[test]
fn test_null_result_is_still_bound() {
    let (mut interp, _clock) = build(
        json!([{"action": "print", "args": ["hi"], ":VAR": "printed"}]),
        CommandRegistry::new(),
    );

    interp.step().unwrap();
    assert_eq!(interp.namespace().get("printed"), Some(&Val::Null));
}

#[test]
fn test_binding_can_shadow_constants() {
    let (mut interp, _clock) = build(
        json!([
            {"action": "eq", "args": [1, 2], ":VAR": "true"},
            {"action": "print", ":IF": "true"}
        ]),
        CommandRegistry::new(),
    );

    interp.step().unwrap();
    assert_eq!(interp.namespace().get("true"), Some(&Val::Bool(false)));
    assert!(interp.is_finished());
}

#[test]
fn test_positional_commands_never_bind() {
    let (mut interp, _clock) = build(json!([["sum", 1, 2]]), CommandRegistry::new());
    let before = interp.namespace().clone();

    interp.step().unwrap();
    assert_eq!(interp.namespace(), &before);
}

#[test]
fn test_sorted_bindings() {
    let (mut interp, _clock) = build(
        json!([
            {"action": "sum", "args": [1], ":VAR": "b"},
            {"action": "sum", "args": [2], ":VAR": "a"}
        ]),
        CommandRegistry::new(),
    );
    interp.run_to_completion(10).unwrap();

    let names: Vec<_> = interp.namespace().sorted().into_iter().map(|(k, _)| k).collect();
    assert_eq!(names, vec!["a", "b", "false", "true"]);
}
