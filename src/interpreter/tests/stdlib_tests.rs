//! Tests for the built-in commands, called directly

use crate::interpreter::errors;
use crate::interpreter::stdlib::{compare, math, print};
use crate::interpreter::{Invocation, ScriptError, Val};
use maplit::hashmap;

fn call(name: &str, args: Vec<Val>) -> Invocation {
    Invocation::new(name, args)
}

fn ints(values: &[i64]) -> Vec<Val> {
    values.iter().copied().map(Val::Int).collect()
}

/* ===================== Comparison ===================== */

#[test]
fn test_eq_neq() {
    assert_eq!(compare::eq(&call("eq", ints(&[3, 3]))).unwrap(), Val::Bool(true));
    assert_eq!(
        compare::eq(&call("eq", vec![Val::Int(3), Val::Float(3.0)])).unwrap(),
        Val::Bool(true)
    );
    assert_eq!(
        compare::eq(&call("eq", vec![Val::Int(1), Val::Str("1".into())])).unwrap(),
        Val::Bool(false)
    );
    assert_eq!(
        compare::neq(&call("neq", vec![Val::Null, Val::Bool(false)])).unwrap(),
        Val::Bool(true)
    );
}

#[test]
fn test_or_and_return_operands() {
    let empty = Val::Str(String::new());
    let word = Val::Str("fallback".into());

    assert_eq!(
        compare::or(&call("or", vec![empty.clone(), word.clone()])).unwrap(),
        word
    );
    assert_eq!(
        compare::or(&call("or", vec![Val::Int(5), word.clone()])).unwrap(),
        Val::Int(5)
    );
    assert_eq!(
        compare::and(&call("and", vec![Val::Int(0), word.clone()])).unwrap(),
        Val::Int(0)
    );
    assert_eq!(
        compare::and(&call("and", vec![Val::Bool(true), word.clone()])).unwrap(),
        word
    );
}

#[test]
fn test_ordering() {
    assert_eq!(compare::gt(&call(">", ints(&[2, 1]))).unwrap(), Val::Bool(true));
    assert_eq!(compare::gt(&call(">", ints(&[1, 1]))).unwrap(), Val::Bool(false));
    assert_eq!(compare::ge(&call(">=", ints(&[1, 1]))).unwrap(), Val::Bool(true));
    assert_eq!(
        compare::lt(&call("<", vec![Val::Float(0.5), Val::Int(1)])).unwrap(),
        Val::Bool(true)
    );
    assert_eq!(compare::le(&call("<=", ints(&[2, 1]))).unwrap(), Val::Bool(false));
    assert_eq!(
        compare::lt(&call("<", vec![Val::Str("a".into()), Val::Str("b".into())])).unwrap(),
        Val::Bool(true)
    );
}

#[test]
fn test_comparison_arity() {
    for result in [
        compare::eq(&call("eq", ints(&[1]))),
        compare::or(&call("or", ints(&[1, 2, 3]))),
        compare::gt(&call(">", vec![])),
    ] {
        let Err(err) = result else {
            unreachable!("expected an argument count error");
        };
        assert_eq!(err.code(), errors::WRONG_ARG_COUNT);
    }
}

#[test]
fn test_ordering_mixed_types() {
    let err = compare::le(&call("<=", vec![Val::Null, Val::Int(1)])).unwrap_err();
    assert_eq!(
        err,
        ScriptError::wrong_arg_type("<=", "cannot compare null with int")
    );
}

/* ===================== Arithmetic ===================== */

#[test]
fn test_max_min() {
    assert_eq!(math::max(&call("max", ints(&[3, 9, 4]))).unwrap(), Val::Int(9));
    assert_eq!(math::min(&call("min", ints(&[3, 9, 4]))).unwrap(), Val::Int(3));
    assert_eq!(
        math::max(&call("max", vec![Val::Int(2), Val::Float(2.5)])).unwrap(),
        Val::Float(2.5)
    );
    // A single list argument is unpacked
    assert_eq!(
        math::min(&call("min", vec![Val::List(ints(&[8, -2, 5]))])).unwrap(),
        Val::Int(-2)
    );
    assert_eq!(math::max(&call("max", ints(&[7]))).unwrap(), Val::Int(7));
}

#[test]
fn test_max_errors() {
    let err = math::max(&call("max", vec![])).unwrap_err();
    assert_eq!(err.code(), errors::WRONG_ARG_COUNT);

    let err = math::max(&call("max", vec![Val::Int(1), Val::Str("z".into())])).unwrap_err();
    assert_eq!(err.code(), errors::WRONG_ARG_TYPE);
}

#[test]
fn test_sum() {
    assert_eq!(math::sum(&call("sum", vec![])).unwrap(), Val::Int(0));
    assert_eq!(math::sum(&call("sum", ints(&[1, 2, 3]))).unwrap(), Val::Int(6));
    assert_eq!(
        math::sum(&call("sum", vec![Val::Int(1), Val::Float(0.5)])).unwrap(),
        Val::Float(1.5)
    );
    assert_eq!(
        math::sum(&call("sum", vec![Val::List(ints(&[1, 2])), Val::Int(10)])).unwrap(),
        Val::Int(13)
    );

    let err = math::sum(&call("sum", vec![Val::Int(1), Val::Str("two".into())])).unwrap_err();
    assert_eq!(
        err,
        ScriptError::wrong_arg_type("sum", "expected numbers, got int and string")
    );

    let err = math::sum(&call("sum", ints(&[i64::MAX, 1]))).unwrap_err();
    assert_eq!(err.code(), errors::WRONG_ARG_TYPE);
}

#[test]
fn test_diff() {
    assert_eq!(math::diff(&call("diff", ints(&[10, 4]))).unwrap(), Val::Int(6));
    assert_eq!(
        math::diff(&call("diff", vec![Val::Float(1.5), Val::Int(1)])).unwrap(),
        Val::Float(0.5)
    );
    assert_eq!(
        math::diff(&call("diff", ints(&[1]))).unwrap_err().code(),
        errors::WRONG_ARG_COUNT
    );
    assert_eq!(
        math::diff(&call("diff", vec![Val::Bool(true), Val::Int(1)]))
            .unwrap_err()
            .code(),
        errors::WRONG_ARG_TYPE
    );
}

/* ===================== Diagnostics ===================== */

#[test]
fn test_print_returns_null() {
    assert_eq!(
        print::print(&call("print", vec![Val::Str("hi".into()), Val::Int(1)])).unwrap(),
        Val::Null
    );

    let mut with_extras = call("print", vec![]);
    with_extras.kwargs = hashmap! {
        "level".to_string() => Val::Str("debug".into()),
        "count".to_string() => Val::Int(2),
    };
    assert_eq!(print::print(&with_extras).unwrap(), Val::Null);
}
