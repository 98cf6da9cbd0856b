//! Test helpers for interpreter tests
//!
//! Common utilities for loading scripts and building interpreters

use crate::interpreter::{
    CommandContext, CommandRegistry, Handler, Interpreter, Invocation, ManualClock, Ready,
    Resume, Script, ScriptError, Suspension, Val,
};
use serde_json::Value as JsonValue;
use std::cell::RefCell;
use std::rc::Rc;

/// Load `source`, round-trip it through serde, and build an interpreter
/// driven by a manual clock
///
/// Returns the interpreter and a handle on its clock.
pub fn build(source: JsonValue, extra: CommandRegistry) -> (Interpreter, ManualClock) {
    let script = Script::from_json(&source).expect("Script load failed");
    let reparsed: Script =
        serde_json::from_value(source).expect("Script deserialization failed");
    assert_eq!(script, reparsed);

    let clock = ManualClock::new();
    let interp = Interpreter::with_clock(script, extra, clock.clone());
    (interp, clock)
}

/// Shared record of handler invocations
pub type Calls = Rc<RefCell<Vec<Invocation>>>;

/// Register `name` as a single-tick command that records every invocation
/// and returns `result`
pub fn recording(registry: &mut CommandRegistry, name: &str, result: Val) -> Calls {
    let calls = Calls::default();
    let sink = calls.clone();
    registry.register_fn(name, move |call| {
        sink.borrow_mut().push(call.clone());
        Ok(result.clone())
    });
    calls
}

/// Command that stays unfinished for `args[0]` resumes, then returns "done"
pub struct Countdown;

struct CountdownRun {
    remaining: i64,
}

impl Handler for Countdown {
    fn invoke(
        &self,
        call: Invocation,
        _ctx: &CommandContext<'_>,
    ) -> Result<Box<dyn Suspension>, ScriptError> {
        let remaining = match call.args.first() {
            Some(Val::Int(n)) => *n,
            _ => return Err(ScriptError::wrong_arg_type(&call.name, "expected an int")),
        };
        Ok(Box::new(CountdownRun { remaining }))
    }
}

impl Suspension for CountdownRun {
    fn resume(&mut self, _ctx: &CommandContext<'_>) -> Result<Resume, ScriptError> {
        if self.remaining > 0 {
            self.remaining -= 1;
            return Ok(Resume::Unfinished);
        }
        Ok(Resume::Done(Val::Str("done".into())))
    }
}

/// Command returning the clock reading (ms) from the tick it was started in
pub struct Stamp;

impl Handler for Stamp {
    fn invoke(
        &self,
        _call: Invocation,
        ctx: &CommandContext<'_>,
    ) -> Result<Box<dyn Suspension>, ScriptError> {
        let ms = ctx.now().as_millis() as i64;
        Ok(Box::new(Ready::new(Val::Int(ms))))
    }
}
