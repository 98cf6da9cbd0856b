//! Command registry
//!
//! A capability table from command name to handler. Handlers are stateless
//! factories: each invocation returns a fresh `Suspension` that owns all
//! per-invocation progress. Overriding a command is plain re-insertion.

use super::clock::Clock;
use super::errors::ScriptError;
use super::namespace::Namespace;
use super::stdlib;
use super::types::{Resume, Val};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/* ===================== Handler Contract ===================== */

/// Evaluated arguments of one command invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub name: String,
    pub args: Vec<Val>,
    pub kwargs: HashMap<String, Val>,
}

impl Invocation {
    pub fn new(name: impl Into<String>, args: Vec<Val>) -> Self {
        Invocation {
            name: name.into(),
            args,
            kwargs: HashMap::new(),
        }
    }

    /// Positional arguments, checked for an exact count
    pub fn exact_args(&self, count: usize) -> Result<&[Val], ScriptError> {
        if self.args.len() != count {
            return Err(ScriptError::wrong_arg_count(&self.name, count, self.args.len()));
        }
        Ok(&self.args)
    }

    pub fn kwarg(&self, key: &str) -> Option<&Val> {
        self.kwargs.get(key)
    }
}

/// What a handler can see while it runs
pub struct CommandContext<'a> {
    clock: &'a dyn Clock,
    namespace: &'a Namespace,
}

impl<'a> CommandContext<'a> {
    pub fn new(clock: &'a dyn Clock, namespace: &'a Namespace) -> Self {
        CommandContext { clock, namespace }
    }

    /// Current host clock reading
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    pub fn namespace(&self) -> &Namespace {
        self.namespace
    }
}

/// Live execution handle of a running command
pub trait Suspension {
    fn resume(&mut self, ctx: &CommandContext<'_>) -> Result<Resume, ScriptError>;
}

/// Factory producing one suspension per invocation
///
/// `invoke` runs in the tick before the command's first resume, so the
/// command's effects belong in the suspension.
pub trait Handler {
    fn invoke(
        &self,
        call: Invocation,
        ctx: &CommandContext<'_>,
    ) -> Result<Box<dyn Suspension>, ScriptError>;
}

/// Suspension holding a value computed ahead of time
#[derive(Debug)]
pub struct Ready(Option<Val>);

impl Ready {
    pub fn new(value: Val) -> Self {
        Ready(Some(value))
    }
}

impl Suspension for Ready {
    fn resume(&mut self, _ctx: &CommandContext<'_>) -> Result<Resume, ScriptError> {
        Ok(Resume::Done(self.0.take().unwrap_or(Val::Null)))
    }
}

struct Immediate<F>(Rc<F>);

impl<F> Handler for Immediate<F>
where
    F: Fn(&Invocation) -> Result<Val, ScriptError> + 'static,
{
    fn invoke(
        &self,
        call: Invocation,
        _ctx: &CommandContext<'_>,
    ) -> Result<Box<dyn Suspension>, ScriptError> {
        Ok(Box::new(Deferred {
            f: self.0.clone(),
            call,
        }))
    }
}

/// Runs the wrapped function on first resume
///
/// An error leaves the suspension in place, so a retry calls the function
/// again with the same arguments.
struct Deferred<F> {
    f: Rc<F>,
    call: Invocation,
}

impl<F> Suspension for Deferred<F>
where
    F: Fn(&Invocation) -> Result<Val, ScriptError>,
{
    fn resume(&mut self, _ctx: &CommandContext<'_>) -> Result<Resume, ScriptError> {
        (self.f)(&self.call).map(Resume::Done)
    }
}

/// Wrap a plain function into a single-tick command
pub fn immediate<F>(f: F) -> Rc<dyn Handler>
where
    F: Fn(&Invocation) -> Result<Val, ScriptError> + 'static,
{
    Rc::new(Immediate(Rc::new(f)))
}

/* ===================== Registry ===================== */

#[derive(Clone, Default)]
pub struct CommandRegistry {
    handlers: HashMap<String, Rc<dyn Handler>>,
}

impl CommandRegistry {
    /// Empty registry (no built-ins)
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in command set
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        stdlib::register_builtins(&mut registry);
        registry
    }

    /// Register a handler, replacing any previous handler for `name`
    pub fn register(
        &mut self,
        name: impl Into<String>,
        handler: Rc<dyn Handler>,
    ) -> Option<Rc<dyn Handler>> {
        self.handlers.insert(name.into(), handler)
    }

    /// Register a single-tick command from a plain function
    pub fn register_fn<F>(&mut self, name: impl Into<String>, f: F) -> Option<Rc<dyn Handler>>
    where
        F: Fn(&Invocation) -> Result<Val, ScriptError> + 'static,
    {
        self.register(name, immediate(f))
    }

    /// Merge `other` into this registry; entries in `other` win
    pub fn extend(&mut self, other: CommandRegistry) {
        self.handlers.extend(other.handlers);
    }

    /// Re-register the full built-in set over whatever is registered now
    ///
    /// Host commands with non-built-in names are kept.
    pub fn reset(&mut self) {
        stdlib::register_builtins(self);
    }

    pub fn resolve(&self, name: &str) -> Result<Rc<dyn Handler>, ScriptError> {
        self.handlers
            .get(name)
            .cloned()
            .ok_or_else(|| ScriptError::resolution(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.names())
            .finish()
    }
}
