//! Interpreter state
//!
//! The interpreter holds everything needed to run one script:
//! - the script and a cursor into it
//! - the command registry (built-ins plus host commands)
//! - the namespace of bound values
//! - the suspension of the command currently in flight

use super::clock::{Clock, SystemClock};
use super::errors::ScriptError;
use super::expressions::{eval_expr, Scope};
use super::loader::Script;
use super::namespace::Namespace;
use super::registry::{CommandRegistry, Suspension};
use super::types::{Command, Expr, InterpreterState, Val};
use std::fmt;

/* ===================== Interpreter ===================== */

pub struct Interpreter {
    pub(super) script: Script,
    pub(super) registry: CommandRegistry,
    pub(super) namespace: Namespace,
    pub(super) clock: Box<dyn Clock>,

    /// `None` until the first step, then the index of the current command
    pub(super) cursor: Option<usize>,

    /// Suspension of the command at `cursor`, once it has started
    pub(super) active: Option<Active>,
}

/// The command currently in flight
pub(super) struct Active {
    pub suspension: Box<dyn Suspension>,
    pub binding: Option<String>,
}

impl Interpreter {
    /// Create an interpreter over `script` using the system clock
    ///
    /// `extra_commands` are merged over the built-ins, so a host command
    /// with a built-in name replaces it for this interpreter.
    pub fn new(script: Script, extra_commands: CommandRegistry) -> Self {
        Self::with_clock(script, extra_commands, SystemClock::new())
    }

    /// Create an interpreter that reads time from a host-supplied clock
    pub fn with_clock(
        script: Script,
        extra_commands: CommandRegistry,
        clock: impl Clock + 'static,
    ) -> Self {
        let mut registry = CommandRegistry::with_builtins();
        registry.extend(extra_commands);

        Interpreter {
            script,
            registry,
            namespace: Namespace::new(),
            clock: Box::new(clock),
            cursor: None,
            active: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.cursor.is_some_and(|c| c >= self.script.len())
    }

    pub fn state(&self) -> InterpreterState {
        match self.cursor {
            None => InterpreterState::NotStarted,
            Some(_) if self.is_finished() => InterpreterState::Complete,
            Some(_) => InterpreterState::Running,
        }
    }

    /// Script position: -1 before the first step, `len` once complete
    pub fn cursor(&self) -> isize {
        self.cursor.map_or(-1, |c| c as isize)
    }

    /// Command at the cursor, if any
    pub fn current_command(&self) -> Option<&Command> {
        self.cursor.and_then(|c| self.script.get(c))
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Mutable registry access for host overrides between steps
    pub fn registry_mut(&mut self) -> &mut CommandRegistry {
        &mut self.registry
    }

    /// Restore every built-in command, keeping other host commands
    pub fn reset_commands(&mut self) {
        self.registry.reset();
    }

    /// Evaluate an expression against this interpreter's namespace
    ///
    /// Nested commands run synchronously and may bind values.
    pub fn evaluate(&mut self, expr: &Expr) -> Result<Val, ScriptError> {
        let mut scope = self.scope();
        eval_expr(expr, &mut scope)
    }

    pub(super) fn scope(&mut self) -> Scope<'_> {
        Scope {
            registry: &self.registry,
            namespace: &mut self.namespace,
            clock: self.clock.as_ref(),
        }
    }
}

impl fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpreter")
            .field("cursor", &self.cursor())
            .field("len", &self.script.len())
            .field("state", &self.state())
            .field("in_flight", &self.active.is_some())
            .finish()
    }
}
