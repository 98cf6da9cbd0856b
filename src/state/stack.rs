//! Bounded LIFO stack of execution states

use std::fmt;
use thiserror::Error;

/* ===================== Execution States ===================== */

/// Something that can live on a `StateStack`
///
/// `on_entry` fires once when the state is pushed (or swapped in by
/// `replace`); `on_exit` fires once when it is popped or torn down.
/// `update` is the per-tick hook, called by `StateStack::update` on the top
/// state only.
pub trait ExecutionState {
    fn on_entry(&mut self) {}
    fn on_exit(&mut self) {}
    fn update(&mut self) {}
}

type Hook<T> = Box<dyn FnMut(&mut T)>;

/// Closure-backed execution state wrapping an arbitrary payload
pub struct StackState<T> {
    payload: T,
    on_entry: Hook<T>,
    on_exit: Hook<T>,
    on_update: Hook<T>,
}

impl<T> StackState<T> {
    pub fn new(
        payload: T,
        on_entry: impl FnMut(&mut T) + 'static,
        on_exit: impl FnMut(&mut T) + 'static,
    ) -> Self {
        StackState {
            payload,
            on_entry: Box::new(on_entry),
            on_exit: Box::new(on_exit),
            on_update: Box::new(|_| {}),
        }
    }

    /// Attach a per-tick hook (e.g. stepping an owned interpreter)
    pub fn with_update(mut self, on_update: impl FnMut(&mut T) + 'static) -> Self {
        self.on_update = Box::new(on_update);
        self
    }

    /// State with no-op lifecycle hooks
    pub fn plain(payload: T) -> Self {
        Self::new(payload, |_| {}, |_| {})
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut T {
        &mut self.payload
    }

    pub fn into_payload(self) -> T {
        self.payload
    }
}

impl<T> ExecutionState for StackState<T> {
    fn on_entry(&mut self) {
        (self.on_entry)(&mut self.payload);
    }

    fn on_exit(&mut self) {
        (self.on_exit)(&mut self.payload);
    }

    fn update(&mut self) {
        (self.on_update)(&mut self.payload);
    }
}

impl<T: fmt::Debug> fmt::Debug for StackState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackState")
            .field("payload", &self.payload)
            .finish_non_exhaustive()
    }
}

/* ===================== Errors ===================== */

/// `push` on a full stack; the rejected state is handed back
#[derive(Error)]
#[error("state stack is full (max depth {max_depth})")]
pub struct CapacityError<S> {
    pub max_depth: usize,
    state: S,
}

impl<S> CapacityError<S> {
    pub fn into_state(self) -> S {
        self.state
    }
}

impl<S> fmt::Debug for CapacityError<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapacityError")
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}

/// `replace` on an empty stack; the incoming state is handed back
#[derive(Error)]
#[error("cannot replace the top of an empty state stack")]
pub struct EmptyStackError<S> {
    state: S,
}

impl<S> EmptyStackError<S> {
    pub fn into_state(self) -> S {
        self.state
    }
}

impl<S> fmt::Debug for EmptyStackError<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmptyStackError").finish_non_exhaustive()
    }
}

/* ===================== Stack ===================== */

/// Stack of execution states; only the top is active
///
/// Dropping the stack tears it down like `clear()`.
pub struct StateStack<S: ExecutionState> {
    max_depth: usize,
    states: Vec<S>,
}

impl<S: ExecutionState> StateStack<S> {
    /// Stack holding at most `max_depth` states (0 = unbounded)
    pub fn new(max_depth: usize) -> Self {
        StateStack {
            max_depth,
            states: Vec::new(),
        }
    }

    pub fn unbounded() -> Self {
        Self::new(0)
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.max_depth != 0 && self.states.len() >= self.max_depth
    }

    /// Enter `state` on top of the stack
    pub fn push(&mut self, mut state: S) -> Result<(), CapacityError<S>> {
        if self.is_full() {
            tracing::debug!(max_depth = self.max_depth, "state stack full, push rejected");
            return Err(CapacityError {
                max_depth: self.max_depth,
                state,
            });
        }

        state.on_entry();
        self.states.push(state);
        tracing::debug!(depth = self.states.len(), "state pushed");
        Ok(())
    }

    /// Exit and return the top state, or `None` when empty
    pub fn pop(&mut self) -> Option<S> {
        let mut state = self.states.pop()?;
        state.on_exit();
        tracing::debug!(depth = self.states.len(), "state popped");
        Some(state)
    }

    /// Swap the top state for a sibling
    ///
    /// The incoming state's `on_entry` fires; the outgoing state's `on_exit`
    /// does not. The outgoing state is returned.
    pub fn replace(&mut self, mut state: S) -> Result<S, EmptyStackError<S>> {
        let depth = self.states.len();
        let Some(top) = self.states.last_mut() else {
            return Err(EmptyStackError { state });
        };

        state.on_entry();
        tracing::debug!(depth, "state replaced");
        Ok(std::mem::replace(top, state))
    }

    pub fn top(&self) -> Option<&S> {
        self.states.last()
    }

    /// Mutable access to the active state (e.g. to step its interpreter)
    pub fn top_mut(&mut self) -> Option<&mut S> {
        self.states.last_mut()
    }

    /// Tick the active state
    ///
    /// Returns false when the stack is empty.
    pub fn update(&mut self) -> bool {
        match self.states.last_mut() {
            Some(top) => {
                top.update();
                true
            }
            None => false,
        }
    }

    /// Pop everything, firing `on_exit` top to bottom
    pub fn clear(&mut self) {
        while self.pop().is_some() {}
    }

    /// States from bottom to top
    pub fn iter(&self) -> impl Iterator<Item = &S> {
        self.states.iter()
    }
}

impl<S: ExecutionState> Default for StateStack<S> {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<S: ExecutionState> Drop for StateStack<S> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<S: ExecutionState + fmt::Debug> fmt::Debug for StateStack<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateStack")
            .field("max_depth", &self.max_depth)
            .field("states", &self.states)
            .finish()
    }
}
