//! Script command and expression nodes

use super::values::Val;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One script command
///
/// Flat list entries load as `Positional`; object entries load as `Keyword`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    Positional {
        name: String,
        args: Vec<Expr>,
    },
    Keyword {
        name: String,
        args: Vec<Expr>,
        kwargs: HashMap<String, Expr>,
        /// Guard expression; `None` means always run
        guard: Option<Expr>,
        /// Namespace name that receives the completion value
        binding: Option<String>,
    },
}

impl Command {
    pub fn positional(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Command::Positional {
            name: name.into(),
            args,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Command::Positional { name, .. } | Command::Keyword { name, .. } => name,
        }
    }

    pub fn args(&self) -> &[Expr] {
        match self {
            Command::Positional { args, .. } | Command::Keyword { args, .. } => args,
        }
    }

    pub fn guard(&self) -> Option<&Expr> {
        match self {
            Command::Positional { .. } => None,
            Command::Keyword { guard, .. } => guard.as_ref(),
        }
    }

    pub fn binding(&self) -> Option<&str> {
        match self {
            Command::Positional { .. } => None,
            Command::Keyword { binding, .. } => binding.as_deref(),
        }
    }

    /// Visit this command and every command nested in its expressions
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Command)) {
        visit(self);
        let nested_kwargs = match self {
            Command::Positional { .. } => None,
            Command::Keyword { kwargs, guard, .. } => Some(kwargs.values().chain(guard.iter())),
        };
        for expr in self.args().iter().chain(nested_kwargs.into_iter().flatten()) {
            if let Expr::Call { command } = expr {
                command.walk(visit);
            }
        }
    }
}

/// Expression node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expr {
    /// Already-typed literal
    Lit { v: Val },
    /// Name resolved against the namespace, falling back to coercion
    Name { name: String },
    /// Nested command, evaluated eagerly to a single value
    Call { command: Box<Command> },
}

impl Expr {
    pub fn lit(v: impl Into<Val>) -> Self {
        Expr::Lit { v: v.into() }
    }

    pub fn name(name: impl Into<String>) -> Self {
        Expr::Name { name: name.into() }
    }

    pub fn call(command: Command) -> Self {
        Expr::Call {
            command: Box::new(command),
        }
    }
}
