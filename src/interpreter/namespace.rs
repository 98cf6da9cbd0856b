//! Variable namespace
//!
//! Mapping from name to the last value bound under it. A fresh namespace is
//! seeded with the boolean constants `true` and `false`; after that it is
//! only written when a command with a binding completes.

use super::types::Val;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Namespace {
    vars: HashMap<String, Val>,
}

impl Namespace {
    /// Create a namespace holding only the built-in constants
    pub fn new() -> Self {
        let mut vars = HashMap::new();
        vars.insert("true".to_string(), Val::Bool(true));
        vars.insert("false".to_string(), Val::Bool(false));
        Namespace { vars }
    }

    pub fn get(&self, name: &str) -> Option<&Val> {
        self.vars.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Bind `value` under `name`, returning the previous value
    pub(crate) fn bind(&mut self, name: impl Into<String>, value: Val) -> Option<Val> {
        self.vars.insert(name.into(), value)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Val)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Bindings sorted by name (stable output for logs and the CLI)
    pub fn sorted(&self) -> Vec<(&str, &Val)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new()
    }
}
