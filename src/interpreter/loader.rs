//! Script loading
//!
//! Converts already-parsed JSON into a `Script`. Two entry shapes are
//! accepted:
//!
//! ```json
//! [
//!     ["print", "hello"],
//!     {"action": "wait", "args": [500], ":IF": "ready", ":VAR": "waited"},
//!     ["#", "comments are dropped"]
//! ]
//! ```
//!
//! Object keys other than `action`, `args`, `:IF` and `:VAR` become named
//! parameters. Arrays and objects inside argument positions are nested
//! commands.

use super::errors::LoadError;
use super::types::{Command, Expr, Val};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

/// Leading marker of a comment entry
pub const COMMENT_MARKER: &str = "#";
pub const ACTION_KEY: &str = "action";
pub const ARGS_KEY: &str = "args";
pub const GUARD_KEY: &str = ":IF";
pub const BINDING_KEY: &str = ":VAR";

/* ===================== Script ===================== */

/// Ordered, immutable sequence of commands with comments filtered out
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    commands: Vec<Command>,
}

impl Script {
    pub fn new(commands: Vec<Command>) -> Self {
        Script { commands }
    }

    /// Build a script from parsed JSON
    pub fn from_json(source: &JsonValue) -> Result<Self, LoadError> {
        let entries = source.as_array().ok_or(LoadError::NotAnArray {
            found: json_type_name(source),
        })?;

        let mut commands = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            if is_comment(entry) {
                continue;
            }
            let command = parse_command(entry).map_err(|message| LoadError::BadEntry {
                index,
                message,
            })?;
            commands.push(command);
        }

        Ok(Script { commands })
    }

    pub fn from_reader(reader: impl std::io::Read) -> Result<Self, LoadError> {
        let json: JsonValue = serde_json::from_reader(reader)?;
        Self::from_json(&json)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Command> {
        self.commands.get(index)
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Every command name used by the script, nested commands included
    pub fn command_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        for command in &self.commands {
            command.walk(&mut |c| {
                if !names.contains(&c.name()) {
                    names.push(c.name());
                }
            });
        }
        names
    }
}

impl FromStr for Script {
    type Err = LoadError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let json: JsonValue = serde_json::from_str(source)?;
        Self::from_json(&json)
    }
}

impl<'de> Deserialize<'de> for Script {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = JsonValue::deserialize(deserializer)?;
        Script::from_json(&json).map_err(serde::de::Error::custom)
    }
}

/* ===================== Entry Parsing ===================== */

fn is_comment(entry: &JsonValue) -> bool {
    match entry {
        JsonValue::Array(items) => items.first().and_then(JsonValue::as_str) == Some(COMMENT_MARKER),
        JsonValue::Object(map) => {
            map.contains_key(COMMENT_MARKER)
                || map.get(ACTION_KEY).and_then(JsonValue::as_str) == Some(COMMENT_MARKER)
        }
        _ => false,
    }
}

fn parse_command(entry: &JsonValue) -> Result<Command, String> {
    match entry {
        JsonValue::Array(items) => parse_positional(items),
        JsonValue::Object(map) => parse_keyword(map),
        other => Err(format!(
            "expected a list or an object, got {}",
            json_type_name(other)
        )),
    }
}

fn parse_positional(items: &[JsonValue]) -> Result<Command, String> {
    let (head, rest) = items
        .split_first()
        .ok_or_else(|| "empty command list".to_string())?;
    let name = head
        .as_str()
        .ok_or_else(|| format!("command name must be a string, got {}", json_type_name(head)))?;

    Ok(Command::Positional {
        name: name.to_string(),
        args: parse_exprs(rest)?,
    })
}

fn parse_keyword(map: &Map<String, JsonValue>) -> Result<Command, String> {
    let name = match map.get(ACTION_KEY) {
        Some(JsonValue::String(name)) => name.clone(),
        Some(other) => {
            return Err(format!(
                "'{}' must be a string, got {}",
                ACTION_KEY,
                json_type_name(other)
            ))
        }
        None => return Err(format!("missing '{}' key", ACTION_KEY)),
    };

    let args = match map.get(ARGS_KEY) {
        None => Vec::new(),
        Some(JsonValue::Array(items)) => parse_exprs(items)?,
        Some(other) => {
            return Err(format!(
                "'{}' must be a list, got {}",
                ARGS_KEY,
                json_type_name(other)
            ))
        }
    };

    let guard = map.get(GUARD_KEY).map(parse_expr).transpose()?;

    let binding = match map.get(BINDING_KEY) {
        None | Some(JsonValue::Null) => None,
        Some(JsonValue::String(name)) => Some(name.clone()),
        Some(other) => {
            return Err(format!(
                "'{}' must be a string, got {}",
                BINDING_KEY,
                json_type_name(other)
            ))
        }
    };

    let mut kwargs = HashMap::new();
    for (key, value) in map {
        if matches!(key.as_str(), ACTION_KEY | ARGS_KEY | GUARD_KEY | BINDING_KEY) {
            continue;
        }
        kwargs.insert(key.clone(), parse_expr(value)?);
    }

    Ok(Command::Keyword {
        name,
        args,
        kwargs,
        guard,
        binding,
    })
}

fn parse_exprs(items: &[JsonValue]) -> Result<Vec<Expr>, String> {
    items.iter().map(parse_expr).collect()
}

/// Convert one JSON value in argument position into an expression
pub fn parse_expr(value: &JsonValue) -> Result<Expr, String> {
    match value {
        JsonValue::Null => Ok(Expr::Lit { v: Val::Null }),
        JsonValue::Bool(b) => Ok(Expr::Lit { v: Val::Bool(*b) }),
        JsonValue::Number(n) => {
            let v = match n.as_i64() {
                Some(i) => Val::Int(i),
                None => Val::Float(n.as_f64().unwrap_or(f64::NAN)),
            };
            Ok(Expr::Lit { v })
        }
        JsonValue::String(name) => Ok(Expr::Name { name: name.clone() }),
        JsonValue::Array(_) | JsonValue::Object(_) => {
            if is_comment(value) {
                return Err("comment marker inside an expression".to_string());
            }
            Ok(Expr::call(parse_command(value)?))
        }
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "list",
        JsonValue::Object(_) => "object",
    }
}
