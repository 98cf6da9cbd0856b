//! Script errors
//!
//! Every variant aborts the current `step()` call; the interpreter leaves its
//! cursor on the failing command so the host can fix things up and retry.

use thiserror::Error;

/* ===================== Error Codes ===================== */

pub const RESOLUTION_ERROR: &str = "ResolutionError";
pub const EVALUATION_ERROR: &str = "EvaluationError";
pub const WRONG_ARG_COUNT: &str = "WrongArgumentCountError";
pub const WRONG_ARG_TYPE: &str = "WrongArgumentTypeError";

/* ===================== Script Errors ===================== */

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScriptError {
    /// Command name not present in the registry
    #[error("unknown command '{name}'")]
    Resolution { name: String },

    /// Expression could not be turned into a value
    #[error("cannot evaluate '{expr}': {reason}")]
    Evaluation { expr: String, reason: String },

    /// A handler rejected its arguments
    #[error("{command}: {message}")]
    Argument {
        command: String,
        code: &'static str,
        message: String,
    },
}

impl ScriptError {
    pub fn resolution(name: impl Into<String>) -> Self {
        ScriptError::Resolution { name: name.into() }
    }

    pub fn evaluation(expr: impl Into<String>, reason: impl Into<String>) -> Self {
        ScriptError::Evaluation {
            expr: expr.into(),
            reason: reason.into(),
        }
    }

    pub fn wrong_arg_count(command: &str, expected: impl std::fmt::Display, got: usize) -> Self {
        ScriptError::Argument {
            command: command.to_string(),
            code: WRONG_ARG_COUNT,
            message: format!("expected {} argument(s), got {}", expected, got),
        }
    }

    pub fn wrong_arg_type(command: &str, message: impl Into<String>) -> Self {
        ScriptError::Argument {
            command: command.to_string(),
            code: WRONG_ARG_TYPE,
            message: message.into(),
        }
    }

    /// Stable error code for logs and host-side matching
    pub fn code(&self) -> &'static str {
        match self {
            ScriptError::Resolution { .. } => RESOLUTION_ERROR,
            ScriptError::Evaluation { .. } => EVALUATION_ERROR,
            ScriptError::Argument { code, .. } => *code,
        }
    }
}

/* ===================== Load Errors ===================== */

/// Script source that cannot be turned into a `Script`
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("script must be a JSON array of entries, got {found}")]
    NotAnArray { found: &'static str },

    #[error("entry {index}: {message}")]
    BadEntry { index: usize, message: String },

    #[error("failed to parse script JSON")]
    Json(#[from] serde_json::Error),

    #[error("failed to read script")]
    Io(#[from] std::io::Error),
}
