//! Error types for command dispatch.
//!
//! Every variant is fatal: detection ends the dispatch, the message is
//! written as a single line to stderr, and the process exits with code 1.
//! There is no recoverable-error channel for dispatch-time failures.

use std::fmt;

use commandeer_core::{SchemaError, ValidationError};
use thiserror::Error;

/// Scope of a value being validated, named in user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueScope {
    /// A positional argument.
    Argument,
    /// A command-local or global option.
    Option,
}

impl fmt::Display for ValueScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueScope::Argument => f.write_str("argument"),
            ValueScope::Option => f.write_str("option"),
        }
    }
}

/// Errors that end a dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Schema or package descriptor file could not be loaded.
    #[error("{0}")]
    Config(#[from] SchemaError),

    /// Schema failed structural validation.
    #[error("{0}")]
    Schema(#[from] ValidationError),

    /// The parsing library rejected the argument vector.
    #[error("{0}")]
    Parse(String),

    /// The first positional token names no configured command.
    #[error("Unknown command: {0}, use --help for more info")]
    UnknownCommand(String),

    /// Mandatory argument count mismatch; renders a usage string.
    #[error("Usage: {program} {command} {usage}")]
    Usage {
        program: String,
        command: String,
        usage: String,
    },

    /// A declared rule rejected a value.
    #[error("Invalid {scope}: <{name}> must be {rule}")]
    RuleViolation {
        scope: ValueScope,
        name: String,
        rule: String,
    },

    /// A rule list referenced a name missing from the registry.
    #[error("Invalid {scope} rule: {rule}")]
    UnknownRule { scope: ValueScope, rule: String },
}

impl DispatchError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// Convenience alias for results with [`DispatchError`].
pub type Result<T> = std::result::Result<T, DispatchError>;
