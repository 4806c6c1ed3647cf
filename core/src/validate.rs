//! Structural schema validation.
//!
//! Catches malformed schema files before dispatch begins: empty command
//! names, flag descriptors with no usable flag token, and options that
//! declare rules without a `<value>` placeholder to read the value from.
//!
//! # Examples
//!
//! ```
//! use commandeer_core::*;
//!
//! let mut schema = CommandSchema::default();
//! schema.commands.insert(
//!     "run".into(),
//!     CommandSpec::new("Run a thing").with_option(OptionSpec::new("-p, --port <port>", "Port")),
//! );
//! assert!(validate_schema(&schema).is_empty());
//!
//! // Rules with nowhere to read the value from
//! let mut bad = CommandSchema::default();
//! bad.options.push(OptionSpec::new("-q, --quiet", "Quiet").with_rule("required"));
//! assert!(!validate_schema(&bad).is_empty());
//! ```

use thiserror::Error;

use crate::{CommandSchema, OptionSpec};

/// Structural problems found in a schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A command key is empty or whitespace-only.
    #[error("command name cannot be empty")]
    EmptyCommandName,
    /// A flag descriptor declares neither a short nor a long flag.
    #[error("invalid flag descriptor: {0}")]
    InvalidFlagDescriptor(String),
    /// An option declares rules but no `<value>` placeholder to validate.
    #[error("option {0} declares rules but no <value> placeholder")]
    RulesWithoutValue(String),
}

/// Validates the structure of a schema, stopping at the first error.
pub fn validate_schema(schema: &CommandSchema) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_options(&schema.options));
    if !errors.is_empty() {
        return errors;
    }

    for (name, spec) in &schema.commands {
        if name.trim().is_empty() {
            errors.push(ValidationError::EmptyCommandName);
            return errors;
        }
        errors.extend(validate_options(&spec.options));
        if !errors.is_empty() {
            return errors;
        }
    }

    errors
}

fn validate_options(options: &[OptionSpec]) -> Vec<ValidationError> {
    for opt in options {
        if opt.short().is_none() && opt.long().is_none() {
            return vec![ValidationError::InvalidFlagDescriptor(opt.arg.clone())];
        }
        if !opt.rules.is_empty() && opt.value_name().is_none() {
            return vec![ValidationError::RulesWithoutValue(opt.arg.clone())];
        }
    }
    Vec::new()
}
