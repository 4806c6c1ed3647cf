//! Post-parse validation: the dispatch state machine.
//!
//! Runs after the parser (and any bound action) has finished. Decides, in
//! order: whether a command was invoked at all, whether it is known,
//! whether the mandatory positional arguments are present, and whether
//! every declared rule accepts its value. The first failure ends the
//! dispatch.

use std::collections::BTreeMap;

use commandeer_core::rules::{self, RuleError};
use commandeer_core::{CommandSchema, OptionSpec, ValidationError};
use tracing::debug;

use crate::adapter::ParsedInvocation;
use crate::error::{DispatchError, Result, ValueScope};

/// Validates a parsed invocation against the schema.
///
/// Ordering: command existence, mandatory argument count, argument rules,
/// command option rules, global option rules. Within a rule list the first
/// listed rule is checked first and short-circuits on failure.
///
/// No invoked command is not an error; the parser's own help path covers
/// that case and this function returns silently.
pub fn validate(schema: &CommandSchema, parsed: &ParsedInvocation) -> Result<()> {
    let Some(command) = parsed.invoked.as_deref() else {
        return Ok(());
    };
    let Some(spec) = schema.commands.get(command) else {
        return Err(DispatchError::UnknownCommand(command.to_string()));
    };

    if !spec.args.is_empty() {
        let mandatory = spec.mandatory_args().count();
        if mandatory != parsed.positional.len() {
            return Err(DispatchError::Usage {
                program: parsed.program.clone(),
                command: command.to_string(),
                usage: spec.usage(),
            });
        }

        for (index, arg) in spec.args.iter().enumerate() {
            // Optional arguments are never rule-checked.
            if arg.optional {
                continue;
            }
            let value = parsed.positional.get(index).map(String::as_str);
            for rule in &arg.rules {
                check_scoped(value, rule, ValueScope::Argument, &arg.name)?;
            }
        }
    }

    check_options(&spec.options, &parsed.command_values)?;
    check_options(&schema.options, &parsed.global_values)?;

    debug!(command, "dispatch validated");
    Ok(())
}

fn check_options(options: &[OptionSpec], values: &BTreeMap<String, String>) -> Result<()> {
    for opt in options {
        if opt.rules.is_empty() {
            continue;
        }
        let Some(value_name) = opt.value_name() else {
            return Err(DispatchError::Schema(ValidationError::RulesWithoutValue(
                opt.arg.clone(),
            )));
        };
        let value = values.get(value_name).map(String::as_str);
        for rule in &opt.rules {
            check_scoped(value, rule, ValueScope::Option, &opt.arg)?;
        }
    }
    Ok(())
}

fn check_scoped(value: Option<&str>, rule: &str, scope: ValueScope, name: &str) -> Result<()> {
    match rules::check(value, rule) {
        Ok(()) => Ok(()),
        Err(RuleError::Unknown(rule)) => Err(DispatchError::UnknownRule { scope, rule }),
        Err(RuleError::Violated(rule)) => Err(DispatchError::RuleViolation {
            scope,
            name: name.to_string(),
            rule,
        }),
    }
}
