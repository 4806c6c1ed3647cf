//! Parser construction and argv parsing over clap.
//!
//! The [`Parser`] is built fresh from a [`BoundSchema`] for every dispatch
//! and discarded afterwards; nothing is registered against process-global
//! state. Unknown command tokens are captured as external subcommands so
//! the post-parse validator can report them itself instead of the parsing
//! library rejecting them.

use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use commandeer_core::{CommandSpec, OptionSpec};
use tracing::debug;

use crate::bind::{BoundSchema, Invocation};
use crate::error::{DispatchError, Result};
use crate::help;

/// Internal id of the trailing positional slot capturing command arguments.
const ARGS_ID: &str = "__command_args";

/// Result of driving the parser over an argument vector.
#[derive(Debug)]
pub enum ParseOutcome {
    /// Help output was requested and printed; nothing to validate.
    Help,
    /// Version output was requested and printed; nothing to validate.
    Version,
    /// Parsing completed; the captured invocation state follows.
    Matched(ParsedInvocation),
}

/// Parse results consumed by the post-parse validator.
///
/// Constructed fresh per invocation and discarded when dispatch finishes.
#[derive(Debug, Clone, Default)]
pub struct ParsedInvocation {
    /// Program name used in usage strings.
    pub program: String,
    /// The invoked command name, if any positional token was given.
    pub invoked: Option<String>,
    /// Remaining positional tokens, bound to the command's args by order.
    pub positional: Vec<String>,
    /// Values of the matched command's options, keyed by value name.
    pub command_values: BTreeMap<String, String>,
    /// Values of global options, keyed by value name.
    pub global_values: BTreeMap<String, String>,
    /// Boolean switches present, keyed by canonical flag name.
    pub switches: BTreeSet<String>,
}

/// Disposable parser over a bound schema, owned by a single dispatch call.
pub struct Parser<'a> {
    bound: &'a BoundSchema,
    program: String,
    version: String,
}

impl<'a> Parser<'a> {
    /// Creates a parser for one dispatch of `bound`.
    pub fn new(program: &str, version: &str, bound: &'a BoundSchema) -> Self {
        Self {
            bound,
            program: program.to_string(),
            version: version.to_string(),
        }
    }

    /// Parses an argument vector (including the program name at index 0).
    ///
    /// Help and version requests print and short-circuit as non-error
    /// outcomes. On a successful parse the matched command's bound action
    /// is invoked as part of this step, before any post-parse validation
    /// runs.
    pub fn parse<I, T>(&self, argv: I) -> Result<ParseOutcome>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = match self.build().try_get_matches_from(argv) {
            Ok(matches) => matches,
            Err(err) => return handle_parse_error(err),
        };

        let schema = &self.bound.schema;
        let mut parsed = ParsedInvocation {
            program: self.program.clone(),
            ..Default::default()
        };

        for opt in &schema.options {
            collect_option(opt, &matches, &mut parsed.global_values, &mut parsed.switches);
        }

        if let Some((name, sub)) = matches.subcommand() {
            parsed.invoked = Some(name.to_string());
            if let Some(spec) = schema.commands.get(name) {
                parsed.positional = many(sub, ARGS_ID);
                for opt in &spec.options {
                    collect_option(opt, sub, &mut parsed.command_values, &mut parsed.switches);
                }
            } else {
                // External subcommand: raw tokens live under the empty id.
                parsed.positional = many(sub, "");
            }
        }

        self.invoke_action(&parsed);
        Ok(ParseOutcome::Matched(parsed))
    }

    fn build(&self) -> Command {
        let schema = &self.bound.schema;
        let mut root = Command::new(self.program.clone())
            .version(self.version.clone())
            .allow_external_subcommands(true)
            .external_subcommand_value_parser(value_parser!(String));

        if let Some(section) = help::examples_section(schema) {
            root = root.after_help(section);
        }

        for opt in &schema.options {
            root = root.arg(build_option(opt));
        }
        for (name, spec) in &schema.commands {
            debug!(command = %name, "registering command");
            root = root.subcommand(build_command(name, spec));
        }
        root
    }

    fn invoke_action(&self, parsed: &ParsedInvocation) {
        let Some(name) = parsed.invoked.as_deref() else {
            return;
        };
        let Some(action) = self.bound.action(name) else {
            return;
        };

        debug!(command = name, "invoking bound action");
        let mut values = parsed.global_values.clone();
        values.extend(parsed.command_values.clone());
        let invocation = Invocation {
            command: name.to_string(),
            args: parsed.positional.clone(),
            values,
            switches: parsed.switches.clone(),
        };
        action(&invocation);
    }
}

fn build_command(name: &str, spec: &CommandSpec) -> Command {
    let mut command = Command::new(name.to_string()).about(spec.desc.clone());
    for opt in &spec.options {
        command = command.arg(build_option(opt));
    }
    command.arg(
        Arg::new(ARGS_ID)
            .value_name("args")
            .num_args(0..)
            .help("Command arguments"),
    )
}

fn build_option(opt: &OptionSpec) -> Arg {
    let mut arg = Arg::new(arg_id(opt)).help(opt.desc.clone());
    if let Some(short) = opt.short() {
        arg = arg.short(short);
    }
    if let Some(long) = opt.long() {
        arg = arg.long(long.to_string());
    }
    match opt.value_name() {
        Some(value) => arg.value_name(value.to_string()).action(ArgAction::Set),
        None => arg.action(ArgAction::SetTrue),
    }
}

// Valued options are keyed by their <valueName> token; switches by their
// canonical flag name.
fn arg_id(opt: &OptionSpec) -> String {
    opt.value_name()
        .map(str::to_string)
        .or_else(|| opt.canonical_id())
        .unwrap_or_else(|| opt.arg.clone())
}

fn collect_option(
    opt: &OptionSpec,
    matches: &ArgMatches,
    values: &mut BTreeMap<String, String>,
    switches: &mut BTreeSet<String>,
) {
    match opt.value_name() {
        Some(value_name) => {
            if let Some(value) = matches.get_one::<String>(&arg_id(opt)) {
                values.insert(value_name.to_string(), value.clone());
            }
        }
        None => {
            if matches.get_flag(&arg_id(opt)) {
                if let Some(id) = opt.canonical_id() {
                    switches.insert(id);
                }
            }
        }
    }
}

fn many(matches: &ArgMatches, id: &str) -> Vec<String> {
    matches
        .get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn handle_parse_error(err: clap::Error) -> Result<ParseOutcome> {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            let _ = err.print();
            Ok(ParseOutcome::Help)
        }
        ErrorKind::DisplayVersion => {
            let _ = err.print();
            Ok(ParseOutcome::Version)
        }
        _ => Err(DispatchError::Parse(err.to_string())),
    }
}
