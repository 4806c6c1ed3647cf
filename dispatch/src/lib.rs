//! Declarative command dispatch and validation.
//!
//! This crate turns a [`CommandSchema`](commandeer_core::CommandSchema)
//! plus a map of caller-supplied actions into a running command-line
//! program:
//!
//! 1. [`bind`] merges actions into the schema by command name.
//! 2. A disposable [`Parser`] registers everything with clap and parses the
//!    argument vector; the matched command's action runs as part of that
//!    step.
//! 3. [`postparse::validate`] then checks the invocation: known command,
//!    mandatory argument count, and every declared rule.
//!
//! The bound action therefore runs before validation. A rule failure still
//! ends the process with exit code 1, but any side effects of the action
//! have already happened; callers that need stricter sequencing should
//! validate inside their actions.
//!
//! The [`command`] entry point wires the whole path from a command file on
//! disk; [`run`] is the same path for an already-loaded schema.
//!
//! # Example
//!
//! ```
//! use commandeer_core::{ArgSpec, CommandSchema, CommandSpec};
//! use commandeer_dispatch::{Actions, Dispatch, bind, run};
//!
//! let mut schema = CommandSchema::default();
//! schema.commands.insert(
//!     "greet".into(),
//!     CommandSpec::new("Print a greeting")
//!         .with_arg(ArgSpec::required("name").with_rule("required")),
//! );
//!
//! let bound = bind(schema, Actions::new().with("greet", |invocation| {
//!     println!("hello {}", invocation.args[0]);
//! }));
//!
//! let argv: Vec<String> = ["demo", "greet", "world"].map(String::from).into();
//! let outcome = run("demo", "0.1.0", &bound, &argv).unwrap();
//! assert_eq!(outcome, Dispatch::Ran("greet".into()));
//! ```

pub mod adapter;
pub mod bind;
mod error;
pub mod exit;
pub mod help;
pub mod postparse;

use std::env;
use std::path::Path;

use commandeer_core::{DEFAULT_COMMAND_FILE, load_schema, package_version, validate_schema};
use tracing::debug;

pub use adapter::{ParseOutcome, ParsedInvocation, Parser};
pub use bind::{Action, Actions, BoundSchema, Invocation, bind};
pub use error::{DispatchError, Result, ValueScope};

/// Outcome of a completed dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// No command token was given; nothing ran.
    NoCommand,
    /// Help output was displayed.
    Help,
    /// Version output was displayed.
    Version,
    /// The named command parsed and validated; its action has already run.
    Ran(String),
}

/// Options for [`command`].
#[derive(Debug, Clone, Default)]
pub struct CommandOpts {
    /// Schema file path relative to the base directory. Defaults to
    /// [`DEFAULT_COMMAND_FILE`].
    pub command_file: Option<String>,
}

/// Wires a command file to actions and dispatches the process argv.
///
/// Reads the schema from `base/<command_file>` and the version string from
/// `base/Cargo.toml`, validates the schema structurally, binds `actions`,
/// parses [`std::env::args`], and runs post-parse validation.
///
/// # Errors
///
/// Any schema-file, descriptor, parse, or validation failure; all are
/// fatal with exit code 1 when handed to [`exit::exit`].
pub fn command(base: impl AsRef<Path>, actions: Actions, opts: CommandOpts) -> Result<Dispatch> {
    let argv: Vec<String> = env::args().collect();
    command_from(base, actions, opts, &argv)
}

/// [`command`] with an explicit argument vector, for tests and embedding.
pub fn command_from(
    base: impl AsRef<Path>,
    actions: Actions,
    opts: CommandOpts,
    argv: &[String],
) -> Result<Dispatch> {
    let base = base.as_ref();
    let command_file = opts.command_file.as_deref().unwrap_or(DEFAULT_COMMAND_FILE);

    let schema = load_schema(base.join(command_file))?;
    if let Some(error) = validate_schema(&schema).into_iter().next() {
        return Err(error.into());
    }
    let version = package_version(base)?;
    let program = program_name(argv);
    debug!(program = %program, commands = schema.commands.len(), "dispatching");

    let bound = bind(schema, actions);
    run(&program, &version, &bound, argv)
}

/// Parses and validates an argument vector against a bound schema.
pub fn run(program: &str, version: &str, bound: &BoundSchema, argv: &[String]) -> Result<Dispatch> {
    let parser = Parser::new(program, version, bound);
    match parser.parse(argv)? {
        ParseOutcome::Help => Ok(Dispatch::Help),
        ParseOutcome::Version => Ok(Dispatch::Version),
        ParseOutcome::Matched(parsed) => {
            postparse::validate(&bound.schema, &parsed)?;
            match parsed.invoked {
                Some(name) => Ok(Dispatch::Ran(name)),
                None => Ok(Dispatch::NoCommand),
            }
        }
    }
}

fn program_name(argv: &[String]) -> String {
    argv.first()
        .map(Path::new)
        .and_then(Path::file_stem)
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| "program".to_string())
}
