//! Core schema types, validation rules, and loading for declarative CLIs.
//!
//! This crate defines the data model consumed by the dispatch layer:
//!
//! - [`CommandSchema`] — top-level description of a program's subcommands
//!   and global options, loaded from a JSON or YAML command file.
//! - [`CommandSpec`] / [`ArgSpec`] / [`OptionSpec`] — per-command
//!   descriptions of positional arguments and flag options.
//! - [`rules`] — the fixed registry of named value predicates (`required`,
//!   `number`, `email`, ...) applied to argument and option values.
//! - [`validate_schema`] — structural checks run before dispatch.
//! - [`load_schema`] / [`package_version`] — file loading for the command
//!   file and the `Cargo.toml` package descriptor.
//!
//! # Example
//!
//! ```
//! use commandeer_core::*;
//!
//! let mut schema = CommandSchema::default();
//! schema.commands.insert(
//!     "deploy".into(),
//!     CommandSpec::new("Deploy a target")
//!         .with_arg(ArgSpec::required("target").with_rule("required"))
//!         .with_option(OptionSpec::new("-e, --env <envName>", "Target environment"))
//!         .with_example("app deploy web -e staging"),
//! );
//!
//! assert!(validate_schema(&schema).is_empty());
//! assert!(rules::check(Some("staging"), "required").is_ok());
//! ```

mod error;
mod load;
pub mod rules;
mod types;
mod validate;

pub use error::{Result, SchemaError};
pub use load::{DEFAULT_COMMAND_FILE, load_schema, package_version};
pub use types::*;
pub use validate::{ValidationError, validate_schema};
