//! External process execution for command-line tools.
//!
//! Thin wrappers over [`std::process`] used by command actions: run a
//! program or a shell one-liner, collect its output, and map exit status
//! to errors when a step must succeed.
//!
//! # Example
//!
//! ```no_run
//! use commandeer_proc::{ExecOpts, collect};
//!
//! let output = collect("uname", &["-sr"], ExecOpts::default())
//!     .and_then(commandeer_proc::Output::require_success)
//!     .unwrap();
//! println!("{}", output.stdout.trim());
//! ```

mod error;
mod exec;

pub use error::{ProcError, Result};
pub use exec::{ExecOpts, Output, collect, shell};
