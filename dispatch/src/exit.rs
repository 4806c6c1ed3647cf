//! Process exit helpers for command-line tools.
//!
//! Dispatch errors are plain values until they reach one of these handlers,
//! which map them onto the process contract: one human-readable line on
//! stderr and exit code 1 on failure, exit code 0 otherwise.

use std::fmt::Display;
use std::process;

/// Terminates the process based on a result.
///
/// Handy as the final call of `main`: errors print to stderr and exit 1,
/// success exits 0.
pub fn exit<T, E: Display>(result: Result<T, E>) -> ! {
    match result {
        Ok(_) => process::exit(0),
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

/// Like [`exit`], but prints the success value to stdout first.
///
/// Useful for actions whose whole job is producing one line of output.
pub fn exit_report<T: Display, E: Display>(result: Result<T, E>) -> ! {
    match result {
        Ok(value) => {
            println!("{value}");
            process::exit(0);
        }
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}
