//! External process execution with output collection.
//!
//! Children run with piped stdio; stdout and stderr are drained in
//! background threads so a full pipe buffer cannot deadlock the child
//! before it exits. An optional timeout kills the child on expiry.

use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

use tracing::debug;
use wait_timeout::ChildExt;

use crate::error::{ProcError, Result};

/// Execution settings for [`collect`] and [`shell`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecOpts {
    /// Kill the child and fail if it runs longer than this.
    pub timeout: Option<Duration>,
}

impl ExecOpts {
    /// Settings with the given timeout.
    pub fn timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }
}

/// Collected output of a finished child process.
#[derive(Debug, Clone)]
pub struct Output {
    /// Label used in error messages: the program or the shell one-liner.
    pub program: String,
    /// Everything the child wrote to stdout, lossily decoded.
    pub stdout: String,
    /// Everything the child wrote to stderr, lossily decoded.
    pub stderr: String,
    /// Exit code; `None` when the child was killed by a signal.
    pub code: Option<i32>,
}

impl Output {
    /// `true` when the child exited with code 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Maps a nonzero or signalled exit to an error.
    ///
    /// Skip this call to let a failed step fall through when later steps
    /// should run regardless.
    pub fn require_success(self) -> Result<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(ProcError::Failed {
                program: self.program.clone(),
                status: self
                    .code
                    .map_or_else(|| "signal".to_string(), |code| code.to_string()),
            })
        }
    }
}

/// Runs `program` with `args`, collecting stdout and stderr.
///
/// The exit status is reported in the returned [`Output`], not as an
/// error; use [`Output::require_success`] to fail on nonzero exits.
pub fn collect(program: &str, args: &[&str], opts: ExecOpts) -> Result<Output> {
    let mut command = Command::new(program);
    command.args(args);
    run_child(program, command, opts)
}

/// Runs a one-liner through `sh -c`, collecting stdout and stderr.
pub fn shell(command_line: &str, opts: ExecOpts) -> Result<Output> {
    let mut command = Command::new("sh");
    command.args(["-c", command_line]);
    run_child(command_line, command, opts)
}

fn run_child(label: &str, mut command: Command, opts: ExecOpts) -> Result<Output> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command.spawn().map_err(|source| ProcError::Spawn {
        program: label.to_string(),
        source,
    })?;

    let stdout_thread = child.stdout.take().map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            buf
        })
    });
    let stderr_thread = child.stderr.take().map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            buf
        })
    });

    let status = match opts.timeout {
        Some(timeout) => {
            let waited = child.wait_timeout(timeout).map_err(|source| ProcError::Wait {
                program: label.to_string(),
                source,
            })?;
            match waited {
                Some(status) => status,
                None => {
                    debug!(
                        program = label,
                        timeout_ms = timeout.as_millis() as u64,
                        "child timed out, killing"
                    );
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ProcError::Timeout {
                        program: label.to_string(),
                        timeout_ms: timeout.as_millis() as u64,
                    });
                }
            }
        }
        None => child.wait().map_err(|source| ProcError::Wait {
            program: label.to_string(),
            source,
        })?,
    };

    let stdout = drain(stdout_thread);
    let stderr = drain(stderr_thread);
    debug!(program = label, code = ?status.code(), "child finished");

    Ok(Output {
        program: label.to_string(),
        stdout,
        stderr,
        code: status.code(),
    })
}

fn drain(handle: Option<thread::JoinHandle<Vec<u8>>>) -> String {
    handle
        .and_then(|handle| handle.join().ok())
        .map(|buf| String::from_utf8_lossy(&buf).into_owned())
        .unwrap_or_default()
}
