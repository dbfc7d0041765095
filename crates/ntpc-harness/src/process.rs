// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Process-spawning capability.
//!
//! The harness only ever observes an integer exit status, so spawning sits
//! behind the [`ProcessRunner`] trait: the acceptance suite runs against
//! [`SystemRunner`] (blocking, no limit — the shipped default), unit tests
//! script outcomes with a fake, and [`BoundedRunner`] substitutes a
//! kill-after-deadline variant without touching scenario definitions.

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

// How often the bounded runner polls a live child.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Errors surfaced by a [`ProcessRunner`].
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    /// The child could not be launched at all.
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        /// Program path as given to the runner.
        program: String,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },
    /// The child's status could not be collected.
    #[error("failed to wait on {program}: {source}")]
    Wait {
        /// Program path as given to the runner.
        program: String,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },
    /// The child was killed by a signal and returned no exit code.
    #[error("{program} terminated by signal")]
    Signaled {
        /// Program path as given to the runner.
        program: String,
    },
    /// The child outlived the runner's time limit and was killed.
    #[error("{program} still running after {limit:?}, killed")]
    Timeout {
        /// Program path as given to the runner.
        program: String,
        /// The limit that was exceeded.
        limit: Duration,
    },
}

/// Capability to run the client once and observe its exit code.
pub trait ProcessRunner {
    /// Run `program` with `args`, blocking until it terminates, and return
    /// its exit code.
    ///
    /// With `quiet`, the child's stdout/stderr are discarded instead of
    /// interleaving with the harness's own report.
    fn run(&self, program: &Path, args: &[&str], quiet: bool) -> Result<i32, ProcessError>;
}

fn command(program: &Path, args: &[&str], quiet: bool) -> Command {
    let mut cmd = Command::new(program);
    cmd.args(args);
    if quiet {
        cmd.stdout(Stdio::null()).stderr(Stdio::null());
    }
    debug!(program = %program.display(), ?args, quiet, "spawning client");
    cmd
}

/// Blocking runner with no time limit — a hung child hangs the harness.
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[&str], quiet: bool) -> Result<i32, ProcessError> {
        let status = command(program, args, quiet)
            .status()
            .map_err(|source| ProcessError::Spawn {
                program: program.display().to_string(),
                source,
            })?;
        status.code().ok_or_else(|| ProcessError::Signaled {
            program: program.display().to_string(),
        })
    }
}

/// Runner that kills any child still alive once its limit elapses.
pub struct BoundedRunner {
    limit: Duration,
}

impl BoundedRunner {
    /// A runner allowing each child `limit` of wall-clock time.
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }
}

impl ProcessRunner for BoundedRunner {
    fn run(&self, program: &Path, args: &[&str], quiet: bool) -> Result<i32, ProcessError> {
        let mut child =
            command(program, args, quiet)
                .spawn()
                .map_err(|source| ProcessError::Spawn {
                    program: program.display().to_string(),
                    source,
                })?;
        let deadline = Instant::now() + self.limit;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => {
                    return status.code().ok_or_else(|| ProcessError::Signaled {
                        program: program.display().to_string(),
                    })
                }
                Ok(None) => {
                    if Instant::now() >= deadline {
                        // best effort; reap so the child never outlives us
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(ProcessError::Timeout {
                            program: program.display().to_string(),
                            limit: self.limit,
                        });
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(source) => {
                    return Err(ProcessError::Wait {
                        program: program.display().to_string(),
                        source,
                    })
                }
            }
        }
    }
}
