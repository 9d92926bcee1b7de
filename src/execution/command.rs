//! Subprocess execution seam

use crate::core::{RunContext, Step};
use async_trait::async_trait;
use std::fmt;
use std::io;
use tokio::process::Command;
use tracing::debug;

/// Exit of a finished step.
///
/// Owned stand-in for `std::process::ExitStatus` so scripted runners in
/// tests can fabricate one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepStatus {
    code: Option<i32>,
}

impl StepStatus {
    /// A successful exit.
    pub fn success() -> Self {
        Self::from_code(0)
    }

    /// An exit with the given code.
    pub fn from_code(code: i32) -> Self {
        StepStatus { code: Some(code) }
    }

    /// Termination without an exit code (killed by a signal).
    pub fn signalled() -> Self {
        StepStatus { code: None }
    }

    /// Whether the step exited zero.
    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }

    /// The exit code, if the process exited normally.
    pub fn code(&self) -> Option<i32> {
        self.code
    }
}

impl From<std::process::ExitStatus> for StepStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        StepStatus {
            code: status.code(),
        }
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {}", code),
            None => write!(f, "no exit code (killed by signal)"),
        }
    }
}

/// Runs one step to completion and reports how it exited.
///
/// The pipeline runner is generic over this trait; tests substitute a
/// scripted implementation.
#[async_trait]
pub trait CommandRunner {
    /// Run `step` in `context`, blocking the pipeline until it finishes.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` only when the program cannot be spawned at
    /// all; a started program that exits non-zero is a `StepStatus`, not
    /// an error.
    async fn run(&self, step: &Step, context: &RunContext) -> io::Result<StepStatus>;
}

/// Production runner: spawns the step as a child process.
///
/// Stdio is inherited, so each tool's own output is the visible trace of
/// the run. There is no timeout; a hung tool hangs the run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubprocessRunner;

#[async_trait]
impl CommandRunner for SubprocessRunner {
    async fn run(&self, step: &Step, context: &RunContext) -> io::Result<StepStatus> {
        let dir = context.dir_for(step);
        debug!(
            "Spawning step '{}' in {}: {}",
            step.id,
            dir.display(),
            step.display_command()
        );

        let status = Command::new(&step.program)
            .args(&step.args)
            .current_dir(dir)
            .envs(context.env())
            .status()
            .await?;

        Ok(StepStatus::from(status))
    }
}
