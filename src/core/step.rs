//! Step domain model

use std::path::PathBuf;

/// A single external command invocation within a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Short identifier used in logs and reports
    pub id: &'static str,

    /// Program to invoke
    pub program: String,

    /// Arguments passed to the program
    pub args: Vec<String>,

    /// Working directory relative to the run root (`None` = run root)
    pub dir: Option<PathBuf>,

    /// Whether a non-zero exit status is tolerated rather than fatal
    pub tolerate_failure: bool,
}

impl Step {
    /// Create a step invoking `program` with `args`.
    pub fn new(id: &'static str, program: &str, args: &[&str]) -> Self {
        Step {
            id,
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            dir: None,
            tolerate_failure: false,
        }
    }

    /// Shorthand for a `cargo` invocation; most steps are one.
    pub fn cargo(id: &'static str, args: &[&str]) -> Self {
        Self::new(id, "cargo", args)
    }

    /// Run this step in a subdirectory of the run root.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Mark this step's failure as tolerated.
    pub fn tolerated(mut self) -> Self {
        self.tolerate_failure = true;
        self
    }

    /// The command line this step runs, for logs and dry-run output.
    pub fn display_command(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}
