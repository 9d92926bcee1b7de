//! Run context - working directory and environment overlay
//!
//! The run's mutable process-wide state (the `cd` and the strictness
//! variable of the original shell script) is modeled as an explicit value
//! handed to step execution instead of being mutated in place.

use crate::core::Step;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Per-run execution context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunContext {
    /// Directory the pipeline starts in; step directory overrides are
    /// resolved against it
    root: PathBuf,

    /// Extra environment variables applied to every step of the pipeline
    env: HashMap<String, String>,
}

impl RunContext {
    /// Create a context rooted at `root` with no environment overlay.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        RunContext {
            root: root.into(),
            env: HashMap::new(),
        }
    }

    /// Create a context rooted at the process's current directory.
    pub fn current_dir() -> io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    /// Return a copy with `key=value` added to the environment overlay.
    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    /// The directory the pipeline is rooted at.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The environment overlay applied to every step.
    pub fn env(&self) -> &HashMap<String, String> {
        &self.env
    }

    /// Effective working directory for a step.
    ///
    /// A step without an override runs at the root; one with an override
    /// runs in that subdirectory. The override never leaks into later
    /// steps, so "restoring" the root is simply the absence of one.
    pub fn dir_for(&self, step: &Step) -> PathBuf {
        match &step.dir {
            Some(dir) => self.root.join(dir),
            None => self.root.clone(),
        }
    }
}
