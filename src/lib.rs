//! ci-runner - environment-switched CI verification pipelines
//!
//! Reads a fixed set of boolean switches from the environment, selects
//! exactly one verification pipeline (lint, docs, format, integration
//! tests, or the default check+test matrix) and runs its steps in order,
//! fail-fast, with exactly one tolerated failure: the docs upload.

pub mod cli;
pub mod core;
pub mod execution;

// Re-export commonly used types
pub use crate::core::{Flag, FlagSet, Pipeline, PipelineId, RunContext, Step};
pub use execution::{
    CommandRunner, PipelineRunner, RunError, RunReport, StepOutcome, StepStatus, SubprocessRunner,
};
