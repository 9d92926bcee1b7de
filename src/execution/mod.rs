//! Step execution
//!
//! The runner loop and the subprocess seam it drives. Execution is
//! strictly sequential: one step runs to completion before the next
//! starts, and the first untolerated failure aborts the run.

pub mod command;
pub mod runner;

pub use command::{CommandRunner, StepStatus, SubprocessRunner};
pub use runner::{PipelineRunner, RunError, RunReport, StepOutcome};
