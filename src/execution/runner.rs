//! Pipeline runner - sequential, fail-fast step loop

use crate::core::Pipeline;
use crate::execution::{CommandRunner, StepStatus};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum RunError {
    /// The step's program could not be started at all
    #[error("failed to spawn step '{step}': {source}")]
    Spawn {
        step: String,
        #[source]
        source: std::io::Error,
    },

    /// An untolerated step exited non-zero
    #[error("step '{step}' failed with {status}")]
    StepFailed { step: String, status: StepStatus },
}

impl RunError {
    /// Process exit code to report for this failure.
    ///
    /// The first failing step's exit code is propagated; a spawn failure
    /// or a signal-killed child maps to 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::Spawn { .. } => 1,
            RunError::StepFailed { status, .. } => status.code().unwrap_or(1),
        }
    }
}

/// How a single step concluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Step exited zero
    Succeeded { step: String },
    /// Step exited non-zero but its failure is tolerated
    ToleratedFailure { step: String, status: StepStatus },
}

impl StepOutcome {
    /// The id of the step this outcome belongs to.
    pub fn step(&self) -> &str {
        match self {
            StepOutcome::Succeeded { step } | StepOutcome::ToleratedFailure { step, .. } => step,
        }
    }
}

/// Record of one completed pipeline run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Unique id for this run
    pub execution_id: Uuid,

    /// Which pipeline ran
    pub pipeline: crate::core::PipelineId,

    /// When the first step started
    pub started_at: DateTime<Utc>,

    /// When the last step finished
    pub completed_at: DateTime<Utc>,

    /// Per-step outcomes, in execution order
    pub outcomes: Vec<StepOutcome>,
}

impl RunReport {
    /// Steps whose failure was swallowed.
    pub fn tolerated_failures(&self) -> Vec<&StepOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, StepOutcome::ToleratedFailure { .. }))
            .collect()
    }
}

/// Executes a planned pipeline one step at a time.
pub struct PipelineRunner<R> {
    commands: R,
}

impl<R: CommandRunner> PipelineRunner<R> {
    pub fn new(commands: R) -> Self {
        Self { commands }
    }

    /// The command runner steps are executed through.
    pub fn commands(&self) -> &R {
        &self.commands
    }

    /// Run every step of `pipeline` in order.
    ///
    /// Each step's exit status is checked before the next step starts. The
    /// first untolerated non-zero exit aborts the run immediately; a
    /// tolerated failure is logged with the swallowed status and the run
    /// continues. No retries.
    pub async fn run(&self, pipeline: &Pipeline) -> Result<RunReport, RunError> {
        let execution_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!(
            "Running {} pipeline ({} steps, {})",
            pipeline.id.name(),
            pipeline.steps.len(),
            execution_id
        );

        let mut outcomes = Vec::with_capacity(pipeline.steps.len());
        for step in &pipeline.steps {
            info!("Step '{}': {}", step.id, step.display_command());

            let status = self
                .commands
                .run(step, &pipeline.context)
                .await
                .map_err(|source| RunError::Spawn {
                    step: step.id.to_string(),
                    source,
                })?;

            if status.is_success() {
                info!("Step '{}' succeeded", step.id);
                outcomes.push(StepOutcome::Succeeded {
                    step: step.id.to_string(),
                });
            } else if step.tolerate_failure {
                // Tolerated by design, but surfaced rather than silenced.
                warn!("Step '{}' failed with {} (tolerated)", step.id, status);
                outcomes.push(StepOutcome::ToleratedFailure {
                    step: step.id.to_string(),
                    status,
                });
            } else {
                error!("Step '{}' failed with {}", step.id, status);
                return Err(RunError::StepFailed {
                    step: step.id.to_string(),
                    status,
                });
            }
        }

        Ok(RunReport {
            execution_id,
            pipeline: pipeline.id,
            started_at,
            completed_at: Utc::now(),
            outcomes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PipelineId, RunContext, Step};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::io;
    use std::sync::Mutex;

    /// Scripted runner: records step ids, fails the ones it is told to.
    struct ScriptedRunner {
        failures: HashMap<&'static str, i32>,
        ran: Mutex<Vec<String>>,
    }

    impl ScriptedRunner {
        fn new() -> Self {
            Self {
                failures: HashMap::new(),
                ran: Mutex::new(Vec::new()),
            }
        }

        fn fail(mut self, step: &'static str, code: i32) -> Self {
            self.failures.insert(step, code);
            self
        }

        fn ran(&self) -> Vec<String> {
            self.ran.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CommandRunner for ScriptedRunner {
        async fn run(&self, step: &Step, _context: &RunContext) -> io::Result<StepStatus> {
            self.ran.lock().unwrap().push(step.id.to_string());
            match self.failures.get(step.id) {
                Some(code) => Ok(StepStatus::from_code(*code)),
                None => Ok(StepStatus::success()),
            }
        }
    }

    fn pipeline_of(steps: Vec<Step>) -> Pipeline {
        Pipeline {
            id: PipelineId::Default,
            steps,
            context: RunContext::new("/work"),
        }
    }

    #[tokio::test]
    async fn test_all_steps_succeed() {
        let commands = ScriptedRunner::new();
        let pipeline = pipeline_of(vec![
            Step::cargo("one", &["check"]),
            Step::cargo("two", &["test"]),
        ]);

        let runner = PipelineRunner::new(commands);
        let report = runner.run(&pipeline).await.unwrap();
        assert_eq!(report.outcomes.len(), 2);
        assert!(report.tolerated_failures().is_empty());
    }

    #[tokio::test]
    async fn test_fatal_failure_stops_the_run() {
        let commands = ScriptedRunner::new().fail("two", 101);
        let pipeline = pipeline_of(vec![
            Step::cargo("one", &["check"]),
            Step::cargo("two", &["check"]),
            Step::cargo("three", &["test"]),
        ]);

        let runner = PipelineRunner::new(commands);
        let err = runner.run(&pipeline).await.unwrap_err();
        match &err {
            RunError::StepFailed { step, status } => {
                assert_eq!(step, "two");
                assert_eq!(status.code(), Some(101));
            }
            other => panic!("expected StepFailed, got {:?}", other),
        }
        assert_eq!(err.exit_code(), 101);
        assert_eq!(runner.commands.ran(), ["one", "two"]);
    }

    #[tokio::test]
    async fn test_tolerated_failure_does_not_stop_the_run() {
        let commands = ScriptedRunner::new().fail("upload", 1);
        let pipeline = pipeline_of(vec![
            Step::cargo("docs", &["doc"]),
            Step::new("upload", "ghp-import", &["-n", "target/doc"]).tolerated(),
        ]);

        let runner = PipelineRunner::new(commands);
        let report = runner.run(&pipeline).await.unwrap();

        let tolerated = report.tolerated_failures();
        assert_eq!(tolerated.len(), 1);
        assert_eq!(tolerated[0].step(), "upload");
    }

    #[tokio::test]
    async fn test_spawn_failure_is_fatal() {
        struct NoSpawn;

        #[async_trait]
        impl CommandRunner for NoSpawn {
            async fn run(&self, _step: &Step, _context: &RunContext) -> io::Result<StepStatus> {
                Err(io::Error::new(io::ErrorKind::NotFound, "no such program"))
            }
        }

        let pipeline = pipeline_of(vec![Step::cargo("one", &["check"])]);
        let runner = PipelineRunner::new(NoSpawn);
        let err = runner.run(&pipeline).await.unwrap_err();
        assert!(matches!(err, RunError::Spawn { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_signal_killed_step_exits_one() {
        struct Signalled;

        #[async_trait]
        impl CommandRunner for Signalled {
            async fn run(&self, _step: &Step, _context: &RunContext) -> io::Result<StepStatus> {
                Ok(StepStatus::signalled())
            }
        }

        let pipeline = pipeline_of(vec![Step::cargo("one", &["check"])]);
        let runner = PipelineRunner::new(Signalled);
        let err = runner.run(&pipeline).await.unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }
}
