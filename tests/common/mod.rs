//! Shared test helpers: a scripted CommandRunner that records invocations

use async_trait::async_trait;
use ci_runner::{CommandRunner, RunContext, Step, StepStatus};
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

/// One recorded step invocation.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub step: String,
    pub program: String,
    pub args: Vec<String>,
    /// Effective working directory, resolved against the run root
    pub dir: PathBuf,
    /// Environment overlay in effect for the step
    pub env: HashMap<String, String>,
}

/// Scripted command runner: every step succeeds unless told otherwise.
pub struct ScriptedRunner {
    failures: HashMap<String, i32>,
    invocations: Mutex<Vec<Invocation>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self {
            failures: HashMap::new(),
            invocations: Mutex::new(Vec::new()),
        }
    }

    /// Script the step with this id to exit with `code`.
    pub fn fail_step(mut self, step: &str, code: i32) -> Self {
        self.failures.insert(step.to_string(), code);
        self
    }

    /// Everything recorded so far, in invocation order.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }

    /// Just the step ids, in invocation order.
    pub fn step_ids(&self) -> Vec<String> {
        self.invocations().into_iter().map(|i| i.step).collect()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, step: &Step, context: &RunContext) -> io::Result<StepStatus> {
        self.invocations.lock().unwrap().push(Invocation {
            step: step.id.to_string(),
            program: step.program.clone(),
            args: step.args.clone(),
            dir: context.dir_for(step),
            env: context.env().clone(),
        });

        match self.failures.get(step.id) {
            Some(code) => Ok(StepStatus::from_code(*code)),
            None => Ok(StepStatus::success()),
        }
    }
}
