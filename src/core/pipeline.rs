//! Pipeline selection and step plans
//!
//! One pipeline runs per invocation. The flag-to-pipeline mapping is an
//! explicit ordered decision table, evaluated first-match-wins, with the
//! multi-configuration check+test matrix as the fallback.

use crate::core::{Flag, FlagSet, RunContext, Step};

/// The mutually exclusive verification pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineId {
    /// Static analysis across all packages, warnings fatal
    Lint,
    /// API docs + rendered book, published to the hosting target
    Docs,
    /// Formatting check in non-mutating mode
    Format,
    /// Build, then the integration-test subproject's suites
    Integration,
    /// Feature-matrix type checks and the full test suite
    Default,
}

/// Decision table mapping flags to pipelines, highest priority first.
const SELECTION: [(Flag, PipelineId); 4] = [
    (Flag::Clippy, PipelineId::Lint),
    (Flag::Docs, PipelineId::Docs),
    (Flag::Rustfmt, PipelineId::Format),
    (Flag::IntegrationTests, PipelineId::Integration),
];

impl PipelineId {
    /// Select the pipeline for this run.
    ///
    /// The first flag in the table that is set wins; extra set flags are
    /// ignored without warning. With nothing set, `Default` runs.
    pub fn select(flags: &FlagSet) -> PipelineId {
        SELECTION
            .iter()
            .find(|(flag, _)| flags.is_set(*flag))
            .map(|(_, id)| *id)
            .unwrap_or(PipelineId::Default)
    }

    /// Human-readable pipeline name.
    pub fn name(self) -> &'static str {
        match self {
            PipelineId::Lint => "lint",
            PipelineId::Docs => "docs",
            PipelineId::Format => "format",
            PipelineId::Integration => "integration",
            PipelineId::Default => "default",
        }
    }
}

/// A fully planned pipeline: the ordered steps and the context they run in.
#[derive(Debug, Clone)]
pub struct Pipeline {
    /// Which pipeline this is
    pub id: PipelineId,

    /// Steps in execution order
    pub steps: Vec<Step>,

    /// Context shared by every step
    pub context: RunContext,
}

/// Subproject holding the integration-test suites.
const INTEGRATION_DIR: &str = "integration_tests";

/// Documentation-site source directory.
const BOOK_DIR: &str = "book";

impl Pipeline {
    /// Expand a pipeline id into its step plan.
    ///
    /// `flags` still matters here: `GNUPLOT` gates the ignored-tests step
    /// of the integration pipeline. The default pipeline carries the
    /// warnings-as-errors overlay in its context.
    pub fn plan(id: PipelineId, flags: &FlagSet, context: RunContext) -> Pipeline {
        let (steps, context) = match id {
            PipelineId::Lint => (
                vec![Step::cargo("clippy", &["clippy", "--all", "--", "-D", "warnings"])],
                context,
            ),
            PipelineId::Docs => (
                vec![
                    Step::cargo("clean", &["clean"]),
                    Step::cargo("api-docs", &["doc", "--all", "--no-deps"]),
                    Step::new("book", "mdbook", &["build"]).in_dir(BOOK_DIR),
                    Step::new("copy-book", "cp", &["-r", "book/book", "target/doc/book"]),
                    Step::new("upload", "ghp-import", &["-n", "target/doc"]).tolerated(),
                ],
                context,
            ),
            PipelineId::Format => (
                vec![Step::cargo("fmt", &["fmt", "--all", "--", "--check"])],
                context,
            ),
            PipelineId::Integration => {
                let mut steps = vec![Step::cargo("build", &["build"])];
                if flags.is_set(Flag::Gnuplot) {
                    steps.push(
                        Step::cargo(
                            "ignored-tests",
                            &["test", "--", "--format=pretty", "--nocapture", "--ignored"],
                        )
                        .in_dir(INTEGRATION_DIR),
                    );
                }
                // The pipeline deliberately ends inside the subproject;
                // nothing runs after it that would need the root restored.
                steps.push(
                    Step::cargo("tests", &["test", "--", "--format=pretty", "--nocapture"])
                        .in_dir(INTEGRATION_DIR),
                );
                (steps, context)
            }
            PipelineId::Default => (
                vec![
                    Step::cargo(
                        "check-gnuplot",
                        &["check", "--no-default-features", "--features", "gnuplot_backend"],
                    ),
                    Step::cargo(
                        "check-plotters",
                        &["check", "--no-default-features", "--features", "plotters_backend"],
                    ),
                    Step::cargo("check-all-features", &["check", "--all-features"]),
                    Step::cargo("test", &["test"]),
                ],
                context.with_env("RUSTFLAGS", "-D warnings"),
            ),
        };

        Pipeline { id, steps, context }
    }

    /// Select and plan in one go from a flag snapshot.
    pub fn for_flags(flags: &FlagSet, context: RunContext) -> Pipeline {
        Self::plan(PipelineId::select(flags), flags, context)
    }
}
