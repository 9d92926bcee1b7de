//! CLI output formatting

use crate::core::{Pipeline, Step};
use crate::execution::{RunReport, StepOutcome};
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "! ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Format a single step line for plan output.
pub fn format_step(step: &Step) -> String {
    let mut line = format!(
        "  {} {}",
        style(step.id).cyan(),
        step.display_command()
    );
    if let Some(dir) = &step.dir {
        line.push_str(&format!(" {}", style(format!("(in {})", dir.display())).dim()));
    }
    if step.tolerate_failure {
        line.push_str(&format!(" {}", style("(failure tolerated)").yellow()));
    }
    line
}

/// Format the full dry-run plan.
pub fn format_plan(pipeline: &Pipeline) -> String {
    let mut lines = vec![format!(
        "{} {} pipeline, {} step(s):",
        ROCKET,
        style(pipeline.id.name()).bold(),
        pipeline.steps.len()
    )];
    for (key, value) in pipeline.context.env() {
        lines.push(format!(
            "  {} {}={}",
            style("env").dim(),
            style(key).cyan(),
            value
        ));
    }
    lines.extend(pipeline.steps.iter().map(format_step));
    lines.join("\n")
}

/// Format the post-run summary.
pub fn format_report(report: &RunReport) -> String {
    let mut lines = vec![format!(
        "{} {} pipeline: {} step(s) ran ({})",
        INFO,
        style(report.pipeline.name()).bold(),
        report.outcomes.len(),
        style(&report.execution_id.to_string()[..8]).dim()
    )];
    for outcome in &report.outcomes {
        match outcome {
            StepOutcome::Succeeded { step } => {
                lines.push(format!("  {} {}", CHECK, step));
            }
            StepOutcome::ToleratedFailure { step, status } => {
                lines.push(format!(
                    "  {} {} failed with {} {}",
                    WARN,
                    step,
                    status,
                    style("(tolerated)").yellow()
                ));
            }
        }
    }
    lines.join("\n")
}
