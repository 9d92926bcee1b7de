use anyhow::{Context, Result};
use ci_runner::cli::output::*;
use ci_runner::cli::Cli;
use ci_runner::{FlagSet, Pipeline, PipelineRunner, RunContext, SubprocessRunner};
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    // Flags are read once; everything downstream works from this snapshot.
    let flags = FlagSet::from_env();
    let context = RunContext::current_dir().context("Failed to resolve working directory")?;
    let pipeline = Pipeline::for_flags(&flags, context);

    println!(
        "{} Selected pipeline: {}",
        INFO,
        style(pipeline.id.name()).bold()
    );

    if cli.dry_run {
        println!("{}", format_plan(&pipeline));
        return Ok(());
    }

    let runner = PipelineRunner::new(SubprocessRunner);
    match runner.run(&pipeline).await {
        Ok(report) => {
            println!("\n{}", format_report(&report));
            println!(
                "\n{} {} pipeline completed {}",
                CHECK,
                style(pipeline.id.name()).bold(),
                style("successfully").green()
            );
            Ok(())
        }
        Err(err) => {
            println!(
                "\n{} {} pipeline {}",
                CROSS,
                style(pipeline.id.name()).bold(),
                style("failed").red()
            );
            error!("{}", err);
            std::process::exit(err.exit_code());
        }
    }
}
