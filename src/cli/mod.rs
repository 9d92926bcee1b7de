//! Command-line interface

pub mod output;

use clap::Parser;
use std::ffi::OsString;

/// Environment-switched CI verification pipeline runner
///
/// The pipeline is chosen through environment variables, not arguments:
/// CLIPPY, DOCS, RUSTFMT and INTEGRATION_TESTS each select their pipeline
/// when set to "yes" (first match in that order wins); with none set, the
/// default check+test matrix runs. GNUPLOT=yes additionally enables the
/// ignored-tests step of the integration pipeline.
#[derive(Debug, Parser, Clone)]
#[command(name = "ci-runner")]
#[command(version = "0.1.0")]
#[command(about = "Run the CI verification pipeline selected by the environment", long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the selected pipeline's steps without executing them
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Parse CLI arguments from the environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}
