//! Run command: execute one job spec.

use std::path::PathBuf;

use clap::Args;

use crate::config::FactoryConfig;
use crate::error::Result;
use crate::output::{display_path, Printer};
use crate::runner;

/// Run a job spec through Aseprite
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Job spec JSON file
    #[arg(required = true)]
    pub job: PathBuf,

    /// Config file (default: ./factory.yaml when present)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Artifacts root, overriding config and FACTORY_ARTIFACTS_DIR
    #[arg(long)]
    pub artifacts_dir: Option<PathBuf>,

    /// Write meta.json and the script but do not launch Aseprite
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: RunArgs, printer: &Printer) -> Result<()> {
    let config = FactoryConfig::discover(args.config.as_deref())?
        .with_overrides(None, args.artifacts_dir);

    let outcome = runner::run_job(&args.job, &config, printer, args.dry_run)?;

    for output in &outcome.outputs {
        printer.info("Wrote", &display_path(output));
    }
    if let Some(log) = &outcome.log {
        printer.info("Log", &display_path(log));
    }

    Ok(())
}
