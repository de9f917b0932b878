//! noxcomb CLI entry point
//!
//! Usage:
//!   noxcomb                                  Run nox and write lint_report
//!   noxcomb --nox_file ci/noxfile.py         Use a different noxfile
//!   noxcomb --output_file combined.txt       Write the report elsewhere
//!   noxcomb --disabled_output pylint,flake8  Skip specific tools
//!   noxcomb --enabled_output pytest          Capture only specific tools
//!   noxcomb -- -s lint                       Forward arguments to nox

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use noxcomb::cli::Cli;
use noxcomb::config::load_config;
use noxcomb::error::CombineError;
use noxcomb::session::{RunConfiguration, Session};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            if let Some(CombineError::SpawnFailed {
                suggestion: Some(hint),
                ..
            }) = e.downcast_ref::<CombineError>()
            {
                eprintln!("{}: {}", "hint".yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let run_config = RunConfiguration::resolve(&cli, &config);

    let mut session = Session::new(run_config);
    session.run().await?;

    Ok(())
}
