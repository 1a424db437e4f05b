//! repdep - reinstall package.json dependencies at their latest versions
//!
//! Rewrites package.json without its pinned dependencies, keeps the original
//! as package.json.old, deletes node_modules and runs the package manager's
//! install once per dependency section.

use clap::Parser;
use colored::Colorize;
use repdep::cli::CliArgs;
use repdep::orchestrator::{Orchestrator, RunOptions};
use repdep::output::{create_formatter, OutputConfig};
use std::io::{self, Write};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Prints usage and exits 0 on -h/--help, exits 2 on usage errors
    let args = CliArgs::parse();

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    if args.verbose {
        eprintln!("repdep v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Target: {}", args.path.display());
        if args.dry_run {
            eprintln!("Mode: dry-run");
        }
    }

    let options = RunOptions::from_cli(&args);
    let report = Orchestrator::new(options).run().await?;

    let formatter = create_formatter(OutputConfig::from_cli(args.json, args.verbose, args.quiet));
    let mut stdout = io::stdout().lock();
    formatter.format(&report, &mut stdout)?;
    stdout.flush()?;

    // Install failures are reported above but do not change the exit code
    Ok(ExitCode::SUCCESS)
}
