//! CLI argument parsing module for repdep

use crate::package_manager::PackageManager;
use clap::{ArgAction, Parser};
use std::collections::BTreeSet;
use std::path::PathBuf;

const AFTER_HELP: &str = "\
The values of --exclude run until the next option, a `--` or the end of the
command line, so give SOURCE_DIR before -e or after `--`:

  repdep ./app -e react react-dom
  repdep -e react react-dom -- ./app";

/// Float pinned package.json dependencies to their latest versions
#[derive(Parser, Debug, Clone)]
#[command(
    name = "repdep",
    version,
    about = "Reinstall package.json dependencies at their latest versions",
    after_help = AFTER_HELP
)]
pub struct CliArgs {
    /// Project directory containing package.json (default: current directory)
    #[arg(value_name = "SOURCE_DIR", default_value = ".")]
    pub path: PathBuf,

    /// Packages whose pinned version is kept
    #[arg(
        short = 'e',
        long,
        value_name = "PKG",
        num_args = 0..,
        action = ArgAction::Append
    )]
    pub exclude: Vec<String>,

    /// Package manager to invoke (default: detected from lockfiles)
    #[arg(long, value_enum)]
    pub package_manager: Option<PackageManager>,

    /// Dry run mode - show what would be done without changing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output the run report in JSON format
    #[arg(long)]
    pub json: bool,
}

impl CliArgs {
    /// The exclusion set, deduplicated
    pub fn excluded(&self) -> BTreeSet<String> {
        self.exclude.iter().cloned().collect()
    }
}
