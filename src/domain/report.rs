//! Report of a complete run

use super::{ExtractedSections, InstallCommand, InstallResult};
use crate::package_manager::PackageManager;
use std::path::PathBuf;

/// Everything a run did, collected for output
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Project directory
    pub target_dir: PathBuf,
    /// Path of package.json
    pub manifest_path: PathBuf,
    /// Path of the backup; `None` in dry-run mode
    pub backup_path: Option<PathBuf>,
    /// Package manager the commands were built for
    pub package_manager: PackageManager,
    /// Dependencies taken out of the manifest
    pub sections: ExtractedSections,
    /// Whether node_modules existed and was removed
    pub cache_removed: bool,
    /// Commands built from the sections
    pub commands: Vec<InstallCommand>,
    /// Outcome of each executed command, in command order
    pub results: Vec<InstallResult>,
    /// Excluded names that no section declares
    pub unknown_exclusions: Vec<String>,
    /// Whether this was a dry-run
    pub dry_run: bool,
}

impl RunReport {
    /// Number of install commands that succeeded
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    /// Number of install commands that failed or could not start
    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }

    /// Returns true if every executed command succeeded
    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }
}
