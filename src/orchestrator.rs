//! Orchestrator for coordinating the whole workflow
//!
//! This module provides:
//! - Workflow coordination: read → back up → rewrite → purge cache → install
//! - Dry-run mode support
//! - Fatal error propagation for file-level failures
//! - Best-effort installs whose outcomes are collected, never fatal

use crate::cache::{cache_path, purge_cache, CachePurger, PurgeOutcome};
use crate::cli::CliArgs;
use crate::domain::{ExtractedSections, RunReport};
use crate::error::{AppError, CacheError};
use crate::manifest::ManifestRewriter;
use crate::output::{Console, Verbosity};
use crate::package_manager::{build_install_commands, PackageManager};
use crate::progress::Progress;
use crate::runner::{run_installs, InstallRunner, SystemRunner};
use std::collections::BTreeSet;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

/// Options for a single run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Project directory
    pub target_dir: PathBuf,
    /// Packages that keep their pinned version
    pub excluded: BTreeSet<String>,
    /// Package manager override; detected when `None`
    pub package_manager: Option<PackageManager>,
    /// Show the plan without touching anything
    pub dry_run: bool,
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Whether stdout carries the JSON report
    pub json: bool,
}

impl RunOptions {
    /// Create options for `target_dir` with everything else defaulted
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
            ..Self::default()
        }
    }

    /// Build options from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Self {
        Self {
            target_dir: args.path.clone(),
            excluded: args.excluded(),
            package_manager: args.package_manager,
            dry_run: args.dry_run,
            verbosity: Verbosity::from_flags(args.verbose, args.quiet),
            json: args.json,
        }
    }

    /// Console matching these options
    pub fn console(&self) -> Console {
        Console::new(self.verbosity, self.json)
    }
}

/// Orchestrator for one project directory
pub struct Orchestrator {
    options: RunOptions,
    runner: Arc<dyn InstallRunner>,
    purger: CachePurger,
    console: Console,
}

impl Orchestrator {
    /// Create an orchestrator that runs the real package manager
    pub fn new(options: RunOptions) -> Self {
        let console = options.console();
        Self {
            options,
            runner: Arc::new(SystemRunner::new(console)),
            purger: purge_cache,
            console,
        }
    }

    /// Create an orchestrator with a custom runner (for testing)
    pub fn with_runner(options: RunOptions, runner: Arc<dyn InstallRunner>) -> Self {
        let console = options.console();
        Self {
            options,
            runner,
            purger: purge_cache,
            console,
        }
    }

    /// Replace how node_modules is cleared (for testing)
    pub fn with_purger(mut self, purger: CachePurger) -> Self {
        self.purger = purger;
        self
    }

    /// Run the workflow
    ///
    /// Manifest, backup and cache failures abort the run before any install
    /// is launched. Install failures are recorded in the report only.
    pub async fn run(&self) -> Result<RunReport, AppError> {
        let dir = &self.options.target_dir;
        let rewriter = ManifestRewriter::new(dir);
        let package_manager = self
            .options
            .package_manager
            .unwrap_or_else(|| PackageManager::detect(dir));
        self.console
            .verbose(&format!("Package manager: {}", package_manager));

        if self.options.dry_run {
            let sections = rewriter.read_sections()?;
            let commands =
                build_install_commands(package_manager, &sections, &self.options.excluded);
            return Ok(RunReport {
                target_dir: dir.clone(),
                manifest_path: rewriter.manifest_path(),
                backup_path: None,
                package_manager,
                unknown_exclusions: self.unknown_exclusions(&sections),
                sections,
                cache_removed: false,
                commands,
                results: Vec::new(),
                dry_run: true,
            });
        }

        // Step 1: back up and rewrite the manifest
        let sections = rewriter.rewrite()?;
        self.console.verbose(&format!(
            "Moved {} to {}",
            rewriter.manifest_path().display(),
            rewriter.backup_path().display()
        ));

        let unknown_exclusions = self.unknown_exclusions(&sections);
        for name in &unknown_exclusions {
            self.console
                .warn(&format!("excluded package '{}' is not a dependency", name));
        }

        // Step 2: clear the dependency cache before anything is installed
        let cache_removed = self.purge_cache().await? == PurgeOutcome::Removed;

        // Step 3: reinstall every section, concurrently
        let commands = build_install_commands(package_manager, &sections, &self.options.excluded);
        let results = run_installs(Arc::clone(&self.runner), &commands, dir).await;

        Ok(RunReport {
            target_dir: dir.clone(),
            manifest_path: rewriter.manifest_path(),
            backup_path: Some(rewriter.backup_path()),
            package_manager,
            sections,
            cache_removed,
            commands,
            results,
            unknown_exclusions,
            dry_run: false,
        })
    }

    async fn purge_cache(&self) -> Result<PurgeOutcome, CacheError> {
        let dir = self.options.target_dir.clone();
        let path = cache_path(&dir);

        let mut progress = Progress::new(self.console.show_progress());
        progress.spinner(&format!("Deleting {}...", path.display()));
        let purger = self.purger;
        let outcome = tokio::task::spawn_blocking(move || purger(&dir)).await;
        progress.finish_and_clear();

        let outcome = outcome
            .map_err(|e| CacheError::deletion_failed(&path, io::Error::other(e.to_string())))??;
        match outcome {
            PurgeOutcome::Removed => self
                .console
                .notice(&format!("{} is successfully deleted.", path.display())),
            PurgeOutcome::Absent => self
                .console
                .verbose(&format!("{} does not exist, nothing to delete", path.display())),
        }
        Ok(outcome)
    }

    fn unknown_exclusions(&self, sections: &ExtractedSections) -> Vec<String> {
        self.options
            .excluded
            .iter()
            .filter(|name| !sections.contains(name))
            .cloned()
            .collect()
    }
}
