//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Dry-run plan display (files that would change, commands that would run)
//! - Per-command install status with colors
//! - Summary of succeeded and failed installs

use crate::cache::CACHE_DIR;
use crate::domain::{DependencySection, InstallCommand, InstallResult, RunReport};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn format_plan(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let prefix = if self.color {
            format!("{} ", "(dry-run)".cyan())
        } else {
            "(dry-run) ".to_string()
        };

        writeln!(
            writer,
            "{}would back up {} to {}.old",
            prefix,
            report.manifest_path.display(),
            report.manifest_path.display()
        )?;
        writeln!(
            writer,
            "{}would delete {}",
            prefix,
            report.target_dir.join(CACHE_DIR).display()
        )?;

        if report.commands.is_empty() {
            writeln!(writer, "{}no dependencies to install", prefix)?;
            return Ok(());
        }

        writeln!(writer, "{}would run:", prefix)?;
        for command in &report.commands {
            self.format_command_line(command, writer)?;
        }
        Ok(())
    }

    fn format_command_line(
        &self,
        command: &InstallCommand,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if self.color {
            writeln!(writer, "  {}", command.to_string().bright_white())
        } else {
            writeln!(writer, "  {}", command)
        }
    }

    fn format_result_line(
        &self,
        result: &InstallResult,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let section = result.command.section.key();
        match (result.error_message(), self.color) {
            (None, true) => writeln!(writer, "  {} {}", "✓".green(), section),
            (None, false) => writeln!(writer, "  ok {}", section),
            (Some(message), true) => writeln!(
                writer,
                "  {} {}: {}",
                "✗".red(),
                section,
                message.red()
            ),
            (Some(message), false) => writeln!(writer, "  failed {}: {}", section, message),
        }
    }

    fn format_summary(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        if let Some(backup) = &report.backup_path {
            writeln!(
                writer,
                "Backed up {} to {}",
                report.manifest_path.display(),
                backup.display()
            )?;
        }

        if report.results.is_empty() {
            writeln!(writer, "No dependencies to install.")?;
            return Ok(());
        }

        for result in &report.results {
            self.format_result_line(result, writer)?;
        }

        let summary = format!(
            "Installs: {} succeeded, {} failed",
            report.succeeded(),
            report.failed()
        );
        if !self.color {
            writeln!(writer, "{}", summary)
        } else if report.all_succeeded() {
            writeln!(writer, "{}", summary.green().bold())
        } else {
            writeln!(writer, "{}", summary.yellow().bold())
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        if report.dry_run {
            return self.format_plan(report, writer);
        }

        if self.verbosity == Verbosity::Quiet {
            // Only failures
            for result in report.results.iter().filter(|r| !r.is_success()) {
                self.format_result_line(result, writer)?;
            }
            return Ok(());
        }

        if self.verbosity == Verbosity::Verbose {
            for section in DependencySection::all() {
                let deps = report.sections.get(*section);
                writeln!(writer, "{} ({}):", section.key(), deps.len())?;
                for (name, version) in deps {
                    writeln!(writer, "  {} {}", name, version)?;
                }
            }
        }

        self.format_summary(report, writer)
    }
}
