//! JSON output formatter for machine processing

use crate::domain::{DependencySection, InstallOutcome, RunReport, SectionDependencies};
use crate::output::OutputFormatter;
use crate::package_manager::PackageManager;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

/// JSON representation of the full report
#[derive(Serialize)]
struct JsonOutput<'a> {
    dry_run: bool,
    target_dir: String,
    manifest: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    backup: Option<String>,
    package_manager: PackageManager,
    cache_removed: bool,
    dependencies: &'a SectionDependencies,
    dev_dependencies: &'a SectionDependencies,
    commands: Vec<JsonCommand>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unknown_exclusions: Vec<&'a str>,
}

/// JSON representation of one install command
#[derive(Serialize)]
struct JsonCommand {
    section: DependencySection,
    command: Vec<String>,
    /// `planned` in dry-run mode, otherwise the outcome label
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    exit_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn build_output(report: &RunReport) -> JsonOutput<'_> {
    let commands = if report.dry_run {
        report
            .commands
            .iter()
            .map(|command| JsonCommand {
                section: command.section,
                command: command.tokens().iter().map(|t| t.to_string()).collect(),
                status: "planned",
                exit_code: None,
                error: None,
            })
            .collect()
    } else {
        report
            .results
            .iter()
            .map(|result| JsonCommand {
                section: result.command.section,
                command: result.command.tokens().iter().map(|t| t.to_string()).collect(),
                status: result.outcome.label(),
                exit_code: match result.outcome {
                    InstallOutcome::Failed { code } => code,
                    InstallOutcome::Success => Some(0),
                    InstallOutcome::SpawnError { .. } => None,
                },
                error: result.error_message(),
            })
            .collect()
    };

    JsonOutput {
        dry_run: report.dry_run,
        target_dir: report.target_dir.display().to_string(),
        manifest: report.manifest_path.display().to_string(),
        backup: report.backup_path.as_ref().map(|p| p.display().to_string()),
        package_manager: report.package_manager,
        cache_removed: report.cache_removed,
        dependencies: &report.sections.regular,
        dev_dependencies: &report.sections.dev,
        commands,
        unknown_exclusions: report.unknown_exclusions.iter().map(String::as_str).collect(),
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = build_output(report);
        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExtractedSections, InstallCommand, InstallResult};
    use serde_json::Value;
    use std::path::PathBuf;

    fn sample_report(dry_run: bool) -> RunReport {
        let command = InstallCommand::new(
            DependencySection::Dev,
            "npm",
            "install",
            "--save-dev",
            vec!["mocha@9.0.0".to_string()],
        );
        let mut sections = ExtractedSections::default();
        sections.dev.insert("mocha".to_string(), "9.0.0".to_string());

        RunReport {
            target_dir: PathBuf::from("/p"),
            manifest_path: PathBuf::from("/p/package.json"),
            backup_path: (!dry_run).then(|| PathBuf::from("/p/package.json.old")),
            package_manager: PackageManager::Npm,
            sections,
            cache_removed: !dry_run,
            commands: vec![command.clone()],
            results: if dry_run {
                Vec::new()
            } else {
                vec![InstallResult::new(
                    command,
                    InstallOutcome::Failed { code: Some(1) },
                )]
            },
            unknown_exclusions: vec!["ghost".to_string()],
            dry_run,
        }
    }

    fn render(report: &RunReport) -> Value {
        let mut out = Vec::new();
        JsonFormatter::new().format(report, &mut out).unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    fn test_json_schema_after_run() {
        let json = render(&sample_report(false));

        assert_eq!(json["dry_run"], false);
        assert_eq!(json["package_manager"], "npm");
        assert_eq!(json["backup"], "/p/package.json.old");
        assert_eq!(json["cache_removed"], true);
        assert_eq!(json["dependencies"], serde_json::json!({}));
        assert_eq!(json["dev_dependencies"]["mocha"], "9.0.0");
        assert_eq!(json["unknown_exclusions"][0], "ghost");

        let cmd = &json["commands"][0];
        assert_eq!(cmd["section"], "dev");
        assert_eq!(
            cmd["command"],
            serde_json::json!(["npm", "install", "--save-dev", "mocha@9.0.0"])
        );
        assert_eq!(cmd["status"], "failed");
        assert_eq!(cmd["exit_code"], 1);
        assert!(cmd["error"].as_str().unwrap().contains("status 1"));
    }

    #[test]
    fn test_json_dry_run_lists_planned_commands() {
        let json = render(&sample_report(true));

        assert_eq!(json["dry_run"], true);
        assert!(json.get("backup").is_none());
        assert_eq!(json["commands"][0]["status"], "planned");
        assert!(json["commands"][0].get("exit_code").is_none());
    }
}
