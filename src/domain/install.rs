//! Install commands and their outcomes

use super::DependencySection;
use crate::error::InstallError;
use std::fmt;

/// A package manager invocation for one dependency section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCommand {
    /// Section whose packages are installed
    pub section: DependencySection,
    /// Executable name (e.g. `npm`)
    pub program: String,
    /// Subcommand (e.g. `install`)
    pub subcommand: String,
    /// Flag recording the packages in the right section (e.g. `--save-dev`)
    pub save_flag: String,
    /// One token per package: `name` or `name@version`
    pub packages: Vec<String>,
}

impl InstallCommand {
    /// Creates a new install command
    pub fn new(
        section: DependencySection,
        program: impl Into<String>,
        subcommand: impl Into<String>,
        save_flag: impl Into<String>,
        packages: Vec<String>,
    ) -> Self {
        Self {
            section,
            program: program.into(),
            subcommand: subcommand.into(),
            save_flag: save_flag.into(),
            packages,
        }
    }

    /// Arguments passed to the program, in order
    pub fn args(&self) -> Vec<&str> {
        let mut args = Vec::with_capacity(self.packages.len() + 2);
        args.push(self.subcommand.as_str());
        args.push(self.save_flag.as_str());
        args.extend(self.packages.iter().map(String::as_str));
        args
    }

    /// All tokens including the program name
    pub fn tokens(&self) -> Vec<&str> {
        let mut tokens = vec![self.program.as_str()];
        tokens.extend(self.args());
        tokens
    }
}

impl fmt::Display for InstallCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens().join(" "))
    }
}

/// How a single install command ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Exited with status 0
    Success,
    /// Exited with a non-zero status; `None` when killed by a signal
    Failed { code: Option<i32> },
    /// The process could not be started
    SpawnError { message: String },
}

impl InstallOutcome {
    /// Returns true if the command succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, InstallOutcome::Success)
    }

    /// Short status label
    pub fn label(&self) -> &'static str {
        match self {
            InstallOutcome::Success => "success",
            InstallOutcome::Failed { .. } => "failed",
            InstallOutcome::SpawnError { .. } => "spawn-error",
        }
    }
}

/// Result of running one install command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallResult {
    /// The command that was executed
    pub command: InstallCommand,
    /// How it ended
    pub outcome: InstallOutcome,
}

impl InstallResult {
    /// Creates a new install result
    pub fn new(command: InstallCommand, outcome: InstallOutcome) -> Self {
        Self { command, outcome }
    }

    /// Returns true if the command succeeded
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    /// Describes the failure, if any
    pub fn error_message(&self) -> Option<String> {
        match &self.outcome {
            InstallOutcome::Success => None,
            InstallOutcome::Failed { code } => {
                Some(InstallError::exit_non_zero(self.command.to_string(), *code).to_string())
            }
            InstallOutcome::SpawnError { message } => Some(message.clone()),
        }
    }
}
