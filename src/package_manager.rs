//! Package manager selection and install command construction
//!
//! This module provides:
//! - Detection of the Node.js package manager from lockfiles
//! - Construction of one install command per dependency section

use crate::domain::{DependencySection, ExtractedSections, InstallCommand, SectionDependencies};
use clap::ValueEnum;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

/// Supported Node.js package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    /// npm (`npm install --save`)
    #[default]
    Npm,
    /// pnpm (`pnpm add --save-prod`)
    Pnpm,
}

impl PackageManager {
    /// Detect the package manager to use from lockfiles in `working_dir`
    pub fn detect(working_dir: &Path) -> Self {
        if working_dir.join("pnpm-lock.yaml").exists() {
            return PackageManager::Pnpm;
        }
        PackageManager::Npm
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
        }
    }

    /// Executable to spawn; Windows ships these as .cmd shims
    pub fn program(&self) -> String {
        if cfg!(windows) {
            format!("{}.cmd", self.name())
        } else {
            self.name().to_string()
        }
    }

    /// Subcommand that adds packages to the manifest
    pub fn install_subcommand(&self) -> &'static str {
        match self {
            PackageManager::Npm => "install",
            PackageManager::Pnpm => "add",
        }
    }

    /// Flag that records packages in the given section
    pub fn save_flag(&self, section: DependencySection) -> &'static str {
        match (self, section) {
            (PackageManager::Npm, DependencySection::Regular) => "--save",
            (PackageManager::Pnpm, DependencySection::Regular) => "--save-prod",
            (_, DependencySection::Dev) => "--save-dev",
        }
    }

    /// Build the install command for one section
    ///
    /// Returns `None` when the section is empty. Excluded packages keep their
    /// pinned specifier as `name@version`; every other package is passed by
    /// bare name so the package manager records the latest version.
    pub fn build_install_command(
        &self,
        section: DependencySection,
        dependencies: &SectionDependencies,
        excluded: &BTreeSet<String>,
    ) -> Option<InstallCommand> {
        if dependencies.is_empty() {
            return None;
        }

        let packages = dependencies
            .iter()
            .map(|(name, version)| {
                if excluded.contains(name) {
                    format!("{}@{}", name, version)
                } else {
                    name.clone()
                }
            })
            .collect();

        Some(InstallCommand::new(
            section,
            self.program(),
            self.install_subcommand(),
            self.save_flag(section),
            packages,
        ))
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Build the install commands for every non-empty section, regular first
pub fn build_install_commands(
    package_manager: PackageManager,
    sections: &ExtractedSections,
    excluded: &BTreeSet<String>,
) -> Vec<InstallCommand> {
    DependencySection::all()
        .iter()
        .filter_map(|&section| {
            package_manager.build_install_command(section, sections.get(section), excluded)
        })
        .collect()
}
