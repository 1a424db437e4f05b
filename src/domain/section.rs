//! Dependency sections of package.json

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Package name to version specifier, ordered by name
pub type SectionDependencies = BTreeMap<String, String>;

/// A dependency section of package.json
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencySection {
    /// `dependencies`
    Regular,
    /// `devDependencies`
    Dev,
}

impl DependencySection {
    /// Returns all sections in install order
    pub fn all() -> &'static [DependencySection] {
        &[DependencySection::Regular, DependencySection::Dev]
    }

    /// Returns the key of this section in package.json
    pub fn key(&self) -> &'static str {
        match self {
            DependencySection::Regular => "dependencies",
            DependencySection::Dev => "devDependencies",
        }
    }

    /// Returns true for development-only dependencies
    pub fn is_dev(&self) -> bool {
        matches!(self, DependencySection::Dev)
    }
}

impl fmt::Display for DependencySection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Dependencies taken out of a manifest, one mapping per section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedSections {
    /// Contents of `dependencies`
    pub regular: SectionDependencies,
    /// Contents of `devDependencies`
    pub dev: SectionDependencies,
}

impl ExtractedSections {
    /// Creates extracted sections from both mappings
    pub fn new(regular: SectionDependencies, dev: SectionDependencies) -> Self {
        Self { regular, dev }
    }

    /// Returns the mapping for a section
    pub fn get(&self, section: DependencySection) -> &SectionDependencies {
        match section {
            DependencySection::Regular => &self.regular,
            DependencySection::Dev => &self.dev,
        }
    }

    /// Returns a mutable mapping for a section
    pub fn get_mut(&mut self, section: DependencySection) -> &mut SectionDependencies {
        match section {
            DependencySection::Regular => &mut self.regular,
            DependencySection::Dev => &mut self.dev,
        }
    }

    /// Total number of packages across both sections
    pub fn total(&self) -> usize {
        self.regular.len() + self.dev.len()
    }

    /// Returns true if neither section declares a package
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Returns true if any section declares the package
    pub fn contains(&self, name: &str) -> bool {
        self.regular.contains_key(name) || self.dev.contains_key(name)
    }
}
