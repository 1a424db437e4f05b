//! package.json document model
//!
//! Handles:
//! - dependencies
//! - devDependencies
//!
//! All other keys are kept untouched and in their original order.

use crate::domain::{DependencySection, ExtractedSections, SectionDependencies};
use crate::error::ManifestError;
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A parsed package.json
#[derive(Debug, Clone)]
pub struct PackageJson {
    path: PathBuf,
    document: Map<String, Value>,
}

impl PackageJson {
    /// Read and parse the manifest at `path`
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ManifestError::not_found(path),
            ErrorKind::InvalidData => ManifestError::parse_error(path, "file is not valid UTF-8"),
            _ => ManifestError::read_error(path, e),
        })?;
        Self::parse(path, &content)
    }

    /// Parse manifest content; `path` is only used for error messages
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self, ManifestError> {
        let path = path.into();
        let json: Value = serde_json::from_str(content)
            .map_err(|e| ManifestError::parse_error(&path, e.to_string()))?;

        match json {
            Value::Object(document) => Ok(Self { path, document }),
            _ => Err(ManifestError::parse_error(
                &path,
                "top-level value must be an object",
            )),
        }
    }

    /// Extract both dependency sections; an absent or null section is empty
    pub fn sections(&self) -> Result<ExtractedSections, ManifestError> {
        let mut sections = ExtractedSections::default();
        for &section in DependencySection::all() {
            *sections.get_mut(section) = self.section(section)?;
        }
        Ok(sections)
    }

    fn section(&self, section: DependencySection) -> Result<SectionDependencies, ManifestError> {
        let key = section.key();
        let deps = match self.document.get(key) {
            None | Some(Value::Null) => return Ok(SectionDependencies::new()),
            Some(Value::Object(deps)) => deps,
            Some(_) => {
                return Err(ManifestError::parse_error(
                    &self.path,
                    format!("\"{}\" must be an object", key),
                ))
            }
        };

        deps.iter()
            .map(|(name, version)| match version.as_str() {
                Some(version) => Ok((name.clone(), version.to_string())),
                None => Err(ManifestError::parse_error(
                    &self.path,
                    format!("version of \"{}\" in \"{}\" must be a string", name, key),
                )),
            })
            .collect()
    }

    /// Set both dependency sections to empty objects
    pub fn clear_sections(&mut self) {
        for &section in DependencySection::all() {
            self.document
                .insert(section.key().to_string(), Value::Object(Map::new()));
        }
    }

    /// Serialize as 2-space indented JSON with a trailing newline
    pub fn to_pretty_string(&self) -> Result<String, ManifestError> {
        let mut out = serde_json::to_string_pretty(&self.document)
            .map_err(|e| ManifestError::serialize_error(&self.path, e.to_string()))?;
        out.push('\n');
        Ok(out)
    }
}
