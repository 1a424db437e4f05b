//! package.json handling
//!
//! This module provides:
//! - Parsing package.json and extracting its dependency sections
//! - Clearing both sections in the document
//! - Backing up the original file and writing the cleared manifest

mod package_json;
mod rewriter;

pub use package_json::PackageJson;
pub use rewriter::ManifestRewriter;

/// Manifest file name
pub const MANIFEST_FILE: &str = "package.json";

/// Suffix appended to the manifest name for the backup copy
pub const BACKUP_SUFFIX: &str = ".old";
