//! Backup and rewrite of package.json
//!
//! Order of side effects:
//! 1. package.json is renamed to package.json.old (never overwriting an existing backup)
//! 2. the cleared document is written as the new package.json

use super::{PackageJson, BACKUP_SUFFIX, MANIFEST_FILE};
use crate::domain::ExtractedSections;
use crate::error::{AppError, BackupError, ManifestError};
use std::fs;
use std::path::PathBuf;

/// Rewrites the manifest of one project directory
#[derive(Debug, Clone)]
pub struct ManifestRewriter {
    dir: PathBuf,
}

impl ManifestRewriter {
    /// Create a rewriter for the project in `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of package.json
    pub fn manifest_path(&self) -> PathBuf {
        self.dir.join(MANIFEST_FILE)
    }

    /// Path of the backup copy
    pub fn backup_path(&self) -> PathBuf {
        self.dir.join(format!("{}{}", MANIFEST_FILE, BACKUP_SUFFIX))
    }

    /// Read the dependency sections without modifying anything
    pub fn read_sections(&self) -> Result<ExtractedSections, ManifestError> {
        PackageJson::load(&self.manifest_path())?.sections()
    }

    /// Back up the manifest, write it with both sections cleared and
    /// return what the sections contained
    pub fn rewrite(&self) -> Result<ExtractedSections, AppError> {
        let manifest_path = self.manifest_path();
        let backup_path = self.backup_path();

        let mut package = PackageJson::load(&manifest_path)?;
        let sections = package.sections()?;
        package.clear_sections();
        let content = package.to_pretty_string()?;

        // rename() silently replaces an existing target on Unix
        if fs::symlink_metadata(&backup_path).is_ok() {
            return Err(BackupError::already_exists(backup_path).into());
        }
        fs::rename(&manifest_path, &backup_path)
            .map_err(|e| BackupError::rename_failed(&manifest_path, &backup_path, e))?;

        fs::write(&manifest_path, content)
            .map_err(|e| ManifestError::write_error(&manifest_path, e))?;

        Ok(sections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::path::Path;

    const MANIFEST: &str =
        r#"{"name":"demo","dependencies":{"left-pad":"1.3.0"},"devDependencies":{"mocha":"9.0.0"}}"#;

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_paths() {
        let rewriter = ManifestRewriter::new("/project");
        assert_eq!(
            rewriter.manifest_path(),
            PathBuf::from("/project/package.json")
        );
        assert_eq!(
            rewriter.backup_path(),
            PathBuf::from("/project/package.json.old")
        );
    }

    #[test]
    fn test_rewrite_backs_up_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), MANIFEST).unwrap();

        let rewriter = ManifestRewriter::new(dir.path());
        let sections = rewriter.rewrite().unwrap();

        assert_eq!(sections.regular["left-pad"], "1.3.0");
        assert_eq!(sections.dev["mocha"], "9.0.0");

        let backup = fs::read_to_string(rewriter.backup_path()).unwrap();
        assert_eq!(backup, MANIFEST);

        let rewritten = read_json(&rewriter.manifest_path());
        assert_eq!(
            rewritten,
            json!({"name": "demo", "dependencies": {}, "devDependencies": {}})
        );
    }

    #[test]
    fn test_backup_sections_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), MANIFEST).unwrap();

        let rewriter = ManifestRewriter::new(dir.path());
        let extracted = rewriter.rewrite().unwrap();

        let from_backup = PackageJson::load(&rewriter.backup_path())
            .unwrap()
            .sections()
            .unwrap();
        assert_eq!(from_backup, extracted);
    }

    #[test]
    fn test_existing_backup_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), MANIFEST).unwrap();
        fs::write(dir.path().join("package.json.old"), "previous backup").unwrap();

        let rewriter = ManifestRewriter::new(dir.path());
        let err = rewriter.rewrite().unwrap_err();

        assert!(matches!(
            err,
            AppError::Backup(BackupError::AlreadyExists { .. })
        ));
        assert_eq!(
            fs::read_to_string(rewriter.backup_path()).unwrap(),
            "previous backup"
        );
        assert_eq!(
            fs::read_to_string(rewriter.manifest_path()).unwrap(),
            MANIFEST
        );
    }

    #[test]
    fn test_missing_manifest_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let rewriter = ManifestRewriter::new(dir.path());

        let err = rewriter.rewrite().unwrap_err();
        assert!(matches!(
            err,
            AppError::Manifest(ManifestError::NotFound { .. })
        ));
        assert!(!rewriter.backup_path().exists());
    }

    #[test]
    fn test_invalid_manifest_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), "{ broken").unwrap();
        let rewriter = ManifestRewriter::new(dir.path());

        let err = rewriter.rewrite().unwrap_err();
        assert!(matches!(
            err,
            AppError::Manifest(ManifestError::ParseError { .. })
        ));
        assert!(!rewriter.backup_path().exists());
        assert_eq!(
            fs::read_to_string(rewriter.manifest_path()).unwrap(),
            "{ broken"
        );
    }

    #[test]
    fn test_read_sections_does_not_modify() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), MANIFEST).unwrap();
        let rewriter = ManifestRewriter::new(dir.path());

        let sections = rewriter.read_sections().unwrap();
        assert_eq!(sections.total(), 2);
        assert!(!rewriter.backup_path().exists());
        assert_eq!(
            fs::read_to_string(rewriter.manifest_path()).unwrap(),
            MANIFEST
        );
    }
}
