//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ManifestError: Issues reading, parsing or writing package.json
//! - BackupError: Issues creating package.json.old
//! - CacheError: Issues deleting node_modules
//! - InstallError: Issues with a single install command (never fatal)

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type for fatal failures
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Backup related errors
    #[error(transparent)]
    Backup(#[from] BackupError),

    /// Dependency cache related errors
    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("manifest file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Content is not a valid package.json
    #[error("failed to parse JSON in {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    /// Failed to serialize the rewritten manifest
    #[error("failed to serialize manifest {path}: {message}")]
    SerializeError { path: PathBuf, message: String },

    /// Failed to write manifest file
    #[error("failed to write manifest file {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to backing up the original manifest
#[derive(Error, Debug)]
pub enum BackupError {
    /// The backup file is already present and must not be overwritten
    #[error("backup file already exists: {path} (move it away and try again)")]
    AlreadyExists { path: PathBuf },

    /// Renaming the manifest to its backup name failed
    #[error("failed to rename {from} to {to}: {source}")]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to the dependency cache directory
#[derive(Error, Debug)]
pub enum CacheError {
    /// Recursive deletion failed
    #[error("failed to delete {path}: {source}")]
    DeletionFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to a single install command
#[derive(Error, Debug)]
pub enum InstallError {
    /// The package manager could not be launched
    #[error("failed to run `{command}`: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The package manager exited unsuccessfully
    #[error("`{command}` exited with {}", exit_description(.code))]
    ExitNonZero { command: String, code: Option<i32> },
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new ParseError
    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::ParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new SerializeError
    pub fn serialize_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::SerializeError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::WriteError {
            path: path.into(),
            source,
        }
    }
}

impl BackupError {
    /// Creates a new AlreadyExists error
    pub fn already_exists(path: impl Into<PathBuf>) -> Self {
        BackupError::AlreadyExists { path: path.into() }
    }

    /// Creates a new RenameFailed error
    pub fn rename_failed(
        from: impl Into<PathBuf>,
        to: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        BackupError::RenameFailed {
            from: from.into(),
            to: to.into(),
            source,
        }
    }
}

impl CacheError {
    /// Creates a new DeletionFailed error
    pub fn deletion_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CacheError::DeletionFailed {
            path: path.into(),
            source,
        }
    }
}

impl InstallError {
    /// Creates a new SpawnFailed error
    pub fn spawn_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        InstallError::SpawnFailed {
            command: command.into(),
            source,
        }
    }

    /// Creates a new ExitNonZero error
    pub fn exit_non_zero(command: impl Into<String>, code: Option<i32>) -> Self {
        InstallError::ExitNonZero {
            command: command.into(),
            code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_manifest_error_not_found() {
        let err = ManifestError::not_found("/path/to/package.json");
        let msg = format!("{}", err);
        assert!(msg.contains("manifest file not found"));
        assert!(msg.contains("package.json"));
    }

    #[test]
    fn test_manifest_error_parse() {
        let err = ManifestError::parse_error("/path/to/package.json", "unexpected token");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to parse JSON"));
        assert!(msg.contains("unexpected token"));
    }

    #[test]
    fn test_manifest_error_serialize() {
        let err = ManifestError::serialize_error("/path/to/package.json", "key must be a string");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to serialize manifest"));
        assert!(msg.contains("key must be a string"));
    }

    #[test]
    fn test_manifest_error_write() {
        let err = ManifestError::write_error(
            "/path/to/package.json",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = format!("{}", err);
        assert!(msg.contains("failed to write manifest file"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_backup_error_already_exists() {
        let err = BackupError::already_exists("/project/package.json.old");
        let msg = format!("{}", err);
        assert!(msg.contains("backup file already exists"));
        assert!(msg.contains("package.json.old"));
    }

    #[test]
    fn test_backup_error_rename_failed() {
        let err = BackupError::rename_failed(
            "/p/package.json",
            "/p/package.json.old",
            io::Error::new(io::ErrorKind::Other, "busy"),
        );
        let msg = format!("{}", err);
        assert!(msg.contains("failed to rename"));
        assert!(msg.contains("busy"));
    }

    #[test]
    fn test_cache_error_deletion_failed() {
        let err = CacheError::deletion_failed(
            "/p/node_modules",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = format!("{}", err);
        assert!(msg.contains("failed to delete"));
        assert!(msg.contains("node_modules"));
    }

    #[test]
    fn test_install_error_spawn_failed() {
        let err = InstallError::spawn_failed(
            "npm install --save left-pad",
            io::Error::new(io::ErrorKind::NotFound, "program not found"),
        );
        let msg = format!("{}", err);
        assert!(msg.contains("failed to run `npm install --save left-pad`"));
        assert!(msg.contains("program not found"));
    }

    #[test]
    fn test_install_error_exit_non_zero() {
        let err = InstallError::exit_non_zero("npm install --save-dev mocha", Some(1));
        assert_eq!(
            err.to_string(),
            "`npm install --save-dev mocha` exited with status 1"
        );

        let err = InstallError::exit_non_zero("npm install", None);
        assert!(err.to_string().contains("terminated by signal"));
    }

    #[test]
    fn test_app_error_from_manifest_error() {
        let app_err: AppError = ManifestError::not_found("/path").into();
        assert!(app_err.to_string().contains("manifest file not found"));
    }

    #[test]
    fn test_app_error_from_backup_error() {
        let app_err: AppError = BackupError::already_exists("/p/package.json.old").into();
        assert!(app_err.to_string().contains("backup file already exists"));
    }

    #[test]
    fn test_app_error_from_cache_error() {
        let app_err: AppError =
            CacheError::deletion_failed("/p/node_modules", io::Error::other("in use")).into();
        assert!(app_err.to_string().contains("in use"));
    }

    #[test]
    fn test_error_debug_trait() {
        let err = ManifestError::not_found("/test");
        let debug = format!("{:?}", err);
        assert!(debug.contains("NotFound"));
    }
}
