//! Removal of the local dependency cache (node_modules)
//!
//! Deletion is an idempotent ensure-absent operation done in-process;
//! no shell is involved.

use crate::error::CacheError;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

/// Name of the dependency cache directory
pub const CACHE_DIR: &str = "node_modules";

/// What purging found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurgeOutcome {
    /// The cache existed and was removed
    Removed,
    /// There was nothing to remove
    Absent,
}

/// Function that clears the cache of a project directory
pub type CachePurger = fn(&Path) -> Result<PurgeOutcome, CacheError>;

/// Path of the cache directory inside a project
pub fn cache_path(project_dir: &Path) -> PathBuf {
    project_dir.join(CACHE_DIR)
}

/// Recursively delete node_modules in `project_dir` if present
pub fn purge_cache(project_dir: &Path) -> Result<PurgeOutcome, CacheError> {
    let path = cache_path(project_dir);

    let metadata = match fs::symlink_metadata(&path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(PurgeOutcome::Absent),
        Err(e) => return Err(CacheError::deletion_failed(path, e)),
    };

    // A symlinked node_modules is unlinked, its target is left alone
    let file_type = metadata.file_type();
    let removed = if file_type.is_symlink() {
        remove_link(&path, file_type)
    } else if file_type.is_dir() {
        fs::remove_dir_all(&path)
    } else {
        fs::remove_file(&path)
    };

    match removed {
        Ok(()) => Ok(PurgeOutcome::Removed),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(PurgeOutcome::Absent),
        Err(e) => Err(CacheError::deletion_failed(path, e)),
    }
}

/// Windows stores directory links as directories, so they need `remove_dir`
#[cfg(windows)]
fn remove_link(path: &Path, file_type: fs::FileType) -> io::Result<()> {
    use std::os::windows::fs::FileTypeExt;

    if file_type.is_symlink_dir() {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    }
}

#[cfg(not(windows))]
fn remove_link(path: &Path, _file_type: fs::FileType) -> io::Result<()> {
    fs::remove_file(path)
}
