//! File system helpers used by the scanner.

use crate::Result;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use walkdir::WalkDir;

/// Size and modification time captured when a document is processed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FileStats {
    pub size: u64,
    /// Seconds since the Unix epoch
    pub modified: f64,
}

/// Read size and modification time of `path`.
pub fn file_stats(path: &Path) -> Result<FileStats> {
    let metadata = std::fs::metadata(path)?;
    let modified = metadata
        .modified()
        .ok()
        .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
        .map(|elapsed| elapsed.as_secs_f64())
        .unwrap_or_default();

    Ok(FileStats {
        size: metadata.len(),
        modified,
    })
}

/// Canonical form of `path`, falling back to the path as given.
pub fn canonical_path(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Create `dir` (and parents) if missing.
pub fn ensure_directory(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        tracing::info!("Creating documents directory: {}", dir.display());
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Every regular file below `root`, sorted by file name within each directory.
///
/// Unreadable entries are logged and skipped.
pub fn walk_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                None
            }
        })
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file())
        .collect()
}
