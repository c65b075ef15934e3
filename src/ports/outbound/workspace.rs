use crate::shared::Result;
use std::path::{Path, PathBuf};

/// Workspace port for the repositories directory
///
/// Implementations are called from worker threads.
pub trait Workspace: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    /// Removes a directory tree, retrying while files are still locked.
    /// A missing directory is not an error.
    fn remove_dir_all(&self, path: &Path) -> Result<()>;

    /// Makes every file under `path` readable, writable and executable.
    fn broaden_permissions(&self, path: &Path) -> Result<()>;

    /// Immediate subdirectories of `root`, sorted by name.
    fn list_repositories(&self, root: &Path) -> Result<Vec<PathBuf>>;

    fn create_dir_all(&self, path: &Path) -> Result<()>;

    fn write_file(&self, path: &Path, content: &str) -> Result<()>;
}
