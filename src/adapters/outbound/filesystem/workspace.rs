use crate::ports::outbound::Workspace;
use crate::shared::error::DepSearchError;
use crate::shared::security::validate_not_symlink;
use crate::shared::Result;
use anyhow::Context;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use walkdir::WalkDir;

const MAX_DELETE_ATTEMPTS: u32 = 5;
const DELETE_RETRY_DELAY_MS: u64 = 100;

/// Workspace adapter over the local file system.
///
/// Deletion walks the tree bottom-up and retries each entry, clearing
/// read-only bits first; git pack files and build outputs are often
/// read-only or briefly locked by a daemon that is shutting down.
#[derive(Debug, Default, Clone)]
pub struct LocalWorkspace;

impl LocalWorkspace {
    pub fn new() -> Self {
        Self
    }
}

impl Workspace for LocalWorkspace {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        if fs::symlink_metadata(path).is_err() {
            return Ok(());
        }
        validate_not_symlink(path, "delete")?;

        for entry in WalkDir::new(path).contents_first(true) {
            let entry = entry.with_context(|| format!("Failed to walk {}", path.display()))?;
            remove_with_retry(entry.path(), entry.file_type().is_dir())?;
        }
        tracing::debug!(path = %path.display(), "removed directory");
        Ok(())
    }

    fn broaden_permissions(&self, path: &Path) -> Result<()> {
        for entry in WalkDir::new(path) {
            let entry = entry.with_context(|| format!("Failed to walk {}", path.display()))?;
            if entry.path_is_symlink() {
                continue;
            }
            make_accessible(entry.path()).with_context(|| {
                format!("Failed to change permissions of {}", entry.path().display())
            })?;
        }
        Ok(())
    }

    fn list_repositories(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(root).map_err(|e| DepSearchError::FileReadError {
            path: root.to_path_buf(),
            details: e.to_string(),
        })?;

        let mut repositories = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                repositories.push(entry.path());
            }
        }
        repositories.sort();
        Ok(repositories)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).map_err(|e| {
            DepSearchError::FileWriteError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content).map_err(|e| {
            DepSearchError::FileWriteError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

fn remove_with_retry(path: &Path, is_dir: bool) -> Result<()> {
    let mut last_error = None;
    for attempt in 1..=MAX_DELETE_ATTEMPTS {
        let result = if is_dir {
            fs::remove_dir(path)
        } else {
            fs::remove_file(path)
        };
        match result {
            Ok(()) => return Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                tracing::debug!(path = %path.display(), attempt, error = %e, "delete failed");
                // removing an entry needs write access on its parent directory
                if let Some(parent) = path.parent() {
                    let _ = make_accessible(parent);
                }
                let _ = make_accessible(path);
                last_error = Some(e);
                if attempt < MAX_DELETE_ATTEMPTS {
                    thread::sleep(Duration::from_millis(DELETE_RETRY_DELAY_MS));
                }
            }
        }
    }

    Err(anyhow::anyhow!(
        "Failed to delete {} after {} attempts: {}",
        path.display(),
        MAX_DELETE_ATTEMPTS,
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

#[cfg(unix)]
fn make_accessible(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o777))
}

#[cfg(not(unix))]
fn make_accessible(path: &Path) -> io::Result<()> {
    let mut permissions = fs::metadata(path)?.permissions();
    #[allow(clippy::permissions_set_readonly_false)]
    permissions.set_readonly(false);
    fs::set_permissions(path, permissions)
}
