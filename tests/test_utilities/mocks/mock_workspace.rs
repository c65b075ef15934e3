use dep_searcher::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// In-memory Workspace
///
/// `repositories` is what `list_repositories` returns; written files are
/// kept in `files`.
#[derive(Default)]
pub struct MockWorkspace {
    pub existing: Mutex<Vec<PathBuf>>,
    pub repositories: Vec<PathBuf>,
    pub files: Arc<Mutex<HashMap<PathBuf, String>>>,
    pub broadened: Mutex<Vec<PathBuf>>,
}

impl MockWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repositories(repositories: Vec<PathBuf>) -> Self {
        Self {
            repositories,
            ..Default::default()
        }
    }

    pub fn file(&self, path: &Path) -> Option<String> {
        self.files.lock().unwrap().get(path).cloned()
    }
}

impl Workspace for MockWorkspace {
    fn exists(&self, path: &Path) -> bool {
        self.existing.lock().unwrap().iter().any(|p| p == path)
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        self.existing.lock().unwrap().retain(|p| !p.starts_with(path));
        Ok(())
    }

    fn broaden_permissions(&self, path: &Path) -> Result<()> {
        self.broadened.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    fn list_repositories(&self, _root: &Path) -> Result<Vec<PathBuf>> {
        Ok(self.repositories.clone())
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.existing.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}
