use chrono::{TimeZone, Utc};
use dep_searcher::dependency_analysis::services::TagRef;
use dep_searcher::prelude::*;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Mock GitClient serving tag lists per repository directory name
///
/// Tags are `(name, unix timestamp)` pairs. Cloning an unknown URL fails.
#[derive(Default)]
pub struct MockGitClient {
    pub tags: HashMap<String, Vec<(String, i64)>>,
    pub clones: Arc<Mutex<Vec<String>>>,
    pub checkouts: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockGitClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tags(mut self, repository: &str, tags: &[(&str, i64)]) -> Self {
        self.tags.insert(
            repository.to_string(),
            tags.iter().map(|(n, t)| (n.to_string(), *t)).collect(),
        );
        self
    }

    pub fn recorded_clones(&self) -> Vec<String> {
        let mut clones = self.clones.lock().unwrap().clone();
        clones.sort();
        clones
    }
}

fn repository_key(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl GitClient for MockGitClient {
    fn shallow_clone(&self, url: &str, destination: &Path) -> Result<()> {
        self.clones.lock().unwrap().push(url.to_string());
        if !self.tags.contains_key(&repository_key(destination)) {
            anyhow::bail!("fatal: repository '{}' not found", url);
        }
        Ok(())
    }

    fn fetch_tags(&self, _repository: &Path) -> Result<()> {
        Ok(())
    }

    fn list_tags(&self, repository: &Path) -> Result<Vec<TagRef>> {
        let tags = self
            .tags
            .get(&repository_key(repository))
            .cloned()
            .unwrap_or_default();
        Ok(tags
            .into_iter()
            .map(|(name, ts)| TagRef::new(name, Utc.timestamp_opt(ts, 0).unwrap()))
            .collect())
    }

    fn checkout_tag(&self, repository: &Path, tag: &str) -> Result<()> {
        self.checkouts
            .lock()
            .unwrap()
            .push((repository_key(repository), tag.to_string()));
        Ok(())
    }
}
