use dep_searcher::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock MavenInvoker keyed by module directory name
///
/// Builds pass only on the JDK homes listed in `passing_jdks`; every build
/// invocation is recorded as `(goals, java_home)` in `builds`, which stays
/// readable after the mock is moved into a use case.
#[derive(Default)]
pub struct MockMavenInvoker {
    pub trees: HashMap<String, Vec<String>>,
    pub bom: Option<String>,
    pub effective_pom: Option<String>,
    pub passing_jdks: Vec<PathBuf>,
    pub builds: Arc<Mutex<Vec<(String, PathBuf)>>>,
}

impl MockMavenInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tree(mut self, module: &str, lines: Vec<String>) -> Self {
        self.trees.insert(module.to_string(), lines);
        self
    }

    pub fn with_bom(mut self, bom: &str) -> Self {
        self.bom = Some(bom.to_string());
        self
    }

    pub fn with_effective_pom(mut self, pom: &str) -> Self {
        self.effective_pom = Some(pom.to_string());
        self
    }

    pub fn passing_on(mut self, java_home: &str) -> Self {
        self.passing_jdks.push(PathBuf::from(java_home));
        self
    }

    pub fn recorded_builds(&self) -> Vec<(String, PathBuf)> {
        self.builds.lock().unwrap().clone()
    }
}

fn directory_key(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl MavenInvoker for MockMavenInvoker {
    fn dependency_tree(&self, module_dir: &Path, _java_home: Option<&Path>) -> Result<Vec<String>> {
        let key = directory_key(module_dir);
        self.trees
            .get(&key)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("[ERROR] BUILD FAILURE in {}", key))
    }

    fn aggregate_bom(&self, _project_dir: &Path, _java_home: Option<&Path>) -> Result<String> {
        self.bom
            .clone()
            .ok_or_else(|| anyhow::anyhow!("[ERROR] cyclonedx-maven-plugin failed"))
    }

    fn effective_pom(&self, _project_dir: &Path, _java_home: Option<&Path>) -> Result<String> {
        self.effective_pom
            .clone()
            .ok_or_else(|| anyhow::anyhow!("[ERROR] help:effective-pom failed"))
    }

    fn build(&self, _project_dir: &Path, goals: &[&str], java_home: &Path) -> Result<()> {
        self.builds
            .lock()
            .unwrap()
            .push((goals.join(" "), java_home.to_path_buf()));
        if self.passing_jdks.iter().any(|home| home == java_home) {
            Ok(())
        } else {
            anyhow::bail!("[ERROR] BUILD FAILURE")
        }
    }
}
