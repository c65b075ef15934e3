use dep_searcher::ports::outbound::CycloneDxPlugin;
use dep_searcher::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock GradleInvoker whose builds pass only on `passing_jdks`
#[derive(Default)]
pub struct MockGradleInvoker {
    pub bom: Option<String>,
    pub projects_output: Vec<String>,
    pub dependencies_output: Vec<String>,
    pub passing_jdks: Vec<PathBuf>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockGradleInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dependencies_output(mut self, lines: &[&str]) -> Self {
        self.dependencies_output = lines.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn passing_on(mut self, java_home: &str) -> Self {
        self.passing_jdks.push(PathBuf::from(java_home));
        self
    }

    pub fn recorded_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl GradleInvoker for MockGradleInvoker {
    fn cyclonedx_bom(
        &self,
        _project_dir: &Path,
        plugin: CycloneDxPlugin,
        java_home: &Path,
    ) -> Result<String> {
        self.record(format!("cyclonedx {} {}", plugin, java_home.display()));
        self.bom
            .clone()
            .ok_or_else(|| anyhow::anyhow!("Plugin [id: 'org.cyclonedx.bom'] was not found"))
    }

    fn projects(&self, _project_dir: &Path, _java_home: &Path) -> Result<Vec<String>> {
        Ok(self.projects_output.clone())
    }

    fn dependencies(
        &self,
        _project_dir: &Path,
        _subprojects: &[String],
        java_home: &Path,
    ) -> Result<Vec<String>> {
        self.record(format!("dependencies {}", java_home.display()));
        Ok(self.dependencies_output.clone())
    }

    fn stop_daemon(&self, _project_dir: &Path, java_home: &Path) -> Result<()> {
        self.record(format!("stop {}", java_home.display()));
        Ok(())
    }

    fn build(&self, _project_dir: &Path, java_home: &Path) -> Result<()> {
        self.record(format!("build {}", java_home.display()));
        if self.passing_jdks.iter().any(|home| home == java_home) {
            Ok(())
        } else {
            anyhow::bail!("FAILURE: Build failed with an exception.")
        }
    }
}
