use std::path::PathBuf;

/// Request to load, merge and optionally enrich a project's dependency tree.
#[derive(Debug, Clone)]
pub struct TreeRequest {
    /// Directory containing `pom.xml` or a Gradle build file
    pub project_path: PathBuf,
    /// Try the CycloneDX plugins before falling back to tree output parsing
    pub use_cyclonedx: bool,
    /// Resolve missing SCM URLs through the descriptor repository
    pub resolve_scm: bool,
}

impl TreeRequest {
    pub fn new(project_path: PathBuf, use_cyclonedx: bool, resolve_scm: bool) -> Self {
        Self {
            project_path,
            use_cyclonedx,
            resolve_scm,
        }
    }
}

/// One repository to materialize: where it lives and which version to check out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTarget {
    pub scm_url: String,
    pub version: String,
}

/// Request to clone or refresh repositories and check out matching tags.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub targets: Vec<FetchTarget>,
    pub repositories_dir: PathBuf,
    /// Delete existing checkouts instead of refreshing them
    pub clean: bool,
}

impl FetchRequest {
    pub fn new(targets: Vec<FetchTarget>, repositories_dir: PathBuf, clean: bool) -> Self {
        Self {
            targets,
            repositories_dir,
            clean,
        }
    }
}

/// Request to build every repository under a directory.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub repositories_dir: PathBuf,
}

impl BuildRequest {
    pub fn new(repositories_dir: PathBuf) -> Self {
        Self { repositories_dir }
    }
}
