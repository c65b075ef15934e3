use crate::dependency_analysis::domain::{BuildOutcome, DependencyForest, ProjectType};
use std::collections::{BTreeMap, BTreeSet};

/// A loaded project: its merged forest plus what was learned on the way.
#[derive(Debug)]
pub struct TreeResponse {
    pub project_name: String,
    pub project_type: ProjectType,
    pub forest: DependencyForest,
    /// Nodes whose SCM URL came from a CycloneDX BOM
    pub scm_from_bom: usize,
    pub scm_resolution: Option<ScmResolutionSummary>,
}

impl TreeResponse {
    pub fn scopes(&self) -> BTreeSet<String> {
        self.forest.scopes()
    }
}

/// Counts over the unique coordinates looked up in the descriptor repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScmResolutionSummary {
    pub looked_up: usize,
    pub resolved: usize,
    pub not_found: usize,
}

/// Per-repository results of a fetch batch, keyed by repository name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchResponse {
    pub checkout_tags: BTreeMap<String, String>,
    pub failures: BTreeMap<String, String>,
}

impl FetchResponse {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Per-repository results of a build batch, keyed by repository name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildResponse {
    pub outcomes: BTreeMap<String, BuildOutcome>,
    pub succeeded: BTreeSet<String>,
    pub failed: BTreeSet<String>,
    /// JDK label of the last build attempt in the batch
    pub last_jdk_used: Option<String>,
}

impl BuildResponse {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}
