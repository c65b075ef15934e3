//! Merging of per-module and per-configuration trees into one forest.

use crate::dependency_analysis::domain::{Coordinate, DependencyForest, DependencyNode};
use crate::dependency_analysis::services::gradle_tree_parser::GradleSection;
use crate::shared::error::DepSearchError;
use crate::shared::Result;
use std::collections::HashSet;

/// Accumulates top-level dependencies from several partial trees.
///
/// The first node seen for a coordinate wins; later duplicates are dropped
/// together with their subtrees. Nodes whose artifactId names a module of
/// the project being loaded are removed when the forest is built, so a
/// module never shows up as a dependency of its siblings.
#[derive(Debug, Default)]
pub struct DependencyTreeBuilder {
    roots: Vec<DependencyNode>,
    seen: HashSet<Coordinate>,
    module_names: HashSet<String>,
}

impl DependencyTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers names (module directories, subproject names) that must not
    /// appear as top-level dependencies.
    pub fn with_module_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.module_names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Adds the direct children of a Maven module root. The root's own
    /// artifactId is recorded as a module name.
    pub fn add_module_tree(&mut self, module_root: DependencyNode) {
        self.module_names
            .insert(module_root.artifact_id().to_string());
        for child in module_root.into_children() {
            self.add_root(child);
        }
    }

    /// Adds every root of a Gradle configuration section, in order.
    pub fn add_gradle_section(&mut self, section: GradleSection) {
        self.add_roots(section.roots);
    }

    pub fn add_roots(&mut self, roots: impl IntoIterator<Item = DependencyNode>) {
        for root in roots {
            self.add_root(root);
        }
    }

    /// Returns false when the coordinate was already present.
    pub fn add_root(&mut self, node: DependencyNode) -> bool {
        if !self.seen.insert(node.coordinate().clone()) {
            return false;
        }
        self.roots.push(node);
        true
    }

    pub fn module_names(&self) -> &HashSet<String> {
        &self.module_names
    }

    /// Produces the merged forest, failing when nothing is left after
    /// module filtering.
    pub fn build(self, project: &str) -> Result<DependencyForest> {
        let module_names = self.module_names;
        let roots: Vec<DependencyNode> = self
            .roots
            .into_iter()
            .filter(|node| !module_names.contains(node.artifact_id()))
            .collect();

        if roots.is_empty() {
            return Err(DepSearchError::NoDependenciesFound {
                project: project.to_string(),
                hint: "Check that the project builds and that its dependencies can be resolved"
                    .to_string(),
            }
            .into());
        }

        Ok(DependencyForest::new(roots))
    }
}
