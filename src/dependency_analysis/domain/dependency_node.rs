use super::build_outcome::BuildOutcome;
use super::coordinate::Coordinate;
use serde::Serialize;
use std::hash::{Hash, Hasher};

/// Placeholder stored on a node whose SCM URL could not be resolved.
pub const SCM_URL_NOT_FOUND: &str = "SCM URL not found";

/// A dependency in the loaded tree.
///
/// Identity is the coordinate alone: two nodes with the same
/// `groupId:artifactId:version` are equal and hash identically whatever
/// their children, scope or enrichment state. This lets trees coming from
/// several modules or configurations be deduplicated with plain sets.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyNode {
    #[serde(flatten)]
    coordinate: Coordinate,
    #[serde(skip_serializing_if = "Option::is_none")]
    scm_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    checkout_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    build_with: Option<BuildOutcome>,
    selected: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<DependencyNode>,
}

impl DependencyNode {
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            scm_url: None,
            scope: None,
            checkout_tag: None,
            build_with: None,
            selected: false,
            children: Vec::new(),
        }
    }

    pub fn with_scope(mut self, scope: Option<String>) -> Self {
        self.scope = scope.filter(|s| !s.trim().is_empty());
        self
    }

    pub fn with_scm_url(mut self, scm_url: Option<String>) -> Self {
        self.scm_url = scm_url;
        self
    }

    pub fn with_children(mut self, children: Vec<DependencyNode>) -> Self {
        self.children = children;
        self
    }

    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    pub fn group_id(&self) -> &str {
        self.coordinate.group_id()
    }

    pub fn artifact_id(&self) -> &str {
        self.coordinate.artifact_id()
    }

    pub fn version(&self) -> &str {
        self.coordinate.version()
    }

    pub fn scm_url(&self) -> Option<&str> {
        self.scm_url.as_deref()
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn checkout_tag(&self) -> Option<&str> {
        self.checkout_tag.as_deref()
    }

    pub fn build_with(&self) -> Option<&BuildOutcome> {
        self.build_with.as_ref()
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn children(&self) -> &[DependencyNode] {
        &self.children
    }

    pub fn into_children(self) -> Vec<DependencyNode> {
        self.children
    }

    pub fn push_child(&mut self, child: DependencyNode) {
        self.children.push(child);
    }

    /// True when the node carries a usable SCM URL (not empty, not the sentinel).
    pub fn has_resolved_scm_url(&self) -> bool {
        self.scm_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty() && url != SCM_URL_NOT_FOUND)
    }

    /// Pre-order traversal of this node and all of its descendants.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a DependencyNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    pub(crate) fn walk_mut(&mut self, visit: &mut impl FnMut(&mut DependencyNode)) {
        visit(self);
        for child in &mut self.children {
            child.walk_mut(visit);
        }
    }

    pub(crate) fn set_scm_url(&mut self, scm_url: String) {
        self.scm_url = Some(scm_url);
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub(crate) fn set_checkout_tag(&mut self, tag: String) {
        self.checkout_tag = Some(tag);
    }

    pub(crate) fn set_build_with(&mut self, outcome: BuildOutcome) {
        self.build_with = Some(outcome);
    }
}

impl PartialEq for DependencyNode {
    fn eq(&self, other: &Self) -> bool {
        self.coordinate == other.coordinate
    }
}

impl Eq for DependencyNode {}

impl Hash for DependencyNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.coordinate.hash(state);
    }
}
