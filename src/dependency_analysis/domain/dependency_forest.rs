use super::build_outcome::BuildOutcome;
use super::coordinate::Coordinate;
use super::dependency_node::{DependencyNode, SCM_URL_NOT_FOUND};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

/// A mutation applied to a node through [`DependencyForest`].
#[derive(Debug, Clone, PartialEq)]
pub enum NodeChange {
    ScmUrl {
        coordinate: Coordinate,
        scm_url: String,
    },
    Selected {
        coordinate: Coordinate,
        selected: bool,
    },
    CheckoutTag {
        coordinate: Coordinate,
        tag: String,
    },
    BuildWith {
        coordinate: Coordinate,
        outcome: BuildOutcome,
    },
}

pub type ChangeListener = Box<dyn Fn(&NodeChange) + Send + Sync>;

/// The loaded, deduplicated set of top-level dependency trees.
///
/// A forest is rebuilt from scratch on every project load. All enrichment
/// after loading goes through the forest so subscribers see every change.
/// A coordinate that occurs in several subtrees is updated everywhere and
/// reported once per occurrence.
#[derive(Default)]
pub struct DependencyForest {
    roots: Vec<DependencyNode>,
    listeners: Vec<ChangeListener>,
}

impl DependencyForest {
    pub fn new(roots: Vec<DependencyNode>) -> Self {
        Self {
            roots,
            listeners: Vec::new(),
        }
    }

    pub fn roots(&self) -> &[DependencyNode] {
        &self.roots
    }

    pub fn into_roots(self) -> Vec<DependencyNode> {
        self.roots
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Registers a callback invoked after every node mutation.
    pub fn subscribe(&mut self, listener: impl Fn(&NodeChange) + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Pre-order traversal over every node of every tree.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a DependencyNode)) {
        for root in &self.roots {
            root.walk(visit);
        }
    }

    /// Total number of node occurrences, duplicates included.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_| count += 1);
        count
    }

    pub fn find(&self, coordinate: &Coordinate) -> Option<&DependencyNode> {
        let mut found = None;
        self.walk(&mut |node| {
            if found.is_none() && node.coordinate() == coordinate {
                found = Some(node);
            }
        });
        found
    }

    /// Distinct coordinates in pre-order, filtered by `predicate`.
    pub fn unique_coordinates(&self, predicate: impl Fn(&DependencyNode) -> bool) -> Vec<Coordinate> {
        let mut seen = HashSet::new();
        let mut coordinates = Vec::new();
        self.walk(&mut |node| {
            if predicate(node) && seen.insert(node.coordinate().clone()) {
                coordinates.push(node.coordinate().clone());
            }
        });
        coordinates
    }

    pub fn coordinates_needing_scm(&self) -> Vec<Coordinate> {
        self.unique_coordinates(|node| !node.has_resolved_scm_url())
    }

    /// Sets the SCM URL of every unresolved node found in `urls`.
    /// Nodes that already carry a usable URL keep it.
    pub fn apply_scm_urls(&mut self, urls: &HashMap<Coordinate, String>) -> usize {
        self.mutate(|node| {
            if node.has_resolved_scm_url() {
                return None;
            }
            let url = urls.get(node.coordinate())?;
            node.set_scm_url(url.clone());
            Some(NodeChange::ScmUrl {
                coordinate: node.coordinate().clone(),
                scm_url: url.clone(),
            })
        })
    }

    /// Marks every node still lacking an SCM URL with the not-found sentinel.
    pub fn mark_unresolved(&mut self) -> usize {
        self.mutate(|node| {
            if node.has_resolved_scm_url() || node.scm_url() == Some(SCM_URL_NOT_FOUND) {
                return None;
            }
            node.set_scm_url(SCM_URL_NOT_FOUND.to_string());
            Some(NodeChange::ScmUrl {
                coordinate: node.coordinate().clone(),
                scm_url: SCM_URL_NOT_FOUND.to_string(),
            })
        })
    }

    /// Sets `selected` on every node for which `predicate` holds and clears
    /// it everywhere else. Returns the number of selected occurrences.
    pub fn select_where(&mut self, predicate: impl Fn(&DependencyNode) -> bool) -> usize {
        let mut selected = 0;
        self.mutate(|node| {
            let wanted = predicate(node);
            if wanted {
                selected += 1;
            }
            if node.is_selected() == wanted {
                return None;
            }
            node.set_selected(wanted);
            Some(NodeChange::Selected {
                coordinate: node.coordinate().clone(),
                selected: wanted,
            })
        });
        selected
    }

    pub fn set_selected(&mut self, coordinate: &Coordinate, selected: bool) -> usize {
        self.mutate(|node| {
            if node.coordinate() != coordinate || node.is_selected() == selected {
                return None;
            }
            node.set_selected(selected);
            Some(NodeChange::Selected {
                coordinate: coordinate.clone(),
                selected,
            })
        })
    }

    /// Selected nodes, one per coordinate, in pre-order.
    pub fn selected_nodes(&self) -> Vec<&DependencyNode> {
        let mut seen = HashSet::new();
        let mut nodes = Vec::new();
        self.walk(&mut |node| {
            if node.is_selected() && seen.insert(node.coordinate()) {
                nodes.push(node);
            }
        });
        nodes
    }

    pub fn annotate_checkout_tags(
        &mut self,
        tag_for: impl Fn(&DependencyNode) -> Option<String>,
    ) -> usize {
        self.mutate(|node| {
            let tag = tag_for(node)?;
            node.set_checkout_tag(tag.clone());
            Some(NodeChange::CheckoutTag {
                coordinate: node.coordinate().clone(),
                tag,
            })
        })
    }

    pub fn annotate_build_outcomes(
        &mut self,
        outcome_for: impl Fn(&DependencyNode) -> Option<BuildOutcome>,
    ) -> usize {
        self.mutate(|node| {
            let outcome = outcome_for(node)?;
            node.set_build_with(outcome.clone());
            Some(NodeChange::BuildWith {
                coordinate: node.coordinate().clone(),
                outcome,
            })
        })
    }

    /// Scope labels present anywhere in the forest, for filtering.
    pub fn scopes(&self) -> BTreeSet<String> {
        let mut scopes = BTreeSet::new();
        self.walk(&mut |node| {
            if let Some(scope) = node.scope() {
                scopes.insert(scope.to_string());
            }
        });
        scopes
    }

    fn mutate(&mut self, mut apply: impl FnMut(&mut DependencyNode) -> Option<NodeChange>) -> usize {
        let mut changes = Vec::new();
        for root in &mut self.roots {
            root.walk_mut(&mut |node| {
                if let Some(change) = apply(node) {
                    changes.push(change);
                }
            });
        }
        for change in &changes {
            for listener in &self.listeners {
                listener(change);
            }
        }
        changes.len()
    }
}

impl fmt::Debug for DependencyForest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencyForest")
            .field("roots", &self.roots)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
