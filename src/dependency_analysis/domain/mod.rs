pub mod build_outcome;
pub mod coordinate;
pub mod dependency_forest;
pub mod dependency_node;
pub mod java_version;
pub mod project_type;
pub mod scope;

pub use build_outcome::BuildOutcome;
pub use coordinate::Coordinate;
pub use dependency_forest::{ChangeListener, DependencyForest, NodeChange};
pub use dependency_node::{DependencyNode, SCM_URL_NOT_FOUND};
pub use java_version::{JavaRequirement, JavaVersion};
pub use project_type::ProjectType;
