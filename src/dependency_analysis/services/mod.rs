pub mod bom_parser;
mod dependency_tree_builder;
pub mod gradle_tree_parser;
mod jdk_selector;
pub mod maven_output_parser;
mod pom_descriptor;
pub mod scm_url;
mod selection_filter;
pub mod tag_matcher;
pub mod toolchains;
mod version_comparator;
mod xml;

pub use dependency_tree_builder::DependencyTreeBuilder;
pub use gradle_tree_parser::GradleSection;
pub use jdk_selector::{JdkCandidate, JdkHomes, JdkPlan, JdkSelector, AMBIENT_JAVA_HOME};
pub use pom_descriptor::{detect_java_requirement, PomDescriptor, ScmSection};
pub use scm_url::{convert_scm, repository_name_from_url};
pub use selection_filter::SelectionFilter;
pub use tag_matcher::{select_tag, TagRef};
pub use version_comparator::{collect_latest_versions, compare_versions};
