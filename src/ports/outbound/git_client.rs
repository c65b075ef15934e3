use crate::dependency_analysis::services::TagRef;
use crate::shared::Result;
use std::path::Path;

/// GitClient port for the version control operations used when fetching
/// repositories
///
/// Implementations are blocking and are called from worker threads, so
/// they must be `Send + Sync`.
pub trait GitClient: Send + Sync {
    /// Shallow clone (depth 1) of every branch into `destination`.
    fn shallow_clone(&self, url: &str, destination: &Path) -> Result<()>;

    /// Refreshes an existing checkout, including tags.
    fn fetch_tags(&self, repository: &Path) -> Result<()>;

    /// Every tag with the commit date of the commit it points to.
    fn list_tags(&self, repository: &Path) -> Result<Vec<TagRef>>;

    /// Forces the working tree to the given tag.
    fn checkout_tag(&self, repository: &Path, tag: &str) -> Result<()>;
}
