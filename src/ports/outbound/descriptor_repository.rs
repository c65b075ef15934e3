use crate::dependency_analysis::domain::Coordinate;
use crate::shared::Result;
use async_trait::async_trait;

/// DescriptorRepository port for fetching artifact descriptors (POMs)
///
/// # Async Support
/// Lookups run concurrently during SCM resolution, so implementations must
/// be `Send + Sync`.
#[async_trait]
pub trait DescriptorRepository: Send + Sync {
    /// Fetches the POM for a coordinate
    ///
    /// # Returns
    /// `Ok(None)` when the registry has no descriptor for the coordinate
    ///
    /// # Errors
    /// Returns an error on network failures, timeouts or unexpected status
    /// codes
    async fn fetch_descriptor(&self, coordinate: &Coordinate) -> Result<Option<String>>;
}
