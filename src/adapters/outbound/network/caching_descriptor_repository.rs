use crate::dependency_analysis::domain::Coordinate;
use crate::ports::outbound::DescriptorRepository;
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// Wraps a DescriptorRepository with an in-memory cache.
///
/// Parent POMs are shared by many artifacts, so the same coordinate is
/// requested repeatedly while walking parent chains. Misses (`None`) are
/// cached too; errors are not.
pub struct CachingDescriptorRepository<R: DescriptorRepository> {
    inner: R,
    cache: Arc<DashMap<Coordinate, Option<String>>>,
}

impl<R: DescriptorRepository> CachingDescriptorRepository<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    #[cfg(test)]
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl<R: DescriptorRepository> DescriptorRepository for CachingDescriptorRepository<R> {
    async fn fetch_descriptor(&self, coordinate: &Coordinate) -> Result<Option<String>> {
        if let Some(cached) = self.cache.get(coordinate) {
            return Ok(cached.clone());
        }

        let descriptor = self.inner.fetch_descriptor(coordinate).await?;
        self.cache.insert(coordinate.clone(), descriptor.clone());

        Ok(descriptor)
    }
}
