use async_trait::async_trait;
use dep_searcher::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock DescriptorRepository keyed by `group:artifact:version`
#[derive(Default)]
pub struct MockDescriptorRepository {
    pub descriptors: HashMap<String, String>,
    pub should_fail: bool,
    pub calls: AtomicUsize,
}

impl MockDescriptorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_descriptor(mut self, coordinate: &str, pom: &str) -> Self {
        self.descriptors
            .insert(coordinate.to_string(), pom.to_string());
        self
    }

    pub fn with_scm(self, coordinate: &str, url: &str) -> Self {
        let pom = format!("<project><scm><url>{}</url></scm></project>", url);
        self.with_descriptor(coordinate, &pom)
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DescriptorRepository for MockDescriptorRepository {
    async fn fetch_descriptor(&self, coordinate: &Coordinate) -> Result<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            anyhow::bail!("Mock descriptor repository failure");
        }
        Ok(self.descriptors.get(&coordinate.to_string()).cloned())
    }
}
