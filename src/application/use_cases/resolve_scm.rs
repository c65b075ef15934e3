use crate::application::dto::ScmResolutionSummary;
use crate::dependency_analysis::domain::{Coordinate, DependencyForest};
use crate::dependency_analysis::policies::ScmOverrides;
use crate::dependency_analysis::services::{convert_scm, PomDescriptor};
use crate::ports::outbound::{DescriptorRepository, ProgressReporter};
use futures::stream::{self, StreamExt};
use std::collections::HashMap;

/// Parent POMs followed past the artifact's own descriptor.
pub const MAX_PARENT_DEPTH: usize = 3;

/// Descriptor lookups in flight at once.
pub const DEFAULT_RESOLVE_CONCURRENCY: usize = 10;

/// ScmResolver - fills in SCM URLs the build tools did not provide
///
/// Every distinct coordinate lacking a URL is looked up once, concurrently.
/// A descriptor without a usable `<scm>` section (or forge homepage) defers
/// to its parent, up to [`MAX_PARENT_DEPTH`] levels. Lookup and parse
/// failures count as "not found". Results are written back to the forest in
/// one pass and every node still without a URL gets the not-found sentinel.
pub struct ScmResolver<D, P> {
    repository: D,
    progress_reporter: P,
    overrides: ScmOverrides,
    concurrency: usize,
}

impl<D, P> ScmResolver<D, P>
where
    D: DescriptorRepository,
    P: ProgressReporter,
{
    pub fn new(repository: D, progress_reporter: P, overrides: ScmOverrides) -> Self {
        Self {
            repository,
            progress_reporter,
            overrides,
            concurrency: DEFAULT_RESOLVE_CONCURRENCY,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub async fn resolve(&self, forest: &mut DependencyForest) -> ScmResolutionSummary {
        let pending = forest.coordinates_needing_scm();
        let total = pending.len();
        if total == 0 {
            forest.mark_unresolved();
            return ScmResolutionSummary::default();
        }

        self.progress_reporter.report(&format!(
            "🔍 Resolving SCM URLs for {} artifact(s)...",
            total
        ));

        let mut lookups = stream::iter(pending)
            .map(|coordinate| async move {
                let url = self.resolve_coordinate(&coordinate).await;
                (coordinate, url)
            })
            .buffer_unordered(self.concurrency);

        let mut urls: HashMap<Coordinate, String> = HashMap::new();
        let mut done = 0;
        while let Some((coordinate, url)) = lookups.next().await {
            done += 1;
            self.progress_reporter
                .report_progress(done, total, Some(coordinate.artifact_id()));
            if let Some(url) = url {
                urls.insert(coordinate, url);
            }
        }

        let summary = ScmResolutionSummary {
            looked_up: total,
            resolved: urls.len(),
            not_found: total - urls.len(),
        };

        forest.apply_scm_urls(&urls);
        forest.mark_unresolved();

        self.progress_reporter.report(&format!(
            "✅ Resolved {}/{} SCM URL(s)",
            summary.resolved, summary.looked_up
        ));
        summary
    }

    async fn resolve_coordinate(&self, coordinate: &Coordinate) -> Option<String> {
        let found = self.walk_descriptors(coordinate).await;
        self.overrides.apply(coordinate.artifact_id(), found)
    }

    async fn walk_descriptors(&self, coordinate: &Coordinate) -> Option<String> {
        let mut current = coordinate.clone();

        for depth in 0..=MAX_PARENT_DEPTH {
            let content = match self.repository.fetch_descriptor(&current).await {
                Ok(Some(content)) => content,
                Ok(None) => {
                    tracing::debug!(%coordinate, %current, depth, "descriptor not found");
                    return None;
                }
                Err(e) => {
                    tracing::debug!(%coordinate, %current, depth, error = %e, "descriptor lookup failed");
                    return None;
                }
            };

            let descriptor = match PomDescriptor::parse(&content) {
                Ok(descriptor) => descriptor,
                Err(e) => {
                    tracing::debug!(%coordinate, %current, error = %e, "unparseable descriptor");
                    return None;
                }
            };

            if let Some(raw) = descriptor
                .scm_candidate()
                .or_else(|| descriptor.forge_homepage())
            {
                return Some(convert_scm(raw));
            }

            match descriptor.parent {
                Some(parent) => current = parent,
                None => return None,
            }
        }

        None
    }
}
