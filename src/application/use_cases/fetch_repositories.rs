use crate::application::dto::{FetchRequest, FetchResponse, FetchTarget};
use crate::dependency_analysis::domain::DependencyForest;
use crate::dependency_analysis::services::{
    collect_latest_versions, repository_name_from_url, select_tag, SelectionFilter,
};
use crate::ports::outbound::{GitClient, ProgressReporter, Workspace};
use crate::shared::error::DepSearchError;
use crate::shared::Result;
use dashmap::DashMap;
use futures::stream::{self, StreamExt};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Clones running at once.
pub const DEFAULT_CLONE_CONCURRENCY: usize = 4;

/// Marks the nodes to fetch and turns them into one target per repository.
///
/// With no patterns every node with a resolved SCM URL is selected;
/// otherwise nodes matching any pattern. When several versions share a
/// repository the highest one is fetched.
pub fn select_fetch_targets(
    forest: &mut DependencyForest,
    filter: &SelectionFilter,
) -> Vec<FetchTarget> {
    if filter.is_empty() {
        forest.select_where(|node| node.has_resolved_scm_url());
    } else {
        forest.select_where(|node| filter.matches(node) && node.has_resolved_scm_url());
    }

    collect_latest_versions(forest.selected_nodes())
        .into_iter()
        .map(|(scm_url, version)| FetchTarget { scm_url, version })
        .collect()
}

/// Records the checked-out tag on every selected node whose repository was
/// fetched.
pub fn annotate_checkouts(forest: &mut DependencyForest, response: &FetchResponse) -> usize {
    forest.annotate_checkout_tags(|node| {
        if !node.is_selected() || !node.has_resolved_scm_url() {
            return None;
        }
        let name = repository_name_from_url(node.scm_url()?);
        response.checkout_tags.get(&name).cloned()
    })
}

/// RepoFetcher - materializes repositories at the tag matching a version
///
/// Each target runs on a blocking worker: an existing checkout is refreshed
/// in place and replaced by a fresh shallow clone when that fails (or when
/// `clean` is requested). The newest tag whose normalized name starts with
/// the version is then checked out. One failing repository never stops the
/// batch.
pub struct RepoFetcher<G, W, P> {
    git: Arc<G>,
    workspace: Arc<W>,
    progress_reporter: P,
    concurrency: usize,
}

impl<G, W, P> RepoFetcher<G, W, P>
where
    G: GitClient + 'static,
    W: Workspace + 'static,
    P: ProgressReporter,
{
    pub fn new(git: Arc<G>, workspace: Arc<W>, progress_reporter: P) -> Self {
        Self {
            git,
            workspace,
            progress_reporter,
            concurrency: DEFAULT_CLONE_CONCURRENCY,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub async fn execute(&self, request: FetchRequest) -> Result<FetchResponse> {
        self.workspace.create_dir_all(&request.repositories_dir)?;

        let targets = self.dedupe_by_name(request.targets);
        let total = targets.len();
        if total == 0 {
            self.progress_reporter
                .report("ℹ️  Nothing to fetch: no selected dependency has an SCM URL");
            return Ok(FetchResponse::default());
        }

        self.progress_reporter.report(&format!(
            "📥 Fetching {} repositories into {}",
            total,
            request.repositories_dir.display()
        ));

        let checkout_tags: Arc<DashMap<String, String>> = Arc::new(DashMap::new());
        let failures: Arc<DashMap<String, String>> = Arc::new(DashMap::new());

        let mut jobs = stream::iter(targets)
            .map(|(name, target)| {
                let git = Arc::clone(&self.git);
                let workspace = Arc::clone(&self.workspace);
                let checkout_tags = Arc::clone(&checkout_tags);
                let failures = Arc::clone(&failures);
                let destination = request.repositories_dir.join(&name);
                let clean = request.clean;

                async move {
                    let worker_name = name.clone();
                    let joined = tokio::task::spawn_blocking(move || {
                        match fetch_repository(&*git, &*workspace, &destination, &target, clean) {
                            Ok(tag) => {
                                checkout_tags.insert(worker_name, tag);
                            }
                            Err(e) => {
                                failures.insert(worker_name, e.to_string());
                            }
                        }
                    })
                    .await;
                    (name, joined)
                }
            })
            .buffer_unordered(self.concurrency);

        let mut done = 0;
        while let Some((name, joined)) = jobs.next().await {
            done += 1;
            if let Err(e) = joined {
                failures.insert(name.clone(), format!("Worker panicked: {}", e));
            }
            self.progress_reporter
                .report_progress(done, total, Some(&name));
        }
        drop(jobs);

        let response = FetchResponse {
            checkout_tags: into_sorted(&checkout_tags),
            failures: into_sorted(&failures),
        };

        for (name, reason) in &response.failures {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: {}: {}",
                name,
                reason.lines().next().unwrap_or_default()
            ));
        }
        self.progress_reporter.report_completion(&format!(
            "✅ Checked out {}/{} repositories",
            response.checkout_tags.len(),
            total
        ));

        Ok(response)
    }

    /// Two SCM URLs can end in the same directory name; the first keeps it.
    fn dedupe_by_name(&self, targets: Vec<FetchTarget>) -> Vec<(String, FetchTarget)> {
        let mut by_name: BTreeMap<String, FetchTarget> = BTreeMap::new();
        for target in targets {
            let name = repository_name_from_url(&target.scm_url);
            if name.is_empty() {
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: Cannot derive a repository name from '{}'",
                    target.scm_url
                ));
                continue;
            }
            if let Some(existing) = by_name.get(&name) {
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: Skipping {} because {} already uses the directory '{}'",
                    target.scm_url, existing.scm_url, name
                ));
                continue;
            }
            by_name.insert(name, target);
        }
        by_name.into_iter().collect()
    }
}

fn into_sorted(map: &DashMap<String, String>) -> BTreeMap<String, String> {
    map.iter()
        .map(|entry| (entry.key().clone(), entry.value().clone()))
        .collect()
}

/// Refresh-or-clone, then check out the matching tag. Returns the tag name.
///
/// An existing checkout is reused unless `clean` is set. Any failure while
/// reusing it other than a missing tag deletes it and falls through to a
/// fresh shallow clone.
fn fetch_repository<G, W>(
    git: &G,
    workspace: &W,
    destination: &Path,
    target: &FetchTarget,
    clean: bool,
) -> Result<String>
where
    G: GitClient + ?Sized,
    W: Workspace + ?Sized,
{
    if workspace.exists(destination) {
        if !clean && workspace.exists(&destination.join(".git")) {
            let reused = git
                .fetch_tags(destination)
                .and_then(|()| checkout_matching_tag(git, destination, target));
            match reused {
                Ok(tag) => return Ok(tag),
                Err(e) if is_tag_not_found(&e) => return Err(e),
                Err(e) => {
                    tracing::debug!(path = %destination.display(), error = %e, "reusing checkout failed, recloning");
                }
            }
        }
        workspace.remove_dir_all(destination)?;
    }

    git.shallow_clone(&target.scm_url, destination)?;
    checkout_matching_tag(git, destination, target)
}

fn checkout_matching_tag<G>(git: &G, destination: &Path, target: &FetchTarget) -> Result<String>
where
    G: GitClient + ?Sized,
{
    let tags = git.list_tags(destination)?;
    let tag = select_tag(&tags, &target.version).ok_or_else(|| DepSearchError::TagNotFound {
        repository: repository_name_from_url(&target.scm_url),
        version: target.version.clone(),
    })?;

    git.checkout_tag(destination, &tag.name)?;
    tracing::debug!(repository = %target.scm_url, tag = %tag.name, "checked out");
    Ok(tag.name.clone())
}

fn is_tag_not_found(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<DepSearchError>(),
        Some(DepSearchError::TagNotFound { .. })
    )
}
