/// Use cases module containing application business logic orchestration
mod build_repositories;
mod fetch_repositories;
mod load_dependencies;
mod resolve_scm;

pub use build_repositories::{BuildOrchestrator, BuildSession, BuildState, BuildTool};
pub use fetch_repositories::{
    annotate_checkouts, select_fetch_targets, RepoFetcher, DEFAULT_CLONE_CONCURRENCY,
};
pub use load_dependencies::LoadDependenciesUseCase;
pub use resolve_scm::{ScmResolver, DEFAULT_RESOLVE_CONCURRENCY, MAX_PARENT_DEPTH};
