//! dep-searcher - dependency tree inspection for Maven and Gradle projects
//!
//! This library loads the dependency tree of a Maven or Gradle project,
//! resolves the source repository of every dependency, clones those
//! repositories at the tag matching the resolved version and builds them
//! with the right JDK, following hexagonal architecture and Domain-Driven
//! Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`dependency_analysis`): Pure business logic and domain models
//! - **Application Layer** (`application`): Use cases and application services
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use dep_searcher::prelude::*;
//! use std::collections::BTreeMap;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<()> {
//! // Create adapters
//! let homes = JdkHomes::new(BTreeMap::new(), std::env::var_os("JAVA_HOME").map(PathBuf::from));
//! let use_case = LoadDependenciesUseCase::new(
//!     FileSystemReader::new(),
//!     MavenCli::new(SystemCommandRunner::new(), PathBuf::from("/opt/maven")),
//!     GradleCli::new(SystemCommandRunner::new()),
//!     StderrProgressReporter::new(),
//!     JdkSelector::new(homes),
//!     ScmOverrides::default(),
//! );
//!
//! // Load the tree, then fill in missing SCM URLs
//! let mut response = use_case.execute(TreeRequest::new(PathBuf::from("."), true, true))?;
//! let repository = MavenCentralRepository::new(
//!     DEFAULT_MAVEN_CENTRAL_URL.to_string(),
//!     MavenCentralRepository::default_local_repository(),
//!     std::time::Duration::from_secs(3),
//! )?;
//! let resolver = ScmResolver::new(
//!     CachingDescriptorRepository::new(repository),
//!     StderrProgressReporter::new(),
//!     ScmOverrides::default(),
//! );
//! response.scm_resolution = Some(resolver.resolve(&mut response.forest).await);
//!
//! // Format output
//! let output = TextFormatter::new().format_tree(&response)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod dependency_analysis;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, LocalWorkspace, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, TextFormatter};
    pub use crate::adapters::outbound::network::{
        CachingDescriptorRepository, MavenCentralRepository, DEFAULT_MAVEN_CENTRAL_URL,
    };
    pub use crate::adapters::outbound::process::{GitCli, GradleCli, MavenCli, SystemCommandRunner};
    pub use crate::application::dto::{
        BuildRequest, BuildResponse, FetchRequest, FetchResponse, OutputFormat, TreeRequest,
        TreeResponse,
    };
    pub use crate::application::use_cases::{
        BuildOrchestrator, LoadDependenciesUseCase, RepoFetcher, ScmResolver,
    };
    pub use crate::dependency_analysis::domain::{
        BuildOutcome, Coordinate, DependencyForest, DependencyNode, JavaVersion, ProjectType,
    };
    pub use crate::dependency_analysis::policies::ScmOverrides;
    pub use crate::dependency_analysis::services::{JdkHomes, JdkSelector, SelectionFilter};
    pub use crate::ports::outbound::{
        DescriptorRepository, GitClient, GradleInvoker, MavenInvoker, OutputPresenter,
        ProgressReporter, ProjectReader, ReportFormatter, Workspace,
    };
    pub use crate::shared::Result;
}
