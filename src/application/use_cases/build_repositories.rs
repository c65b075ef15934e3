use crate::application::dto::{BuildRequest, BuildResponse};
use crate::application::use_cases::load_dependencies::no_jdk_error;
use crate::dependency_analysis::domain::{BuildOutcome, JavaRequirement};
use crate::dependency_analysis::policies::{java_requirement_for_gradle, GradleVersion};
use crate::dependency_analysis::services::toolchains::{render_toolchains, TOOLCHAINS_FILE_NAME};
use crate::dependency_analysis::services::{
    detect_java_requirement, JdkCandidate, JdkPlan, JdkSelector,
};
use crate::ports::outbound::{
    GradleInvoker, MavenInvoker, ProgressReporter, ProjectReader, Workspace,
};
use crate::shared::Result;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

const MAVEN_FULL_BUILD: [&str; 2] = ["clean", "package"];
const MAVEN_RETRY_BUILD: [&str; 1] = ["package"];

/// Build system of a checked-out repository. Gradle build files win over
/// a `pom.xml`, since many Gradle projects keep a POM for publishing only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildTool {
    Maven,
    Gradle,
}

impl BuildTool {
    pub fn detect(repository: &Path) -> Option<Self> {
        if ["build.gradle", "build.gradle.kts"]
            .iter()
            .any(|file| repository.join(file).is_file())
        {
            Some(BuildTool::Gradle)
        } else if repository.join("pom.xml").is_file() {
            Some(BuildTool::Maven)
        } else {
            None
        }
    }
}

/// Where one repository's build currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildState {
    NotStarted,
    TryingDetectedJdk,
    /// Trying `plan.fallbacks[index]`
    TryingFallbackJdk { index: usize },
    Succeeded { jdk: String },
    Failed,
}

impl BuildState {
    /// The state that follows `self`; `attempt` runs one build and reports
    /// whether it passed.
    fn advance(self, plan: &JdkPlan, mut attempt: impl FnMut(&JdkCandidate) -> bool) -> Self {
        match self {
            BuildState::NotStarted => match plan.detected {
                Some(_) => BuildState::TryingDetectedJdk,
                None => BuildState::TryingFallbackJdk { index: 0 },
            },
            BuildState::TryingDetectedJdk => match plan.detected.as_ref() {
                Some(candidate) if attempt(candidate) => BuildState::Succeeded {
                    jdk: candidate.label.clone(),
                },
                _ => BuildState::TryingFallbackJdk { index: 0 },
            },
            BuildState::TryingFallbackJdk { index } => match plan.fallbacks.get(index) {
                Some(candidate) if attempt(candidate) => BuildState::Succeeded {
                    jdk: candidate.label.clone(),
                },
                Some(_) => BuildState::TryingFallbackJdk { index: index + 1 },
                None => BuildState::Failed,
            },
            terminal => terminal,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BuildState::Succeeded { .. } | BuildState::Failed)
    }
}

/// State carried across the repositories of one build batch.
#[derive(Debug, Default)]
pub struct BuildSession {
    last_jdk_used: Option<String>,
    pub outcomes: BTreeMap<String, BuildOutcome>,
    pub succeeded: BTreeSet<String>,
    pub failed: BTreeSet<String>,
}

impl BuildSession {
    fn record(&mut self, repository: String, outcome: BuildOutcome) {
        if outcome.is_success() {
            self.succeeded.insert(repository.clone());
        } else {
            self.failed.insert(repository.clone());
        }
        self.outcomes.insert(repository, outcome);
    }

    fn to_response(&self) -> BuildResponse {
        BuildResponse {
            outcomes: self.outcomes.clone(),
            succeeded: self.succeeded.clone(),
            failed: self.failed.clone(),
            last_jdk_used: self.last_jdk_used.clone(),
        }
    }
}

/// BuildOrchestrator - builds every checked-out repository, one at a time
///
/// Each repository starts on the JDK detected from its build configuration
/// and walks the remaining JDKs until a build passes. A failed Maven build
/// is retried once on the same JDK after loosening file permissions.
///
/// # Type Parameters
/// * `PRJ` - ProjectReader implementation
/// * `M` - MavenInvoker implementation
/// * `G` - GradleInvoker implementation
/// * `W` - Workspace implementation
/// * `P` - ProgressReporter implementation
pub struct BuildOrchestrator<PRJ, M, G, W, P> {
    project_reader: PRJ,
    maven: M,
    gradle: G,
    workspace: W,
    progress_reporter: P,
    jdk_selector: JdkSelector,
    session: BuildSession,
}

impl<PRJ, M, G, W, P> BuildOrchestrator<PRJ, M, G, W, P>
where
    PRJ: ProjectReader,
    M: MavenInvoker,
    G: GradleInvoker,
    W: Workspace,
    P: ProgressReporter,
{
    pub fn new(
        project_reader: PRJ,
        maven: M,
        gradle: G,
        workspace: W,
        progress_reporter: P,
        jdk_selector: JdkSelector,
    ) -> Self {
        Self {
            project_reader,
            maven,
            gradle,
            workspace,
            progress_reporter,
            jdk_selector,
            session: BuildSession::default(),
        }
    }

    pub fn execute(&mut self, request: BuildRequest) -> Result<BuildResponse> {
        self.session = BuildSession::default();
        if self.jdk_selector.plan(None).is_empty() {
            return Err(no_jdk_error().into());
        }

        // Step 1: toolchains.xml for Maven builds that select JDKs themselves
        let root = request.repositories_dir.as_path();
        self.workspace.create_dir_all(root)?;
        self.workspace.write_file(
            &root.join(TOOLCHAINS_FILE_NAME),
            &render_toolchains(self.jdk_selector.homes()),
        )?;

        // Step 2: every repository, sequentially
        let repositories = self.workspace.list_repositories(root)?;
        let total = repositories.len();
        self.progress_reporter.report(&format!(
            "🔨 Building {} repositories from {}",
            total,
            root.display()
        ));

        for (index, repository) in repositories.iter().enumerate() {
            let name = repository
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| repository.display().to_string());

            let outcome = self.build_repository(repository);
            match &outcome {
                BuildOutcome::Succeeded { jdk } => self
                    .progress_reporter
                    .report(&format!("   ✅ {}: {} ({})", name, outcome, jdk)),
                _ => self
                    .progress_reporter
                    .report_error(&format!("   ❌ {}: {}", name, outcome)),
            }
            self.session.record(name.clone(), outcome);
            self.progress_reporter
                .report_progress(index + 1, total, Some(&name));
        }

        let response = self.session.to_response();

        self.progress_reporter.report_completion(&format!(
            "✅ Build batch complete: {} succeeded, {} failed",
            response.succeeded.len(),
            response.failed.len()
        ));
        Ok(response)
    }

    fn build_repository(&mut self, repository: &Path) -> BuildOutcome {
        let Some(tool) = BuildTool::detect(repository) else {
            tracing::warn!(path = %repository.display(), "no build file found");
            return BuildOutcome::InternalError;
        };

        let requirement = self.detect_requirement(tool, repository);
        let plan = self.jdk_selector.plan(requirement);
        tracing::debug!(
            path = %repository.display(),
            ?tool,
            requirement = ?requirement.map(|r| r.major()),
            candidates = plan.len(),
            "starting build"
        );

        let mut state = BuildState::NotStarted;
        while !state.is_terminal() {
            state = state.advance(&plan, |candidate| {
                self.session.last_jdk_used = Some(candidate.label.clone());
                self.progress_reporter.report(&format!(
                    "   🔧 {} with {}",
                    repository.display(),
                    candidate.label
                ));
                attempt_build(
                    &self.maven,
                    &self.gradle,
                    &self.workspace,
                    tool,
                    repository,
                    candidate,
                )
            });
        }

        match state {
            BuildState::Succeeded { jdk } => BuildOutcome::Succeeded { jdk },
            _ => BuildOutcome::Failed,
        }
    }

    fn detect_requirement(&self, tool: BuildTool, repository: &Path) -> Option<JavaRequirement> {
        match tool {
            BuildTool::Maven => {
                let ambient = self.jdk_selector.homes().ambient();
                match self.maven.effective_pom(repository, ambient) {
                    Ok(output) => detect_java_requirement(&output),
                    Err(e) => {
                        tracing::debug!(path = %repository.display(), error = %e, "effective POM unavailable");
                        None
                    }
                }
            }
            BuildTool::Gradle => {
                let version = self
                    .project_reader
                    .read_gradle_wrapper_properties(repository)
                    .ok()
                    .flatten()
                    .as_deref()
                    .and_then(GradleVersion::from_wrapper_properties)
                    .unwrap_or(GradleVersion::DEFAULT);
                Some(java_requirement_for_gradle(version))
            }
        }
    }
}

fn attempt_build<M, G, W>(
    maven: &M,
    gradle: &G,
    workspace: &W,
    tool: BuildTool,
    repository: &Path,
    candidate: &JdkCandidate,
) -> bool
where
    M: MavenInvoker,
    G: GradleInvoker,
    W: Workspace,
{
    match tool {
        BuildTool::Maven => {
            let Err(first) = maven.build(repository, &MAVEN_FULL_BUILD, &candidate.home) else {
                return true;
            };
            tracing::debug!(jdk = %candidate.label, error = %first, "maven build failed, retrying");
            if let Err(e) = workspace.broaden_permissions(repository) {
                tracing::debug!(error = %e, "could not broaden permissions");
            }
            maven
                .build(repository, &MAVEN_RETRY_BUILD, &candidate.home)
                .inspect_err(|e| tracing::debug!(jdk = %candidate.label, error = %e, "maven retry failed"))
                .is_ok()
        }
        BuildTool::Gradle => {
            if let Err(e) = gradle.stop_daemon(repository, &candidate.home) {
                tracing::debug!(error = %e, "gradle --stop failed");
            }
            gradle
                .build(repository, &candidate.home)
                .inspect_err(|e| tracing::debug!(jdk = %candidate.label, error = %e, "gradle build failed"))
                .is_ok()
        }
    }
}
