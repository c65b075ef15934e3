use crate::application::dto::{TreeRequest, TreeResponse};
use crate::dependency_analysis::domain::{DependencyForest, ProjectType};
use crate::dependency_analysis::policies::{
    java_requirement_for_gradle, GradleVersion, ScmOverrides,
};
use crate::dependency_analysis::services::bom_parser::{parse_json_bom, parse_xml_bom_scm_urls};
use crate::dependency_analysis::services::gradle_tree_parser::{
    parse_dependencies_output, parse_projects_output,
};
use crate::dependency_analysis::services::maven_output_parser::parse_tree_output;
use crate::dependency_analysis::services::{
    DependencyTreeBuilder, JdkCandidate, JdkPlan, JdkSelector, PomDescriptor,
};
use crate::ports::outbound::{
    CycloneDxPlugin, GradleInvoker, MavenInvoker, ProgressReporter, ProjectReader,
};
use crate::shared::error::DepSearchError;
use crate::shared::security::validate_project_directory;
use crate::shared::Result;
use std::path::Path;

/// LoadDependenciesUseCase - builds the merged dependency forest of a project
///
/// Maven projects are read module by module through `dependency:tree`, with
/// SCM URLs optionally pre-filled from an aggregate CycloneDX BOM. Gradle
/// projects go through the CycloneDX plugin (modern, then legacy) on every
/// JDK candidate and fall back to parsing `gradle dependencies` text.
///
/// # Type Parameters
/// * `PRJ` - ProjectReader implementation
/// * `M` - MavenInvoker implementation
/// * `G` - GradleInvoker implementation
/// * `P` - ProgressReporter implementation
pub struct LoadDependenciesUseCase<PRJ, M, G, P> {
    project_reader: PRJ,
    maven: M,
    gradle: G,
    progress_reporter: P,
    jdk_selector: JdkSelector,
    overrides: ScmOverrides,
}

impl<PRJ, M, G, P> LoadDependenciesUseCase<PRJ, M, G, P>
where
    PRJ: ProjectReader,
    M: MavenInvoker,
    G: GradleInvoker,
    P: ProgressReporter,
{
    pub fn new(
        project_reader: PRJ,
        maven: M,
        gradle: G,
        progress_reporter: P,
        jdk_selector: JdkSelector,
        overrides: ScmOverrides,
    ) -> Self {
        Self {
            project_reader,
            maven,
            gradle,
            progress_reporter,
            jdk_selector,
            overrides,
        }
    }

    /// Detects the build system and loads the project's dependency forest.
    ///
    /// SCM URLs are only those a CycloneDX BOM supplied; descriptor lookups
    /// are left to `ScmResolver`.
    ///
    /// # Errors
    /// `InvalidProjectPath`, `UnknownProjectType`, a tool failure on the
    /// root project, or `NoDependenciesFound` when nothing survives merging.
    pub fn execute(&self, request: TreeRequest) -> Result<TreeResponse> {
        let project_dir = request.project_path.as_path();
        validate_project_directory(project_dir)?;

        let project_type = ProjectType::detect(project_dir);
        let (project_name, forest, scm_from_bom) = match project_type {
            ProjectType::Maven => self.load_maven(project_dir, request.use_cyclonedx)?,
            ProjectType::Gradle => self.load_gradle(project_dir, request.use_cyclonedx)?,
            ProjectType::Unknown => {
                return Err(DepSearchError::UnknownProjectType {
                    path: project_dir.to_path_buf(),
                }
                .into())
            }
        };

        self.progress_reporter.report(&format!(
            "✅ Detected {} top-level dependencies ({} in total)",
            forest.len(),
            forest.node_count()
        ));

        Ok(TreeResponse {
            project_name,
            project_type,
            forest,
            scm_from_bom,
            scm_resolution: None,
        })
    }

    fn load_maven(
        &self,
        project_dir: &Path,
        use_cyclonedx: bool,
    ) -> Result<(String, DependencyForest, usize)> {
        self.progress_reporter.report(&format!(
            "📖 Loading Maven dependency tree from: {}",
            project_dir.display()
        ));

        let pom_content = self.project_reader.read_pom(project_dir)?;
        let pom = PomDescriptor::parse(&pom_content).map_err(|e| DepSearchError::DescriptorParse {
            coordinate: project_dir.join("pom.xml").display().to_string(),
            details: e.to_string(),
        })?;
        let project_name = pom
            .display_name()
            .map(str::to_string)
            .unwrap_or_else(|| directory_name(project_dir));

        // Step 1: Root project tree with the ambient JDK
        let java_home = self.jdk_selector.homes().ambient();
        let mut builder = DependencyTreeBuilder::new().with_module_names(pom.modules.iter().cloned());
        let root_output = self.maven.dependency_tree(project_dir, java_home)?;
        builder.add_module_tree(parse_tree_output(&root_output)?);

        // Step 2: One tree per declared module
        let total = pom.modules.len();
        for (index, module) in pom.modules.iter().enumerate() {
            let module_dir = project_dir.join(module);
            let tree = self
                .maven
                .dependency_tree(&module_dir, java_home)
                .and_then(|lines| parse_tree_output(&lines));
            match tree {
                Ok(root) => builder.add_module_tree(root),
                Err(e) => self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: Skipping module '{}': {}",
                    module,
                    first_line(&e.to_string())
                )),
            }
            self.progress_reporter
                .report_progress(index + 1, total, Some(module));
        }

        let mut forest = builder.build(&project_name)?;

        // Step 3: SCM URLs from the aggregate BOM
        let mut from_bom = 0;
        if use_cyclonedx {
            self.progress_reporter
                .report("🔍 Reading SCM URLs from the aggregate CycloneDX BOM...");
            match self
                .maven
                .aggregate_bom(project_dir, java_home)
                .and_then(|xml| parse_xml_bom_scm_urls(&xml, &self.overrides))
            {
                Ok(urls) => from_bom = forest.apply_scm_urls(&urls),
                Err(e) => self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: CycloneDX BOM unavailable, falling back to descriptor lookups: {}",
                    first_line(&e.to_string())
                )),
            }
        }

        Ok((project_name, forest, from_bom))
    }

    fn load_gradle(
        &self,
        project_dir: &Path,
        use_cyclonedx: bool,
    ) -> Result<(String, DependencyForest, usize)> {
        let project_name = directory_name(project_dir);

        let version = self
            .project_reader
            .read_gradle_wrapper_properties(project_dir)?
            .as_deref()
            .and_then(GradleVersion::from_wrapper_properties);
        let effective_version = version.unwrap_or(GradleVersion::DEFAULT);

        self.progress_reporter.report(&format!(
            "📖 Loading Gradle {} dependency tree from: {}",
            effective_version,
            project_dir.display()
        ));

        let plan = self
            .jdk_selector
            .plan(Some(java_requirement_for_gradle(effective_version)));
        if plan.is_empty() {
            return Err(no_jdk_error().into());
        }

        // Step 1: CycloneDX plugin, every variant on every JDK
        if use_cyclonedx {
            let plugins = CycloneDxPlugin::attempt_order(effective_version.needs_legacy_cyclonedx());
            if let Some(forest) = self.try_cyclonedx(project_dir, &project_name, plugins, &plan)? {
                let from_bom = forest.unique_coordinates(|n| n.has_resolved_scm_url()).len();
                return Ok((project_name, forest, from_bom));
            }
            self.progress_reporter.report_error(
                "⚠️  Warning: CycloneDX BOM generation failed with every JDK, parsing `gradle dependencies` output instead",
            );
        }

        // Step 2: Text output of `gradle dependencies`
        for candidate in plan.all() {
            if let Some(forest) = self.try_text_output(project_dir, &project_name, candidate)? {
                return Ok((project_name, forest, 0));
            }
        }

        Err(DepSearchError::NoDependenciesFound {
            project: project_name,
            hint: format!(
                "Gradle produced no dependency report with any of: {}",
                plan.all()
                    .map(|c| c.label.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
        .into())
    }

    fn try_cyclonedx(
        &self,
        project_dir: &Path,
        project_name: &str,
        plugins: &[CycloneDxPlugin],
        plan: &JdkPlan,
    ) -> Result<Option<DependencyForest>> {
        for plugin in plugins {
            for candidate in plan.all() {
                let nodes = self
                    .gradle
                    .cyclonedx_bom(project_dir, *plugin, &candidate.home)
                    .and_then(|json| parse_json_bom(&json, &self.overrides));
                match nodes {
                    Ok(nodes) if !nodes.is_empty() => {
                        tracing::debug!(%plugin, jdk = %candidate.label, "CycloneDX BOM generated");
                        let mut builder = DependencyTreeBuilder::new();
                        builder.add_roots(nodes);
                        return builder.build(project_name).map(Some);
                    }
                    Ok(_) => {
                        tracing::debug!(%plugin, jdk = %candidate.label, "CycloneDX BOM was empty");
                    }
                    Err(e) => {
                        tracing::debug!(%plugin, jdk = %candidate.label, error = %e, "CycloneDX BOM generation failed");
                    }
                }
            }
        }
        Ok(None)
    }

    fn try_text_output(
        &self,
        project_dir: &Path,
        project_name: &str,
        candidate: &JdkCandidate,
    ) -> Result<Option<DependencyForest>> {
        let subprojects = match self.gradle.projects(project_dir, &candidate.home) {
            Ok(lines) => parse_projects_output(&lines),
            Err(e) => {
                tracing::debug!(jdk = %candidate.label, error = %e, "listing subprojects failed");
                Vec::new()
            }
        };

        let lines = match self
            .gradle
            .dependencies(project_dir, &subprojects, &candidate.home)
        {
            Ok(lines) => lines,
            Err(e) => {
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: `gradle dependencies` failed with {}: {}",
                    candidate.label,
                    first_line(&e.to_string())
                ));
                return Ok(None);
            }
        };

        let sections = parse_dependencies_output(&lines);
        if sections.iter().all(|section| section.roots.is_empty()) {
            return Ok(None);
        }

        let module_names = subprojects
            .iter()
            .filter_map(|path| path.rsplit(':').next())
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        let mut builder = DependencyTreeBuilder::new().with_module_names(module_names);
        for section in sections {
            builder.add_gradle_section(section);
        }
        builder.build(project_name).map(Some)
    }
}

fn directory_name(dir: &Path) -> String {
    dir.canonicalize()
        .ok()
        .as_deref()
        .unwrap_or(dir)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}

fn first_line(message: &str) -> &str {
    message.lines().next().unwrap_or_default()
}

pub(crate) fn no_jdk_error() -> DepSearchError {
    DepSearchError::EnvironmentMisconfigured {
        variable: "JAVA_HOME".to_string(),
        reason: "No JDK is configured".to_string(),
        hint: "Set JAVA_HOME or one of JAVA8_HOME, JAVA11_HOME, JAVA17_HOME, JAVA21_HOME"
            .to_string(),
    }
}
