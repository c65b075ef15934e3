use crate::shared::Result;
use std::fmt;
use std::path::Path;

/// Which CycloneDX Gradle plugin generation to inject with an init script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycloneDxPlugin {
    /// Plugin 4.x for Gradle 8 and later
    Modern,
    /// Plugin 1.8.x with a pinned classpath for older Gradle
    Legacy,
}

impl CycloneDxPlugin {
    /// Variants to try for a wrapper, in order.
    pub fn attempt_order(legacy_wrapper: bool) -> &'static [CycloneDxPlugin] {
        if legacy_wrapper {
            &[CycloneDxPlugin::Legacy]
        } else {
            &[CycloneDxPlugin::Modern, CycloneDxPlugin::Legacy]
        }
    }

    /// BOM location relative to the project directory.
    pub fn bom_path(self) -> &'static str {
        match self {
            CycloneDxPlugin::Modern => "build/reports/cyclonedx/bom.json",
            CycloneDxPlugin::Legacy => "build/reports/bom.json",
        }
    }
}

impl fmt::Display for CycloneDxPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycloneDxPlugin::Modern => write!(f, "modern"),
            CycloneDxPlugin::Legacy => write!(f, "legacy"),
        }
    }
}

/// GradleInvoker port for the Gradle tasks this tool runs
///
/// Every method fails with a `CommandFailed` error when Gradle exits with a
/// non-zero status.
pub trait GradleInvoker: Send + Sync {
    /// Runs `cyclonedxBom` through an init script and returns the BOM JSON.
    fn cyclonedx_bom(
        &self,
        project_dir: &Path,
        plugin: CycloneDxPlugin,
        java_home: &Path,
    ) -> Result<String>;

    /// Runs `projects --quiet` and returns the output lines.
    fn projects(&self, project_dir: &Path, java_home: &Path) -> Result<Vec<String>>;

    /// Runs `dependencies` for the root project and every listed subproject.
    fn dependencies(
        &self,
        project_dir: &Path,
        subprojects: &[String],
        java_home: &Path,
    ) -> Result<Vec<String>>;

    /// Stops any running daemon so the next build starts on `java_home`.
    fn stop_daemon(&self, project_dir: &Path, java_home: &Path) -> Result<()>;

    /// Runs `clean build`.
    fn build(&self, project_dir: &Path, java_home: &Path) -> Result<()>;
}
