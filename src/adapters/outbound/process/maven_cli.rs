use super::run_checked;
use crate::adapters::outbound::filesystem::read_checked_file;
use crate::ports::outbound::{CommandRunner, CommandSpec, MavenInvoker};
use crate::shared::error::DepSearchError;
use crate::shared::Result;
use std::path::{Path, PathBuf};

const DEPENDENCY_TREE_GOAL: &str = "org.apache.maven.plugins:maven-dependency-plugin:3.7.0:tree";
const AGGREGATE_BOM_GOAL: &str = "org.cyclonedx:cyclonedx-maven-plugin:2.8.0:makeAggregateBom";
const EFFECTIVE_POM_GOAL: &str = "help:effective-pom";
const AGGREGATE_BOM_PATH: &str = "target/bom.xml";
const BUILD_MAVEN_OPTS: &str = "-Dmaven.compiler.fork=true -DargLine=\"-Xmx2g\"";

/// Maven executable relative to `MAVEN_HOME`
#[cfg(windows)]
const MVN_EXECUTABLE: &str = "bin/mvn.cmd";
#[cfg(not(windows))]
const MVN_EXECUTABLE: &str = "bin/mvn";

/// MavenInvoker adapter driving `<MAVEN_HOME>/bin/mvn` in batch mode.
pub struct MavenCli<R: CommandRunner> {
    runner: R,
    maven_home: PathBuf,
    toolchains_file: Option<PathBuf>,
}

impl<R: CommandRunner> MavenCli<R> {
    pub fn new(runner: R, maven_home: PathBuf) -> Self {
        Self {
            runner,
            maven_home,
            toolchains_file: None,
        }
    }

    /// Passes `--toolchains <file>` on every invocation while the file exists.
    pub fn with_toolchains_file(mut self, path: PathBuf) -> Self {
        self.toolchains_file = Some(path);
        self
    }

    pub fn executable(&self) -> PathBuf {
        self.maven_home.join(MVN_EXECUTABLE)
    }

    /// Checks that `maven_home` holds a Maven installation.
    pub fn validate_installation(maven_home: &Path) -> Result<()> {
        let executable = maven_home.join(MVN_EXECUTABLE);
        if !executable.is_file() {
            return Err(DepSearchError::EnvironmentMisconfigured {
                variable: "MAVEN_HOME".to_string(),
                reason: format!("{} does not exist", executable.display()),
                hint: "Point MAVEN_HOME (or maven_home in the config file) at a Maven installation"
                    .to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn command(&self, project_dir: &Path, java_home: Option<&Path>) -> CommandSpec {
        let mut spec = CommandSpec::new(self.executable(), project_dir)
            .arg("-B")
            .arg("-f")
            .arg(project_dir.join("pom.xml").display().to_string());

        if let Some(toolchains) = self.toolchains_file.as_ref().filter(|p| p.is_file()) {
            spec = spec
                .arg("--toolchains")
                .arg(toolchains.display().to_string());
        }
        if let Some(java_home) = java_home {
            spec = spec.java_home(java_home);
        }
        spec
    }
}

impl<R: CommandRunner> MavenInvoker for MavenCli<R> {
    fn dependency_tree(&self, module_dir: &Path, java_home: Option<&Path>) -> Result<Vec<String>> {
        let spec = self
            .command(module_dir, java_home)
            .arg(DEPENDENCY_TREE_GOAL)
            .arg("-DoutputType=json");
        Ok(run_checked(&self.runner, &spec)?.stdout)
    }

    fn aggregate_bom(&self, project_dir: &Path, java_home: Option<&Path>) -> Result<String> {
        let spec = self
            .command(project_dir, java_home)
            .arg(AGGREGATE_BOM_GOAL)
            .arg("-DincludeTestScope=true")
            .arg("-DoutputFormat=xml");
        run_checked(&self.runner, &spec)?;
        read_checked_file(&project_dir.join(AGGREGATE_BOM_PATH), "CycloneDX BOM")
    }

    fn effective_pom(&self, project_dir: &Path, java_home: Option<&Path>) -> Result<String> {
        let spec = self.command(project_dir, java_home).arg(EFFECTIVE_POM_GOAL);
        Ok(run_checked(&self.runner, &spec)?.stdout.join("\n"))
    }

    fn build(&self, project_dir: &Path, goals: &[&str], java_home: &Path) -> Result<()> {
        let spec = self
            .command(project_dir, Some(java_home))
            .args(goals.iter().copied())
            .env("MAVEN_OPTS", BUILD_MAVEN_OPTS);
        run_checked(&self.runner, &spec)?;
        Ok(())
    }
}
