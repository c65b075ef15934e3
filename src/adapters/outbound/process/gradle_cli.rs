use super::run_checked;
use crate::adapters::outbound::filesystem::read_checked_file;
use crate::ports::outbound::{CommandRunner, CommandSpec, CycloneDxPlugin, GradleInvoker};
use crate::shared::Result;
use anyhow::Context;
use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(windows)]
const WRAPPER_NAME: &str = "gradlew.bat";
#[cfg(not(windows))]
const WRAPPER_NAME: &str = "gradlew";

#[cfg(windows)]
const GRADLE_ON_PATH: &str = "gradle.bat";
#[cfg(not(windows))]
const GRADLE_ON_PATH: &str = "gradle";

const MODERN_INIT_SCRIPT: &str = r#"initscript {
    repositories {
        gradlePluginPortal()
    }
    dependencies {
        classpath 'org.cyclonedx:cyclonedx-gradle-plugin:4.0.3'
    }
}
import org.cyclonedx.gradle.CycloneDxPlugin
allprojects {
    apply plugin: CycloneDxPlugin
}
"#;

// The 1.8 plugin pulls versions of jackson, maven-core and guava that
// clash with old Gradle runtimes; pin the ones it works with.
const LEGACY_INIT_SCRIPT: &str = r#"initscript {
    repositories {
        gradlePluginPortal()
        mavenCentral()
    }
    dependencies {
        classpath 'org.cyclonedx:cyclonedx-gradle-plugin:1.8.2'
    }
    configurations.classpath.resolutionStrategy.eachDependency { details ->
        if (details.requested.group.contains('jackson')) {
            details.useVersion '2.13.4'
        }
        if (details.requested.group == 'org.apache.maven' && details.requested.name == 'maven-core') {
            details.useVersion '3.6.3'
        }
        if (details.requested.group == 'com.google.guava' && details.requested.name == 'guava') {
            details.useVersion '28.2-jre'
        }
    }
}
import org.cyclonedx.gradle.CycloneDxPlugin
allprojects {
    apply plugin: CycloneDxPlugin
}
"#;

/// GradleInvoker adapter preferring the project's wrapper over `gradle`
/// from `PATH`.
pub struct GradleCli<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> GradleCli<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// `<project>/gradlew` when present and executable, else `gradle`.
    pub fn executable(project_dir: &Path) -> PathBuf {
        let wrapper = project_dir.join(WRAPPER_NAME);
        if is_executable(&wrapper) {
            wrapper
        } else {
            PathBuf::from(GRADLE_ON_PATH)
        }
    }

    fn command(&self, project_dir: &Path, java_home: &Path) -> CommandSpec {
        CommandSpec::new(Self::executable(project_dir), project_dir).java_home(java_home)
    }
}

impl<R: CommandRunner> GradleInvoker for GradleCli<R> {
    fn cyclonedx_bom(
        &self,
        project_dir: &Path,
        plugin: CycloneDxPlugin,
        java_home: &Path,
    ) -> Result<String> {
        let init_script = write_init_script(plugin)?;
        let spec = self
            .command(project_dir, java_home)
            .arg("cyclonedxBom")
            .arg("--init-script")
            .arg(init_script.path().display().to_string())
            .arg("--console=plain");
        run_checked(&self.runner, &spec)?;

        read_checked_file(&project_dir.join(plugin.bom_path()), "CycloneDX BOM")
    }

    fn projects(&self, project_dir: &Path, java_home: &Path) -> Result<Vec<String>> {
        let spec = self
            .command(project_dir, java_home)
            .args(["projects", "--quiet", "--console=plain"]);
        Ok(run_checked(&self.runner, &spec)?.stdout)
    }

    fn dependencies(
        &self,
        project_dir: &Path,
        subprojects: &[String],
        java_home: &Path,
    ) -> Result<Vec<String>> {
        let spec = self
            .command(project_dir, java_home)
            .arg("dependencies")
            .args(subprojects.iter().map(|p| format!("{}:dependencies", p)))
            .arg("--console=plain");
        Ok(run_checked(&self.runner, &spec)?.stdout)
    }

    fn stop_daemon(&self, project_dir: &Path, java_home: &Path) -> Result<()> {
        let spec = self.command(project_dir, java_home).arg("--stop");
        run_checked(&self.runner, &spec)?;
        Ok(())
    }

    fn build(&self, project_dir: &Path, java_home: &Path) -> Result<()> {
        let spec = self.command(project_dir, java_home).args(["clean", "build"]);
        run_checked(&self.runner, &spec)?;
        Ok(())
    }
}

fn write_init_script(plugin: CycloneDxPlugin) -> Result<tempfile::NamedTempFile> {
    let content = match plugin {
        CycloneDxPlugin::Modern => MODERN_INIT_SCRIPT,
        CycloneDxPlugin::Legacy => LEGACY_INIT_SCRIPT,
    };
    let mut file = tempfile::Builder::new()
        .prefix("cyclonedx-init")
        .suffix(".gradle")
        .tempfile()
        .context("Failed to create CycloneDX init script")?;
    file.write_all(content.as_bytes())
        .context("Failed to write CycloneDX init script")?;
    tracing::debug!(path = %file.path().display(), %plugin, "wrote CycloneDX init script");
    Ok(file)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::CommandOutput;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingRunner {
        calls: Mutex<Vec<CommandSpec>>,
    }

    impl CommandRunner for RecordingRunner {
        fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
            // the init script only lives for the duration of the call
            if let Some(pos) = spec.args.iter().position(|a| a == "--init-script") {
                assert!(Path::new(&spec.args[pos + 1]).is_file());
            }
            self.calls.lock().unwrap().push(spec.clone());
            Ok(CommandOutput::default())
        }
    }

    #[test]
    fn test_executable_falls_back_to_path() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(
            GradleCli::<RecordingRunner>::executable(temp_dir.path()),
            PathBuf::from(GRADLE_ON_PATH)
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_executable_prefers_wrapper() {
        use std::os::unix::fs::PermissionsExt;
        let temp_dir = TempDir::new().unwrap();
        let wrapper = temp_dir.path().join("gradlew");
        std::fs::write(&wrapper, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&wrapper, std::fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(GradleCli::<RecordingRunner>::executable(temp_dir.path()), wrapper);
    }

    #[test]
    fn test_dependencies_lists_subproject_tasks() {
        let temp_dir = TempDir::new().unwrap();
        let gradle = GradleCli::new(RecordingRunner::default());

        gradle
            .dependencies(
                temp_dir.path(),
                &[":core".to_string(), ":web".to_string()],
                Path::new("/opt/jdk17"),
            )
            .unwrap();

        let calls = gradle.runner.calls.lock().unwrap();
        assert_eq!(
            calls[0].args,
            vec![
                "dependencies",
                ":core:dependencies",
                ":web:dependencies",
                "--console=plain"
            ]
        );
        assert_eq!(calls[0].env_value("JAVA_HOME"), Some("/opt/jdk17"));
    }

    #[test]
    fn test_cyclonedx_bom_reads_plugin_output() {
        let temp_dir = TempDir::new().unwrap();
        let bom = temp_dir.path().join(CycloneDxPlugin::Legacy.bom_path());
        std::fs::create_dir_all(bom.parent().unwrap()).unwrap();
        std::fs::write(&bom, r#"{"components":[]}"#).unwrap();
        let gradle = GradleCli::new(RecordingRunner::default());

        let content = gradle
            .cyclonedx_bom(temp_dir.path(), CycloneDxPlugin::Legacy, Path::new("/opt/jdk11"))
            .unwrap();
        assert_eq!(content, r#"{"components":[]}"#);

        let calls = gradle.runner.calls.lock().unwrap();
        assert_eq!(calls[0].args[0], "cyclonedxBom");
        assert!(calls[0].args.contains(&"--init-script".to_string()));
    }

    #[test]
    fn test_cyclonedx_bom_missing_output_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let gradle = GradleCli::new(RecordingRunner::default());
        assert!(gradle
            .cyclonedx_bom(temp_dir.path(), CycloneDxPlugin::Modern, Path::new("/opt/jdk21"))
            .is_err());
    }

    #[test]
    fn test_build_and_stop_commands() {
        let temp_dir = TempDir::new().unwrap();
        let gradle = GradleCli::new(RecordingRunner::default());
        gradle.stop_daemon(temp_dir.path(), Path::new("/opt/jdk17")).unwrap();
        gradle.build(temp_dir.path(), Path::new("/opt/jdk17")).unwrap();

        let calls = gradle.runner.calls.lock().unwrap();
        assert_eq!(calls[0].args, vec!["--stop"]);
        assert_eq!(calls[1].args, vec!["clean", "build"]);
    }

    #[test]
    fn test_init_scripts_pin_plugin_versions() {
        assert!(MODERN_INIT_SCRIPT.contains("cyclonedx-gradle-plugin:4.0.3"));
        assert!(LEGACY_INIT_SCRIPT.contains("cyclonedx-gradle-plugin:1.8.2"));
        assert!(LEGACY_INIT_SCRIPT.contains("28.2-jre"));
    }
}
