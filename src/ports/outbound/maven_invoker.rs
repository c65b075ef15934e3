use crate::shared::Result;
use std::path::Path;

/// MavenInvoker port for the Maven goals this tool runs
///
/// Every method fails with a `CommandFailed` error when Maven exits with a
/// non-zero status.
pub trait MavenInvoker: Send + Sync {
    /// Runs `dependency:tree -DoutputType=json` against `<module_dir>/pom.xml`
    /// and returns the raw output lines.
    fn dependency_tree(&self, module_dir: &Path, java_home: Option<&Path>) -> Result<Vec<String>>;

    /// Runs `makeAggregateBom` and returns the content of `target/bom.xml`.
    fn aggregate_bom(&self, project_dir: &Path, java_home: Option<&Path>) -> Result<String>;

    /// Runs `help:effective-pom` and returns its output.
    fn effective_pom(&self, project_dir: &Path, java_home: Option<&Path>) -> Result<String>;

    /// Runs the given goals as a build with `java_home` as `JAVA_HOME`.
    fn build(&self, project_dir: &Path, goals: &[&str], java_home: &Path) -> Result<()>;
}
