use super::run_checked;
use crate::dependency_analysis::services::TagRef;
use crate::ports::outbound::{CommandRunner, CommandSpec, GitClient};
use crate::shared::Result;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Tag name, peeled commit date (annotated tags only) and the ref's own
/// commit date, tab separated.
const TAG_FORMAT: &str = "--format=%(refname)%09%(*committerdate:unix)%09%(committerdate:unix)";

/// GitClient adapter shelling out to the `git` executable on `PATH`.
pub struct GitCli<R: CommandRunner> {
    runner: R,
    program: PathBuf,
}

impl<R: CommandRunner> GitCli<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            program: PathBuf::from("git"),
        }
    }

    fn git(&self, cwd: &Path) -> CommandSpec {
        CommandSpec::new(&self.program, cwd)
            .env("GIT_TERMINAL_PROMPT", "0")
    }
}

impl<R: CommandRunner> GitClient for GitCli<R> {
    fn shallow_clone(&self, url: &str, destination: &Path) -> Result<()> {
        let parent = destination.parent().unwrap_or_else(|| Path::new("."));
        let spec = self.git(parent).args([
            "clone".to_string(),
            "--depth".to_string(),
            "1".to_string(),
            "--no-single-branch".to_string(),
            url.to_string(),
            destination.display().to_string(),
        ]);
        run_checked(&self.runner, &spec)?;
        Ok(())
    }

    fn fetch_tags(&self, repository: &Path) -> Result<()> {
        let spec = self
            .git(repository)
            .args(["fetch", "--depth", "1", "--tags", "--force", "origin"]);
        run_checked(&self.runner, &spec)?;
        Ok(())
    }

    fn list_tags(&self, repository: &Path) -> Result<Vec<TagRef>> {
        let spec = self
            .git(repository)
            .args(["for-each-ref", TAG_FORMAT, "refs/tags"]);
        let output = run_checked(&self.runner, &spec)?;
        Ok(parse_tag_listing(&output.stdout))
    }

    fn checkout_tag(&self, repository: &Path, tag: &str) -> Result<()> {
        let spec = self
            .git(repository)
            .args(["checkout", "--quiet", "--force"])
            .arg(format!("tags/{}", tag));
        run_checked(&self.runner, &spec)?;
        Ok(())
    }
}

/// Parses `for-each-ref` output produced with [`TAG_FORMAT`].
///
/// Annotated tags carry the peeled commit date in the second column;
/// lightweight tags leave it empty and the third column is used instead.
/// Tags without any parseable date sort as oldest.
fn parse_tag_listing(lines: &[String]) -> Vec<TagRef> {
    lines
        .iter()
        .filter_map(|line| {
            let mut columns = line.split('\t');
            let name = columns.next()?.trim();
            if name.is_empty() {
                return None;
            }
            let peeled = columns.next().and_then(parse_timestamp);
            let own = columns.next().and_then(parse_timestamp);
            let commit_time = peeled.or(own).unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
            Some(TagRef::new(name, commit_time))
        })
        .collect()
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let seconds = value.trim().parse::<i64>().ok()?;
    DateTime::from_timestamp(seconds, 0)
}
