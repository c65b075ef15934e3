use crate::shared::Result;
use std::fmt;
use std::path::{Path, PathBuf};

/// A fully described external command: program, arguments, working
/// directory and environment overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    pub env: Vec<(String, String)>,
}

impl CommandSpec {
    pub fn new(program: impl Into<PathBuf>, working_dir: &Path) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: working_dir.to_path_buf(),
            env: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Sets `JAVA_HOME` for the child process.
    pub fn java_home(self, java_home: &Path) -> Self {
        self.env("JAVA_HOME", java_home.display().to_string())
    }

    pub fn env_value(&self, key: &str) -> Option<&str> {
        self.env
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Last `count` lines of stdout followed by stderr, for error reports.
    pub fn tail(&self, count: usize) -> String {
        let lines: Vec<&str> = self
            .stdout
            .iter()
            .chain(self.stderr.iter())
            .map(String::as_str)
            .collect();
        let start = lines.len().saturating_sub(count);
        lines[start..].join("\n")
    }
}

/// CommandRunner port for running external programs
///
/// Implementations wait for the process to exit; there is no timeout.
/// A non-zero exit code is reported through [`CommandOutput::exit_code`],
/// not as an error. Errors are reserved for failing to start the process.
pub trait CommandRunner: Send + Sync {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput>;
}
