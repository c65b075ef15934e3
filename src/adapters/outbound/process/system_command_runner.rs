use crate::ports::outbound::{CommandOutput, CommandRunner, CommandSpec};
use crate::shared::Result;
use anyhow::Context;
use std::process::{Command, Stdio};

/// Runs commands with `std::process::Command`, capturing stdout and stderr.
#[derive(Debug, Default, Clone)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        tracing::debug!(
            command = %spec,
            cwd = %spec.working_dir.display(),
            java_home = spec.env_value("JAVA_HOME").unwrap_or("<inherited>"),
            "running command"
        );

        let output = Command::new(&spec.program)
            .args(&spec.args)
            .current_dir(&spec.working_dir)
            .envs(spec.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("Failed to spawn `{}`", spec.program.display()))?;

        let stdout = split_lines(&output.stdout);
        let stderr = split_lines(&output.stderr);
        for line in &stdout {
            tracing::trace!(target: "dep_searcher::process", "{}", line);
        }

        // a process killed by a signal has no exit code
        let exit_code = output.status.code().unwrap_or(-1);
        if exit_code != 0 {
            tracing::debug!(command = %spec, exit_code, "command failed");
        }

        Ok(CommandOutput {
            exit_code,
            stdout,
            stderr,
        })
    }
}

fn split_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::to_string)
        .collect()
}
