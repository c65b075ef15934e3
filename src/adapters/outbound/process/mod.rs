/// Process adapters: external build tools and version control
mod git_cli;
mod gradle_cli;
mod maven_cli;
mod system_command_runner;

pub use git_cli::GitCli;
pub use gradle_cli::GradleCli;
pub use maven_cli::MavenCli;
pub use system_command_runner::SystemCommandRunner;

use crate::ports::outbound::{CommandOutput, CommandRunner, CommandSpec};
use crate::shared::error::DepSearchError;
use crate::shared::Result;

/// Lines of output kept in a `CommandFailed` error
const FAILURE_TAIL_LINES: usize = 20;

/// Runs `spec`, turning a non-zero exit into [`DepSearchError::CommandFailed`].
pub(crate) fn run_checked<R: CommandRunner + ?Sized>(
    runner: &R,
    spec: &CommandSpec,
) -> Result<CommandOutput> {
    let output = runner.run(spec)?;
    if !output.success() {
        return Err(DepSearchError::CommandFailed {
            command: spec.to_string(),
            exit_code: output.exit_code,
            output_tail: output.tail(FAILURE_TAIL_LINES),
        }
        .into());
    }
    Ok(output)
}
