use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// Batch commands (`fetch`, `build`) keep going after a per-repository
/// failure and report it through [`ExitCode::BatchFailures`] at the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Every requested item succeeded
    Success = 0,
    /// The batch ran to completion but at least one repository failed
    BatchFailures = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (misconfiguration, unreadable project, I/O, ...)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::BatchFailures => write!(f, "Batch Failures (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors.
///
/// Per-node SCM lookup failures never surface here; they are folded into
/// the "SCM URL not found" sentinel by the resolver.
#[derive(Debug, Error)]
pub enum DepSearchError {
    #[error("Invalid project path: {path}\nReason: {reason}\n\n💡 Hint: Please specify a valid project directory")]
    InvalidProjectPath { path: PathBuf, reason: String },

    #[error("Unknown project type: {path}\n\n💡 Hint: The directory must contain pom.xml, build.gradle, build.gradle.kts, settings.gradle or settings.gradle.kts")]
    UnknownProjectType { path: PathBuf },

    #[error("No dependencies found for project: {project}\n\n💡 Hint: {hint}")]
    NoDependenciesFound { project: String, hint: String },

    #[error("Failed to parse {tool} output\nDetails: {details}\n\n💡 Hint: Re-run with -v to see the raw build tool output")]
    ToolOutputParse { tool: String, details: String },

    #[error("Failed to parse descriptor {coordinate}\nDetails: {details}")]
    DescriptorParse { coordinate: String, details: String },

    #[error("Command failed with exit code {exit_code}: {command}\n{output_tail}")]
    CommandFailed {
        command: String,
        exit_code: i32,
        output_tail: String,
    },

    #[error("No tags found matching the pattern for repo {repository} with version {version}\n\n💡 Hint: The upstream project may tag releases differently (e.g. release-1.0 instead of 1.0.0)")]
    TagNotFound { repository: String, version: String },

    #[error("Environment misconfigured: {variable}\nReason: {reason}\n\n💡 Hint: {hint}")]
    EnvironmentMisconfigured {
        variable: String,
        reason: String,
        hint: String,
    },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },

    /// Validation error for user-supplied values
    #[error("Validation error: {message}")]
    Validation { message: String },
}
