/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (processes, network, file system, console).
pub mod command_runner;
pub mod descriptor_repository;
pub mod formatter;
pub mod git_client;
pub mod gradle_invoker;
pub mod maven_invoker;
pub mod output_presenter;
pub mod progress_reporter;
pub mod project_reader;
pub mod workspace;

pub use command_runner::{CommandOutput, CommandRunner, CommandSpec};
pub use descriptor_repository::DescriptorRepository;
pub use formatter::ReportFormatter;
pub use git_client::GitClient;
pub use gradle_invoker::{CycloneDxPlugin, GradleInvoker};
pub use maven_invoker::MavenInvoker;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use project_reader::ProjectReader;
pub use workspace::Workspace;
