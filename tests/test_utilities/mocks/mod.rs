/// Mock implementations for testing
mod mock_descriptor_repository;
mod mock_git_client;
mod mock_gradle_invoker;
mod mock_maven_invoker;
mod mock_progress_reporter;
mod mock_project_reader;
mod mock_workspace;

pub use mock_descriptor_repository::MockDescriptorRepository;
pub use mock_git_client::MockGitClient;
pub use mock_gradle_invoker::MockGradleInvoker;
pub use mock_maven_invoker::MockMavenInvoker;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_project_reader::MockProjectReader;
pub use mock_workspace::MockWorkspace;
