/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod output_format;
mod requests;
mod responses;

pub use output_format::OutputFormat;
pub use requests::{BuildRequest, FetchRequest, FetchTarget, TreeRequest};
pub use responses::{BuildResponse, FetchResponse, ScmResolutionSummary, TreeResponse};
