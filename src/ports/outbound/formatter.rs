use crate::application::dto::{BuildResponse, FetchResponse, TreeResponse};
use crate::shared::Result;

/// ReportFormatter port for rendering command results
///
/// One implementation per output format (JSON, text).
pub trait ReportFormatter {
    /// Formats a loaded dependency forest
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format_tree(&self, report: &TreeResponse) -> Result<String>;

    /// Formats repository name → checkout tag results
    fn format_fetch(&self, report: &FetchResponse) -> Result<String>;

    /// Formats repository name → build outcome results
    fn format_build(&self, report: &BuildResponse) -> Result<String>;
}
