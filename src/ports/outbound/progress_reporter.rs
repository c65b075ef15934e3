/// ProgressReporter port for user-facing progress during long operations
///
/// Diagnostics go through `tracing`; this port carries only what the user
/// is meant to read while a tree loads, repositories clone or builds run.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports position within a batch
    ///
    /// # Arguments
    /// * `current` - Items finished so far
    /// * `total` - Items in the batch
    /// * `message` - Optional label for the item just finished
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
