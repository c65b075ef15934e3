mod batch_summary;
mod progress_reporter;

pub use batch_summary::render_batch_summary;
pub use progress_reporter::StderrProgressReporter;
