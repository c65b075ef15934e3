use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// Progress goes to stderr so a JSON report on stdout stays parseable.
/// A single command can run several batches (descriptor lookups, then
/// clones); a bar is replaced whenever a batch with a different length
/// starts or the previous bar was finished.
pub struct StderrProgressReporter {
    progress_bar: RefCell<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            progress_bar: RefCell::new(None),
        }
    }

    fn bar_for_batch(&self, total: usize) -> ProgressBar {
        let mut slot = self.progress_bar.borrow_mut();
        if let Some(pb) = slot.as_ref() {
            if !pb.is_finished() && pb.length() == Some(total as u64) {
                return pb.clone();
            }
            pb.finish_and_clear();
        }

        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("   {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) - {msg}")
                .expect("Failed to set progress bar template")
                .progress_chars("=>-"),
        );
        *slot = Some(pb.clone());
        pb
    }

    fn finish_bar(&self) {
        if let Some(pb) = self.progress_bar.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        match self.progress_bar.borrow().as_ref() {
            Some(pb) if !pb.is_finished() => pb.println(message),
            _ => eprintln!("{}", message),
        }
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        let pb = self.bar_for_batch(total);
        pb.set_position(current as u64);
        if let Some(msg) = message {
            pb.set_message(msg.to_string());
        }
        if current >= total {
            self.finish_bar();
        }
    }

    fn report_error(&self, message: &str) {
        self.finish_bar();
        eprintln!("{}", message);
    }

    fn report_completion(&self, message: &str) {
        self.finish_bar();
        eprintln!();
        eprintln!("{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consecutive_batches() {
        let reporter = StderrProgressReporter::new();
        reporter.report("📖 Loading dependency tree...");
        reporter.report_progress(1, 3, Some("commons-lang3"));
        reporter.report_progress(3, 3, Some("guava"));
        assert!(reporter.progress_bar.borrow().is_none());

        reporter.report_progress(1, 2, Some("clone"));
        assert_eq!(
            reporter.progress_bar.borrow().as_ref().and_then(|pb| pb.length()),
            Some(2)
        );
        reporter.report_error("⚠️  Warning: clone failed");
        assert!(reporter.progress_bar.borrow().is_none());
    }

    #[test]
    fn test_progress_reporter_default() {
        let reporter = StderrProgressReporter::default();
        reporter.report_completion("✅ Done");
    }
}
