use owo_colors::OwoColorize;
use std::collections::BTreeSet;

/// Renders the end-of-batch success/failure listing printed after `fetch`
/// and `build`.
pub fn render_batch_summary(
    title: &str,
    succeeded: &BTreeSet<String>,
    failed: &BTreeSet<String>,
    colored: bool,
) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}: {} succeeded, {} failed\n",
        title,
        succeeded.len(),
        failed.len()
    ));

    for name in succeeded {
        let mark = if colored {
            "✔".green().to_string()
        } else {
            "✔".to_string()
        };
        out.push_str(&format!("  {} {}\n", mark, name));
    }

    for name in failed {
        let line = if colored {
            format!("  {} {}\n", "✘".red(), name.bold())
        } else {
            format!("  ✘ {}\n", name)
        };
        out.push_str(&line);
    }

    out
}
