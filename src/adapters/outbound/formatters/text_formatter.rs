use crate::application::dto::{BuildResponse, FetchResponse, TreeResponse};
use crate::dependency_analysis::domain::DependencyNode;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use std::fmt::Write;

const INDENT: &str = "  ";

/// TextFormatter adapter producing a plain, indented listing
pub struct TextFormatter;

impl TextFormatter {
    pub fn new() -> Self {
        Self
    }

    fn write_node(out: &mut String, node: &DependencyNode, depth: usize) {
        out.push_str(&INDENT.repeat(depth));
        out.push_str(&node.coordinate().to_string());
        if let Some(scope) = node.scope() {
            let _ = write!(out, " [{}]", scope);
        }
        if let Some(url) = node.scm_url() {
            let _ = write!(out, " -> {}", url);
        }
        if let Some(tag) = node.checkout_tag() {
            let _ = write!(out, " @ {}", tag);
        }
        if let Some(outcome) = node.build_with() {
            let _ = write!(out, " ({})", outcome);
        }
        out.push('\n');

        for child in node.children() {
            Self::write_node(out, child, depth + 1);
        }
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for TextFormatter {
    fn format_tree(&self, report: &TreeResponse) -> Result<String> {
        let mut out = String::new();
        let _ = writeln!(out, "Project: {} ({})", report.project_name, report.project_type);
        let _ = writeln!(
            out,
            "Dependencies: {} top-level, {} total",
            report.forest.len(),
            report.forest.node_count()
        );

        let scopes = report.scopes();
        if !scopes.is_empty() {
            let _ = writeln!(
                out,
                "Scopes: {}",
                scopes.into_iter().collect::<Vec<_>>().join(", ")
            );
        }
        if let Some(summary) = report.scm_resolution {
            let _ = writeln!(
                out,
                "SCM URLs: {} from BOM, {} resolved, {} not found",
                report.scm_from_bom, summary.resolved, summary.not_found
            );
        }
        out.push('\n');

        for root in report.forest.roots() {
            Self::write_node(&mut out, root, 0);
        }
        Ok(out)
    }

    fn format_fetch(&self, report: &FetchResponse) -> Result<String> {
        let mut out = String::new();
        for (repository, tag) in &report.checkout_tags {
            let _ = writeln!(out, "{} -> {}", repository, tag);
        }
        if report.has_failures() {
            out.push_str("\nFailures:\n");
            for (repository, reason) in &report.failures {
                let first_line = reason.lines().next().unwrap_or_default();
                let _ = writeln!(out, "{}{}: {}", INDENT, repository, first_line);
            }
        }
        Ok(out)
    }

    fn format_build(&self, report: &BuildResponse) -> Result<String> {
        let mut out = String::new();
        for (repository, outcome) in &report.outcomes {
            match outcome.jdk() {
                Some(jdk) => {
                    let _ = writeln!(out, "{}: {} ({})", repository, outcome, jdk);
                }
                None => {
                    let _ = writeln!(out, "{}: {}", repository, outcome);
                }
            }
        }
        Ok(out)
    }
}
