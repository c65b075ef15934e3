//! Parsing of `gradle dependencies` and `gradle projects` text output.

use crate::dependency_analysis::domain::scope::{
    is_relevant_gradle_configuration, scope_for_gradle_configuration,
};
use crate::dependency_analysis::domain::{Coordinate, DependencyNode};
use regex::Regex;
use std::sync::LazyLock;

/// Width of one nesting level: `"|    "` or `"     "`.
const INDENT_WIDTH: usize = 5;

static DEPENDENCY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([| ]*)[+\\]---\s+([^\s:]+):([^\s:]+):(\{strictly\s+[^}]*\}|\S+?)(?:\s+->\s+(\S+))?(?:\s+\(\*\))?(?:\s+\(c\))?\s*$",
    )
    .expect("Failed to compile Gradle dependency line regex")
});

static CONFIGURATION_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+)(?:\s+-\s+.*)?$").expect("Failed to compile configuration header regex")
});

static PROJECT_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-*\s*Project\s+[':]*([^']*?)'?\s*-*$")
        .expect("Failed to compile project header regex")
});

static SUBPROJECT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+\\|\s]*---\s+Project\s+'(:[^']+)'")
        .expect("Failed to compile subproject regex")
});

/// The dependency trees printed under one configuration header.
#[derive(Debug, Clone)]
pub struct GradleSection {
    pub project: String,
    pub configuration: String,
    pub roots: Vec<DependencyNode>,
}

impl GradleSection {
    pub fn key(&self) -> String {
        format!("{}/{}", self.project, self.configuration)
    }
}

/// Removes a `{strictly X}` constraint wrapper, leaving `X`.
pub fn clean_version(version: &str) -> String {
    let trimmed = version.trim();
    match trimmed
        .strip_prefix("{strictly")
        .and_then(|rest| rest.strip_suffix('}'))
    {
        Some(inner) => inner.trim().to_string(),
        None => trimmed.to_string(),
    }
}

/// Builds a forest from dependency lines.
///
/// Lines not matching the dependency pattern are skipped. Depth is the
/// indentation width divided by five; each node becomes a child of the most
/// recent node at a shallower depth, or a root when there is none.
pub fn parse_dependency_tree<S: AsRef<str>>(lines: &[S], scope: Option<&str>) -> Vec<DependencyNode> {
    let mut roots = Vec::new();
    let mut stack: Vec<(DependencyNode, usize)> = Vec::new();

    for line in lines {
        let Some(captures) = DEPENDENCY_LINE.captures(line.as_ref()) else {
            continue;
        };
        let depth = captures[1].len() / INDENT_WIDTH;
        let version = captures
            .get(5)
            .map(|resolved| clean_version(resolved.as_str()))
            .unwrap_or_else(|| clean_version(&captures[4]));
        let node = DependencyNode::new(Coordinate::new(&captures[2], &captures[3], version))
            .with_scope(scope.map(str::to_string));

        while stack.last().is_some_and(|(_, top_depth)| *top_depth >= depth) {
            pop_into_parent(&mut stack, &mut roots);
        }
        stack.push((node, depth));
    }

    while !stack.is_empty() {
        pop_into_parent(&mut stack, &mut roots);
    }
    roots
}

fn pop_into_parent(stack: &mut Vec<(DependencyNode, usize)>, roots: &mut Vec<DependencyNode>) {
    if let Some((node, _)) = stack.pop() {
        match stack.last_mut() {
            Some((parent, _)) => parent.push_child(node),
            None => roots.push(node),
        }
    }
}

fn is_indented(line: &str) -> bool {
    line.starts_with(|c: char| c.is_whitespace() || matches!(c, '|' | '+' | '\\'))
}

/// Splits `gradle dependencies` output into per-project, per-configuration
/// sections and parses each one.
///
/// A `Project ':name'` banner switches the current project. A non-indented
/// line naming an allow-listed configuration opens a section; any other
/// non-indented line closes it. Sections sharing a project/configuration key
/// are concatenated, in first-seen order.
pub fn parse_dependencies_output<S: AsRef<str>>(lines: &[S]) -> Vec<GradleSection> {
    let mut sections: Vec<GradleSection> = Vec::new();
    let mut project = String::from("root");
    let mut current: Option<(String, Vec<&str>)> = None;

    let mut flush = |current: &mut Option<(String, Vec<&str>)>, project: &str| {
        if let Some((configuration, body)) = current.take() {
            let scope = scope_for_gradle_configuration(&configuration);
            let roots = parse_dependency_tree(&body, Some(&scope));
            if let Some(existing) = sections
                .iter_mut()
                .find(|s| s.project == project && s.configuration == configuration)
            {
                existing.roots.extend(roots);
            } else {
                sections.push(GradleSection {
                    project: project.to_string(),
                    configuration,
                    roots,
                });
            }
        }
    };

    for line in lines {
        let line = line.as_ref();

        if let Some(captures) = PROJECT_HEADER.captures(line.trim()) {
            flush(&mut current, &project);
            let name = captures[1].trim();
            project = if name.is_empty() { "root" } else { name }.to_string();
            continue;
        }

        if is_indented(line) {
            if let Some((_, body)) = current.as_mut() {
                body.push(line);
            }
            continue;
        }

        flush(&mut current, &project);
        if let Some(captures) = CONFIGURATION_HEADER.captures(line.trim()) {
            let configuration = &captures[1];
            if is_relevant_gradle_configuration(configuration) {
                current = Some((configuration.to_string(), Vec::new()));
            }
        }
    }
    flush(&mut current, &project);

    sections
}

/// Subproject paths (`:core`, `:app:web`) listed by `gradle projects`.
pub fn parse_projects_output<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut projects = Vec::new();
    for line in lines {
        if let Some(captures) = SUBPROJECT_LINE.captures(line.as_ref()) {
            let path = captures[1].to_string();
            if !projects.contains(&path) {
                projects.push(path);
            }
        }
    }
    projects
}
