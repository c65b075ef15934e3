//! Parsing of `maven-dependency-plugin:tree -DoutputType=json` output.

use crate::dependency_analysis::domain::{Coordinate, DependencyNode};
use crate::shared::error::DepSearchError;
use crate::shared::Result;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

static LOG_LEVEL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(?:INFO|WARNING|WARN|ERROR|DEBUG)\] ?")
        .expect("Failed to compile Maven log prefix regex")
});

#[cfg(windows)]
const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
const LINE_SEPARATOR: &str = "\n";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MavenTreeEntry {
    group_id: String,
    artifact_id: String,
    version: String,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    children: Vec<MavenTreeEntry>,
}

impl From<MavenTreeEntry> for DependencyNode {
    fn from(entry: MavenTreeEntry) -> Self {
        let children = entry.children.into_iter().map(DependencyNode::from).collect();
        DependencyNode::new(Coordinate::new(
            entry.group_id,
            entry.artifact_id,
            entry.version,
        ))
        .with_scope(entry.scope)
        .with_children(children)
    }
}

/// Pulls the JSON document out of Maven console output.
///
/// Log level tags are stripped from every line; collection starts at the
/// first line whose content begins with `{` and runs to the end. Returns an
/// empty string when no such line exists.
pub fn extract_json(lines: &[String]) -> String {
    let stripped: Vec<String> = lines
        .iter()
        .map(|line| LOG_LEVEL_PREFIX.replace(line, "").into_owned())
        .collect();

    match stripped
        .iter()
        .position(|line| line.trim_start().starts_with('{'))
    {
        Some(start) => stripped[start..].join(LINE_SEPARATOR).trim().to_string(),
        None => String::new(),
    }
}

/// Parses the tree JSON of one module into its root node.
pub fn parse_dependency_tree(json: &str) -> Result<DependencyNode> {
    if json.trim().is_empty() {
        return Err(DepSearchError::ToolOutputParse {
            tool: "Maven".to_string(),
            details: "no dependency tree JSON found in output".to_string(),
        }
        .into());
    }

    // Only the first document counts; the reactor summary that Maven prints
    // after the tree ends up in the extracted text as well.
    let entry = serde_json::Deserializer::from_str(json)
        .into_iter::<MavenTreeEntry>()
        .next()
        .ok_or_else(|| DepSearchError::ToolOutputParse {
            tool: "Maven".to_string(),
            details: "dependency tree JSON is empty".to_string(),
        })?
        .map_err(|e| DepSearchError::ToolOutputParse {
            tool: "Maven".to_string(),
            details: e.to_string(),
        })?;
    Ok(entry.into())
}

/// [`extract_json`] followed by [`parse_dependency_tree`].
pub fn parse_tree_output(lines: &[String]) -> Result<DependencyNode> {
    parse_dependency_tree(&extract_json(lines))
}
