use crate::application::dto::{BuildResponse, FetchResponse, TreeResponse};
use crate::dependency_analysis::domain::{DependencyNode, ProjectType};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Metadata {
    generated_at: String,
    tool: Tool,
}

#[derive(Debug, Serialize)]
struct Tool {
    name: &'static str,
    version: &'static str,
}

impl Metadata {
    fn now() -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            tool: Tool {
                name: env!("CARGO_PKG_NAME"),
                version: env!("CARGO_PKG_VERSION"),
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TreeReport<'a> {
    metadata: Metadata,
    project: ProjectInfo<'a>,
    scopes: BTreeSet<String>,
    scm: ScmStats,
    dependencies: &'a [DependencyNode],
}

#[derive(Debug, Serialize)]
struct ProjectInfo<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    project_type: ProjectType,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScmStats {
    from_bom: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    looked_up: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolved: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    not_found: Option<usize>,
}

#[derive(Debug, Serialize)]
struct FetchReport<'a> {
    metadata: Metadata,
    checkouts: &'a BTreeMap<String, String>,
    failures: &'a BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
struct BuildReport<'a> {
    metadata: Metadata,
    outcomes: BTreeMap<&'a str, BuildEntry<'a>>,
    succeeded: &'a BTreeSet<String>,
    failed: &'a BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_jdk_used: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct BuildEntry<'a> {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    jdk: Option<&'a str>,
}

/// JsonFormatter adapter rendering reports as pretty-printed JSON
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format_tree(&self, report: &TreeResponse) -> Result<String> {
        let summary = report.scm_resolution;
        let document = TreeReport {
            metadata: Metadata::now(),
            project: ProjectInfo {
                name: &report.project_name,
                project_type: report.project_type,
            },
            scopes: report.scopes(),
            scm: ScmStats {
                from_bom: report.scm_from_bom,
                looked_up: summary.map(|s| s.looked_up),
                resolved: summary.map(|s| s.resolved),
                not_found: summary.map(|s| s.not_found),
            },
            dependencies: report.forest.roots(),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    fn format_fetch(&self, report: &FetchResponse) -> Result<String> {
        let document = FetchReport {
            metadata: Metadata::now(),
            checkouts: &report.checkout_tags,
            failures: &report.failures,
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    fn format_build(&self, report: &BuildResponse) -> Result<String> {
        let outcomes = report
            .outcomes
            .iter()
            .map(|(name, outcome)| {
                (
                    name.as_str(),
                    BuildEntry {
                        status: outcome.to_string(),
                        jdk: outcome.jdk(),
                    },
                )
            })
            .collect();
        let document = BuildReport {
            metadata: Metadata::now(),
            outcomes,
            succeeded: &report.succeeded,
            failed: &report.failed,
            last_jdk_used: report.last_jdk_used.as_deref(),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::ScmResolutionSummary;
    use crate::dependency_analysis::domain::{BuildOutcome, Coordinate, DependencyForest};
    use serde_json::Value;

    fn tree_response() -> TreeResponse {
        let child = DependencyNode::new(Coordinate::new("org.slf4j", "slf4j-api", "2.0.9"))
            .with_scope(Some("compile".to_string()));
        let root = DependencyNode::new(Coordinate::new("com.google.guava", "guava", "32.1.2-jre"))
            .with_scope(Some("compile".to_string()))
            .with_scm_url(Some("https://github.com/google/guava".to_string()))
            .with_children(vec![child]);
        TreeResponse {
            project_name: "demo".to_string(),
            project_type: ProjectType::Maven,
            forest: DependencyForest::new(vec![root]),
            scm_from_bom: 1,
            scm_resolution: Some(ScmResolutionSummary {
                looked_up: 1,
                resolved: 0,
                not_found: 1,
            }),
        }
    }

    #[test]
    fn test_format_tree() {
        let output = JsonFormatter::new().format_tree(&tree_response()).unwrap();
        let json: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["project"]["name"], "demo");
        assert_eq!(json["project"]["type"], "maven");
        assert_eq!(json["scopes"], serde_json::json!(["compile"]));
        assert_eq!(json["scm"]["fromBom"], 1);
        assert_eq!(json["scm"]["notFound"], 1);
        assert_eq!(json["metadata"]["tool"]["name"], "dep-searcher");

        let root = &json["dependencies"][0];
        assert_eq!(root["groupId"], "com.google.guava");
        assert_eq!(root["scmUrl"], "https://github.com/google/guava");
        assert_eq!(root["children"][0]["artifactId"], "slf4j-api");
        assert!(root["children"][0].get("scmUrl").is_none());
    }

    #[test]
    fn test_format_tree_without_resolution() {
        let mut response = tree_response();
        response.scm_resolution = None;
        let output = JsonFormatter::new().format_tree(&response).unwrap();
        let json: Value = serde_json::from_str(&output).unwrap();
        assert!(json["scm"].get("lookedUp").is_none());
    }

    #[test]
    fn test_format_fetch() {
        let mut response = FetchResponse::default();
        response
            .checkout_tags
            .insert("guava".to_string(), "v32.1.2".to_string());
        response
            .failures
            .insert("jersey".to_string(), "No tags found".to_string());

        let json: Value =
            serde_json::from_str(&JsonFormatter::new().format_fetch(&response).unwrap()).unwrap();
        assert_eq!(json["checkouts"]["guava"], "v32.1.2");
        assert_eq!(json["failures"]["jersey"], "No tags found");
    }

    #[test]
    fn test_format_build() {
        let mut response = BuildResponse::default();
        response.outcomes.insert(
            "guava".to_string(),
            BuildOutcome::Succeeded {
                jdk: "JAVA17_HOME".to_string(),
            },
        );
        response
            .outcomes
            .insert("jersey".to_string(), BuildOutcome::Failed);
        response.succeeded.insert("guava".to_string());
        response.failed.insert("jersey".to_string());
        response.last_jdk_used = Some("JAVA8_HOME".to_string());

        let json: Value =
            serde_json::from_str(&JsonFormatter::new().format_build(&response).unwrap()).unwrap();
        assert_eq!(json["outcomes"]["guava"]["status"], "Build OK");
        assert_eq!(json["outcomes"]["guava"]["jdk"], "JAVA17_HOME");
        assert_eq!(json["outcomes"]["jersey"]["status"], "Failed");
        assert!(json["outcomes"]["jersey"].get("jdk").is_none());
        assert_eq!(json["failed"], serde_json::json!(["jersey"]));
        assert_eq!(json["last_jdk_used"], "JAVA8_HOME");
    }
}
