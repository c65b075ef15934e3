//! CycloneDX BOM readers (JSON from the Gradle plugin, XML from the Maven plugin).

use super::scm_url::convert_scm;
use super::xml::{child_elements, child_text};
use crate::dependency_analysis::domain::scope::scope_for_bom_component;
use crate::dependency_analysis::domain::{Coordinate, DependencyNode, SCM_URL_NOT_FOUND};
use crate::dependency_analysis::policies::ScmOverrides;
use crate::shared::error::DepSearchError;
use crate::shared::Result;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
struct Bom {
    #[serde(default)]
    components: Vec<BomComponent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BomComponent {
    #[serde(default)]
    group: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    external_references: Vec<ExternalReference>,
}

#[derive(Debug, Deserialize)]
struct ExternalReference {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    url: String,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn normalized_scm(raw: Option<&str>, artifact_id: &str, overrides: &ScmOverrides) -> Option<String> {
    overrides.apply(artifact_id, raw.map(convert_scm))
}

/// Reads the `components` of a CycloneDX JSON BOM as flat dependency nodes.
///
/// Components missing a group or a name are skipped. The first non-empty
/// `vcs` external reference becomes the SCM URL; components without one get
/// the not-found sentinel unless an override applies.
pub fn parse_json_bom(content: &str, overrides: &ScmOverrides) -> Result<Vec<DependencyNode>> {
    let bom: Bom = serde_json::from_str(content).map_err(|e| DepSearchError::ToolOutputParse {
        tool: "CycloneDX".to_string(),
        details: e.to_string(),
    })?;

    let nodes = bom
        .components
        .into_iter()
        .filter_map(|component| {
            let group = non_blank(component.group)?;
            let name = non_blank(component.name)?;
            let vcs = component
                .external_references
                .iter()
                .find(|r| r.kind == "vcs" && !r.url.trim().is_empty())
                .map(|r| r.url.as_str());
            let scm_url = normalized_scm(vcs, &name, overrides)
                .unwrap_or_else(|| SCM_URL_NOT_FOUND.to_string());

            Some(
                DependencyNode::new(Coordinate::new(
                    group,
                    name,
                    component.version.unwrap_or_default(),
                ))
                .with_scope(Some(scope_for_bom_component(component.scope.as_deref())))
                .with_scm_url(Some(scm_url)),
            )
        })
        .collect();

    Ok(nodes)
}

fn inside_metadata(node: roxmltree::Node<'_, '_>) -> bool {
    node.ancestors()
        .any(|ancestor| ancestor.tag_name().name() == "metadata")
}

/// Collects coordinate → SCM URL pairs from an aggregate CycloneDX XML BOM.
///
/// Only components that declare a `vcs` reference are returned; the project
/// component under `<metadata>` is ignored.
pub fn parse_xml_bom_scm_urls(
    content: &str,
    overrides: &ScmOverrides,
) -> Result<HashMap<Coordinate, String>> {
    let document =
        roxmltree::Document::parse(content).map_err(|e| DepSearchError::ToolOutputParse {
            tool: "CycloneDX".to_string(),
            details: e.to_string(),
        })?;

    let mut urls = HashMap::new();
    for component in document
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "component")
        .filter(|n| !inside_metadata(*n))
    {
        let (Some(group), Some(name), Some(version)) = (
            child_text(&component, "group"),
            child_text(&component, "name"),
            child_text(&component, "version"),
        ) else {
            continue;
        };

        let vcs = child_elements(&component, "externalReferences")
            .flat_map(|refs| child_elements(&refs, "reference").collect::<Vec<_>>())
            .filter(|r| r.attribute("type") == Some("vcs"))
            .find_map(|r| child_text(&r, "url"));

        if let Some(url) = vcs.and_then(|raw| normalized_scm(Some(&raw), &name, overrides)) {
            urls.insert(Coordinate::new(group, name, version), url);
        }
    }
    Ok(urls)
}
