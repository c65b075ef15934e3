//! Reading the parts of a POM this tool cares about.

use super::xml::{child_element, child_elements, child_text};
use crate::dependency_analysis::domain::{Coordinate, JavaRequirement};
use crate::shared::Result;

const FORGE_HOSTS: [&str; 2] = ["github.com", "gitlab.com"];
const COMPILER_PLUGIN: &str = "maven-compiler-plugin";
const COMPILER_PROPERTIES: [&str; 4] = [
    "maven.compiler.source",
    "maven.compiler.target",
    "maven.compiler.release",
    "java.version",
];
const COMPILER_SETTINGS: [&str; 3] = ["source", "target", "release"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScmSection {
    pub url: Option<String>,
    pub connection: Option<String>,
    pub developer_connection: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PomDescriptor {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub scm: ScmSection,
    pub parent: Option<Coordinate>,
    pub modules: Vec<String>,
}

fn is_placeholder(value: &str) -> bool {
    value.contains("${")
}

impl PomDescriptor {
    pub fn parse(xml: &str) -> Result<Self> {
        let document = roxmltree::Document::parse(xml)
            .map_err(|e| anyhow::anyhow!("Invalid POM XML: {}", e))?;
        let project = document.root_element();
        if project.tag_name().name() != "project" {
            anyhow::bail!(
                "Invalid POM: root element is <{}>, expected <project>",
                project.tag_name().name()
            );
        }

        let scm = child_element(&project, "scm")
            .map(|scm| ScmSection {
                url: child_text(&scm, "url"),
                connection: child_text(&scm, "connection"),
                developer_connection: child_text(&scm, "developerConnection"),
            })
            .unwrap_or_default();

        let parent = child_element(&project, "parent").and_then(|parent| {
            Some(Coordinate::new(
                child_text(&parent, "groupId")?,
                child_text(&parent, "artifactId")?,
                child_text(&parent, "version")?,
            ))
        });

        let modules = child_element(&project, "modules")
            .map(|modules| {
                child_elements(&modules, "module")
                    .filter_map(|m| m.text().map(str::trim).map(str::to_string))
                    .filter(|m| !m.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            group_id: child_text(&project, "groupId"),
            artifact_id: child_text(&project, "artifactId"),
            version: child_text(&project, "version"),
            name: child_text(&project, "name"),
            url: child_text(&project, "url"),
            scm,
            parent,
            modules,
        })
    }

    /// First usable SCM value in `url`, `connection`, `developerConnection`
    /// order. Values still containing `${...}` are skipped.
    pub fn scm_candidate(&self) -> Option<&str> {
        [
            &self.scm.url,
            &self.scm.connection,
            &self.scm.developer_connection,
        ]
        .into_iter()
        .filter_map(|value| value.as_deref())
        .find(|value| !is_placeholder(value))
    }

    /// The project homepage, if it is hosted on a known forge.
    pub fn forge_homepage(&self) -> Option<&str> {
        self.url
            .as_deref()
            .filter(|url| !is_placeholder(url))
            .filter(|url| FORGE_HOSTS.iter().any(|host| url.contains(host)))
    }

    /// Display name: `<name>`, else `<artifactId>`.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().or(self.artifact_id.as_deref())
    }
}

/// Highest Java release required by an effective POM.
///
/// `mvn help:effective-pom` prints the document inside log noise, so the
/// `<project>` (or multi-module `<projects>`) element is cut out first.
/// Compiler properties and every `maven-compiler-plugin` configuration are
/// inspected; the most restrictive value wins.
pub fn detect_java_requirement(effective_pom_output: &str) -> Option<JavaRequirement> {
    let xml = isolate_project_xml(effective_pom_output)?;
    let document = roxmltree::Document::parse(xml).ok()?;

    let mut detected: Vec<JavaRequirement> = Vec::new();

    for properties in document
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "properties")
    {
        for key in COMPILER_PROPERTIES {
            if let Some(value) = child_text(&properties, key) {
                detected.extend(JavaRequirement::parse(&value));
            }
        }
    }

    for plugin in document
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "plugin")
        .filter(|n| child_text(n, "artifactId").as_deref() == Some(COMPILER_PLUGIN))
    {
        for configuration in plugin
            .descendants()
            .filter(|n| n.is_element() && n.tag_name().name() == "configuration")
        {
            for key in COMPILER_SETTINGS {
                if let Some(value) = child_text(&configuration, key) {
                    detected.extend(JavaRequirement::parse(&value));
                }
            }
        }
    }

    detected.into_iter().max()
}

fn isolate_project_xml(output: &str) -> Option<&str> {
    let (open, close) = if output.contains("<projects") {
        ("<projects", "</projects>")
    } else {
        ("<project", "</project>")
    };
    let start = output.find(open)?;
    let end = output.rfind(close)? + close.len();
    (end > start).then(|| &output[start..end])
}
