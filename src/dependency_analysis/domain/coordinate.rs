use crate::shared::Result;
use serde::Serialize;
use std::fmt;

/// Maximum length of any single coordinate component
const MAX_COMPONENT_LENGTH: usize = 255;

/// The (groupId, artifactId, version) triple identifying a dependency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    group_id: String,
    artifact_id: String,
    version: String,
}

impl Coordinate {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }

    /// Parses a `group:artifact:version` string.
    pub fn parse(key: &str) -> Result<Self> {
        let parts: Vec<&str> = key.split(':').collect();
        if parts.len() != 3 {
            anyhow::bail!(
                "Invalid coordinate '{}': expected groupId:artifactId:version",
                key
            );
        }
        for (part, label) in parts.iter().zip(["groupId", "artifactId", "version"]) {
            if part.trim().is_empty() {
                anyhow::bail!("Invalid coordinate '{}': {} is empty", key, label);
            }
            if part.len() > MAX_COMPONENT_LENGTH {
                anyhow::bail!(
                    "Invalid coordinate '{}': {} is too long ({} bytes). Maximum allowed: {} bytes",
                    key,
                    label,
                    part.len(),
                    MAX_COMPONENT_LENGTH
                );
            }
        }
        Ok(Self::new(parts[0].trim(), parts[1].trim(), parts[2].trim()))
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// `groupId:artifactId`, the version-less identity used for selection.
    pub fn module_key(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }

    /// Repository-relative path of this artifact's POM, e.g.
    /// `org/apache/commons/commons-lang3/3.12.0/commons-lang3-3.12.0.pom`.
    pub fn pom_path(&self) -> String {
        format!(
            "{}/{}/{}/{}-{}.pom",
            self.group_id.replace('.', "/"),
            self.artifact_id,
            self.version,
            self.artifact_id,
            self.version
        )
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}
