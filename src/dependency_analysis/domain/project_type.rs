use serde::Serialize;
use std::fmt;
use std::path::Path;

const GRADLE_MARKERS: [&str; 4] = [
    "build.gradle",
    "build.gradle.kts",
    "settings.gradle",
    "settings.gradle.kts",
];

/// Build system of a project directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Maven,
    Gradle,
    Unknown,
}

impl ProjectType {
    /// `pom.xml` wins over any Gradle marker when both are present.
    pub fn detect(project_dir: &Path) -> Self {
        if project_dir.join("pom.xml").is_file() {
            ProjectType::Maven
        } else if GRADLE_MARKERS
            .iter()
            .any(|marker| project_dir.join(marker).is_file())
        {
            ProjectType::Gradle
        } else {
            ProjectType::Unknown
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectType::Maven => write!(f, "Maven"),
            ProjectType::Gradle => write!(f, "Gradle"),
            ProjectType::Unknown => write!(f, "Unknown"),
        }
    }
}
