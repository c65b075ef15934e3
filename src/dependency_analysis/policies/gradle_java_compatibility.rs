use crate::dependency_analysis::domain::JavaRequirement;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static DISTRIBUTION_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"gradle-(\d+)\.(\d+)").expect("Failed to compile Gradle distribution regex")
});

/// Gradle release declared by a wrapper's `distributionUrl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct GradleVersion {
    pub major: u32,
    pub minor: u32,
}

impl GradleVersion {
    /// Assumed when a project ships no wrapper.
    pub const DEFAULT: GradleVersion = GradleVersion { major: 8, minor: 0 };

    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Reads `distributionUrl` from `gradle-wrapper.properties` content.
    pub fn from_wrapper_properties(content: &str) -> Option<Self> {
        let url = content.lines().find_map(|line| {
            let (key, value) = line.split_once('=')?;
            (key.trim() == "distributionUrl").then_some(value.trim())
        })?;
        let captures = DISTRIBUTION_VERSION.captures(url)?;
        Some(Self::new(captures[1].parse().ok()?, captures[2].parse().ok()?))
    }

    /// Wrappers older than 8.0 need the legacy CycloneDX plugin line.
    pub fn needs_legacy_cyclonedx(self) -> bool {
        self.major < 8
    }
}

impl fmt::Display for GradleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Java release a given Gradle wrapper is expected to run on.
pub fn java_requirement_for_gradle(version: GradleVersion) -> JavaRequirement {
    let major = if version >= GradleVersion::new(8, 5) {
        21
    } else if version.major >= 7 {
        17
    } else if version.major >= 5 {
        11
    } else {
        8
    };
    JavaRequirement::new(major)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_wrapper_properties() {
        let content = "distributionBase=GRADLE_USER_HOME\n\
                       distributionUrl=https\\://services.gradle.org/distributions/gradle-7.6.1-bin.zip\n\
                       zipStorePath=wrapper/dists\n";
        assert_eq!(
            GradleVersion::from_wrapper_properties(content),
            Some(GradleVersion::new(7, 6))
        );
    }

    #[test]
    fn test_from_wrapper_properties_missing_url() {
        assert_eq!(GradleVersion::from_wrapper_properties("zipStorePath=x"), None);
    }

    #[test]
    fn test_java_requirement_table() {
        let major = |a, b| java_requirement_for_gradle(GradleVersion::new(a, b)).major();
        assert_eq!(major(8, 5), 21);
        assert_eq!(major(9, 0), 21);
        assert_eq!(major(8, 4), 17);
        assert_eq!(major(7, 0), 17);
        assert_eq!(major(6, 9), 11);
        assert_eq!(major(5, 0), 11);
        assert_eq!(major(4, 10), 8);
    }

    #[test]
    fn test_legacy_plugin_threshold() {
        assert!(GradleVersion::new(7, 6).needs_legacy_cyclonedx());
        assert!(!GradleVersion::new(8, 0).needs_legacy_cyclonedx());
        assert!(!GradleVersion::DEFAULT.needs_legacy_cyclonedx());
    }
}
