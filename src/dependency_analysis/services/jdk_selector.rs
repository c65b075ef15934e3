use crate::dependency_analysis::domain::{JavaRequirement, JavaVersion};
use crate::shared::error::DepSearchError;
use crate::shared::Result;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

pub const AMBIENT_JAVA_HOME: &str = "JAVA_HOME";

/// One JDK installation to try.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JdkCandidate {
    /// `JAVA17_HOME`, `JAVA_HOME`, ...
    pub label: String,
    pub home: PathBuf,
}

impl JdkCandidate {
    pub fn new(label: impl Into<String>, home: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            home: home.into(),
        }
    }
}

impl fmt::Display for JdkCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.label, self.home.display())
    }
}

/// Configured JDK installations plus the ambient `JAVA_HOME`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JdkHomes {
    configured: BTreeMap<JavaVersion, PathBuf>,
    ambient: Option<PathBuf>,
}

impl JdkHomes {
    pub fn new(configured: BTreeMap<JavaVersion, PathBuf>, ambient: Option<PathBuf>) -> Self {
        Self {
            configured,
            ambient,
        }
    }

    pub fn configured(&self, version: JavaVersion) -> Option<&Path> {
        self.configured.get(&version).map(PathBuf::as_path)
    }

    pub fn configured_homes(&self) -> impl Iterator<Item = (JavaVersion, &Path)> {
        self.configured.iter().map(|(v, p)| (*v, p.as_path()))
    }

    pub fn ambient(&self) -> Option<&Path> {
        self.ambient.as_deref()
    }

    /// Fails on the first configured home that is not a JDK layout
    /// (`bin/` and `lib/` present), or when no JDK is known at all.
    pub fn validate(&self) -> Result<()> {
        let labelled = self
            .configured
            .iter()
            .map(|(version, home)| (version.home_variable(), home))
            .chain(self.ambient.iter().map(|home| (AMBIENT_JAVA_HOME, home)));

        let mut any = false;
        for (variable, home) in labelled {
            any = true;
            for required in ["bin", "lib"] {
                if !home.join(required).is_dir() {
                    return Err(DepSearchError::EnvironmentMisconfigured {
                        variable: variable.to_string(),
                        reason: format!(
                            "{} has no {}/ directory",
                            home.display(),
                            required
                        ),
                        hint: format!("Point {} at the root of a JDK installation", variable),
                    }
                    .into());
                }
            }
        }

        if !any {
            return Err(DepSearchError::EnvironmentMisconfigured {
                variable: AMBIENT_JAVA_HOME.to_string(),
                reason: "no JDK is configured".to_string(),
                hint: "Set JAVA_HOME or one of JAVA8_HOME, JAVA11_HOME, JAVA17_HOME, JAVA21_HOME"
                    .to_string(),
            }
            .into());
        }
        Ok(())
    }
}

/// Ordered JDK candidates for one build or tree extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JdkPlan {
    /// JDK matching the requirement read from the project, if any
    pub detected: Option<JdkCandidate>,
    /// Everything else, in the order it should be tried
    pub fallbacks: Vec<JdkCandidate>,
}

impl JdkPlan {
    pub fn all(&self) -> impl Iterator<Item = &JdkCandidate> {
        self.detected.iter().chain(self.fallbacks.iter())
    }

    pub fn len(&self) -> usize {
        self.fallbacks.len() + usize::from(self.detected.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct JdkSelector {
    homes: JdkHomes,
}

impl JdkSelector {
    pub fn new(homes: JdkHomes) -> Self {
        Self { homes }
    }

    pub fn homes(&self) -> &JdkHomes {
        &self.homes
    }

    /// JDK resolved for a requirement. Requirements beyond the newest
    /// configurable release, or without a configured home, use the ambient JDK.
    pub fn resolve(&self, requirement: JavaRequirement) -> Option<JdkCandidate> {
        requirement
            .configured_version()
            .and_then(|version| {
                self.homes
                    .configured(version)
                    .map(|home| JdkCandidate::new(version.home_variable(), home))
            })
            .or_else(|| self.ambient())
    }

    pub fn ambient(&self) -> Option<JdkCandidate> {
        self.homes
            .ambient()
            .map(|home| JdkCandidate::new(AMBIENT_JAVA_HOME, home))
    }

    /// Detected JDK first, then the ambient one, then the configured JDKs
    /// newest first. A home appears once, at its first position.
    pub fn plan(&self, requirement: Option<JavaRequirement>) -> JdkPlan {
        let detected = requirement.and_then(|r| self.resolve(r));

        let mut seen: Vec<PathBuf> = detected.iter().map(|c| c.home.clone()).collect();
        let mut fallbacks = Vec::new();
        let ordered = self.ambient().into_iter().chain(
            JavaVersion::PRIORITY.iter().filter_map(|version| {
                self.homes
                    .configured(*version)
                    .map(|home| JdkCandidate::new(version.home_variable(), home))
            }),
        );
        for candidate in ordered {
            if !seen.contains(&candidate.home) {
                seen.push(candidate.home.clone());
                fallbacks.push(candidate);
            }
        }

        JdkPlan {
            detected,
            fallbacks,
        }
    }
}
