use std::collections::BTreeMap;

/// Artifacts whose published POMs point at a wrong or dead repository.
const BUILT_IN_OVERRIDES: [(&str, &str); 6] = [
    (
        "hibernate-validator-cdi",
        "http://github.com/hibernate/hibernate-validator/",
    ),
    ("rest-assured", "http://github.com/rest-assured/rest-assured/"),
    (
        "microprofile-openapi-api",
        "https://github.com/eclipse/microprofile-open-api/",
    ),
    (
        "jersey-media-json-binding",
        "https://github.com/eclipse-ee4j/jersey/",
    ),
    (
        "microprofile-metrics-api",
        "https://github.com/eclipse/microprofile-metrics",
    ),
    ("helidon", "https://github.com/helidon-io/helidon"),
];

/// Manual SCM URL corrections keyed by artifactId.
///
/// An exact artifactId match wins; otherwise the longest key that is a
/// prefix of the artifactId applies (`helidon` covers `helidon-webserver`).
/// A matching entry replaces whatever URL was resolved.
#[derive(Debug, Clone)]
pub struct ScmOverrides {
    entries: BTreeMap<String, String>,
}

impl ScmOverrides {
    /// Built-in table extended (and possibly overridden) by `extra`.
    pub fn with_entries<I>(extra: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut overrides = Self::default();
        overrides.entries.extend(extra);
        overrides
    }

    pub fn lookup(&self, artifact_id: &str) -> Option<&str> {
        if let Some(url) = self.entries.get(artifact_id) {
            return Some(url);
        }
        self.entries
            .iter()
            .filter(|(key, _)| artifact_id.starts_with(key.as_str()))
            .max_by_key(|(key, _)| key.len())
            .map(|(_, url)| url.as_str())
    }

    /// Returns the override for `artifact_id` if there is one, else `resolved`.
    pub fn apply(&self, artifact_id: &str, resolved: Option<String>) -> Option<String> {
        match self.lookup(artifact_id) {
            Some(url) => Some(url.to_string()),
            None => resolved,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ScmOverrides {
    fn default() -> Self {
        Self {
            entries: BUILT_IN_OVERRIDES
                .iter()
                .map(|(artifact, url)| (artifact.to_string(), url.to_string()))
                .collect(),
        }
    }
}
