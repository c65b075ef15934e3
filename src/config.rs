//! Configuration file support for dep-searcher.
//!
//! Provides YAML-based configuration through `dep-searcher.config.yml`
//! files, and resolves the effective settings by layering the process
//! environment over the file.

use anyhow::{bail, Context};
use dep_searcher::adapters::outbound::network::{
    DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_MAVEN_CENTRAL_URL,
};
use dep_searcher::application::use_cases::{
    DEFAULT_CLONE_CONCURRENCY, DEFAULT_RESOLVE_CONCURRENCY,
};
use dep_searcher::dependency_analysis::domain::JavaVersion;
use dep_searcher::dependency_analysis::policies::ScmOverrides;
use dep_searcher::dependency_analysis::services::{JdkHomes, AMBIENT_JAVA_HOME};
use dep_searcher::shared::error::DepSearchError;
use dep_searcher::shared::Result;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILENAME: &str = "dep-searcher.config.yml";
const DEFAULT_REPOSITORIES_DIR: &str = "download_repo";
const MAVEN_HOME_VARIABLE: &str = "MAVEN_HOME";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub jdk: Option<JdkSection>,
    pub maven_home: Option<PathBuf>,
    pub repositories_dir: Option<PathBuf>,
    pub maven_central_url: Option<String>,
    pub local_repository: Option<PathBuf>,
    pub http_timeout_secs: Option<u64>,
    pub clone_concurrency: Option<usize>,
    pub resolve_concurrency: Option<usize>,
    /// artifactId (or artifactId prefix) → SCM URL
    pub scm_overrides: Option<BTreeMap<String, String>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// JDK installations, one per supported release.
#[derive(Debug, Deserialize, Default)]
pub struct JdkSection {
    pub java8_home: Option<PathBuf>,
    pub java11_home: Option<PathBuf>,
    pub java17_home: Option<PathBuf>,
    pub java21_home: Option<PathBuf>,
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl JdkSection {
    fn home(&self, version: JavaVersion) -> Option<&PathBuf> {
        match version {
            JavaVersion::Java8 => self.java8_home.as_ref(),
            JavaVersion::Java11 => self.java11_home.as_ref(),
            JavaVersion::Java17 => self.java17_home.as_ref(),
            JavaVersion::Java21 => self.java21_home.as_ref(),
        }
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    eprintln!("📄 Auto-discovered config file: {}", config_path.display());
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.http_timeout_secs == Some(0) {
        bail!(
            "Invalid config: http_timeout_secs must be greater than 0.\n\n\
             💡 Hint: Remove the key to use the default of {} seconds.",
            DEFAULT_HTTP_TIMEOUT_SECS
        );
    }

    for (key, value) in [
        ("clone_concurrency", config.clone_concurrency),
        ("resolve_concurrency", config.resolve_concurrency),
    ] {
        if value == Some(0) {
            bail!(
                "Invalid config: {} must be greater than 0.\n\n\
                 💡 Hint: Use 1 to run one operation at a time.",
                key
            );
        }
    }

    if let Some(ref overrides) = config.scm_overrides {
        for (artifact, url) in overrides {
            if artifact.trim().is_empty() || url.trim().is_empty() {
                bail!(
                    "Invalid config: scm_overrides entry '{}' must have a non-empty artifactId and URL.\n\n\
                     💡 Hint: Each entry maps an artifactId (or prefix) to a repository URL, e.g. \"helidon: https://github.com/helidon-io/helidon\".",
                    artifact
                );
            }
        }
    }

    if let Some(ref url) = config.maven_central_url {
        if !url.starts_with("https://") && !url.starts_with("http://") {
            bail!(
                "Invalid config: maven_central_url must be an http(s) URL, got '{}'.",
                url
            );
        }
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let nested = config
        .jdk
        .iter()
        .flat_map(|jdk| jdk.unknown_fields.keys().map(|k| format!("jdk.{}", k)));
    for key in config.unknown_fields.keys().cloned().chain(nested) {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Effective settings: config file values with the environment layered on top.
#[derive(Debug, Clone)]
pub struct Settings {
    pub jdk_homes: JdkHomes,
    pub maven_home: Option<PathBuf>,
    pub repositories_dir: PathBuf,
    pub maven_central_url: String,
    pub local_repository: Option<PathBuf>,
    pub http_timeout: Duration,
    pub clone_concurrency: usize,
    pub resolve_concurrency: usize,
    pub scm_overrides: ScmOverrides,
}

impl Settings {
    /// `env` looks up an environment variable; empty values count as unset.
    pub fn resolve(config: ConfigFile, env: impl Fn(&str) -> Option<String>) -> Self {
        let env_path = |key: &str| {
            env(key)
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
        };

        let jdk = config.jdk.unwrap_or_default();
        let configured: BTreeMap<JavaVersion, PathBuf> = JavaVersion::PRIORITY
            .iter()
            .filter_map(|version| {
                env_path(version.home_variable())
                    .or_else(|| jdk.home(*version).cloned())
                    .map(|home| (*version, home))
            })
            .collect();

        Self {
            jdk_homes: JdkHomes::new(configured, env_path(AMBIENT_JAVA_HOME)),
            maven_home: env_path(MAVEN_HOME_VARIABLE).or(config.maven_home),
            repositories_dir: config
                .repositories_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_REPOSITORIES_DIR)),
            maven_central_url: config
                .maven_central_url
                .unwrap_or_else(|| DEFAULT_MAVEN_CENTRAL_URL.to_string()),
            local_repository: config.local_repository.or_else(|| {
                dep_searcher::adapters::outbound::network::MavenCentralRepository::default_local_repository()
            }),
            http_timeout: Duration::from_secs(
                config.http_timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
            ),
            clone_concurrency: config.clone_concurrency.unwrap_or(DEFAULT_CLONE_CONCURRENCY),
            resolve_concurrency: config
                .resolve_concurrency
                .unwrap_or(DEFAULT_RESOLVE_CONCURRENCY),
            scm_overrides: ScmOverrides::with_entries(config.scm_overrides.unwrap_or_default()),
        }
    }

    pub fn require_maven_home(&self) -> Result<&Path> {
        self.maven_home.as_deref().ok_or_else(|| {
            DepSearchError::EnvironmentMisconfigured {
                variable: MAVEN_HOME_VARIABLE.to_string(),
                reason: "MAVEN_HOME is not set".to_string(),
                hint: "Set MAVEN_HOME or maven_home in dep-searcher.config.yml".to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.yml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
jdk:
  java8_home: /opt/jdk8
  java17_home: /opt/jdk17
maven_home: /opt/maven
repositories_dir: /work/repos
http_timeout_secs: 5
clone_concurrency: 2
scm_overrides:
  my-artifact: https://github.com/example/my-artifact
"#,
        );

        let config = load_config_from_path(&path).unwrap();
        let jdk = config.jdk.as_ref().unwrap();
        assert_eq!(jdk.java8_home, Some(PathBuf::from("/opt/jdk8")));
        assert!(jdk.java11_home.is_none());
        assert_eq!(config.maven_home, Some(PathBuf::from("/opt/maven")));
        assert_eq!(config.http_timeout_secs, Some(5));
        assert_eq!(config.clone_concurrency, Some(2));
        assert_eq!(
            config.scm_overrides.unwrap().get("my-artifact").map(String::as_str),
            Some("https://github.com/example/my-artifact")
        );
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "resolve_concurrency: 3\n").unwrap();

        let config = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.resolve_concurrency, Some(3));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config_from_path(Path::new("/nonexistent/config.yml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "invalid: yaml: [[[broken");
        let err = load_config_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_zero_values_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "http_timeout_secs: 0\n");
        assert!(load_config_from_path(&path)
            .unwrap_err()
            .to_string()
            .contains("http_timeout_secs must be greater than 0"));

        let path = write_config(&dir, "clone_concurrency: 0\n");
        assert!(load_config_from_path(&path)
            .unwrap_err()
            .to_string()
            .contains("clone_concurrency must be greater than 0"));
    }

    #[test]
    fn test_empty_override_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "scm_overrides:\n  guava: \"\"\n");
        let err = load_config_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("scm_overrides entry 'guava'"));
    }

    #[test]
    fn test_unknown_fields_are_collected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "unknown_key: 1\njdk:\n  java9_home: /opt/jdk9\n");
        let config = load_config_from_path(&path).unwrap();
        assert!(config.unknown_fields.contains_key("unknown_key"));
        assert!(config
            .jdk
            .unwrap()
            .unknown_fields
            .contains_key("java9_home"));
    }

    #[test]
    fn test_environment_overrides_file() {
        let config = ConfigFile {
            jdk: Some(JdkSection {
                java11_home: Some(PathBuf::from("/file/jdk11")),
                java17_home: Some(PathBuf::from("/file/jdk17")),
                ..Default::default()
            }),
            maven_home: Some(PathBuf::from("/file/maven")),
            ..Default::default()
        };
        let env = |key: &str| match key {
            "JAVA17_HOME" => Some("/env/jdk17".to_string()),
            "JAVA21_HOME" => Some("/env/jdk21".to_string()),
            "JAVA_HOME" => Some("/env/default".to_string()),
            "MAVEN_HOME" => Some("  ".to_string()),
            _ => None,
        };

        let settings = Settings::resolve(config, env);
        let homes = &settings.jdk_homes;
        assert_eq!(homes.configured(JavaVersion::Java11), Some(Path::new("/file/jdk11")));
        assert_eq!(homes.configured(JavaVersion::Java17), Some(Path::new("/env/jdk17")));
        assert_eq!(homes.configured(JavaVersion::Java21), Some(Path::new("/env/jdk21")));
        assert_eq!(homes.configured(JavaVersion::Java8), None);
        assert_eq!(homes.ambient(), Some(Path::new("/env/default")));
        assert_eq!(settings.maven_home, Some(PathBuf::from("/file/maven")));
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve(ConfigFile::default(), |_| None);
        assert_eq!(settings.repositories_dir, PathBuf::from("download_repo"));
        assert_eq!(settings.maven_central_url, "https://repo1.maven.org/maven2");
        assert_eq!(settings.http_timeout, Duration::from_secs(3));
        assert_eq!(settings.clone_concurrency, DEFAULT_CLONE_CONCURRENCY);
        assert!(settings.require_maven_home().is_err());
        assert!(settings.scm_overrides.lookup("helidon-webserver").is_some());
    }
}
