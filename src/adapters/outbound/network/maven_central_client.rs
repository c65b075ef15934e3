use crate::dependency_analysis::domain::Coordinate;
use crate::ports::outbound::DescriptorRepository;
use crate::shared::security::{validate_coordinate_component, validate_regular_file};
use crate::shared::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MAVEN_CENTRAL_URL: &str = "https://repo1.maven.org/maven2";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 3;

/// DescriptorRepository adapter reading POMs from the local Maven
/// repository first and Maven Central second.
///
/// A 404 from the registry is a normal "no descriptor" answer; other
/// failures are retried with a short backoff before being returned.
pub struct MavenCentralRepository {
    client: reqwest::Client,
    base_url: String,
    local_repository: Option<PathBuf>,
    max_retries: u32,
}

impl MavenCentralRepository {
    pub fn new(
        base_url: impl Into<String>,
        local_repository: Option<PathBuf>,
        timeout: Duration,
    ) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .user_agent(format!("dep-searcher/{}", version))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            local_repository,
            max_retries: 3,
        })
    }

    /// `~/.m2/repository` when a home directory is known.
    pub fn default_local_repository() -> Option<PathBuf> {
        std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .map(|home| PathBuf::from(home).join(".m2").join("repository"))
    }

    fn validate(coordinate: &Coordinate) -> Result<()> {
        validate_coordinate_component(coordinate.group_id(), "groupId")?;
        validate_coordinate_component(coordinate.artifact_id(), "artifactId")?;
        validate_coordinate_component(coordinate.version(), "version")?;
        Ok(())
    }

    fn read_local(&self, coordinate: &Coordinate) -> Option<String> {
        let path = self.local_repository.as_ref()?.join(coordinate.pom_path());
        validate_regular_file(&path, "cached POM").ok()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                tracing::trace!(%coordinate, path = %path.display(), "POM found in local repository");
                Some(content)
            }
            Err(e) => {
                tracing::debug!(%coordinate, error = %e, "unreadable POM in local repository");
                None
            }
        }
    }

    fn remote_url(&self, coordinate: &Coordinate) -> String {
        let group_path = coordinate
            .group_id()
            .split('.')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        let artifact = urlencoding::encode(coordinate.artifact_id());
        let version = urlencoding::encode(coordinate.version());
        format!(
            "{}/{}/{}/{}/{}-{}.pom",
            self.base_url, group_path, artifact, version, artifact, version
        )
    }

    async fn fetch_with_retry(&self, coordinate: &Coordinate) -> Result<Option<String>> {
        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            match self.fetch_remote(coordinate).await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    tracing::debug!(%coordinate, attempt, error = %e, "descriptor fetch failed");
                    last_error = Some(e);
                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
                    }
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| anyhow::anyhow!("Descriptor fetch for {} never ran", coordinate)))
    }

    async fn fetch_remote(&self, coordinate: &Coordinate) -> Result<Option<String>> {
        let url = self.remote_url(coordinate);
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            anyhow::bail!("Registry returned status code {} for {}", response.status(), url);
        }

        Ok(Some(response.text().await?))
    }
}

#[async_trait]
impl DescriptorRepository for MavenCentralRepository {
    async fn fetch_descriptor(&self, coordinate: &Coordinate) -> Result<Option<String>> {
        Self::validate(coordinate)?;

        if let Some(content) = self.read_local(coordinate) {
            return Ok(Some(content));
        }

        self.fetch_with_retry(coordinate).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repository(local: Option<PathBuf>) -> MavenCentralRepository {
        MavenCentralRepository::new(
            "https://repo.example.org/maven2/",
            local,
            Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        )
        .unwrap()
    }

    #[test]
    fn test_remote_url_layout() {
        let coordinate = Coordinate::new("org.apache.commons", "commons-lang3", "3.12.0");
        assert_eq!(
            repository(None).remote_url(&coordinate),
            "https://repo.example.org/maven2/org/apache/commons/commons-lang3/3.12.0/commons-lang3-3.12.0.pom"
        );
    }

    #[tokio::test]
    async fn test_local_repository_is_checked_first() {
        let temp_dir = TempDir::new().unwrap();
        let coordinate = Coordinate::new("com.example", "lib", "1.0");
        let pom = temp_dir.path().join(coordinate.pom_path());
        std::fs::create_dir_all(pom.parent().unwrap()).unwrap();
        std::fs::write(&pom, "<project/>").unwrap();

        let content = repository(Some(temp_dir.path().to_path_buf()))
            .fetch_descriptor(&coordinate)
            .await
            .unwrap();
        assert_eq!(content.as_deref(), Some("<project/>"));
    }

    #[tokio::test]
    async fn test_rejects_unsafe_coordinates() {
        let coordinate = Coordinate::new("../etc", "passwd", "1.0");
        assert!(repository(None).fetch_descriptor(&coordinate).await.is_err());
    }
}
