use dep_searcher::prelude::*;
use std::path::Path;

/// Mock ProjectReader serving fixed descriptor contents
#[derive(Default)]
pub struct MockProjectReader {
    pub pom: Option<String>,
    pub wrapper_properties: Option<String>,
}

impl MockProjectReader {
    pub fn with_pom(pom: &str) -> Self {
        Self {
            pom: Some(pom.to_string()),
            wrapper_properties: None,
        }
    }

    pub fn with_gradle_version(version: &str) -> Self {
        Self {
            pom: None,
            wrapper_properties: Some(format!(
                "distributionUrl=https\\://services.gradle.org/distributions/gradle-{}-bin.zip\n",
                version
            )),
        }
    }
}

impl ProjectReader for MockProjectReader {
    fn read_pom(&self, dir: &Path) -> Result<String> {
        self.pom
            .clone()
            .ok_or_else(|| anyhow::anyhow!("No pom.xml in {}", dir.display()))
    }

    fn read_gradle_wrapper_properties(&self, _dir: &Path) -> Result<Option<String>> {
        Ok(self.wrapper_properties.clone())
    }
}
