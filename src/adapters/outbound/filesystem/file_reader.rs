use crate::ports::outbound::ProjectReader;
use crate::shared::error::DepSearchError;
use crate::shared::security::validate_regular_file;
use crate::shared::Result;
use std::fs;
use std::path::Path;

const GRADLE_WRAPPER_PROPERTIES: &str = "gradle/wrapper/gradle-wrapper.properties";

/// Reads a file after rejecting symbolic links, non-regular files and files
/// over the size limit.
pub(crate) fn read_checked_file(path: &Path, file_type: &str) -> Result<String> {
    validate_regular_file(path, file_type).map_err(|e| DepSearchError::FileReadError {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    fs::read_to_string(path).map_err(|e| {
        DepSearchError::FileReadError {
            path: path.to_path_buf(),
            details: format!("Failed to read {}: {}", file_type, e),
        }
        .into()
    })
}

/// FileSystemReader adapter for reading build descriptors from disk
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectReader for FileSystemReader {
    fn read_pom(&self, dir: &Path) -> Result<String> {
        read_checked_file(&dir.join("pom.xml"), "pom.xml")
    }

    fn read_gradle_wrapper_properties(&self, dir: &Path) -> Result<Option<String>> {
        let path = dir.join(GRADLE_WRAPPER_PROPERTIES);
        if !path.exists() {
            return Ok(None);
        }
        read_checked_file(&path, "gradle-wrapper.properties").map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_pom_success() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("pom.xml"), "<project/>").unwrap();

        let content = FileSystemReader::new().read_pom(temp_dir.path()).unwrap();
        assert_eq!(content, "<project/>");
    }

    #[test]
    fn test_read_pom_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let err = FileSystemReader::new().read_pom(temp_dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DepSearchError>(),
            Some(DepSearchError::FileReadError { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_read_pom_rejects_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("real.xml");
        fs::write(&target, "<project/>").unwrap();
        std::os::unix::fs::symlink(&target, temp_dir.path().join("pom.xml")).unwrap();

        let err = FileSystemReader::new().read_pom(temp_dir.path()).unwrap_err();
        assert!(err.to_string().contains("symbolic link"));
    }

    #[test]
    fn test_wrapper_properties_absent() {
        let temp_dir = TempDir::new().unwrap();
        let result = FileSystemReader::new()
            .read_gradle_wrapper_properties(temp_dir.path())
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_wrapper_properties_present() {
        let temp_dir = TempDir::new().unwrap();
        let wrapper_dir = temp_dir.path().join("gradle/wrapper");
        fs::create_dir_all(&wrapper_dir).unwrap();
        fs::write(
            wrapper_dir.join("gradle-wrapper.properties"),
            "distributionUrl=https\\://services.gradle.org/distributions/gradle-8.5-bin.zip\n",
        )
        .unwrap();

        let content = FileSystemReader::new()
            .read_gradle_wrapper_properties(temp_dir.path())
            .unwrap()
            .unwrap();
        assert!(content.contains("gradle-8.5"));
    }
}
