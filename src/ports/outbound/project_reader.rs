use crate::shared::Result;
use std::path::Path;

/// ProjectReader port for the build descriptors of a project on disk
pub trait ProjectReader {
    /// Reads `<dir>/pom.xml`.
    ///
    /// # Errors
    /// Returns an error if the file is missing, is a symbolic link or is
    /// too large.
    fn read_pom(&self, dir: &Path) -> Result<String>;

    /// Reads `gradle/wrapper/gradle-wrapper.properties`, `None` if absent.
    fn read_gradle_wrapper_properties(&self, dir: &Path) -> Result<Option<String>>;
}
