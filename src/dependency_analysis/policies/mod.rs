mod gradle_java_compatibility;
mod scm_overrides;

pub use gradle_java_compatibility::{java_requirement_for_gradle, GradleVersion};
pub use scm_overrides::ScmOverrides;
