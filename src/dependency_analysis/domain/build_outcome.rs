use serde::{Serialize, Serializer};
use std::fmt;

/// Result of building one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Build passed; `jdk` is the label of the JDK that was used
    /// (`JAVA17_HOME`, `JAVA_HOME`, ...).
    Succeeded { jdk: String },
    /// Every JDK candidate was tried and none produced a passing build
    Failed,
    /// The repository could not be built at all (no build file, unreadable tree)
    InternalError,
}

impl BuildOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, BuildOutcome::Succeeded { .. })
    }

    pub fn jdk(&self) -> Option<&str> {
        match self {
            BuildOutcome::Succeeded { jdk } => Some(jdk),
            _ => None,
        }
    }
}

impl fmt::Display for BuildOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildOutcome::Succeeded { .. } => write!(f, "Build OK"),
            BuildOutcome::Failed => write!(f, "Failed"),
            BuildOutcome::InternalError => write!(f, "Internal Error"),
        }
    }
}

impl Serialize for BuildOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_strings() {
        let ok = BuildOutcome::Succeeded {
            jdk: "JAVA17_HOME".to_string(),
        };
        assert_eq!(ok.to_string(), "Build OK");
        assert_eq!(BuildOutcome::Failed.to_string(), "Failed");
        assert_eq!(BuildOutcome::InternalError.to_string(), "Internal Error");
        assert_eq!(ok.jdk(), Some("JAVA17_HOME"));
        assert!(ok.is_success());
        assert!(!BuildOutcome::Failed.is_success());
    }

    #[test]
    fn test_serializes_as_display_string() {
        let json = serde_json::to_string(&BuildOutcome::InternalError).unwrap();
        assert_eq!(json, "\"Internal Error\"");
    }
}
