use crate::dependency_analysis::domain::DependencyNode;
use crate::shared::error::DepSearchError;
use crate::shared::Result;
use std::sync::atomic::{AtomicBool, Ordering};

/// Maximum number of selection patterns accepted on one command line
const MAX_SELECTION_PATTERNS: usize = 64;

/// Maximum length of a single selection pattern
const MAX_PATTERN_LENGTH: usize = 255;

/// Selects dependencies by wildcard pattern.
///
/// A pattern containing `:` is matched against `groupId:artifactId`,
/// otherwise against the artifactId alone. `*` matches any run of
/// characters and the whole identifier must match.
#[derive(Debug)]
pub struct SelectionFilter {
    patterns: Vec<SelectionPattern>,
}

impl SelectionFilter {
    pub fn new(patterns: Vec<String>) -> Result<Self> {
        if patterns.len() > MAX_SELECTION_PATTERNS {
            return Err(invalid(format!(
                "Too many selection patterns: {} (maximum: {})",
                patterns.len(),
                MAX_SELECTION_PATTERNS
            )));
        }

        let patterns = patterns
            .into_iter()
            .map(SelectionPattern::new)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// An empty filter selects nothing on its own; callers decide what an
    /// empty selection means.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn matches(&self, node: &DependencyNode) -> bool {
        // evaluate every pattern so unmatched ones can be reported
        self.patterns
            .iter()
            .fold(false, |any, pattern| pattern.matches(node) || any)
    }

    /// Patterns that have not matched any node so far.
    pub fn unmatched_patterns(&self) -> Vec<String> {
        self.patterns
            .iter()
            .filter(|p| !p.matched.load(Ordering::Relaxed))
            .map(|p| p.original.clone())
            .collect()
    }
}

#[derive(Debug)]
struct SelectionPattern {
    original: String,
    qualified: bool,
    parts: Vec<String>,
    matched: AtomicBool,
}

impl SelectionPattern {
    fn new(pattern: String) -> Result<Self> {
        validate_pattern(&pattern)?;
        Ok(Self {
            qualified: pattern.contains(':'),
            parts: pattern.split('*').map(str::to_string).collect(),
            original: pattern,
            matched: AtomicBool::new(false),
        })
    }

    fn matches(&self, node: &DependencyNode) -> bool {
        let subject = if self.qualified {
            node.coordinate().module_key()
        } else {
            node.artifact_id().to_string()
        };
        let is_match = wildcard_match(&self.parts, &subject);
        if is_match {
            self.matched.store(true, Ordering::Relaxed);
        }
        is_match
    }
}

/// `parts` is the pattern split on `*`; the first part anchors the start,
/// the last anchors the end, and the middle ones must appear in order.
fn wildcard_match(parts: &[String], subject: &str) -> bool {
    match parts {
        [] => subject.is_empty(),
        [exact] => subject == exact,
        [first, middle @ .., last] => {
            if !subject.starts_with(first.as_str()) {
                return false;
            }
            let mut rest = &subject[first.len()..];
            for part in middle {
                match rest.find(part.as_str()) {
                    Some(index) => rest = &rest[index + part.len()..],
                    None => return false,
                }
            }
            rest.len() >= last.len() && rest.ends_with(last.as_str())
        }
    }
}

fn validate_pattern(pattern: &str) -> Result<()> {
    if pattern.is_empty() {
        return Err(invalid("Selection pattern cannot be empty".to_string()));
    }

    if pattern.len() > MAX_PATTERN_LENGTH {
        return Err(invalid(format!(
            "Selection pattern is too long: '{}' ({} chars). Maximum: {} chars",
            pattern,
            pattern.len(),
            MAX_PATTERN_LENGTH
        )));
    }

    if let Some(ch) = pattern.chars().find(|c| !is_valid_pattern_char(*c)) {
        return Err(invalid(format!(
            "Selection pattern contains invalid character '{}' in pattern '{}'. \
             Only alphanumeric, hyphens, underscores, dots, colons, and asterisks (*) are allowed.",
            ch,
            pattern
        )));
    }

    if pattern.matches(':').count() > 1 {
        return Err(invalid(format!(
            "Selection pattern '{}' must be 'artifactId' or 'groupId:artifactId'",
            pattern
        )));
    }

    Ok(())
}

fn invalid(message: String) -> anyhow::Error {
    DepSearchError::Validation { message }.into()
}

fn is_valid_pattern_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '*')
}
