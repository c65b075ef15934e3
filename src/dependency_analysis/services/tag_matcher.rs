//! Choosing the release tag to check out for a dependency version.

use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

static SEMVER_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+\.\d+\.\d+.*)").expect("Failed to compile tag version regex")
});

const TAG_REF_PREFIX: &str = "refs/tags/";

/// A tag together with the commit date it points at (peeled for annotated tags).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    pub name: String,
    pub commit_time: DateTime<Utc>,
}

impl TagRef {
    pub fn new(name: impl Into<String>, commit_time: DateTime<Utc>) -> Self {
        let name = name.into();
        let name = name
            .strip_prefix(TAG_REF_PREFIX)
            .map(str::to_string)
            .unwrap_or(name);
        Self { name, commit_time }
    }
}

/// Lowercased tag name reduced to its first `N.N.N...` substring, or the
/// whole lowercased name when it has none.
pub fn normalize_tag_name(tag: &str) -> String {
    let lowered = tag
        .strip_prefix(TAG_REF_PREFIX)
        .unwrap_or(tag)
        .to_lowercase();
    match SEMVER_LIKE.captures(&lowered) {
        Some(captures) => captures[1].to_string(),
        None => lowered,
    }
}

pub fn tag_matches_version(tag: &str, version: &str) -> bool {
    normalize_tag_name(tag).starts_with(&version.to_lowercase())
}

/// Most recently committed tag matching `version`.
///
/// Sorting is stable, so among tags with the same commit date the one
/// listed first wins.
pub fn select_tag<'a>(tags: &'a [TagRef], version: &str) -> Option<&'a TagRef> {
    let mut matching: Vec<&TagRef> = tags
        .iter()
        .filter(|tag| tag_matches_version(&tag.name, version))
        .collect();
    matching.sort_by(|a, b| b.commit_time.cmp(&a.commit_time));
    matching.into_iter().next()
}
