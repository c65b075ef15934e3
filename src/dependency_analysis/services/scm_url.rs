//! SCM URL normalization.

/// Rewrites the many SCM URL spellings found in POMs and BOMs into a URL
/// `git clone` accepts.
///
/// Rules, each applied to the running result:
/// 1. `git://host/path.git/...` becomes `https://host/path.git` (cut after
///    the first `.git/`, keeping `.git`); no other rule applies afterwards.
/// 2. A `scm:git:` prefix is removed.
/// 3. An `https://` URL containing `.git` is cut at its first `.git`.
/// 4. `git@github.com:owner/repo` becomes `https://github.com/owner/repo`.
pub fn convert_scm(scm_url: &str) -> String {
    let trimmed = scm_url.trim();

    if let Some(rest) = trimmed.strip_prefix("git://") {
        let mut url = format!("https://{rest}");
        if let Some(index) = url.find(".git/") {
            url.truncate(index + ".git".len());
        }
        return url;
    }

    let mut url = trimmed
        .strip_prefix("scm:git:")
        .unwrap_or(trimmed)
        .to_string();

    if url.starts_with("https://") {
        if let Some(index) = url.find(".git") {
            url.truncate(index);
        }
    }

    if let Some(rest) = url.strip_prefix("git@github.com:") {
        url = format!("https://github.com/{rest}");
    }

    url
}

/// Directory name for a cloned repository: the last path segment of the
/// URL with any `.git` suffix removed.
pub fn repository_name_from_url(scm_url: &str) -> String {
    let trimmed = scm_url.trim().trim_end_matches('/');
    let last = trimmed.rsplit(['/', ':']).next().unwrap_or(trimmed);
    last.strip_suffix(".git").unwrap_or(last).to_string()
}
