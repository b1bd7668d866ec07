//! Repository directory name derivation for custom node clones

use url::Url;

/// Directory used when no safe name can be derived from the URL
pub const UNKNOWN_NODE_DIR: &str = "unknown_node";

/// Derive the clone directory name from a repository URL
///
/// Handles `git@host:owner/repo(.git)`, `https://github.com/owner/repo(/tree/...)` and,
/// for any other URL (`ssh://` included), the last path segment. A trailing `.git` is
/// always stripped.
///
/// # Examples
///
/// ```
/// use nodefetch::installer::repo_dir_name;
///
/// assert_eq!(repo_dir_name("git@github.com:foo/bar.git"), "bar");
/// assert_eq!(repo_dir_name("https://github.com/foo/bar/tree/main"), "bar");
/// assert_eq!(repo_dir_name("not a url at all/"), "unknown_node");
/// ```
pub fn repo_dir_name(url: &str) -> String {
    derive(url.trim()).unwrap_or_else(|| UNKNOWN_NODE_DIR.to_string())
}

fn derive(url: &str) -> Option<String> {
    let is_github = url.to_ascii_lowercase().contains("github.com");

    let segments = match url.strip_prefix("git@") {
        // scp-like remotes are not URLs: `git@host:owner/repo`
        Some(rest) => non_empty(rest.split_once(':')?.1.split('/')),
        None => non_empty(Url::parse(url).ok()?.path_segments()?),
    };
    let candidate: &str = if is_github && segments.len() >= 2 {
        &segments[1]
    } else {
        segments.last()?
    };

    let name = candidate.strip_suffix(".git").unwrap_or(candidate);
    is_safe_dir_name(name).then(|| name.to_string())
}

fn non_empty<'s>(segments: impl Iterator<Item = &'s str>) -> Vec<String> {
    segments
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_safe_dir_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
