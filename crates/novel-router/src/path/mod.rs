/// Path utilities for validation, normalization and URL splitting
///
/// All functions are **pure**: given same input, always produce same output with no side effects.
use std::borrow::Cow;

/// Validates if a path is in canonical form
///
/// # Rules
///
/// - Must start with `/`
/// - Must not contain `//` or `\`
/// - Must not end with `/` (except root `/`)
/// - Must not be empty
///
/// # Examples
///
/// ```
/// use novel_router::path::is_valid_path;
///
/// assert!(is_valid_path("/"));
/// assert!(is_valid_path("/book/42"));
///
/// assert!(!is_valid_path(""));
/// assert!(!is_valid_path("home"));
/// assert!(!is_valid_path("/book/"));
/// assert!(!is_valid_path("/book//42"));
/// ```
pub fn is_valid_path(path: &str) -> bool {
    if path.is_empty() || !path.starts_with('/') {
        return false;
    }

    if path.contains("//") || path.contains('\\') {
        return false;
    }

    path == "/" || !path.ends_with('/')
}

/// Normalize a path to canonical form
///
/// Returns `Cow::Borrowed` when input is already valid (zero allocations).
///
/// - Trailing slashes: `/book/` → `/book`
/// - Double slashes: `/book//42` → `/book/42`
/// - Backslashes: `\book\42` → `/book/42`
/// - Missing leading slash: `home` → `/home`
///
/// # Examples
///
/// ```
/// use novel_router::path::normalize_path;
/// use std::borrow::Cow;
///
/// assert!(matches!(normalize_path("/home"), Cow::Borrowed("/home")));
/// assert_eq!(normalize_path("/book/"), "/book");
/// assert_eq!(normalize_path("\\book\\42"), "/book/42");
/// assert_eq!(normalize_path(""), "/");
/// ```
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if is_valid_path(path) {
        return Cow::Borrowed(path);
    }

    let normalized = path
        .replace('\\', "/")
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if normalized.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(format!("/{}", normalized))
    }
}

/// A router URL split into its path, query and hash parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlParts<'a> {
    /// Path portion, not yet normalized
    pub path: &'a str,
    /// Text after the first `?`, without the `?`
    pub query: &'a str,
    /// Text after the `#` that follows the path, without the `#`
    pub hash: &'a str,
}

/// Splits a router URL into path, query and hash
///
/// A single leading `#` is treated as the hash-history marker and skipped,
/// so `#/book/42?from=rank` and `/book/42?from=rank` split the same way.
///
/// # Examples
///
/// ```
/// use novel_router::path::split_url;
///
/// let parts = split_url("#/book/42?from=rank#comments");
/// assert_eq!(parts.path, "/book/42");
/// assert_eq!(parts.query, "from=rank");
/// assert_eq!(parts.hash, "comments");
/// ```
pub fn split_url(url: &str) -> UrlParts<'_> {
    let url = url.strip_prefix('#').unwrap_or(url);

    let (before_hash, hash) = url.split_once('#').unwrap_or((url, ""));
    let (path, query) = before_hash.split_once('?').unwrap_or((before_hash, ""));

    UrlParts { path, query, hash }
}

/// Splits a normalized path into its non-empty segments
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}
