//! Browser history: addressing modes and the session history stack

use serde::{Deserialize, Serialize};

/// How router paths are embedded in the browser URL
///
/// # Examples
///
/// ```
/// use novel_router::HistoryMode;
///
/// let href = HistoryMode::Hash.href_for("/", "/book/42");
/// assert_eq!(href, "/#/book/42");
/// assert_eq!(HistoryMode::Hash.path_from_href("https://novel.example/#/book/42", "/"), "/book/42");
///
/// let href = HistoryMode::Web.href_for("/app", "/book/42");
/// assert_eq!(href, "/app/book/42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
    /// The path follows a `#` marker, so the site can be served from static
    /// files without server-side rewrites
    #[default]
    Hash,
    /// The path is the URL path itself; the server must route every page to
    /// the application entry point
    Web,
}

impl HistoryMode {
    /// Extracts the router path (with query and hash) from a browser href
    pub fn path_from_href(&self, href: &str, base: &str) -> String {
        let path = match self {
            HistoryMode::Hash => href.split_once('#').map(|(_, fragment)| fragment).unwrap_or(""),
            HistoryMode::Web => {
                let without_origin = strip_origin(href);
                let base = base.trim_end_matches('/');
                without_origin.strip_prefix(base).unwrap_or(without_origin)
            }
        };

        if path.is_empty() {
            "/".to_string()
        } else if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        }
    }

    /// Builds the browser href for a router path
    pub fn href_for(&self, base: &str, full_path: &str) -> String {
        match self {
            HistoryMode::Hash => format!("{}#{}", base, full_path),
            HistoryMode::Web => format!("{}{}", base.trim_end_matches('/'), full_path),
        }
    }
}

/// Strips `scheme://host[:port]` from an absolute URL
fn strip_origin(href: &str) -> &str {
    match href.split_once("://") {
        Some((_, rest)) => rest.find('/').map(|index| &rest[index..]).unwrap_or("/"),
        None => href,
    }
}

/// Session history: visited full paths and a cursor
///
/// Pushing truncates any forward entries, like a browser does after the user
/// goes back and then follows a new link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryStack {
    entries: Vec<String>,
    cursor: Option<usize>,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry after the cursor and moves onto it
    pub fn push(&mut self, full_path: impl Into<String>) {
        let next = self.cursor.map(|c| c + 1).unwrap_or(0);
        self.entries.truncate(next);
        self.entries.push(full_path.into());
        self.cursor = Some(next);
    }

    /// Overwrites the current entry (or pushes when history is empty)
    pub fn replace(&mut self, full_path: impl Into<String>) {
        match self.cursor {
            Some(cursor) => self.entries[cursor] = full_path.into(),
            None => self.push(full_path),
        }
    }

    /// Moves the cursor by `delta`; out-of-range moves are ignored
    ///
    /// `go(0)` stays put and returns the current entry, like a reload.
    pub fn go(&mut self, delta: isize) -> Option<&str> {
        let cursor = self.cursor?;
        let target = cursor.checked_add_signed(delta)?;
        if target >= self.entries.len() {
            return None;
        }
        self.cursor = Some(target);
        Some(&self.entries[target])
    }

    /// Entry `delta` steps away from the cursor, without moving
    pub fn peek(&self, delta: isize) -> Option<&str> {
        let target = self.cursor?.checked_add_signed(delta)?;
        self.entries.get(target).map(String::as_str)
    }

    pub fn current(&self) -> Option<&str> {
        self.cursor.map(|cursor| self.entries[cursor].as_str())
    }

    pub fn can_go_back(&self) -> bool {
        self.peek(-1).is_some()
    }

    pub fn can_go_forward(&self) -> bool {
        self.peek(1).is_some()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn position(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_path_from_href() {
        let mode = HistoryMode::Hash;
        assert_eq!(mode.path_from_href("https://novel.example/", "/"), "/");
        assert_eq!(mode.path_from_href("https://novel.example/#", "/"), "/");
        assert_eq!(mode.path_from_href("https://novel.example/#/login", "/"), "/login");
        assert_eq!(
            mode.path_from_href("https://novel.example/index.html#/book/1?x=2", "/"),
            "/book/1?x=2"
        );
        assert_eq!(mode.path_from_href("/#home", "/"), "/home");
    }

    #[test]
    fn test_web_path_from_href() {
        let mode = HistoryMode::Web;
        assert_eq!(mode.path_from_href("https://novel.example/book/1", "/"), "/book/1");
        assert_eq!(mode.path_from_href("https://novel.example", "/"), "/");
        assert_eq!(mode.path_from_href("https://novel.example/app/login?next=1", "/app/"), "/login?next=1");
        assert_eq!(mode.path_from_href("/app", "/app"), "/");
    }

    #[test]
    fn test_href_for() {
        assert_eq!(HistoryMode::Hash.href_for("/index.html", "/home"), "/index.html#/home");
        assert_eq!(HistoryMode::Web.href_for("/", "/home"), "/home");
    }

    #[test]
    fn test_history_mode_serde_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            mode: HistoryMode,
        }
        let parsed: Wrapper = serde_json::from_str(r#"{"mode":"web"}"#).unwrap();
        assert_eq!(parsed.mode, HistoryMode::Web);
    }

    #[test]
    fn test_push_truncates_forward_entries() {
        let mut history = HistoryStack::new();
        history.push("/home");
        history.push("/book/1");
        history.push("/book/1/2");

        assert_eq!(history.go(-2), Some("/home"));
        history.push("/login");

        assert_eq!(history.entries(), &["/home".to_string(), "/login".to_string()]);
        assert!(!history.can_go_forward());
        assert!(history.can_go_back());
    }

    #[test]
    fn test_replace_overwrites_current() {
        let mut history = HistoryStack::new();
        history.replace("/home");
        history.push("/login");
        history.replace("/register");

        assert_eq!(history.entries(), &["/home".to_string(), "/register".to_string()]);
        assert_eq!(history.current(), Some("/register"));
    }

    #[test]
    fn test_go_out_of_range_is_ignored() {
        let mut history = HistoryStack::new();
        assert_eq!(history.go(-1), None);

        history.push("/home");
        assert_eq!(history.go(-1), None);
        assert_eq!(history.go(1), None);
        assert_eq!(history.position(), Some(0));
    }

    #[test]
    fn test_go_zero_returns_current_entry() {
        let mut history = HistoryStack::new();
        assert_eq!(history.go(0), None);

        history.push("/home");
        history.push("/login");
        assert_eq!(history.go(0), Some("/login"));
        assert_eq!(history.position(), Some(1));
        assert_eq!(history.len(), 2);
    }
}
