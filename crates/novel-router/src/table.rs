//! The route table: declaration-ordered matching, redirects and the
//! not-found fallback

use crate::path::{normalize_path, segments, split_url};
use crate::route::pattern::{match_segments, PatternSegment};
use crate::route::Route;
use crate::view::Loader;
use crate::{Params, Result, RouterError};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

/// Longest redirect chain followed before giving up
pub const MAX_REDIRECTS: usize = 8;

/// Parameter under which the fallback view receives the unmatched path
pub const NOT_FOUND_PARAM: &str = "path";

/// Result of resolving a URL against the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    /// Name of the matched view route
    pub name: String,
    /// Pattern of the matched route, `*` for the fallback
    pub pattern: String,
    /// Parameters bound from `:name` segments
    pub params: Params,
    /// Raw query string, without the `?`
    pub query: String,
    /// Raw hash, without the `#`
    pub hash: String,
    /// Normalized path plus query and hash, as stored in history
    pub full_path: String,
    /// Path that was redirected to this route, if any
    pub redirected_from: Option<String>,
}

struct Entry<V> {
    route: Route<V>,
    segments: Vec<PatternSegment>,
}

/// Ordered sequence of routes, consulted top to bottom; first match wins
pub struct RouteTable<V> {
    entries: Vec<Entry<V>>,
    names: HashMap<String, usize>,
    fallback: Option<usize>,
    case_insensitive: bool,
}

impl<V> Default for RouteTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> RouteTable<V> {
    /// Creates an empty, case-sensitive table
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            names: HashMap::new(),
            fallback: None,
            case_insensitive: false,
        }
    }

    /// Configures case sensitivity of static segments
    pub fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// Appends a route (functional builder)
    pub fn with_route(mut self, route: Route<V>) -> Result<Self> {
        self.add_route(route)?;
        Ok(self)
    }

    /// Appends several routes, stopping at the first invalid one
    pub fn with_routes<I>(mut self, routes: I) -> Result<Self>
    where
        I: IntoIterator<Item = Route<V>>,
    {
        for route in routes {
            self.add_route(route)?;
        }
        Ok(self)
    }

    /// Registers the view rendered when no route matches
    ///
    /// The unmatched path is bound under the `path` parameter.
    pub fn with_not_found(mut self, name: impl Into<String>, loader: Loader<V>) -> Result<Self> {
        let name = name.into();
        self.register_name(&name)?;
        self.fallback = Some(self.entries.len());
        self.entries.push(Entry {
            route: Route::fallback(name, loader),
            segments: Vec::new(),
        });
        Ok(self)
    }

    /// Appends a route, validating its pattern and name
    ///
    /// Returns the route's index, which is also its view slot.
    pub fn add_route(&mut self, route: Route<V>) -> Result<usize> {
        let segments = route.segments()?;

        if let Some(target) = route.redirect_to() {
            if !target.starts_with('/') {
                return Err(RouterError::InvalidPattern {
                    pattern: route.pattern.clone(),
                    reason: format!("redirect target `{}` must start with `/`", target),
                });
            }
        }

        if let Some(name) = route.name() {
            let name = name.to_string();
            self.register_name(&name)?;
        }

        self.entries.push(Entry { route, segments });
        Ok(self.entries.len() - 1)
    }

    fn register_name(&mut self, name: &str) -> Result<()> {
        if self.names.contains_key(name) {
            return Err(RouterError::DuplicateName(name.to_string()));
        }
        self.names.insert(name.to_string(), self.entries.len());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    pub fn has_not_found(&self) -> bool {
        self.fallback.is_some()
    }

    /// Routes in declaration order
    pub fn routes(&self) -> impl Iterator<Item = &Route<V>> {
        self.entries.iter().map(|entry| &entry.route)
    }

    /// Looks up a route by name
    pub fn route(&self, name: &str) -> Option<&Route<V>> {
        self.index_of(name).map(|index| &self.entries[index].route)
    }

    /// Index (and view slot) of a named route
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.get(name).copied()
    }

    pub(crate) fn loader_at(&self, index: usize) -> Option<&Loader<V>> {
        self.entries.get(index).and_then(|entry| entry.route.loader())
    }

    fn match_path(&self, path: &str) -> Option<(usize, Params)> {
        let path_segments = segments(path);
        self.entries.iter().enumerate().find_map(|(index, entry)| {
            if entry.route.is_fallback() {
                return None;
            }
            match_segments(&entry.segments, &path_segments, self.case_insensitive)
                .map(|params| (index, params))
        })
    }

    /// Resolves a URL to a named view and its parameters
    ///
    /// Accepts a bare path, a path with query/hash, or a hash-history
    /// fragment (`#/book/42`). Redirects are followed; the query and hash of
    /// the original URL are carried over.
    ///
    /// # Examples
    ///
    /// ```
    /// use novel_router::{Route, RouteTable, RouterError};
    ///
    /// # fn main() -> novel_router::Result<()> {
    /// let table = RouteTable::new()
    ///     .with_route(Route::redirect("/", "/home"))?
    ///     .with_route(Route::view("/home", "home", || async { Ok(()) }))?;
    ///
    /// let resolved = table.resolve("/")?;
    /// assert_eq!(resolved.name, "home");
    /// assert_eq!(resolved.redirected_from.as_deref(), Some("/"));
    ///
    /// assert!(matches!(table.resolve("/missing"), Err(RouterError::NotFound { .. })));
    /// # Ok(())
    /// # }
    /// ```
    pub fn resolve(&self, url: &str) -> Result<ResolvedRoute> {
        let parts = split_url(url);
        let requested = normalize_path(parts.path).into_owned();

        let mut path = requested.clone();
        let mut redirected_from = None;

        for _ in 0..=MAX_REDIRECTS {
            let (index, params) = self.match_path(&path).ok_or_else(|| {
                warn!(path = %requested, "no route matches");
                RouterError::NotFound {
                    path: requested.clone(),
                }
            })?;
            let route = &self.entries[index].route;

            if let Some(target) = route.redirect_target(&params) {
                debug!(from = %path, to = %target, "following redirect");
                if redirected_from.is_none() {
                    redirected_from = Some(path.clone());
                }
                path = normalize_path(split_url(&target).path).into_owned();
                continue;
            }

            let name = route.name().unwrap_or_default().to_string();
            debug!(path = %path, route = %name, "resolved route");
            return Ok(ResolvedRoute {
                full_path: full_path(&path, parts.query, parts.hash),
                name,
                pattern: route.pattern.clone(),
                params,
                query: parts.query.to_string(),
                hash: parts.hash.to_string(),
                redirected_from,
            });
        }

        Err(RouterError::RedirectLoop {
            path: requested,
            limit: MAX_REDIRECTS,
        })
    }

    /// Resolves a URL, falling back to the not-found view when registered
    pub fn resolve_or_fallback(&self, url: &str) -> Result<ResolvedRoute> {
        match self.resolve(url) {
            Err(RouterError::NotFound { path }) => {
                let index = self.fallback.ok_or_else(|| RouterError::NotFound { path: path.clone() })?;
                let route = &self.entries[index].route;
                let parts = split_url(url);

                let mut params = Params::new();
                params.insert(NOT_FOUND_PARAM.to_string(), path.clone());

                Ok(ResolvedRoute {
                    name: route.name().unwrap_or_default().to_string(),
                    pattern: route.pattern.clone(),
                    params,
                    query: parts.query.to_string(),
                    hash: parts.hash.to_string(),
                    full_path: full_path(&path, parts.query, parts.hash),
                    redirected_from: None,
                })
            }
            other => other,
        }
    }

    /// Generates the URL of a named route
    ///
    /// # Examples
    ///
    /// ```
    /// use novel_router::{Params, Route, RouteTable};
    ///
    /// # fn main() -> novel_router::Result<()> {
    /// let table = RouteTable::new()
    ///     .with_route(Route::view("/chapter_list/:bookId", "chapterList", || async { Ok(()) }))?;
    ///
    /// let mut params = Params::new();
    /// params.insert("bookId".to_string(), "12".to_string());
    /// assert_eq!(table.url_for("chapterList", &params)?, "/chapter_list/12");
    /// # Ok(())
    /// # }
    /// ```
    pub fn url_for(&self, name: &str, params: &Params) -> Result<String> {
        let route = self
            .route(name)
            .filter(|route| !route.is_fallback())
            .ok_or_else(|| RouterError::UnknownRoute(name.to_string()))?;
        route.generate_url(params)
    }
}

impl<V> fmt::Debug for RouteTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("routes", &self.routes().collect::<Vec<_>>())
            .field("case_insensitive", &self.case_insensitive)
            .finish()
    }
}

fn full_path(path: &str, query: &str, hash: &str) -> String {
    let mut full = path.to_string();
    if !query.is_empty() {
        full.push('?');
        full.push_str(query);
    }
    if !hash.is_empty() {
        full.push('#');
        full.push_str(hash);
    }
    full
}
