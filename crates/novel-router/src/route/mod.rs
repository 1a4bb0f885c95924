/// Route definitions
///
/// A route is either a view entry (pattern + unique name + deferred loader)
/// or a redirect entry (pattern + target, no view).
pub mod pattern;

use crate::view::{loader, Loader};
use crate::{Params, Result, RouterError};
use pattern::{match_segments, PatternSegment};
use std::fmt;
use std::future::Future;

pub(crate) enum RouteTarget<V> {
    View { name: String, loader: Loader<V> },
    Redirect(String),
    Fallback { name: String, loader: Loader<V> },
}

/// A single entry of the route table
pub struct Route<V> {
    /// URL pattern like "/book/:id"
    pub pattern: String,
    pub(crate) target: RouteTarget<V>,
}

impl<V> Route<V> {
    /// Creates a view route whose implementation is obtained lazily
    ///
    /// The loader runs at most once per navigator: on the first navigation
    /// that needs it.
    ///
    /// # Examples
    ///
    /// ```
    /// use novel_router::Route;
    ///
    /// let route = Route::view("/book/:id", "book", || async { Ok("Book") });
    /// assert_eq!(route.name(), Some("book"));
    /// assert!(!route.is_redirect());
    /// ```
    pub fn view<F, Fut>(pattern: impl Into<String>, name: impl Into<String>, load: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<V>> + Send + 'static,
    {
        Self::with_loader(pattern, name, loader(load))
    }

    /// Creates a view route from an already boxed loader
    pub fn with_loader(
        pattern: impl Into<String>,
        name: impl Into<String>,
        loader: Loader<V>,
    ) -> Self {
        Route {
            pattern: pattern.into(),
            target: RouteTarget::View {
                name: name.into(),
                loader,
            },
        }
    }

    /// Creates a redirect route: a pure alias with no view of its own
    ///
    /// `:name` placeholders in the target are filled from the matched path.
    ///
    /// # Examples
    ///
    /// ```
    /// use novel_router::Route;
    ///
    /// let route: Route<()> = Route::redirect("/", "/home");
    /// assert!(route.is_redirect());
    /// assert_eq!(route.name(), None);
    /// ```
    pub fn redirect(from_pattern: impl Into<String>, to_url: impl Into<String>) -> Self {
        Route {
            pattern: from_pattern.into(),
            target: RouteTarget::Redirect(to_url.into()),
        }
    }

    /// Creates the view rendered when nothing in the table matches
    ///
    /// It never matches structurally; the table falls back to it explicitly.
    pub(crate) fn fallback(name: String, loader: Loader<V>) -> Self {
        Route {
            pattern: "*".to_string(),
            target: RouteTarget::Fallback { name, loader },
        }
    }

    /// Route name, absent for redirects
    pub fn name(&self) -> Option<&str> {
        match &self.target {
            RouteTarget::View { name, .. } | RouteTarget::Fallback { name, .. } => Some(name),
            RouteTarget::Redirect(_) => None,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self.target, RouteTarget::Redirect(_))
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.target, RouteTarget::Fallback { .. })
    }

    /// Redirect target as declared (placeholders not substituted)
    pub fn redirect_to(&self) -> Option<&str> {
        match &self.target {
            RouteTarget::Redirect(to) => Some(to),
            _ => None,
        }
    }

    pub(crate) fn loader(&self) -> Option<&Loader<V>> {
        match &self.target {
            RouteTarget::View { loader, .. } | RouteTarget::Fallback { loader, .. } => Some(loader),
            RouteTarget::Redirect(_) => None,
        }
    }

    /// Parsed pattern segments
    pub fn segments(&self) -> Result<Vec<PatternSegment>> {
        pattern::parse_pattern(&self.pattern)
    }

    /// Parameter names in declaration order
    pub fn param_names(&self) -> Vec<String> {
        self.pattern
            .split('/')
            .filter_map(|segment| segment.strip_prefix(':'))
            .map(str::to_string)
            .collect()
    }

    /// Matches this route against normalized path segments
    pub fn matches(&self, path_segments: &[&str], case_insensitive: bool) -> Option<Params> {
        if self.is_fallback() {
            return None;
        }
        let segments = self.segments().ok()?;
        match_segments(&segments, path_segments, case_insensitive)
    }

    /// Generates a URL for this route by substituting parameters
    ///
    /// Values are percent-encoded so they survive a round trip through
    /// [`RouteTable::resolve`](crate::RouteTable::resolve).
    ///
    /// # Examples
    ///
    /// ```
    /// use novel_router::{Params, Route};
    ///
    /// let route = Route::view("/book/:id/:chapterId", "bookContent", || async { Ok(()) });
    ///
    /// let mut params = Params::new();
    /// params.insert("id".to_string(), "42".to_string());
    /// params.insert("chapterId".to_string(), "7".to_string());
    ///
    /// assert_eq!(route.generate_url(&params).unwrap(), "/book/42/7");
    /// ```
    pub fn generate_url(&self, params: &Params) -> Result<String> {
        let segments = self
            .pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|segment| match segment.strip_prefix(':') {
                Some(param) => params
                    .get(param)
                    .filter(|value| !value.is_empty())
                    .map(|value| urlencoding::encode(value).into_owned())
                    .ok_or_else(|| RouterError::MissingParam {
                        route: self.name().unwrap_or(&self.pattern).to_string(),
                        param: param.to_string(),
                    }),
                None => Ok(segment.to_string()),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(format!("/{}", segments.join("/")))
    }

    /// Generates the redirect target with matched parameters substituted
    ///
    /// Returns None if this is not a redirect route.
    pub fn redirect_target(&self, params: &Params) -> Option<String> {
        let target = self.redirect_to()?;

        Some(
            target
                .split('/')
                .map(|segment| match segment.strip_prefix(':') {
                    Some(param) => params
                        .get(param)
                        .map(|value| urlencoding::encode(value).into_owned())
                        .unwrap_or_else(|| segment.to_string()),
                    None => segment.to_string(),
                })
                .collect::<Vec<_>>()
                .join("/"),
        )
    }
}

impl<V> fmt::Debug for Route<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern)
            .field("name", &self.name())
            .field("redirect_to", &self.redirect_to())
            .finish()
    }
}
