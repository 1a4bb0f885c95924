//! The navigator: owns the route table, the view arena and the history
//! stack, and drives the `Idle → Resolving → Idle` transition for every URL
//! change.

use crate::history::{HistoryMode, HistoryStack};
use crate::hooks::{NavigationEvent, NavigationHook};
use crate::table::{ResolvedRoute, RouteTable};
use crate::view::ViewCache;
use crate::{Params, Result, RouterError};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Navigator lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigatorState {
    /// No navigation pending
    #[default]
    Idle,
    /// A URL change was received and its view is being materialized
    Resolving,
}

/// What happened to a navigation request
pub enum NavigationOutcome<V> {
    /// The target became current and hooks ran
    Completed {
        event: NavigationEvent,
        view: Arc<V>,
    },
    /// A newer navigation started before this one's view was ready; the
    /// result was discarded and no hooks ran
    Superseded { to: ResolvedRoute },
}

impl<V> NavigationOutcome<V> {
    pub fn is_completed(&self) -> bool {
        matches!(self, NavigationOutcome::Completed { .. })
    }

    /// The route this navigation targeted
    pub fn route(&self) -> &ResolvedRoute {
        match self {
            NavigationOutcome::Completed { event, .. } => &event.to,
            NavigationOutcome::Superseded { to } => to,
        }
    }

    /// The materialized view, for completed navigations
    pub fn view(&self) -> Option<&Arc<V>> {
        match self {
            NavigationOutcome::Completed { view, .. } => Some(view),
            NavigationOutcome::Superseded { .. } => None,
        }
    }
}

impl<V> std::fmt::Debug for NavigationOutcome<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NavigationOutcome::Completed { event, .. } => f
                .debug_struct("Completed")
                .field("event", event)
                .finish_non_exhaustive(),
            NavigationOutcome::Superseded { to } => {
                f.debug_struct("Superseded").field("to", to).finish()
            }
        }
    }
}

#[derive(Clone, Copy)]
enum HistoryAction {
    Push,
    Replace,
    Traverse,
}

struct NavState<V> {
    state: NavigatorState,
    current: Option<ResolvedRoute>,
    view: Option<Arc<V>>,
    history: HistoryStack,
    latest_ticket: u64,
}

/// Client-side navigator
///
/// Created once per browsing context and shared (`Arc<Navigator<V>>`) with
/// whatever needs to navigate.
///
/// # Examples
///
/// ```
/// use novel_router::{Navigator, Route, RouteTable};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> novel_router::Result<()> {
/// let table = RouteTable::new()
///     .with_route(Route::redirect("/", "/home"))?
///     .with_route(Route::view("/home", "home", || async { Ok("Home") }))?;
///
/// let navigator = Navigator::new(table);
/// let outcome = navigator.push("/").await?;
///
/// assert_eq!(outcome.route().name, "home");
/// assert_eq!(navigator.current_path().await.as_deref(), Some("/home"));
/// # Ok(())
/// # }
/// ```
pub struct Navigator<V> {
    table: RouteTable<V>,
    views: ViewCache<V>,
    hooks: Vec<Box<dyn NavigationHook>>,
    mode: HistoryMode,
    base: String,
    inner: Mutex<NavState<V>>,
}

impl<V> Navigator<V> {
    /// Creates a navigator in hash mode rooted at `/`
    pub fn new(table: RouteTable<V>) -> Self {
        let views = ViewCache::with_slots(table.len());
        Self {
            table,
            views,
            hooks: Vec::new(),
            mode: HistoryMode::default(),
            base: "/".to_string(),
            inner: Mutex::new(NavState {
                state: NavigatorState::Idle,
                current: None,
                view: None,
                history: HistoryStack::new(),
                latest_ticket: 0,
            }),
        }
    }

    /// Sets the history mode and base used to build browser hrefs
    pub fn with_history(mut self, mode: HistoryMode, base: impl Into<String>) -> Self {
        self.mode = mode;
        self.base = base.into();
        self
    }

    /// Registers an after-navigation hook
    pub fn with_hook<H: NavigationHook + 'static>(mut self, hook: H) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Registers a closure as an after-navigation hook
    pub fn after_each<F>(self, hook: F) -> Self
    where
        F: Fn(&NavigationEvent) + Send + Sync + 'static,
    {
        self.with_hook(hook)
    }

    pub fn table(&self) -> &RouteTable<V> {
        &self.table
    }

    pub fn history_mode(&self) -> HistoryMode {
        self.mode
    }

    /// Resolves without navigating
    pub fn resolve(&self, url: &str) -> Result<ResolvedRoute> {
        self.table.resolve(url)
    }

    /// Obtains the view of a resolved route, loading it on first use
    pub async fn load_view(&self, route: &ResolvedRoute) -> Result<Arc<V>> {
        let index = self
            .table
            .index_of(&route.name)
            .ok_or_else(|| RouterError::UnknownRoute(route.name.clone()))?;
        let loader = self
            .table
            .loader_at(index)
            .ok_or_else(|| RouterError::UnknownRoute(route.name.clone()))?;
        self.views.get_or_load(index, &route.name, loader).await
    }

    /// Whether the named route's view has been materialized
    pub fn is_loaded(&self, name: &str) -> bool {
        self.table
            .index_of(name)
            .map(|index| self.views.is_loaded(index))
            .unwrap_or(false)
    }

    pub fn loaded_count(&self) -> usize {
        self.views.loaded_count()
    }

    /// Navigates to `url`, adding a history entry
    pub async fn push(&self, url: &str) -> Result<NavigationOutcome<V>> {
        self.navigate(url, HistoryAction::Push).await
    }

    /// Navigates to `url`, replacing the current history entry
    pub async fn replace(&self, url: &str) -> Result<NavigationOutcome<V>> {
        self.navigate(url, HistoryAction::Replace).await
    }

    /// Navigates to a named route
    pub async fn push_named(&self, name: &str, params: &Params) -> Result<NavigationOutcome<V>> {
        let url = self.table.url_for(name, params)?;
        self.push(&url).await
    }

    /// Moves through history by `delta` entries
    ///
    /// `go(0)` re-runs the current entry like a browser reload: hooks fire
    /// again and the cached view is reused. Returns `Ok(None)` when the move
    /// would leave the history stack.
    pub async fn go(&self, delta: isize) -> Result<Option<NavigationOutcome<V>>> {
        let target = {
            let mut inner = self.inner.lock().await;
            inner.history.go(delta).map(str::to_string)
        };

        match target {
            Some(path) => self.navigate(&path, HistoryAction::Traverse).await.map(Some),
            None => {
                debug!(delta, "history move out of range");
                Ok(None)
            }
        }
    }

    pub async fn back(&self) -> Result<Option<NavigationOutcome<V>>> {
        self.go(-1).await
    }

    pub async fn forward(&self) -> Result<Option<NavigationOutcome<V>>> {
        self.go(1).await
    }

    /// Handles a URL change made by the browser (address bar, hashchange)
    ///
    /// When the new location matches the neighbouring history entry the
    /// change is treated as back/forward traversal; otherwise it is a push.
    pub async fn sync_location(&self, href: &str) -> Result<NavigationOutcome<V>> {
        let path = self.mode.path_from_href(href, &self.base);

        let action = {
            let mut inner = self.inner.lock().await;
            if inner.history.current() == Some(path.as_str()) {
                HistoryAction::Traverse
            } else if inner.history.peek(-1) == Some(path.as_str()) {
                inner.history.go(-1);
                HistoryAction::Traverse
            } else if inner.history.peek(1) == Some(path.as_str()) {
                inner.history.go(1);
                HistoryAction::Traverse
            } else {
                HistoryAction::Push
            }
        };

        self.navigate(&path, action).await
    }

    async fn navigate(&self, url: &str, action: HistoryAction) -> Result<NavigationOutcome<V>> {
        let target = self.table.resolve_or_fallback(url)?;

        let ticket = {
            let mut inner = self.inner.lock().await;
            inner.latest_ticket += 1;
            inner.state = NavigatorState::Resolving;
            inner.latest_ticket
        };
        debug!(ticket, to = %target.full_path, "navigation started");

        let view = match self.load_view(&target).await {
            Ok(view) => view,
            Err(err) => {
                let mut inner = self.inner.lock().await;
                if inner.latest_ticket == ticket {
                    inner.state = NavigatorState::Idle;
                }
                return Err(err);
            }
        };

        let event = {
            let mut inner = self.inner.lock().await;
            if inner.latest_ticket != ticket {
                warn!(ticket, to = %target.full_path, "navigation superseded");
                return Ok(NavigationOutcome::Superseded { to: target });
            }

            match action {
                HistoryAction::Push => inner.history.push(target.full_path.clone()),
                HistoryAction::Replace => inner.history.replace(target.full_path.clone()),
                HistoryAction::Traverse => {}
            }

            let from = inner.current.replace(target.clone());
            inner.view = Some(Arc::clone(&view));
            inner.state = NavigatorState::Idle;

            NavigationEvent { to: target, from }
        };

        info!(
            to = %event.to.full_path,
            route = %event.to.name,
            from = event.from.as_ref().map(|r| r.full_path.as_str()).unwrap_or(""),
            "navigation completed"
        );

        for hook in &self.hooks {
            hook.after_each(&event);
        }

        Ok(NavigationOutcome::Completed { event, view })
    }

    pub async fn state(&self) -> NavigatorState {
        self.inner.lock().await.state
    }

    /// The current route, absent before the first navigation
    pub async fn current(&self) -> Option<ResolvedRoute> {
        self.inner.lock().await.current.clone()
    }

    pub async fn current_path(&self) -> Option<String> {
        self.inner
            .lock()
            .await
            .current
            .as_ref()
            .map(|route| route.full_path.clone())
    }

    /// The view of the current route
    pub async fn current_view(&self) -> Option<Arc<V>> {
        self.inner.lock().await.view.clone()
    }

    /// Browser href of the current route
    pub async fn href(&self) -> Option<String> {
        self.current_path()
            .await
            .map(|path| self.mode.href_for(&self.base, &path))
    }

    /// A snapshot of the history stack
    pub async fn history(&self) -> HistoryStack {
        self.inner.lock().await.history.clone()
    }
}
