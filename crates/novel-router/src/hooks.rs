//! After-navigation hooks
//!
//! Hooks run synchronously, in registration order, exactly once per
//! committed navigation. They are side effects only: nothing they do can
//! block or undo the navigation.

use crate::table::ResolvedRoute;
use std::sync::Arc;
use tracing::debug;

/// A completed transition, handed to every hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEvent {
    /// The route that is now current
    pub to: ResolvedRoute,
    /// The previously current route, absent on the first navigation
    pub from: Option<ResolvedRoute>,
}

/// Observer invoked after each committed navigation
pub trait NavigationHook: Send + Sync {
    fn after_each(&self, event: &NavigationEvent);
}

impl<F> NavigationHook for F
where
    F: Fn(&NavigationEvent) + Send + Sync,
{
    fn after_each(&self, event: &NavigationEvent) {
        self(event)
    }
}

/// The scrollable viewport of the browsing context
pub trait Viewport: Send + Sync {
    /// Scrolls the viewport to the given offsets
    fn scroll_to(&self, x: f64, y: f64);
}

impl<W: Viewport + ?Sized> Viewport for Arc<W> {
    fn scroll_to(&self, x: f64, y: f64) {
        (**self).scroll_to(x, y)
    }
}

/// Resets the viewport to the top after every navigation
///
/// Without it a new page opens at whatever offset the previous one was
/// scrolled to.
///
/// # Examples
///
/// ```
/// use novel_router::{ScrollToTop, Viewport};
///
/// struct Window;
///
/// impl Viewport for Window {
///     fn scroll_to(&self, _x: f64, _y: f64) {}
/// }
///
/// let hook = ScrollToTop::new(Window);
/// ```
pub struct ScrollToTop<W> {
    viewport: W,
}

impl<W: Viewport> ScrollToTop<W> {
    pub fn new(viewport: W) -> Self {
        Self { viewport }
    }
}

impl<W: Viewport> NavigationHook for ScrollToTop<W> {
    fn after_each(&self, event: &NavigationEvent) {
        debug!(to = %event.to.full_path, "resetting scroll position");
        self.viewport.scroll_to(0.0, 0.0);
    }
}
