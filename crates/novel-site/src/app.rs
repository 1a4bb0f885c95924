// File: novel-site/src/app.rs
// Purpose: Wires configuration, views and the navigator into one application

use crate::config::SiteConfig;
use crate::provider::ViewProvider;
use crate::routes::build_route_table;
use anyhow::{Context, Result};
use novel_router::{NavigationOutcome, Navigator, ScrollToTop, Viewport};
use novel_utils::FileStore;
use std::sync::Arc;
use tracing::info;

/// The running site: one navigator plus the configuration it was built from
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use novel_router::Viewport;
/// use novel_site::{SiteApp, SiteConfig, ViewId, ViewProvider};
/// use std::sync::Arc;
///
/// struct Components;
///
/// #[async_trait]
/// impl ViewProvider for Components {
///     type View = &'static str;
///
///     async fn load(&self, view: ViewId) -> anyhow::Result<&'static str> {
///         Ok(view.component())
///     }
/// }
///
/// struct Window;
///
/// impl Viewport for Window {
///     fn scroll_to(&self, _x: f64, _y: f64) {}
/// }
///
/// # #[tokio::main]
/// # async fn main() -> anyhow::Result<()> {
/// let app = SiteApp::new(SiteConfig::default(), Arc::new(Components), Window)?;
/// let outcome = app.start("https://novel.example/#/").await?;
///
/// assert_eq!(outcome.view().map(|v| **v), Some("views/Home"));
/// # Ok(())
/// # }
/// ```
pub struct SiteApp<P: ViewProvider> {
    config: SiteConfig,
    navigator: Navigator<P::View>,
}

impl<P: ViewProvider> SiteApp<P> {
    /// Builds the route table and navigator described by `config`
    ///
    /// `viewport` receives the scroll reset after each navigation when
    /// `router.scroll_to_top` is enabled.
    pub fn new<W>(config: SiteConfig, provider: Arc<P>, viewport: W) -> Result<Self>
    where
        W: Viewport + 'static,
    {
        let table = build_route_table(provider, &config.router)
            .context("Failed to build site route table")?;

        let mut navigator =
            Navigator::new(table).with_history(config.router.history, config.router.base.clone());
        if config.router.scroll_to_top {
            navigator = navigator.with_hook(ScrollToTop::new(viewport));
        }

        info!(
            history = ?config.router.history,
            base = %config.router.base,
            scroll_to_top = config.router.scroll_to_top,
            "site navigator ready"
        );

        Ok(Self { config, navigator })
    }

    /// Loads `site.toml` from the working directory and builds the app
    pub fn from_default_config<W>(provider: Arc<P>, viewport: W) -> Result<Self>
    where
        W: Viewport + 'static,
    {
        let config = SiteConfig::load_default()?;
        Self::new(config, provider, viewport)
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn navigator(&self) -> &Navigator<P::View> {
        &self.navigator
    }

    /// Renders the page for the browser's initial location
    pub async fn start(&self, href: &str) -> novel_router::Result<NavigationOutcome<P::View>> {
        self.navigator.sync_location(href).await
    }

    /// Opens the durable key/value store configured under `[storage]`
    pub fn open_storage(&self) -> Result<FileStore> {
        let path = &self.config.storage.path;
        FileStore::open(path)
            .with_context(|| format!("Failed to open local storage: {:?}", path))
    }
}
