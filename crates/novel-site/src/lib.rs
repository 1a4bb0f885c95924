//! # novel-site
//!
//! The web-novel reading site's front-end wiring: which views exist, which
//! URLs reach them, and how the navigator and local storage are configured.
//!
//! - [`ViewId`]: every page, with its route name and component path
//! - [`SITE_ROUTES`]: the declarative route list
//! - [`ViewProvider`]: how the embedding application materializes views
//! - [`SiteConfig`]: `site.toml`
//! - [`SiteApp`]: a configured navigator ready to follow the browser

pub mod app;
pub mod config;
pub mod provider;
pub mod routes;
pub mod views;

pub use app::SiteApp;
pub use config::{RouterConfig, SiteConfig, StorageConfig};
pub use provider::ViewProvider;
pub use routes::{build_route_table, SiteRoute, SITE_ROUTES};
pub use views::ViewId;
