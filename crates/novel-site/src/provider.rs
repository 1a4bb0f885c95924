//! The seam through which the embedding application supplies views

use crate::views::ViewId;
use async_trait::async_trait;

/// Materializes views on demand
///
/// The router calls [`ViewProvider::load`] at most once per view for the
/// lifetime of a navigator; the result is cached and shared.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use novel_site::{ViewId, ViewProvider};
///
/// struct Components;
///
/// #[async_trait]
/// impl ViewProvider for Components {
///     type View = String;
///
///     async fn load(&self, view: ViewId) -> anyhow::Result<String> {
///         Ok(view.component().to_string())
///     }
/// }
/// ```
#[async_trait]
pub trait ViewProvider: Send + Sync + 'static {
    type View: Send + Sync + 'static;

    async fn load(&self, view: ViewId) -> anyhow::Result<Self::View>;
}

