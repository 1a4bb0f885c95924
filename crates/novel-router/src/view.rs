//! Lazily materialized views
//!
//! Each route owns one slot in an arena indexed by its position in the
//! route table. A slot is filled on the first navigation that needs the
//! view and then reused for the navigator's lifetime.

use crate::{Result, RouterError};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, error, info};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Deferred supplier of a view implementation
pub type Loader<V> = Arc<dyn Fn() -> BoxFuture<'static, anyhow::Result<V>> + Send + Sync>;

/// Boxes an async closure into a [`Loader`]
///
/// # Examples
///
/// ```
/// use novel_router::loader;
///
/// let load = loader(|| async { Ok::<_, anyhow::Error>("Home") });
/// ```
pub fn loader<V, F, Fut>(load: F) -> Loader<V>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<V>> + Send + 'static,
{
    Arc::new(move || Box::pin(load()))
}

/// Arena of per-route view slots
pub struct ViewCache<V> {
    slots: Vec<OnceCell<Arc<V>>>,
}

impl<V> ViewCache<V> {
    /// Creates a cache with one empty slot per route
    pub fn with_slots(count: usize) -> Self {
        Self {
            slots: (0..count).map(|_| OnceCell::new()).collect(),
        }
    }

    /// Returns the cached view, or runs the loader to fill the slot
    ///
    /// Concurrent callers racing on an empty slot all receive the same
    /// instance; only one materialized view is ever retained. A failed load
    /// leaves the slot empty so a later navigation can try again.
    pub async fn get_or_load(&self, index: usize, route: &str, loader: &Loader<V>) -> Result<Arc<V>> {
        let slot = self
            .slots
            .get(index)
            .ok_or_else(|| RouterError::UnknownRoute(route.to_string()))?;

        if let Some(view) = slot.get() {
            debug!(route, "view served from cache");
            return Ok(Arc::clone(view));
        }

        let view = slot
            .get_or_try_init(|| async {
                info!(route, "materializing view");
                loader().await.map(Arc::new).map_err(|source| {
                    error!(route, error = %source, "view loader failed");
                    RouterError::LoadFailed {
                        route: route.to_string(),
                        source: source.into(),
                    }
                })
            })
            .await?;

        Ok(Arc::clone(view))
    }

    /// Whether the slot at `index` holds a materialized view
    pub fn is_loaded(&self, index: usize) -> bool {
        self.slots
            .get(index)
            .map(|slot| slot.initialized())
            .unwrap_or(false)
    }

    /// Number of materialized views
    pub fn loaded_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.initialized()).count()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn counting_loader(calls: Arc<AtomicUsize>) -> Loader<String> {
        loader(move || {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(10)).await;
                Ok("Book".to_string())
            }
        })
    }

    #[tokio::test]
    async fn test_first_load_fills_slot() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = ViewCache::with_slots(2);
        let load = counting_loader(Arc::clone(&calls));

        assert!(!cache.is_loaded(0));
        let view = cache.get_or_load(0, "book", &load).await.unwrap();
        assert_eq!(view.as_str(), "Book");
        assert!(cache.is_loaded(0));
        assert!(!cache.is_loaded(1));
        assert_eq!(cache.loaded_count(), 1);
    }

    #[tokio::test]
    async fn test_repeat_visits_do_not_reload() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = ViewCache::with_slots(1);
        let load = counting_loader(Arc::clone(&calls));

        let first = cache.get_or_load(0, "book", &load).await.unwrap();
        let second = cache.get_or_load(0, "book", &load).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_racing_loads_retain_one_instance() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = ViewCache::with_slots(1);
        let load = counting_loader(Arc::clone(&calls));

        let (a, b) = tokio::join!(
            cache.get_or_load(0, "book", &load),
            cache.get_or_load(0, "book", &load)
        );

        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_load_leaves_slot_empty() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);
        let load: Loader<String> = loader(move || {
            let attempt = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt == 0 {
                    anyhow::bail!("chunk failed to download")
                }
                Ok("Login".to_string())
            }
        });
        let cache = ViewCache::with_slots(1);

        let err = cache.get_or_load(0, "login", &load).await.unwrap_err();
        assert!(matches!(err, RouterError::LoadFailed { ref route, .. } if route == "login"));
        assert!(!cache.is_loaded(0));

        let view = cache.get_or_load(0, "login", &load).await.unwrap();
        assert_eq!(view.as_str(), "Login");
    }

    #[tokio::test]
    async fn test_out_of_range_slot() {
        let cache: ViewCache<String> = ViewCache::with_slots(0);
        let load = counting_loader(Arc::new(AtomicUsize::new(0)));
        assert!(cache.is_empty());
        assert!(matches!(
            cache.get_or_load(3, "ghost", &load).await,
            Err(RouterError::UnknownRoute(_))
        ));
    }
}
