//! Integration tests for the navigator
//!
//! Covers lazy view loading, history traversal, hook firing, superseded
//! navigations and the not-found fallback.

use novel_router::{
    loader, HistoryMode, NavigationEvent, NavigationOutcome, Navigator, NavigatorState, Params,
    Route, RouteTable, RouterError, ScrollToTop, Viewport,
};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

#[derive(Default)]
struct CountingViewport {
    resets: AtomicUsize,
}

impl Viewport for CountingViewport {
    fn scroll_to(&self, _x: f64, y: f64) {
        assert_eq!(y, 0.0);
        self.resets.fetch_add(1, Ordering::SeqCst);
    }
}

/// Counts loader invocations per view and optionally delays them
#[derive(Default)]
struct Loads {
    count: AtomicUsize,
}

fn counted_view(
    pattern: &str,
    name: &str,
    loads: &Arc<Loads>,
    delay: Duration,
) -> Route<String> {
    let loads = Arc::clone(loads);
    let label = name.to_string();
    Route::view(pattern, name, move || {
        let loads = Arc::clone(&loads);
        let label = label.clone();
        async move {
            loads.count.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(delay).await;
            Ok(label)
        }
    })
}

fn navigator(loads: &Arc<Loads>) -> Navigator<String> {
    let table = RouteTable::new()
        .with_route(Route::redirect("/", "/home"))
        .and_then(|t| {
            t.with_routes([
                counted_view("/home", "home", loads, Duration::ZERO),
                counted_view("/login", "login", loads, Duration::ZERO),
                counted_view("/book/:id", "book", loads, Duration::ZERO),
                counted_view("/book_rank", "bookRank", loads, Duration::from_millis(40)),
            ])
        })
        .and_then(|t| t.with_not_found("notFound", loader(|| async { Ok("404".to_string()) })))
        .unwrap();
    Navigator::new(table)
}

#[tokio::test]
async fn test_push_renders_view_and_records_history() {
    let loads = Arc::new(Loads::default());
    let navigator = navigator(&loads);

    let outcome = navigator.push("/book/42").await.unwrap();
    assert!(outcome.is_completed());
    assert_eq!(outcome.view().map(|v| v.as_str()), Some("book"));
    assert_eq!(outcome.route().params.get("id"), Some(&"42".to_string()));

    assert_eq!(navigator.state().await, NavigatorState::Idle);
    assert_eq!(navigator.current_path().await.as_deref(), Some("/book/42"));
    assert_eq!(navigator.history().await.entries(), &["/book/42".to_string()]);
}

#[tokio::test]
async fn test_views_load_lazily_and_once() {
    let loads = Arc::new(Loads::default());
    let navigator = navigator(&loads);

    assert_eq!(navigator.loaded_count(), 0);
    assert_eq!(loads.count.load(Ordering::SeqCst), 0);

    navigator.push("/book/1").await.unwrap();
    navigator.push("/home").await.unwrap();
    navigator.push("/book/2").await.unwrap();
    navigator.push("/book/3").await.unwrap();

    assert_eq!(loads.count.load(Ordering::SeqCst), 2);
    assert!(navigator.is_loaded("book"));
    assert!(navigator.is_loaded("home"));
    assert!(!navigator.is_loaded("login"));
    assert_eq!(navigator.loaded_count(), 2);
}

#[tokio::test]
async fn test_root_commits_redirect_target() {
    let loads = Arc::new(Loads::default());
    let navigator = navigator(&loads);

    let outcome = navigator.push("/").await.unwrap();
    assert_eq!(outcome.route().name, "home");
    assert_eq!(outcome.route().redirected_from.as_deref(), Some("/"));
    assert_eq!(navigator.history().await.entries(), &["/home".to_string()]);
}

#[tokio::test]
async fn test_scroll_reset_once_per_navigation() {
    let loads = Arc::new(Loads::default());
    let viewport = Arc::new(CountingViewport::default());
    let navigator = navigator(&loads).with_hook(ScrollToTop::new(Arc::clone(&viewport)));

    for round in 1..=5 {
        navigator.push("/home").await.unwrap();
        navigator.push("/login").await.unwrap();
        assert_eq!(viewport.resets.load(Ordering::SeqCst), round * 2);
    }
}

#[tokio::test]
async fn test_hooks_see_to_and_from() {
    let loads = Arc::new(Loads::default());
    let seen: Arc<Mutex<Vec<(Option<String>, String)>>> = Arc::default();
    let sink = Arc::clone(&seen);
    let navigator = navigator(&loads).after_each(move |event: &NavigationEvent| {
        sink.lock()
            .unwrap()
            .push((event.from.as_ref().map(|r| r.name.clone()), event.to.name.clone()));
    });

    navigator.push("/home").await.unwrap();
    navigator.push("/book/9").await.unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            (None, "home".to_string()),
            (Some("home".to_string()), "book".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_back_and_forward() {
    let loads = Arc::new(Loads::default());
    let navigator = navigator(&loads);

    navigator.push("/home").await.unwrap();
    navigator.push("/book/1").await.unwrap();
    navigator.push("/login").await.unwrap();

    let back = navigator.back().await.unwrap().unwrap();
    assert_eq!(back.route().full_path, "/book/1");
    assert_eq!(navigator.current_path().await.as_deref(), Some("/book/1"));

    let forward = navigator.forward().await.unwrap().unwrap();
    assert_eq!(forward.route().full_path, "/login");

    assert!(navigator.forward().await.unwrap().is_none());
    assert_eq!(navigator.history().await.len(), 3);

    assert!(navigator.go(-2).await.unwrap().is_some());
    assert_eq!(navigator.current_path().await.as_deref(), Some("/home"));
    assert!(navigator.back().await.unwrap().is_none());
}

#[tokio::test]
async fn test_go_zero_reloads_current_entry() {
    let loads = Arc::new(Loads::default());
    let viewport = Arc::new(CountingViewport::default());
    let navigator = navigator(&loads).with_hook(ScrollToTop::new(Arc::clone(&viewport)));

    assert!(navigator.go(0).await.unwrap().is_none());

    navigator.push("/home").await.unwrap();
    navigator.push("/book/4").await.unwrap();

    let reload = navigator.go(0).await.unwrap().unwrap();
    assert!(reload.is_completed());
    assert_eq!(reload.route().full_path, "/book/4");
    assert_eq!(reload.route().name, "book");

    assert_eq!(navigator.history().await.len(), 2);
    assert_eq!(viewport.resets.load(Ordering::SeqCst), 3);
    assert_eq!(loads.count.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_replace_keeps_history_length() {
    let loads = Arc::new(Loads::default());
    let navigator = navigator(&loads);

    navigator.push("/home").await.unwrap();
    navigator.push("/register-typo").await.unwrap();
    navigator.replace("/login").await.unwrap();

    let history = navigator.history().await;
    assert_eq!(history.entries(), &["/home".to_string(), "/login".to_string()]);
}

#[tokio::test]
async fn test_push_named() {
    let loads = Arc::new(Loads::default());
    let navigator = navigator(&loads);

    let mut params = Params::new();
    params.insert("id".to_string(), "77".to_string());
    let outcome = navigator.push_named("book", &params).await.unwrap();

    assert_eq!(outcome.route().full_path, "/book/77");
}

#[tokio::test]
async fn test_not_found_renders_fallback() {
    let loads = Arc::new(Loads::default());
    let navigator = navigator(&loads);

    let outcome = navigator.push("/no/such/page").await.unwrap();
    assert_eq!(outcome.route().name, "notFound");
    assert_eq!(outcome.view().map(|v| v.as_str()), Some("404"));
    assert_eq!(outcome.route().params.get("path"), Some(&"/no/such/page".to_string()));
}

#[tokio::test]
async fn test_not_found_without_fallback_leaves_state_untouched() {
    let table = RouteTable::new()
        .with_route(Route::view("/home", "home", || async { Ok(()) }))
        .unwrap();
    let navigator = Navigator::new(table);

    navigator.push("/home").await.unwrap();
    let err = navigator.push("/missing").await.unwrap_err();

    assert!(matches!(err, RouterError::NotFound { .. }));
    assert_eq!(navigator.current_path().await.as_deref(), Some("/home"));
    assert_eq!(navigator.state().await, NavigatorState::Idle);
}

#[tokio::test]
async fn test_failed_load_surfaces_error_and_returns_to_idle() {
    let table = RouteTable::new()
        .with_route(Route::view("/home", "home", || async { Ok("home") }))
        .and_then(|t| {
            t.with_route(Route::view("/broken", "broken", || async {
                anyhow::bail!("network error")
            }))
        })
        .unwrap();
    let viewport = Arc::new(CountingViewport::default());
    let navigator = Navigator::new(table).with_hook(ScrollToTop::new(Arc::clone(&viewport)));

    navigator.push("/home").await.unwrap();
    let err = navigator.push("/broken").await.unwrap_err();

    assert!(matches!(err, RouterError::LoadFailed { ref route, .. } if route == "broken"));
    assert_eq!(navigator.state().await, NavigatorState::Idle);
    assert_eq!(navigator.current_path().await.as_deref(), Some("/home"));
    assert_eq!(viewport.resets.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_slow_navigation_is_superseded() {
    init_tracing();
    let loads = Arc::new(Loads::default());
    let viewport = Arc::new(CountingViewport::default());
    let navigator = Arc::new(navigator(&loads).with_hook(ScrollToTop::new(Arc::clone(&viewport))));

    let slow = tokio::spawn({
        let navigator = Arc::clone(&navigator);
        async move { navigator.push("/book_rank").await }
    });
    tokio::time::sleep(Duration::from_millis(5)).await;
    assert_eq!(navigator.state().await, NavigatorState::Resolving);

    let fast = navigator.push("/login").await.unwrap();
    assert!(fast.is_completed());

    let slow = slow.await.unwrap().unwrap();
    assert!(matches!(slow, NavigationOutcome::Superseded { ref to } if to.name == "bookRank"));

    assert_eq!(navigator.current_path().await.as_deref(), Some("/login"));
    assert_eq!(navigator.history().await.entries(), &["/login".to_string()]);
    assert_eq!(viewport.resets.load(Ordering::SeqCst), 1);
    // The superseded load still populated its slot.
    assert!(navigator.is_loaded("bookRank"));
}

#[tokio::test]
async fn test_concurrent_first_visits_share_one_view() {
    init_tracing();
    let loads = Arc::new(Loads::default());
    let navigator = Arc::new(navigator(&loads));

    let (a, b) = tokio::join!(navigator.push("/book_rank"), navigator.push("/book_rank"));
    let a = a.unwrap();
    let b = b.unwrap();

    assert_eq!(loads.count.load(Ordering::SeqCst), 1);
    assert!(matches!(a, NavigationOutcome::Superseded { .. }));
    assert!(b.is_completed());
}

#[tokio::test]
async fn test_sync_location_hash_mode() {
    let loads = Arc::new(Loads::default());
    let navigator = navigator(&loads).with_history(HistoryMode::Hash, "/");

    navigator.sync_location("https://novel.example/#/home").await.unwrap();
    navigator.sync_location("https://novel.example/#/book/5").await.unwrap();
    assert_eq!(navigator.href().await.as_deref(), Some("/#/book/5"));

    // Browser back button: the previous entry comes back without a new push.
    navigator.sync_location("https://novel.example/#/home").await.unwrap();
    let history = navigator.history().await;
    assert_eq!(history.len(), 2);
    assert_eq!(history.position(), Some(0));
    assert_eq!(navigator.current_path().await.as_deref(), Some("/home"));
}

#[tokio::test]
async fn test_sync_location_web_mode() {
    let loads = Arc::new(Loads::default());
    let navigator = navigator(&loads).with_history(HistoryMode::Web, "/app");

    let outcome = navigator
        .sync_location("https://novel.example/app/book/3?tab=info")
        .await
        .unwrap();
    assert_eq!(outcome.route().name, "book");
    assert_eq!(outcome.route().query, "tab=info");
    assert_eq!(navigator.href().await.as_deref(), Some("/app/book/3?tab=info"));
}
