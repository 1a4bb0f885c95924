//! # Novel Router
//!
//! Client-side routing for the novel site with support for:
//! - Static routes (`/home`, `/author/book_list`)
//! - Dynamic parameters (`/book/:id`, `/book/:id/:chapterId`)
//! - Redirect entries (`/` → `/home`)
//! - Named routes with reverse URL generation
//! - Lazily loaded views, cached per route for the navigator's lifetime
//! - Hash and web history modes
//! - After-navigation hooks (scroll reset)
//!
//! ## Path Normalization
//!
//! Handles common user mistakes gracefully before matching:
//! - Trailing slashes: `/home/` → `/home`
//! - Double slashes: `/book//42` → `/book/42`
//! - Backslashes: `\book\42` → `/book/42`
//!
//! ## Example
//!
//! ```
//! use novel_router::{Route, RouteTable};
//!
//! # fn main() -> novel_router::Result<()> {
//! let table = RouteTable::new()
//!     .with_route(Route::redirect("/", "/home"))?
//!     .with_route(Route::view("/home", "home", || async { Ok("Home") }))?
//!     .with_route(Route::view("/book/:id", "book", || async { Ok("Book") }))?;
//!
//! let resolved = table.resolve("/book/42")?;
//! assert_eq!(resolved.name, "book");
//! assert_eq!(resolved.params.get("id"), Some(&"42".to_string()));
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

// ============================================================================
// Module Declarations
// ============================================================================

mod error;
pub mod history;
pub mod hooks;
pub mod navigator;
pub mod path;
pub mod route;
pub mod table;
pub mod view;

pub use error::{Result, RouterError};
pub use history::{HistoryMode, HistoryStack};
pub use hooks::{NavigationEvent, NavigationHook, ScrollToTop, Viewport};
pub use navigator::{NavigationOutcome, Navigator, NavigatorState};
pub use path::{is_valid_path, normalize_path, split_url, UrlParts};
pub use route::pattern::{classify_segment, parse_pattern, PatternSegment};
pub use route::Route;
pub use table::{ResolvedRoute, RouteTable, MAX_REDIRECTS};
pub use view::{loader, BoxFuture, Loader, ViewCache};

/// Parameters bound from `:name` segments of a matched path
pub type Params = HashMap<String, String>;
