//! The site's route table
//!
//! Routes are declared as data in [`SITE_ROUTES`] and turned into a
//! [`RouteTable`] whose loaders defer to a [`ViewProvider`].

use crate::config::RouterConfig;
use crate::provider::ViewProvider;
use crate::views::ViewId;
use novel_router::{loader, Loader, Route, RouteTable};
use std::sync::Arc;
use tracing::debug;

/// One declared route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteRoute {
    Redirect {
        from: &'static str,
        to: &'static str,
    },
    View {
        path: &'static str,
        view: ViewId,
    },
}

impl SiteRoute {
    pub fn path(&self) -> &'static str {
        match *self {
            SiteRoute::Redirect { from, .. } => from,
            SiteRoute::View { path, .. } => path,
        }
    }

    pub fn view(&self) -> Option<ViewId> {
        match *self {
            SiteRoute::Redirect { .. } => None,
            SiteRoute::View { view, .. } => Some(view),
        }
    }
}

const fn view(path: &'static str, view: ViewId) -> SiteRoute {
    SiteRoute::View { path, view }
}

/// Every route of the site, in matching order
pub const SITE_ROUTES: &[SiteRoute] = &[
    SiteRoute::Redirect {
        from: "/",
        to: "/home",
    },
    view("/home", ViewId::Home),
    view("/register", ViewId::Register),
    view("/login", ViewId::Login),
    view("/feadback", ViewId::Feedback),
    view("/news/:id", ViewId::News),
    view("/bookclass", ViewId::BookClass),
    view("/book_rank", ViewId::BookRank),
    view("/book/:id", ViewId::Book),
    view("/chapter_list/:bookId", ViewId::ChapterList),
    view("/book/:id/:chapterId", ViewId::BookContent),
    view("/user/setup", ViewId::UserSetup),
    view("/user/comment", ViewId::UserComment),
    view("/author/register", ViewId::AuthorRegister),
    view("/author/book_list", ViewId::AuthorBookList),
    view("/author/book_add", ViewId::AuthorBookAdd),
    view("/author/chapter_list", ViewId::AuthorChapterList),
    view("/author/chapter_add", ViewId::AuthorChapterAdd),
    view("/author/chapter_update", ViewId::AuthorChapterUpdate),
];

fn view_loader<P: ViewProvider>(provider: &Arc<P>, view: ViewId) -> Loader<P::View> {
    let provider = Arc::clone(provider);
    loader(move || {
        let provider = Arc::clone(&provider);
        async move { provider.load(view).await }
    })
}

/// Builds the site's route table with loaders backed by `provider`
///
/// The not-found view is registered as the fallback when
/// `config.not_found_fallback` is set.
pub fn build_route_table<P: ViewProvider>(
    provider: Arc<P>,
    config: &RouterConfig,
) -> novel_router::Result<RouteTable<P::View>> {
    let mut table = RouteTable::new().with_case_insensitive(config.case_insensitive);

    for route in SITE_ROUTES {
        let route = match *route {
            SiteRoute::Redirect { from, to } => Route::redirect(from, to),
            SiteRoute::View { path, view } => {
                Route::with_loader(path, view.route_name(), view_loader(&provider, view))
            }
        };
        table.add_route(route)?;
    }

    if config.not_found_fallback {
        table = table.with_not_found(
            ViewId::NotFound.route_name(),
            view_loader(&provider, ViewId::NotFound),
        )?;
    }

    debug!(
        routes = table.len(),
        fallback = table.has_not_found(),
        "built site route table"
    );
    Ok(table)
}
