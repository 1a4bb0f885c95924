//! The site's views

use std::fmt;

/// One page of the site
///
/// Each view has a stable route name (used for named navigation) and the
/// component path the front end loads it from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViewId {
    Home,
    Register,
    Login,
    Feedback,
    News,
    BookClass,
    BookRank,
    Book,
    ChapterList,
    BookContent,
    UserSetup,
    UserComment,
    AuthorRegister,
    AuthorBookList,
    AuthorBookAdd,
    AuthorChapterList,
    AuthorChapterAdd,
    AuthorChapterUpdate,
    /// Rendered for URLs no route matches
    NotFound,
}

impl ViewId {
    pub const ALL: [ViewId; 19] = [
        ViewId::Home,
        ViewId::Register,
        ViewId::Login,
        ViewId::Feedback,
        ViewId::News,
        ViewId::BookClass,
        ViewId::BookRank,
        ViewId::Book,
        ViewId::ChapterList,
        ViewId::BookContent,
        ViewId::UserSetup,
        ViewId::UserComment,
        ViewId::AuthorRegister,
        ViewId::AuthorBookList,
        ViewId::AuthorBookAdd,
        ViewId::AuthorChapterList,
        ViewId::AuthorChapterAdd,
        ViewId::AuthorChapterUpdate,
        ViewId::NotFound,
    ];

    /// Name the router registers the view under
    ///
    /// Names keep their historical spelling (`feadback`).
    pub fn route_name(self) -> &'static str {
        match self {
            ViewId::Home => "home",
            ViewId::Register => "register",
            ViewId::Login => "login",
            ViewId::Feedback => "feadback",
            ViewId::News => "news",
            ViewId::BookClass => "bookclass",
            ViewId::BookRank => "bookRank",
            ViewId::Book => "book",
            ViewId::ChapterList => "chapterList",
            ViewId::BookContent => "bookContent",
            ViewId::UserSetup => "userSetup",
            ViewId::UserComment => "userComment",
            ViewId::AuthorRegister => "authorRegister",
            ViewId::AuthorBookList => "authorBookList",
            ViewId::AuthorBookAdd => "authorBookAdd",
            ViewId::AuthorChapterList => "authorChapterList",
            ViewId::AuthorChapterAdd => "authorChapterAdd",
            ViewId::AuthorChapterUpdate => "authorChapterUpdate",
            ViewId::NotFound => "notFound",
        }
    }

    /// Component path relative to the front end's source root
    pub fn component(self) -> &'static str {
        match self {
            ViewId::Home => "views/Home",
            ViewId::Register => "views/Register",
            ViewId::Login => "views/Login",
            ViewId::Feedback => "views/FeadBack",
            ViewId::News => "views/News",
            ViewId::BookClass => "views/BookClass",
            ViewId::BookRank => "views/BookRank",
            ViewId::Book => "views/Book",
            ViewId::ChapterList => "views/ChapterList",
            ViewId::BookContent => "views/BookContent",
            ViewId::UserSetup => "views/UserSetup",
            ViewId::UserComment => "views/UserComment",
            ViewId::AuthorRegister => "views/author/Register",
            ViewId::AuthorBookList => "views/author/BookList",
            ViewId::AuthorBookAdd => "views/author/BookAdd",
            ViewId::AuthorChapterList => "views/author/ChapterList",
            ViewId::AuthorChapterAdd => "views/author/ChapterAdd",
            ViewId::AuthorChapterUpdate => "views/author/ChapterUpdate",
            ViewId::NotFound => "views/NotFound",
        }
    }

    pub fn from_route_name(name: &str) -> Option<ViewId> {
        Self::ALL.into_iter().find(|view| view.route_name() == name)
    }

    /// Views under `/author/`
    pub fn is_author_view(self) -> bool {
        self.component().starts_with("views/author/")
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route_name())
    }
}
