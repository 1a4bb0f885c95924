use thiserror::Error;

/// Errors surfaced by route resolution, URL generation and navigation.
///
/// Every variant is local to the call that produced it; none of them leave
/// the navigator in a broken state.
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("no route matches path `{path}`")]
    NotFound { path: String },

    #[error("route name `{0}` is already registered")]
    DuplicateName(String),

    #[error("no route named `{0}`")]
    UnknownRoute(String),

    #[error("route `{route}` requires parameter `{param}`")]
    MissingParam { route: String, param: String },

    #[error("invalid route pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("redirect chain starting at `{path}` exceeds {limit} hops")]
    RedirectLoop { path: String, limit: usize },

    #[error("failed to load view for route `{route}`")]
    LoadFailed {
        route: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub type Result<T> = std::result::Result<T, RouterError>;
