// File: novel-utils/src/error.rs
// Purpose: Error type shared by the browsing-context helpers

use thiserror::Error;

/// Failures of the browsing-context helpers
///
/// All of them are local to the call that produced them and recoverable by
/// the caller.
#[derive(Debug, Error)]
pub enum UtilError {
    #[error("no element with id `{0}`")]
    ElementNotFound(String),

    #[error("malformed percent-encoding in `{input}`")]
    MalformedEncoding { input: String },

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("storage I/O failed")]
    Io(#[from] std::io::Error),

    #[error("storage file is corrupt")]
    Corrupt(#[from] serde_json::Error),

    #[error("adding {offset} {unit} to the current date is out of range")]
    DateOutOfRange { unit: &'static str, offset: i64 },
}

pub type Result<T> = std::result::Result<T, UtilError>;
