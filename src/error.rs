use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the remote data gateway.
///
/// Errors are reported to the caller once; there is no retry policy in
/// this layer.
#[derive(Debug, Error)]
pub enum Error {
    #[error("backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend rejected the request with status {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("the resource already exists")]
    AlreadyExists,

    #[error("resource not found")]
    NotFound,

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// True when a blob-store write was rejected only because the object
    /// key is already present. Submissions treat this as benign so that
    /// re-submitting the same file does not fail.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Error::AlreadyExists)
    }
}
