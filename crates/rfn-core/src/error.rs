//! Error type for file name resolution.

use thiserror::Error;

/// Error returned by [`crate::resolver::FilenameResolver::resolve`].
///
/// Only the network call can fail; every parsing step degrades to a fallback name
/// instead of returning an error.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The GET request could not be completed (refused, timed out, DNS, bad response).
    #[error("Cannot connect to URL: {url}\nException: {cause}")]
    Connection {
        url: String,
        cause: String,
        #[source]
        source: Option<curl::Error>,
    },
}

impl ResolveError {
    /// Wraps a libcurl failure for `url`.
    pub fn from_curl(url: &str, err: curl::Error) -> Self {
        ResolveError::Connection {
            url: url.to_string(),
            cause: err.to_string(),
            source: Some(err),
        }
    }

    /// Connection error without an underlying curl error (e.g. from a test fetcher).
    pub fn connection(url: &str, cause: impl Into<String>) -> Self {
        ResolveError::Connection {
            url: url.to_string(),
            cause: cause.into(),
            source: None,
        }
    }

    /// The URL the failed request was made for.
    pub fn url(&self) -> &str {
        match self {
            ResolveError::Connection { url, .. } => url,
        }
    }
}
