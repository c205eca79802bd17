use thiserror::Error;

/// Why a document could not be retrieved. Callers treat every variant as
/// "not found" and substitute static content.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{url}: HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
