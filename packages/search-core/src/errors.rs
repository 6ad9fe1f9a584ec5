use thiserror::Error;

/// Error taxonomy for the indexing and query pipelines.
///
/// Storage, network, parse and validation failures are distinguished so
/// callers can apply a consistent propagation policy: a single page
/// failure never brings down a worker, and only config/storage failures at
/// startup are fatal.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("schema migration failed: {0}")]
    Migration(String),
}

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("too many redirects ({count}) fetching {url}")]
    TooManyRedirects { url: String, count: u32 },
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("html could not be parsed: {0}")]
    Html(String),
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("malformed url: {0}")]
    InvalidUrl(String),
    #[error("malformed search query: {0}")]
    InvalidQuery(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not open config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid value for [{section}] {key}: {value}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
    },
}
