//! Error types for hubwire-github.

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during GitHub API operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Authentication failed or token rejected.
    #[error("GitHub authentication failed - check GITHUB_TOKEN")]
    AuthenticationFailed,

    /// Token not found.
    #[error("no GitHub token found - set GITHUB_TOKEN")]
    NoToken,

    /// API rate limit exceeded.
    #[error("GitHub API rate limit exceeded - wait and try again")]
    RateLimited,

    /// Resource not found or no access.
    #[error("not found or no access: {0}")]
    NotFound(String),

    /// API error with status code.
    #[error("GitHub API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// Request arguments did not encode as a JSON object.
    #[error("request arguments must encode as a JSON object")]
    InvalidArguments,

    /// Configured header value is not valid.
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// Network error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON encoding or decoding error.
    #[error("failed to convert GitHub JSON: {0}")]
    Json(#[from] hubwire_json::Error),

    /// Config file parsing error.
    #[error("failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    /// IO error (e.g., reading the config file).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
