//! Feature API error types.

/// Errors that can occur when fetching features from the remote API.
#[derive(Debug, thiserror::Error)]
pub enum WfsError {
    /// HTTP request failed (network error, timeout, etc.)
    ///
    /// The request URL is stripped before wrapping since it carries the
    /// API key as a query parameter.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// Invalid API key or unauthorized
    #[error("unauthorized: check OS_API_KEY")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by feature API")]
    RateLimited,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}{}", body_suffix(.body))]
    Json {
        message: String,
        body: Option<String>,
    },
}

fn body_suffix(body: &Option<String>) -> String {
    body.as_ref()
        .map(|b| format!(" (body: {b})"))
        .unwrap_or_default()
}

impl From<reqwest::Error> for WfsError {
    fn from(err: reqwest::Error) -> Self {
        WfsError::Http(err.without_url())
    }
}
