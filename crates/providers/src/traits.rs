use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("HTTP client error: {0}")]
    Client(String),
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("Redirect error: {0}")]
    Redirect(String),
    #[error("Request timed out")]
    Timeout,
}

impl From<reqwest::Error> for ResolveError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ResolveError::Timeout
        } else if e.is_redirect() {
            ResolveError::Redirect(e.to_string())
        } else if e.is_builder() {
            ResolveError::Client(e.to_string())
        } else {
            ResolveError::Http(e.to_string())
        }
    }
}
