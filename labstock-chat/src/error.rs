use thiserror::Error;

/// Internal failure taxonomy. Never escapes the handler: every variant is
/// converted into a structured HTTP response.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Missing Gemini API key")]
    MissingApiKey,
    #[error("Gemini API request failed with status {0}")]
    UpstreamStatus(u16),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Malformed request body: {0}")]
    BadRequest(String),
}
