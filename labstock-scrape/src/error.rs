use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Scraper not initialized: call scrape/initialize first")]
    NotInitialized,
    #[error("Missing extraction API key: pass apiKey or set FIRECRAWL_API_KEY")]
    MissingApiKey,
    #[error("Extraction API request failed with status {0}")]
    UpstreamStatus(u16),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Extraction error: {0}")]
    Extraction(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ScrapeError {
    pub fn code(&self) -> &str {
        match self {
            Self::NotInitialized => "SCRAPE_NOT_READY",
            Self::MissingApiKey => "SCRAPE_MISSING_KEY",
            Self::UpstreamStatus(_) => "SCRAPE_UPSTREAM",
            Self::Http(_) => "SCRAPE_HTTP",
            Self::Extraction(_) => "SCRAPE_EXTRACTION",
            Self::Io(_) => "SCRAPE_IO",
            Self::Serialization(_) => "SCRAPE_SERIALIZATION",
        }
    }

    pub fn to_json_rpc_error(&self) -> serde_json::Value {
        serde_json::json!({
            "scrapeCode": self.code(),
            "message": self.to_string(),
        })
    }
}
