//! Extraction API client.
//!
//! Thin wrapper over the third-party scrape endpoint: bearer-token POST with
//! a target URL and an LLM-extraction schema, no retries. Batch scraping is
//! sequential with a fixed pause between requests; per-URL failures are
//! logged and skipped so the rest of the batch still lands.

use std::time::Duration;

use serde_json::json;

use crate::error::ScrapeError;
use crate::extract::{parse_extraction, ScrapeResult};

pub const DEFAULT_BASE_URL: &str = "https://api.firecrawl.dev/v0";

/// Pause between successive scrape requests in a batch.
const BATCH_DELAY: Duration = Duration::from_secs(2);

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const EXTRACTION_PROMPT: &str = "Extract all product/compound information including:\n\
    - Product names\n\
    - Prices (in USD)\n\
    - Dosages/concentrations\n\
    - Categories (oral, injectable, etc)\n\
    - Any minimum order requirements\n\
    - Shipping information\n\
    Format as structured JSON array.";

pub struct ScrapeClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl ScrapeClient {
    /// Create a new client against the given base URL (or the default one).
    pub fn new(api_key: String, base_url: Option<String>) -> Result<Self, ScrapeError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            api_key,
            http,
        })
    }

    /// Scrape one page and map the extraction into catalog records.
    pub async fn scrape_page(&self, url: &str) -> Result<ScrapeResult, ScrapeError> {
        tracing::debug!(url = %url, "Sending scrape request");

        let response = self
            .http
            .post(format!("{}/scrape", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body(url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::UpstreamStatus(status.as_u16()));
        }

        let value: serde_json::Value = response.json().await?;
        parse_extraction(value, url)
    }

    /// Scrape a list of pages sequentially, pausing between requests.
    /// Failures are logged per URL and do not abort the batch.
    pub async fn scrape_batch(&self, urls: &[String]) -> Vec<ScrapeResult> {
        let mut results = Vec::new();

        for (i, url) in urls.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(BATCH_DELAY).await;
            }
            match self.scrape_page(url).await {
                Ok(result) => {
                    tracing::info!(url = %url, compounds = result.compounds.len(), "Scraped page");
                    results.push(result);
                }
                Err(e) => {
                    tracing::error!(url = %url, "Failed to scrape: {}", e);
                }
            }
        }

        results
    }
}

fn request_body(url: &str) -> serde_json::Value {
    json!({
        "url": url,
        "pageOptions": {
            "waitForSelector": ".message-content",
            "screenshot": false,
            "fullPageScreenshot": false,
        },
        "extractorOptions": {
            "mode": "llm-extraction",
            "extractionPrompt": EXTRACTION_PROMPT,
            "extractionSchema": {
                "type": "object",
                "properties": {
                    "products": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "name": { "type": "string" },
                                "price": { "type": "number" },
                                "category": { "type": "string" },
                                "dosage": { "type": "string" },
                                "minOrder": { "type": "number" },
                                "notes": { "type": "string" },
                            },
                        },
                    },
                    "vendorInfo": {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string" },
                            "minOrderAmount": { "type": "number" },
                            "shippingCost": { "type": "number" },
                            "acceptedPayments": { "type": "array" },
                        },
                    },
                },
            },
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client =
            ScrapeClient::new("key".into(), Some("https://api.example/v0/".into())).unwrap();
        assert_eq!(client.base_url, "https://api.example/v0");
    }

    #[test]
    fn request_body_carries_url_and_schema() {
        let body = request_body("https://forum.example/thread");
        assert_eq!(body["url"].as_str(), Some("https://forum.example/thread"));
        assert_eq!(
            body["extractorOptions"]["mode"].as_str(),
            Some("llm-extraction")
        );
        assert!(body["extractorOptions"]["extractionSchema"]["properties"]["products"].is_object());
    }
}
