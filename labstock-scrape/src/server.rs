//! ScrapeServer — JSON-RPC dispatcher.
//!
//! Routes incoming JSON-RPC 2.0 requests (NDJSON over stdin) to the
//! extraction client. The client is created by `scrape/initialize`, which
//! resolves the API key from params or the environment.

use std::env;

use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::classify::classify;
use crate::client::ScrapeClient;
use crate::error::ScrapeError;
use crate::protocol::*;
use crate::transport::NdjsonTransport;

pub const API_KEY_ENV: &str = "FIRECRAWL_API_KEY";

pub struct ScrapeServer {
    transport: NdjsonTransport,
    client: Option<ScrapeClient>,
}

impl ScrapeServer {
    /// Create a new server. The client is created lazily by
    /// `scrape/initialize`.
    pub fn new(transport: NdjsonTransport) -> Self {
        Self {
            transport,
            client: None,
        }
    }

    /// Main loop: read JSON-RPC messages from stdin, dispatch to handlers.
    pub async fn run(&mut self) -> Result<(), ScrapeError> {
        let stdin = tokio::io::stdin();
        let mut lines = BufReader::new(stdin).lines();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let request: JsonRpcRequest = match serde_json::from_str(&line) {
                Ok(r) => r,
                Err(e) => {
                    tracing::error!("Failed to parse request: {}", e);
                    continue;
                }
            };

            self.dispatch(request).await;
        }

        Ok(())
    }

    async fn dispatch(&mut self, req: JsonRpcRequest) {
        let id = req.id;
        let result = match req.method.as_str() {
            "scrape/initialize" => self.handle_initialize(req.params),
            "scrape/classify" => handle_classify(req.params),
            "scrape/page" => match &self.client {
                Some(client) => handle_page(client, req.params).await,
                None => Err(ScrapeError::NotInitialized),
            },
            "scrape/batch" => match &self.client {
                Some(client) => handle_batch(client, req.params).await,
                None => Err(ScrapeError::NotInitialized),
            },
            _ => {
                self.transport.write_error(
                    id,
                    METHOD_NOT_FOUND,
                    format!("Unknown method: {}", req.method),
                    None,
                );
                return;
            }
        };

        match result {
            Ok(value) => self.transport.write_response(id, value),
            Err(e) => self.transport.write_error(
                id,
                SCRAPE_ERROR,
                e.to_string(),
                Some(e.to_json_rpc_error()),
            ),
        }
    }

    fn handle_initialize(
        &mut self,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, ScrapeError> {
        let p: InitializeParams = parse_params(params)?;

        let api_key = p
            .api_key
            .or_else(|| env::var(API_KEY_ENV).ok())
            .filter(|k| !k.trim().is_empty())
            .ok_or(ScrapeError::MissingApiKey)?;

        self.client = Some(ScrapeClient::new(api_key, p.base_url)?);
        Ok(serde_json::json!({}))
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────

fn parse_params<T: serde::de::DeserializeOwned>(
    params: serde_json::Value,
) -> Result<T, ScrapeError> {
    serde_json::from_value(params)
        .map_err(|e| ScrapeError::Serialization(format!("Invalid params: {}", e)))
}

fn handle_classify(params: serde_json::Value) -> Result<serde_json::Value, ScrapeError> {
    let p: NameParams = parse_params(params)?;
    let category = classify(&p.name);
    Ok(serde_json::json!({ "category": category }))
}

async fn handle_page(
    client: &ScrapeClient,
    params: serde_json::Value,
) -> Result<serde_json::Value, ScrapeError> {
    let p: UrlParams = parse_params(params)?;
    let result = client.scrape_page(&p.url).await?;
    serde_json::to_value(result).map_err(|e| ScrapeError::Serialization(e.to_string()))
}

async fn handle_batch(
    client: &ScrapeClient,
    params: serde_json::Value,
) -> Result<serde_json::Value, ScrapeError> {
    let p: UrlsParams = parse_params(params)?;
    let results = client.scrape_batch(&p.urls).await;
    Ok(serde_json::json!({ "count": results.len(), "results": results }))
}

// ── Param types ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InitializeParams {
    api_key: Option<String>,
    base_url: Option<String>,
}

#[derive(Deserialize)]
struct NameParams {
    name: String,
}

#[derive(Deserialize)]
struct UrlParams {
    url: String,
}

#[derive(Deserialize)]
struct UrlsParams {
    urls: Vec<String>,
}
