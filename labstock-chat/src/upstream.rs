//! Upstream chat-completion client.
//!
//! Proxies to the Gemini `generateContent` endpoint via HTTP, in the same
//! opaque request/response style as the rest of the stack: one POST, no
//! retries, the raw body returned on success.

use std::time::Duration;

use serde_json::json;

use crate::error::ChatError;

pub const DEFAULT_UPSTREAM_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash-latest:generateContent";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub struct UpstreamClient {
    url: String,
    http: reqwest::Client,
}

impl UpstreamClient {
    pub fn new(url: Option<String>) -> Result<Self, ChatError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            url: url.unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string()),
            http,
        })
    }

    /// Send one generation request and return the upstream's raw response
    /// body. Non-success statuses are upstream errors, not responses.
    pub async fn generate(
        &self,
        api_key: &str,
        system_prompt: &str,
        message: &str,
    ) -> Result<String, ChatError> {
        let response = self
            .http
            .post(&self.url)
            .query(&[("key", api_key)])
            .json(&request_body(system_prompt, message))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::UpstreamStatus(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

/// Build the generateContent request payload. The system prompt and the user
/// message travel as two parts of a single user turn.
pub fn request_body(system_prompt: &str, message: &str) -> serde_json::Value {
    json!({
        "contents": [
            {
                "role": "user",
                "parts": [
                    { "text": system_prompt },
                    { "text": format!("User message: {}", message) },
                ],
            }
        ],
        "generationConfig": {
            "temperature": 0.7,
            "topK": 40,
            "topP": 0.95,
            "maxOutputTokens": 1024,
            "candidateCount": 1,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_carries_prompt_and_message() {
        let body = request_body("You are a coach.", "How much protein?");
        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["text"].as_str(), Some("You are a coach."));
        assert_eq!(
            parts[1]["text"].as_str(),
            Some("User message: How much protein?")
        );
        assert_eq!(body["generationConfig"]["maxOutputTokens"].as_u64(), Some(1024));
        assert!((body["generationConfig"]["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-9);
    }
}
