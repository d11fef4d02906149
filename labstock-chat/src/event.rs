//! Serverless HTTP event and response shapes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Inbound HTTP event as delivered by the function runtime.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpEvent {
    pub http_method: String,
    #[serde(default)]
    pub body: Option<String>,
}

/// Outbound HTTP response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl HttpResponse {
    /// Response with a JSON value body and permissive CORS headers.
    pub fn json(status_code: u16, body: serde_json::Value) -> Self {
        Self {
            status_code,
            headers: cors_headers(),
            body: body.to_string(),
        }
    }

    /// Response passing a pre-serialized body through untouched.
    pub fn raw(status_code: u16, body: String) -> Self {
        Self {
            status_code,
            headers: cors_headers(),
            body,
        }
    }
}

/// Permissive cross-origin headers attached to every response, preflight
/// included.
pub fn cors_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        (
            "Access-Control-Allow-Headers".to_string(),
            "Content-Type".to_string(),
        ),
        (
            "Access-Control-Allow-Methods".to_string(),
            "POST, OPTIONS".to_string(),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn response_serializes_camel_case() {
        let response = HttpResponse::json(200, json!({ "ok": true }));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["statusCode"].as_u64(), Some(200));
        assert_eq!(
            value["headers"]["Access-Control-Allow-Origin"].as_str(),
            Some("*")
        );
    }

    #[test]
    fn event_accepts_missing_body() {
        let event: HttpEvent =
            serde_json::from_str("{\"httpMethod\": \"OPTIONS\"}").unwrap();
        assert_eq!(event.http_method, "OPTIONS");
        assert!(event.body.is_none());
    }
}
