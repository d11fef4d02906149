//! The proxy handler: one HTTP event in, one HTTP response out.
//!
//! Every failure mode is converted into a structured response; raw errors
//! never propagate to the function runtime.

use std::env;

use serde::Deserialize;
use serde_json::json;

use crate::context::{build_assessment_context, AssessmentData};
use crate::error::ChatError;
use crate::event::{HttpEvent, HttpResponse};
use crate::upstream::UpstreamClient;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Coach persona prepended to every upstream request.
const SYSTEM_PROMPT: &str = "\
You are Adam, a Pro bodybuilder and performance coach speaking to fitness enthusiasts.

IMPORTANT: All advice is for research and entertainment purposes only. Always recommend consulting healthcare professionals.

Your expertise combines scientific knowledge with practical bodybuilding experience from years of training and coaching others.

Core principles:
- Evidence-based approach (research + practical experience)
- Conservative risk assessment (safety first)
- Systematic progression (start minimal, scale with evidence)
- Scientific precision (treat decisions seriously)
- Proper monitoring (track metrics and progress)
- Safety first (healthcare supervision recommended)
- Experience matters - practical application with theory

Your personality is direct and no-nonsense like a seasoned professional. You cut through marketing BS with scientific facts and practical advice based on real experience. You are conservative but knowledgeable about performance enhancement when done safely. Always emphasize proper monitoring and healthcare professional supervision.

Provide specific, actionable advice based on proven methods and experience. Keep responses concise but informative.";

/// Server-side configuration, resolved once per invocation.
#[derive(Debug, Clone, Default)]
pub struct ProxyConfig {
    pub api_key: Option<String>,
    pub upstream_url: Option<String>,
}

impl ProxyConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty()),
            upstream_url: None,
        }
    }
}

/// Inbound chat payload. `chatHistory` is accepted for wire compatibility
/// but not forwarded upstream.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub chat_history: Vec<serde_json::Value>,
    #[serde(default)]
    pub assessment_data: Option<AssessmentData>,
}

/// Handle one HTTP event. Every failure becomes a structured response.
pub async fn handle(event: HttpEvent, config: &ProxyConfig) -> HttpResponse {
    // Preflight first: OPTIONS must succeed for the POST to ever arrive.
    if event.http_method == "OPTIONS" {
        return HttpResponse::raw(200, String::new());
    }
    if event.http_method != "POST" {
        return HttpResponse::json(405, json!({ "error": "Method Not Allowed" }));
    }

    match proxy(event, config).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("Proxy failed: {}", e);
            error_response(e)
        }
    }
}

async fn proxy(event: HttpEvent, config: &ProxyConfig) -> Result<HttpResponse, ChatError> {
    let api_key = config.api_key.as_deref().ok_or(ChatError::MissingApiKey)?;
    let request = parse_request(event.body.as_deref())?;

    let assessment_context = build_assessment_context(request.assessment_data.as_ref());
    let system_prompt = format!("{}\n{}", SYSTEM_PROMPT, assessment_context);

    let client = UpstreamClient::new(config.upstream_url.clone())?;
    let body = client
        .generate(api_key, &system_prompt, &request.message)
        .await?;

    Ok(HttpResponse::raw(200, body))
}

fn parse_request(body: Option<&str>) -> Result<ChatRequest, ChatError> {
    let body = body.ok_or_else(|| ChatError::BadRequest("Missing request body".into()))?;
    serde_json::from_str(body).map_err(|e| ChatError::BadRequest(e.to_string()))
}

fn error_response(e: ChatError) -> HttpResponse {
    match e {
        ChatError::MissingApiKey => HttpResponse::json(
            500,
            json!({
                "error": "Missing Gemini API key",
                "instructions": "Please set GEMINI_API_KEY environment variable",
            }),
        ),
        other => HttpResponse::json(
            500,
            json!({ "error": "Internal server error", "message": other.to_string() }),
        ),
    }
}
