//! Gemini `generateContent` provider.
//!
//! Exposes a single `generate(&str) -> Value` interface matching the rest
//! of the `LlmProvider` abstraction. Request wire types are private to this
//! module — callers never see them. The response is returned as raw JSON
//! because shape interpretation (and its fallback rules) belongs to
//! [`crate::llm::extract`].

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, trace};

use crate::llm::ProviderError;

// ── Public provider ───────────────────────────────────────────────────────────

/// Adapter for the Gemini REST endpoint (`{base}/{model}:generateContent`).
///
/// Constructed once at startup, then cheaply cloned because
/// `reqwest::Client` is an `Arc` internally. The client carries no request
/// timeout: each call is a single attempt and latency handling stays with
/// the caller.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: Client,
    api_base_url: String,
    model: String,
    api_key: String,
}

impl GeminiProvider {
    pub fn new(api_base_url: String, model: String, api_key: String) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ProviderError::Upstream(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, api_base_url, model, api_key })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.api_base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Ask the model which specialist fits `symptoms`.
    ///
    /// One round-trip, no retry. The key travels in the `x-goog-api-key`
    /// header, never in the URL. Returns the raw response envelope on
    /// success; any transport failure or non-success HTTP status becomes a
    /// [`ProviderError::Upstream`] carrying the status code and reason
    /// phrase.
    pub async fn generate(&self, symptoms: &str) -> Result<Value, ProviderError> {
        let payload = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user".to_string(),
                parts: vec![RequestPart { text: specialist_prompt(symptoms) }],
            }],
        };

        let url = self.endpoint();
        debug!(model = %self.model, symptoms_len = symptoms.len(), "sending generate request");
        if tracing::enabled!(tracing::Level::TRACE) {
            let json = serde_json::to_string_pretty(&payload)
                .unwrap_or_else(|e| format!("<serialization failed: {e}>"));
            trace!(payload = %json, "full generate request payload");
        }

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(%url, error = %e, "generate request failed (transport)");
                ProviderError::Upstream(e.to_string())
            })?;

        let response = check_status(response).await?;

        let envelope = response.json::<Value>().await.map_err(|e| {
            error!(error = %e, "failed to read generate response body");
            ProviderError::Upstream(format!("failed to parse response body: {e}"))
        })?;

        if tracing::enabled!(tracing::Level::TRACE) {
            trace!(response = %envelope, "full generate response payload");
        }

        Ok(envelope)
    }
}

/// Single-turn prompt: the model must answer with a specialist name only.
fn specialist_prompt(symptoms: &str) -> String {
    format!(
        "Given these symptoms: \"{symptoms}\", suggest ONLY the medical specialist \
         the patient should consult (e.g., \"Cardiologist\", \"Dermatologist\", \
         \"Orthopedist\"). Return just the specialist name, nothing else."
    )
}

// ── Private wire types ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    role: String,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

// Error envelope used by the Gemini API.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Consume the response and return it if successful, or a structured error.
///
/// The error message always carries the HTTP status code and reason phrase;
/// the vendor error body is appended when it parses as the error envelope.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read error body>".to_string());

    let message = if let Ok(env) = serde_json::from_str::<ErrorEnvelope>(&body) {
        let code = env.error.status.map(|s| format!(" [{s}]")).unwrap_or_default();
        format!("HTTP {status}{code}: {}", env.error.message)
    } else {
        format!("HTTP {status}: {body}")
    };

    error!(%status, %message, "generate request returned HTTP error");
    Err(ProviderError::Upstream(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(base: &str) -> GeminiProvider {
        GeminiProvider::new(base.to_string(), "gemini-1.5-flash".to_string(), "k".to_string())
            .unwrap()
    }

    #[test]
    fn endpoint_splices_model_into_path() {
        let p = provider("https://generativelanguage.googleapis.com/v1beta/models");
        assert_eq!(
            p.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let p = provider("https://generativelanguage.googleapis.com/v1beta/models/");
        assert_eq!(
            p.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn prompt_embeds_symptoms_and_instruction() {
        let prompt = specialist_prompt("chest pain");
        assert!(prompt.contains("\"chest pain\""));
        assert!(prompt.contains("ONLY the medical specialist"));
        assert!(prompt.contains("nothing else"));
    }

    #[test]
    fn request_envelope_serializes_to_vendor_shape() {
        let payload = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user".to_string(),
                parts: vec![RequestPart { text: "hi".to_string() }],
            }],
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
    }
}
