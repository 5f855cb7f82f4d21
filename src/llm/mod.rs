//! LLM provider abstraction.
//!
//! `LlmProvider` is an enum over concrete provider implementations.
//! Add a new variant + module in `providers/` for each additional backend.
//!
//! Providers return the vendor's raw response envelope as JSON; shape
//! interpretation lives in [`extract`], which owns the fallback rules.
//! Provider instances are shared immutable capabilities — clone them freely.

pub mod extract;
pub mod providers;

use serde_json::Value;
use thiserror::Error;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
    #[error("missing API credential: {0}")]
    Credential(String),
    #[error("upstream request failed: {0}")]
    Upstream(String),
}

// ── Provider enum ─────────────────────────────────────────────────────────────

/// All available provider backends.
///
/// Enum dispatch avoids `dyn` trait objects and the `async-trait` dependency.
/// Adding a backend = new module + new variant + new `generate` arm.
#[derive(Debug, Clone)]
pub enum LlmProvider {
    Gemini(providers::gemini::GeminiProvider),
    Dummy(providers::dummy::DummyProvider),
}

impl LlmProvider {
    /// Send `symptoms` to the provider and return the raw response envelope.
    pub async fn generate(&self, symptoms: &str) -> Result<Value, ProviderError> {
        match self {
            LlmProvider::Gemini(p) => p.generate(symptoms).await,
            LlmProvider::Dummy(p) => p.generate(symptoms).await,
        }
    }

    /// Short provider name for logs and the health endpoint.
    pub fn name(&self) -> &'static str {
        match self {
            LlmProvider::Gemini(_) => "gemini",
            LlmProvider::Dummy(_) => "dummy",
        }
    }
}
