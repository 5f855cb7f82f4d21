//! Dummy provider — returns a canned well-formed envelope, no network call.
//! Used for exercising the endpoint and router without a real API key.

use serde_json::{Value, json};

use crate::llm::ProviderError;

#[derive(Debug, Clone)]
pub struct DummyProvider;

impl DummyProvider {
    pub async fn generate(&self, _symptoms: &str) -> Result<Value, ProviderError> {
        Ok(json!({
            "candidates": [
                { "content": { "parts": [ { "text": "General Physician" } ] } }
            ]
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::extract::extract_specialist;

    #[tokio::test]
    async fn envelope_carries_extractable_text() {
        let p = DummyProvider;
        let envelope = p.generate("anything").await.unwrap();
        assert_eq!(extract_specialist(&envelope), "General Physician");
    }
}
