//! LLM provider implementations.
//!
//! `build(config, api_key)` is the factory — called once at startup.
//! Adding a new backend = new module + new match arm.

pub mod dummy;
pub mod gemini;

use crate::config::LlmConfig;
use crate::llm::{LlmProvider, ProviderError};

/// Construct a `LlmProvider` from config and an optional API key.
///
/// `api_key` is sourced from `GOOGLE_API_KEY` env (never TOML). The gemini
/// backend requires it: a missing or empty key fails construction, which
/// happens before the listener is bound.
pub fn build(config: &LlmConfig, api_key: Option<String>) -> Result<LlmProvider, ProviderError> {
    match config.provider.as_str() {
        "dummy" => Ok(LlmProvider::Dummy(dummy::DummyProvider)),
        "gemini" => {
            let key = api_key
                .filter(|k| !k.is_empty())
                .ok_or_else(|| ProviderError::Credential("GOOGLE_API_KEY is not set".to_string()))?;
            let g = &config.gemini;
            let p = gemini::GeminiProvider::new(g.api_base_url.clone(), g.model.clone(), key)?;
            Ok(LlmProvider::Gemini(p))
        }
        _ => Err(ProviderError::UnknownProvider(config.provider.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn builds_dummy_without_key() {
        let cfg = Config::test_default();
        let provider = build(&cfg.llm, None).unwrap();
        assert_eq!(provider.name(), "dummy");
    }

    #[test]
    fn builds_gemini_with_key() {
        let mut cfg = Config::test_default();
        cfg.llm.provider = "gemini".into();
        let provider = build(&cfg.llm, Some("test-key".into())).unwrap();
        assert_eq!(provider.name(), "gemini");
    }

    #[test]
    fn gemini_without_key_is_a_credential_error() {
        let mut cfg = Config::test_default();
        cfg.llm.provider = "gemini".into();
        let err = build(&cfg.llm, None).unwrap_err();
        assert!(matches!(err, ProviderError::Credential(_)));
        assert!(err.to_string().contains("GOOGLE_API_KEY"));
    }

    #[test]
    fn gemini_with_empty_key_is_a_credential_error() {
        let mut cfg = Config::test_default();
        cfg.llm.provider = "gemini".into();
        let err = build(&cfg.llm, Some(String::new())).unwrap_err();
        assert!(matches!(err, ProviderError::Credential(_)));
    }

    #[test]
    fn unknown_provider_errors() {
        let mut cfg = Config::test_default();
        cfg.llm.provider = "mystery".into();
        let err = build(&cfg.llm, None).unwrap_err();
        assert!(matches!(err, ProviderError::UnknownProvider(_)));
        assert!(err.to_string().contains("mystery"));
    }
}
