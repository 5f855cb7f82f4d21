//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory
//! (built-in defaults apply when the file is absent, so the service runs
//! from env vars alone), then applies `PORT` and `TRIAGE_LOG_LEVEL` env
//! overrides. The API key comes from `GOOGLE_API_KEY` only — never TOML.

use std::{env, fs, path::Path};

use serde::Deserialize;

use crate::error::AppError;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// HTTP listener configuration (`[relay]`).
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Socket address the relay binds to.
    pub bind: String,
    pub log_level: String,
}

/// Gemini provider configuration (`[llm.gemini]`).
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Base URL up to (not including) the model path segment.
    pub api_base_url: String,
    /// Model name spliced into the request path.
    pub model: String,
}

/// LLM provider selection.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Which provider is active (`"gemini"` or `"dummy"`).
    /// Maps to `default` in `[llm]` TOML — named `default` there to signal
    /// that other provider sections can coexist without being loaded.
    pub provider: String,
    pub gemini: GeminiConfig,
}

/// Fully-resolved service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub relay: RelayConfig,
    pub llm: LlmConfig,
    /// API key from `GOOGLE_API_KEY` env — required by the gemini provider,
    /// whose construction fails fast when this is `None`.
    pub api_key: Option<String>,
}

// ── Raw TOML shape — serde target before resolution ───────────────────────────

#[derive(Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    relay: RawRelay,
    #[serde(default)]
    llm: RawLlm,
}

#[derive(Deserialize)]
struct RawRelay {
    #[serde(default = "default_bind")]
    bind: String,
    #[serde(default = "default_log_level")]
    log_level: String,
}

impl Default for RawRelay {
    fn default() -> Self {
        Self { bind: default_bind(), log_level: default_log_level() }
    }
}

#[derive(Deserialize)]
struct RawLlm {
    /// Maps to `default = "..."` in `[llm]`.
    #[serde(rename = "default", default = "default_llm_provider")]
    provider: String,
    #[serde(default)]
    gemini: RawGemini,
}

impl Default for RawLlm {
    fn default() -> Self {
        Self { provider: default_llm_provider(), gemini: RawGemini::default() }
    }
}

#[derive(Deserialize)]
struct RawGemini {
    #[serde(default = "default_gemini_api_base_url")]
    api_base_url: String,
    #[serde(default = "default_gemini_model")]
    model: String,
}

impl Default for RawGemini {
    fn default() -> Self {
        Self {
            api_base_url: default_gemini_api_base_url(),
            model: default_gemini_model(),
        }
    }
}

fn default_bind() -> String { "0.0.0.0:8484".to_string() }
fn default_log_level() -> String { "info".to_string() }
fn default_llm_provider() -> String { "gemini".to_string() }
fn default_gemini_api_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models".to_string()
}
fn default_gemini_model() -> String { "gemini-1.5-flash".to_string() }

// ── Loading ───────────────────────────────────────────────────────────────────

/// Load config, then apply env-var overrides.
///
/// An explicit `path` must exist; the default path is optional and falls
/// back to built-in defaults when absent.
pub fn load(path: Option<&str>) -> Result<Config, AppError> {
    let port_override = env::var("PORT").ok();
    let log_level_override = env::var("TRIAGE_LOG_LEVEL").ok();
    let api_key = env::var("GOOGLE_API_KEY").ok();

    let raw = match path {
        Some(p) => Some(read_config(Path::new(p))?),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                Some(read_config(default_path)?)
            } else {
                None
            }
        }
    };

    resolve(
        raw.as_deref(),
        port_override.as_deref(),
        log_level_override.as_deref(),
        api_key,
    )
}

/// Internal loader — accepts an explicit path and optional overrides.
/// Tests pass overrides directly instead of mutating env vars.
pub fn load_from(
    path: &Path,
    port_override: Option<&str>,
    log_level_override: Option<&str>,
    api_key: Option<String>,
) -> Result<Config, AppError> {
    let raw = read_config(path)?;
    resolve(Some(&raw), port_override, log_level_override, api_key)
}

fn read_config(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))
}

fn resolve(
    toml_text: Option<&str>,
    port_override: Option<&str>,
    log_level_override: Option<&str>,
    api_key: Option<String>,
) -> Result<Config, AppError> {
    let parsed: RawConfig = match toml_text {
        Some(text) => toml::from_str(text)
            .map_err(|e| AppError::Config(format!("config parse error: {e}")))?,
        None => RawConfig::default(),
    };

    // PORT replaces only the port part of the bind address.
    let mut bind = parsed.relay.bind;
    if let Some(port) = port_override {
        let port: u16 = port
            .parse()
            .map_err(|_| AppError::Config(format!("invalid PORT value: '{port}'")))?;
        let host = bind
            .rsplit_once(':')
            .map(|(host, _)| host.to_string())
            .unwrap_or_else(|| bind.clone());
        bind = format!("{host}:{port}");
    }

    let log_level = log_level_override
        .unwrap_or(&parsed.relay.log_level)
        .to_string();

    Ok(Config {
        relay: RelayConfig { bind, log_level },
        llm: LlmConfig {
            provider: parsed.llm.provider,
            gemini: GeminiConfig {
                api_base_url: parsed.llm.gemini.api_base_url,
                model: parsed.llm.gemini.model,
            },
        },
        api_key,
    })
}

// ── test helpers ──────────────────────────────────────────────────────────────

/// Safe `Config` for unit tests — dummy provider, no API key, no network.
#[cfg(test)]
impl Config {
    pub fn test_default() -> Self {
        Self {
            relay: RelayConfig {
                bind: "127.0.0.1:0".into(),
                log_level: "info".into(),
            },
            llm: LlmConfig {
                provider: "dummy".into(),
                gemini: GeminiConfig {
                    api_base_url: "http://localhost:0/v1beta/models".into(),
                    model: "test-model".into(),
                },
            },
            api_key: None,
        }
    }
}
