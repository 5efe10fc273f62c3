//! Configuration management for the currency agent.
//!
//! Configuration is read from environment variables (a `.env` file in the
//! working directory is loaded first, if present):
//! - `GROQ_API_KEY` - Required. API key for the LLM provider.
//! - `EXCHANGE_RATE_API_KEY` - API key for the exchange-rate provider. Not
//!   validated; when unset the provider rejects the request.
//! - `EXCHANGE_RATE_BASE_URL` - Optional. Defaults to `https://v6.exchangerate-api.com/v6`.
//! - `LLM_BASE_URL` - Optional. OpenAI-compatible API root. Defaults to `https://api.groq.com/openai/v1`.
//! - `DEFAULT_MODEL` - Optional. Defaults to `llama3-8b-8192`.
//! - `MAX_ITERATIONS` - Optional. Maximum agent loop iterations per query. Defaults to `15`.

use thiserror::Error;

use crate::llm::DEFAULT_BASE_URL as DEFAULT_LLM_BASE_URL;

pub const DEFAULT_EXCHANGE_RATE_BASE_URL: &str = "https://v6.exchangerate-api.com/v6";
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";
pub const DEFAULT_MAX_ITERATIONS: usize = 15;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not found in environment variables.")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Agent configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// LLM provider API key
    pub llm_api_key: String,

    /// OpenAI-compatible API root of the LLM provider
    pub llm_base_url: String,

    /// Model identifier
    pub default_model: String,

    /// Exchange-rate provider API key (may be empty)
    pub exchange_rate_api_key: String,

    /// Exchange-rate provider root, without key or `latest` segment
    pub exchange_rate_base_url: String,

    /// Maximum iterations for the agent loop
    pub max_iterations: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `GROQ_API_KEY` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup` instead of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let llm_api_key = lookup("GROQ_API_KEY")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("GROQ_API_KEY".to_string()))?;

        let exchange_rate_api_key = lookup("EXCHANGE_RATE_API_KEY").unwrap_or_else(|| {
            tracing::warn!("EXCHANGE_RATE_API_KEY is not set; conversions will be rejected by the provider");
            String::new()
        });

        let exchange_rate_base_url = lookup("EXCHANGE_RATE_BASE_URL")
            .unwrap_or_else(|| DEFAULT_EXCHANGE_RATE_BASE_URL.to_string());

        let llm_base_url =
            lookup("LLM_BASE_URL").unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string());

        let default_model = lookup("DEFAULT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let max_iterations = match lookup("MAX_ITERATIONS") {
            Some(v) => v
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    ConfigError::InvalidValue(
                        "MAX_ITERATIONS".to_string(),
                        format!("expected a positive integer, got: {}", v),
                    )
                })?,
            None => DEFAULT_MAX_ITERATIONS,
        };

        Ok(Self {
            llm_api_key,
            llm_base_url,
            default_model,
            exchange_rate_api_key,
            exchange_rate_base_url,
            max_iterations,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(llm_api_key: String, exchange_rate_api_key: String) -> Self {
        Self {
            llm_api_key,
            llm_base_url: DEFAULT_LLM_BASE_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            exchange_rate_api_key,
            exchange_rate_base_url: DEFAULT_EXCHANGE_RATE_BASE_URL.to_string(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}
