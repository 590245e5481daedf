//! Application configuration.
//!
//! Settings come from CLI flags and environment variables; a `.env` file
//! is honoured when present. The chef API key is the single optional
//! credential: its absence switches the client to simulated replies and
//! must never fail configuration loading.

use clap::Args;

use crate::chef::{ApiKey, ChefConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Chef Virtual (text-generation) endpoint settings.
#[derive(Debug, Args)]
pub struct ChefSettings {
    /// API key for the text-generation endpoint; replies are simulated when absent
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Generation model name
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Text-generation API base URL
    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
}

impl ChefSettings {
    /// Builds the chef client configuration, wrapping the key so it is
    /// wiped on drop.
    #[must_use]
    pub fn into_chef_config(self) -> ChefConfig {
        ChefConfig {
            api_key: self.api_key.map(ApiKey::new),
            model: self.model,
            base_url: self.base_url,
        }
    }
}

/// Logging output settings.
#[derive(Debug, Args)]
pub struct LoggingSettings {
    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}
