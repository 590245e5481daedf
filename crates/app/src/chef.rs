//! Chef Virtual text-completion client.
//!
//! Wraps the remote text-generation endpoint behind a contract the rest of
//! the storefront relies on: [`Chef::complete`] always resolves to a
//! user-presentable string. A missing credential selects a locally
//! simulated reply, and transport or response-shape failures degrade to
//! friendly fallback strings instead of propagating.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use zeroize::Zeroize;

/// Default generation model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-09-2025";

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Fixed delay before a simulated reply, preserving perceived latency.
pub const SIMULATED_LATENCY: Duration = Duration::from_millis(1000);

/// Reply returned when no API key is configured.
pub const SIMULATED_REPLY: &str =
    "Simulação: A API Key não foi encontrada, mas o app funcionaria assim!";

/// Reply returned when the response carried no usable candidate text.
pub const EMPTY_REPLY_FALLBACK: &str = "Desculpe, meu cérebro congelou! 🍦 Tente novamente.";

/// Reply returned when the endpoint could not be reached.
pub const TRANSPORT_FALLBACK: &str = "Erro ao conectar com o Chef Virtual. Tente mais tarde.";

/// API key secret. Wiped from memory on drop and redacted from debug output.
#[derive(Clone)]
pub struct ApiKey {
    value: String,
}

impl ApiKey {
    /// Wraps a raw key string.
    #[must_use]
    pub fn new(value: String) -> Self {
        Self { value }
    }

    /// The raw key, for request signing.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

impl Drop for ApiKey {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}

/// Configuration for the chef client.
#[derive(Debug, Clone)]
pub struct ChefConfig {
    /// Optional API key; when absent, replies are simulated locally.
    pub api_key: Option<ApiKey>,

    /// Generation model name.
    pub model: String,

    /// API base URL.
    pub base_url: String,
}

impl Default for ChefConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Errors internal to a live generation call. These never escape
/// [`Chef::complete`]; they are converted to fallback strings there.
#[derive(Debug, Error)]
pub enum ChefError {
    /// An HTTP transport or deserialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint returned a non-2xx response.
    #[error("unexpected response from text-generation endpoint: {0}")]
    UnexpectedResponse(String),

    /// The response carried no candidate text.
    #[error("response contained no candidate text")]
    MissingText,
}

/// A prompt-to-text completion boundary.
#[automock]
#[async_trait]
pub trait Chef: Send + Sync {
    /// Completes `prompt`, always resolving to a displayable string.
    async fn complete(&self, prompt: &str) -> String;
}

/// HTTP client for the text-generation endpoint. Stateless; each call is
/// an independent request with no retries and no deduplication.
#[derive(Debug, Clone)]
pub struct ChefClient {
    config: ChefConfig,
    http: Client,
}

impl ChefClient {
    /// Creates a new client from the given configuration.
    #[must_use]
    pub fn new(config: ChefConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    async fn generate(&self, api_key: &ApiKey, prompt: &str) -> Result<String, ChefError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        let body = serde_json::json!({ "contents": [{ "parts": [{ "text": prompt }] }] });

        let response = self
            .http
            .post(&url)
            .query(&[("key", api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(ChefError::UnexpectedResponse(format!(
                "generate request failed with status {status}: {text}"
            )));
        }

        let parsed: GenerateResponse = response.json().await?;

        extract_text(parsed).ok_or(ChefError::MissingText)
    }
}

#[async_trait]
impl Chef for ChefClient {
    async fn complete(&self, prompt: &str) -> String {
        let Some(api_key) = self.config.api_key.as_ref() else {
            tracing::warn!("no API key configured; simulating chef reply");
            tokio::time::sleep(SIMULATED_LATENCY).await;
            return SIMULATED_REPLY.to_string();
        };

        match self.generate(api_key, prompt).await {
            Ok(text) => text,
            Err(ChefError::MissingText) => {
                tracing::warn!("chef reply carried no candidate text");
                EMPTY_REPLY_FALLBACK.to_string()
            }
            Err(error) => {
                tracing::error!(%error, "chef request failed");
                TRANSPORT_FALLBACK.to_string()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

fn extract_text(response: GenerateResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .next()?
        .text
        .filter(|text| !text.is_empty())
}
