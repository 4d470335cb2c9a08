//! Text generation provider abstraction.
//!
//! The handler only talks to a `TextProvider`; the Gemini implementation is
//! wired in at startup and the mock is used by tests.

pub mod gemini;
pub mod mock;

use crate::prompts::PromptPair;
use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Response blocked: {0}")]
    Blocked(String),

    #[error("Provider returned no text")]
    EmptyResponse,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// True when the request never produced a usable HTTP exchange with the
    /// provider: connectivity failures, missing credentials, or a non-success
    /// status (bad key, quota, malformed request).
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            ProviderError::NotConfigured(_) | ProviderError::Network(_) | ProviderError::Api { .. }
        )
    }
}

/// Per-call generation options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Model identifier, e.g. `gemini-2.5-flash`.
    pub model: String,

    /// Let the model consult web search while generating.
    pub search_grounding: bool,
}

/// Trait for text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Send the instruction block followed by the request block and return
    /// the generated text.
    async fn generate(
        &self,
        prompt: &PromptPair,
        options: &GenerationOptions,
    ) -> Result<String, ProviderError>;
}
