//! Port trait for the text-completion service.
//!
//! The pipeline treats the language model as an opaque capability: hand it a
//! prompt, get free-form text back. The trait abstracts the HTTP client so
//! tests can substitute a scripted mock and adapters can target any
//! OpenAI-compatible endpoint.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::CompletionConfig;

/// Errors surfaced by a completion service implementation.
///
/// These are transport-agnostic: adapters translate their own error types
/// (HTTP statuses, socket errors) into this shape so stages never depend on
/// a concrete client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The endpoint answered with a non-success status.
    #[error("completion endpoint returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The request exceeded the configured timeout.
    #[error("completion request timed out")]
    Timeout,

    /// The request never reached the endpoint.
    #[error("network error: {0}")]
    Network(String),

    /// The endpoint answered but the body could not be decoded.
    #[error("failed to decode completion response: {0}")]
    Decode(String),

    /// The endpoint answered with no text content.
    #[error("completion response contained no text")]
    EmptyResponse,
}

/// Model parameters shared by every request in a run.
#[derive(Debug, Clone)]
pub struct ModelParams {
    /// Model identifier (e.g. "gpt-4").
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
}

impl From<&CompletionConfig> for ModelParams {
    fn from(config: &CompletionConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

/// A single completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Optional system prompt establishing the agent persona.
    pub system: Option<String>,
    /// User prompt.
    pub prompt: String,
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// Build a request from shared model parameters and a prompt pair.
    pub fn new(params: &ModelParams, system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: Some(system.into()),
            prompt: prompt.into(),
            model: params.model.clone(),
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        }
    }
}

/// Text-completion capability consumed by pipeline stages.
///
/// Implementations must be `Send + Sync`; the trait takes `&self` so one
/// client can serve every stage. A failed call is terminal for the run:
/// stages never retry.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Send a prompt and wait for the complete response text.
    async fn complete(&self, request: CompletionRequest) -> Result<String, ServiceError>;
}
