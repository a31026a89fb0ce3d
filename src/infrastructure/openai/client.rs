//! HTTP client for an OpenAI-compatible chat-completions endpoint.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::domain::models::CompletionConfig;
use crate::domain::ports::{CompletionRequest, CompletionService, ServiceError};

use super::errors::OpenAiApiError;
use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

/// Configuration for the completions HTTP client.
#[derive(Debug, Clone)]
pub struct OpenAiClientConfig {
    /// API key for authentication.
    pub api_key: String,
    /// Base URL of the endpoint.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl OpenAiClientConfig {
    /// Build from the loaded application config; fails when no API key is
    /// configured.
    pub fn from_config(config: &CompletionConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .context("no API key configured; set completion.api_key or OPENAI_API_KEY")?;
        Ok(Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
        })
    }
}

/// Completion service adapter over HTTP.
///
/// Connection pooling comes from the shared `reqwest::Client`. The request
/// timeout bounds the pipeline's only suspension point; a timeout surfaces
/// as [`ServiceError::Timeout`] and the stage treats it as terminal.
pub struct OpenAiClient {
    http_client: ReqwestClient,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(config: OpenAiClientConfig) -> Result<Self> {
        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http_client,
            api_key: config.api_key,
            base_url: config.base_url,
        })
    }

    async fn send_request(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, OpenAiApiError> {
        let response = self
            .http_client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    OpenAiApiError::Timeout
                } else {
                    OpenAiApiError::NetworkError(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            return Err(OpenAiApiError::from_status(status, body));
        }

        response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(OpenAiApiError::NetworkError)
    }
}

#[async_trait]
impl CompletionService for OpenAiClient {
    #[instrument(skip_all, fields(model = %request.model))]
    async fn complete(&self, request: CompletionRequest) -> Result<String, ServiceError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system {
            messages.push(ChatMessage::system(system.clone()));
        }
        messages.push(ChatMessage::user(request.prompt));

        let wire_request = ChatCompletionRequest {
            model: request.model,
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .send_request(&wire_request)
            .await
            .map_err(|e| match e {
                // reqwest reports body-decode problems as errors too; keep
                // the decode case distinct for callers.
                OpenAiApiError::NetworkError(ref inner) if inner.is_decode() => {
                    ServiceError::Decode(inner.to_string())
                }
                other => ServiceError::from(other),
            })?;

        debug!("completion response received");
        response.first_text().ok_or(ServiceError::EmptyResponse)
    }
}
