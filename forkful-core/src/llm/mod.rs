//! Completion-service abstraction.
//!
//! This module provides a trait-based abstraction over text-completion
//! providers (Claude, plus a fake for tests). Providers take a system
//! prompt and a role-tagged message history and return the raw text
//! reply; extraction of structured recipes happens downstream in
//! [`crate::extract`].

mod claude;
mod fake;

pub use claude::ClaudeProvider;
pub use fake::FakeProvider;

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for completion-service operations.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// Who said a message in the conversation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn of conversation history.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A completion request: system prompt plus passthrough history.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub system: String,
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    pub fn new(system: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            system: system.into(),
            messages,
        }
    }

    /// Single-turn request, used by the search and detail endpoints.
    pub fn single(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            messages: vec![ChatMessage::user(user)],
        }
    }
}

/// Trait for completion providers.
///
/// Implementations should be stateless and thread-safe. The provider is
/// responsible for making API calls and returning the model's text reply.
#[async_trait]
pub trait CompletionProvider: Send + Sync + fmt::Debug {
    /// Send a request to the model and get the raw text response.
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError>;

    /// Get the provider name (e.g., "claude", "fake").
    fn provider_name(&self) -> &'static str;

    /// Get the model name (e.g., "claude-sonnet-4-20250514").
    fn model_name(&self) -> &str;
}

/// Registry of available providers.
///
/// Use environment variables to configure:
/// - FORKFUL_LLM_PROVIDER: "claude" | "fake"
/// - FORKFUL_LLM_MODEL: Model name (provider-specific)
/// - ANTHROPIC_API_KEY: API key for Claude
pub fn create_provider_from_env() -> Result<Box<dyn CompletionProvider>, LlmError> {
    let provider = std::env::var("FORKFUL_LLM_PROVIDER").unwrap_or_else(|_| "claude".to_string());

    match provider.as_str() {
        "fake" => Ok(Box::new(FakeProvider::default())),
        "claude" => {
            let api_key = std::env::var("ANTHROPIC_API_KEY")
                .map_err(|_| LlmError::NotConfigured("ANTHROPIC_API_KEY not set".to_string()))?;
            let model = std::env::var("FORKFUL_LLM_MODEL")
                .unwrap_or_else(|_| "claude-sonnet-4-20250514".to_string());
            Ok(Box::new(ClaudeProvider::new(api_key, model)))
        }
        other => Err(LlmError::NotConfigured(format!(
            "Unknown provider: {}",
            other
        ))),
    }
}
