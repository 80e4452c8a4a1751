//! Image-generation service abstraction.
//!
//! Same shape as [`crate::llm`]: a provider trait, a real client, and a
//! fake. Image generation is strictly best-effort; callers go through
//! [`generate_with_timeout`] so a slow or hung upstream call never delays
//! the user-visible recipe response.

mod fake;
mod openai;

pub use fake::FakeImageProvider;
pub use openai::OpenAiImageProvider;

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Bound on how long a recipe response waits for its image.
pub const IMAGE_TIMEOUT: Duration = Duration::from_secs(30);

/// Error type for image-generation operations.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// Trait for image-generation providers.
#[async_trait]
pub trait ImageProvider: Send + Sync + fmt::Debug {
    /// Generate an image for the prompt, returning a hosted image URL.
    async fn generate(&self, prompt: &str) -> Result<String, ImageError>;

    /// Get the provider name (e.g., "openai", "fake").
    fn provider_name(&self) -> &'static str;
}

/// Run a generation under [`IMAGE_TIMEOUT`].
///
/// Returns `None` on timeout or provider failure; both are logged and
/// swallowed, since a recipe without an image is still a recipe.
pub async fn generate_with_timeout(
    provider: &dyn ImageProvider,
    prompt: &str,
) -> Option<String> {
    match tokio::time::timeout(IMAGE_TIMEOUT, provider.generate(prompt)).await {
        Ok(Ok(url)) => Some(url),
        Ok(Err(e)) => {
            tracing::warn!(provider = provider.provider_name(), error = %e, "Image generation failed");
            None
        }
        Err(_) => {
            tracing::warn!(
                provider = provider.provider_name(),
                timeout_secs = IMAGE_TIMEOUT.as_secs(),
                "Image generation timed out"
            );
            None
        }
    }
}

/// Create an image provider from environment configuration.
///
/// - FORKFUL_IMAGE_PROVIDER: "openai" | "fake"
/// - OPENAI_API_KEY: API key for the OpenAI images endpoint
pub fn create_image_provider_from_env() -> Result<Box<dyn ImageProvider>, ImageError> {
    let provider = std::env::var("FORKFUL_IMAGE_PROVIDER").unwrap_or_else(|_| "openai".to_string());

    match provider.as_str() {
        "fake" => Ok(Box::new(FakeImageProvider::default())),
        "openai" => {
            let api_key = std::env::var("OPENAI_API_KEY")
                .map_err(|_| ImageError::NotConfigured("OPENAI_API_KEY not set".to_string()))?;
            Ok(Box::new(OpenAiImageProvider::new(api_key)))
        }
        other => Err(ImageError::NotConfigured(format!(
            "Unknown provider: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Provider that never resolves, for exercising the timeout path.
    #[derive(Debug)]
    struct HangingProvider;

    #[async_trait]
    impl ImageProvider for HangingProvider {
        async fn generate(&self, _prompt: &str) -> Result<String, ImageError> {
            std::future::pending().await
        }

        fn provider_name(&self) -> &'static str {
            "hanging"
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_provider_times_out_to_none() {
        let result = generate_with_timeout(&HangingProvider, "a dish").await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_failure_swallowed_to_none() {
        let provider = FakeImageProvider::failing();
        let result = generate_with_timeout(&provider, "a dish").await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_success_passes_url_through() {
        let provider = FakeImageProvider::default();
        let url = generate_with_timeout(&provider, "a dish").await.unwrap();
        assert!(url.starts_with("https://"));
    }
}
