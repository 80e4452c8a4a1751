//! OpenAI image-generation provider.

use super::{ImageError, ImageProvider};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const DEFAULT_API_BASE: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "dall-e-3";
const IMAGE_SIZE: &str = "1024x1024";

/// OpenAI images/generations API provider.
#[derive(Debug)]
pub struct OpenAiImageProvider {
    api_key: String,
    model: String,
    api_base: String,
    client: reqwest::Client,
}

impl OpenAiImageProvider {
    /// Create a new provider with the given API key.
    pub fn new(api_key: String) -> Self {
        Self::with_api_base(api_key, DEFAULT_API_BASE.to_string())
    }

    /// Create a provider pointed at a non-default base URL (tests).
    pub fn with_api_base(api_key: String, api_base: String) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            api_base,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    size: &'a str,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
}

#[async_trait]
impl ImageProvider for OpenAiImageProvider {
    async fn generate(&self, prompt: &str) -> Result<String, ImageError> {
        let body = ImageRequest {
            model: &self.model,
            prompt,
            n: 1,
            size: IMAGE_SIZE,
        };

        let response = self
            .client
            .post(format!("{}/v1/images/generations", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ImageError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ImageError::RequestFailed(e.to_string()))?;

        if status != 200 {
            return Err(ImageError::ApiError {
                status,
                message: body,
            });
        }

        let response: ImageResponse =
            serde_json::from_str(&body).map_err(|e| ImageError::ParseError(e.to_string()))?;

        response
            .data
            .into_iter()
            .find_map(|d| d.url)
            .ok_or_else(|| ImageError::ParseError("No image URL in response".to_string()))
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_generate_returns_url() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/images/generations")
            .with_status(200)
            .with_body(r#"{"data": [{"url": "https://img.example/dish.png"}]}"#)
            .create_async()
            .await;

        let provider = OpenAiImageProvider::with_api_base("key".to_string(), server.url());
        let url = provider.generate("a bowl of ramen").await.unwrap();
        assert_eq!(url, "https://img.example/dish.png");
    }

    #[tokio::test]
    async fn test_error_status_surfaced() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/images/generations")
            .with_status(500)
            .with_body("upstream broke")
            .create_async()
            .await;

        let provider = OpenAiImageProvider::with_api_base("key".to_string(), server.url());
        let err = provider.generate("a bowl of ramen").await.unwrap_err();
        assert!(matches!(err, ImageError::ApiError { status: 500, .. }));
    }
}
