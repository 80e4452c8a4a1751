//! Fake completion provider for testing.
//!
//! Returns deterministic responses based on prompt matching, allowing
//! tests to run without network access or API costs.

use super::{ChatRequest, CompletionProvider, LlmError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// A fake completion provider for testing.
///
/// Responses are matched by checking whether the system prompt or any
/// message contains a registered substring. If no match is found, returns
/// a default response or errors.
#[derive(Debug)]
pub struct FakeProvider {
    /// Map of prompt substring -> response
    responses: RwLock<HashMap<String, String>>,
    /// Default response if no match found
    default_response: Option<String>,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            default_response: Some("{}".to_string()),
        }
    }
}

impl FakeProvider {
    /// Create a new FakeProvider with no registered responses.
    pub fn new() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            default_response: None,
        }
    }

    /// Create a FakeProvider that returns a specific response for prompts
    /// containing a substring.
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        let mut provider = Self::new();
        provider.add_response(prompt_contains, response);
        provider
    }

    /// Add a response for prompts containing a specific substring.
    pub fn add_response(&mut self, prompt_contains: &str, response: &str) {
        self.responses
            .write()
            .unwrap()
            .insert(prompt_contains.to_string(), response.to_string());
    }

    /// Set the default response when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    fn searchable_text(request: &ChatRequest) -> String {
        let mut text = request.system.to_lowercase();
        for message in &request.messages {
            text.push('\n');
            text.push_str(&message.content.to_lowercase());
        }
        text
    }
}

#[async_trait]
impl CompletionProvider for FakeProvider {
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        let responses = self.responses.read().unwrap();

        // Find first matching pattern (case-insensitive)
        let haystack = Self::searchable_text(request);
        for (pattern, response) in responses.iter() {
            if haystack.contains(&pattern.to_lowercase()) {
                return Ok(response.clone());
            }
        }

        // Return default or error
        match &self.default_response {
            Some(response) => Ok(response.clone()),
            None => Err(LlmError::RequestFailed(format!(
                "FakeProvider: No response configured for prompt (first 100 chars): {}",
                &haystack[..haystack.len().min(100)]
            ))),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ChatMessage;

    #[tokio::test]
    async fn test_fake_provider_matches_message_content() {
        let provider = FakeProvider::with_response("pasta", "{\"name\": \"Pasta\"}");
        let request = ChatRequest::new("system", vec![ChatMessage::user("I want pasta tonight")]);
        let result = provider.complete(&request).await.unwrap();
        assert_eq!(result, "{\"name\": \"Pasta\"}");
    }

    #[tokio::test]
    async fn test_fake_provider_matches_system_prompt() {
        let provider = FakeProvider::with_response("VEGAN", "ok");
        let request = ChatRequest::single("Constraints: vegan only", "anything");
        assert_eq!(provider.complete(&request).await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_fake_provider_no_match_errors() {
        let provider = FakeProvider::new();
        let result = provider.complete(&ChatRequest::single("", "random")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fake_provider_default_response() {
        let provider = FakeProvider::new().with_default_response("default");
        let result = provider
            .complete(&ChatRequest::single("", "random"))
            .await
            .unwrap();
        assert_eq!(result, "default");
    }
}
