//! Fake image provider for testing.

use super::{ImageError, ImageProvider};
use async_trait::async_trait;

/// Fake image provider returning a deterministic URL, or always failing.
#[derive(Debug, Default)]
pub struct FakeImageProvider {
    fail: bool,
}

impl FakeImageProvider {
    /// A fake that always errors, for exercising failure paths.
    pub fn failing() -> Self {
        Self { fail: true }
    }
}

#[async_trait]
impl ImageProvider for FakeImageProvider {
    async fn generate(&self, prompt: &str) -> Result<String, ImageError> {
        if self.fail {
            return Err(ImageError::RequestFailed(
                "FakeImageProvider configured to fail".to_string(),
            ));
        }
        // Stable URL derived from the prompt length so tests can assert on it
        Ok(format!("https://images.fake/generated/{}.png", prompt.len()))
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}
