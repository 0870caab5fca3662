use async_trait::async_trait;
use crate::Result;

/// A generative-language service: prompt in, free-form text out.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    fn name(&self) -> &str;

    /// Run a single prompt and return the raw response text
    async fn generate(&self, prompt: &str) -> Result<String>;
}
