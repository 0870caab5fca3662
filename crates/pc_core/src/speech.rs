use async_trait::async_trait;
use crate::Result;

/// A text-to-speech provider.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    fn name(&self) -> &str;

    /// Render `text` spoken in `language_tag` (e.g. `zh-TW`) and return the encoded audio
    async fn synthesize(&self, text: &str, language_tag: &str) -> Result<Vec<u8>>;
}
