use std::sync::Arc;

use pc_core::{Error, Result, SpeechSynthesizer};
use tracing::info;

pub mod engines;
pub mod narration;

pub use engines::{DummySpeech, GoogleTranslateTts};
pub use narration::{NarrationTemplate, Narrator};

pub const DEFAULT_ENGINE: &str = "google";
pub const DEFAULT_LANGUAGE: &str = "zh-TW";

#[derive(Debug, Clone)]
pub struct SpeechConfig {
    /// `google` or `dummy`.
    pub engine: String,
    pub base_url: Option<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            engine: DEFAULT_ENGINE.to_string(),
            base_url: None,
        }
    }
}

pub fn create_synthesizer(config: &SpeechConfig) -> Result<Arc<dyn SpeechSynthesizer>> {
    let synthesizer: Arc<dyn SpeechSynthesizer> = match config.engine.to_lowercase().as_str() {
        "google" => Arc::new(GoogleTranslateTts::new(config.base_url.clone())),
        "dummy" => Arc::new(DummySpeech),
        other => {
            return Err(Error::Config(format!(
                "Unknown speech engine '{}'. Available engines: google, dummy",
                other
            )))
        }
    };
    info!("🔊 Using {} for narration", synthesizer.name());
    Ok(synthesizer)
}

pub mod prelude {
    pub use super::{create_synthesizer, NarrationTemplate, Narrator, SpeechConfig};
    pub use pc_core::{Error, Result, SpeechSynthesizer};
}
