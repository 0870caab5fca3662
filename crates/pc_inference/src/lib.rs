use std::fmt;

pub mod enrich;
pub mod models;

pub use enrich::{strip_code_fences, Enricher};
pub use models::create_model;

pub const DEFAULT_MODEL: &str = "gemini";
pub const DEFAULT_MODEL_NAME: &str = "gemini-2.0-flash";

/// Settings for the generative-language service. Built once at startup and
/// handed to [`create_model`].
#[derive(Clone)]
pub struct ModelConfig {
    /// Which backend to use: `gemini` or `dummy`.
    pub model: String,
    pub api_key: Option<String>,
    pub model_name: String,
    pub base_url: Option<String>,
}

impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            model_name: DEFAULT_MODEL_NAME.to_string(),
            base_url: None,
        }
    }
}

pub mod prelude {
    pub use super::{create_model, Enricher, ModelConfig};
    pub use pc_core::{Enrichment, EnrichmentError, Error, GenerativeModel, Result};
}
