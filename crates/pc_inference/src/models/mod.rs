use std::sync::Arc;

use pc_core::{Error, GenerativeModel, Result};
use tracing::info;

use crate::ModelConfig;

pub mod dummy;
pub mod gemini;

pub use dummy::DummyModel;
pub use gemini::GeminiModel;

/// Builds the model named by `config.model`.
pub fn create_model(config: &ModelConfig) -> Result<Arc<dyn GenerativeModel>> {
    let model: Arc<dyn GenerativeModel> = match config.model.to_lowercase().as_str() {
        "gemini" => Arc::new(GeminiModel::new(config)?),
        "dummy" => Arc::new(DummyModel::new()),
        other => {
            return Err(Error::Config(format!(
                "Unknown model '{}'. Available models: gemini, dummy",
                other
            )))
        }
    };
    info!("🧠 Using {} for enrichment", model.name());
    Ok(model)
}
