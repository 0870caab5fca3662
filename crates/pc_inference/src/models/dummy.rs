use std::fmt;

use async_trait::async_trait;
use pc_core::{GenerativeModel, Result};
use serde_json::json;

/// Offline model: answers every prompt with a well-formed enrichment payload
/// built from the title and abstract found in the prompt.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self
    }

    fn field<'a>(prompt: &'a str, label: &str) -> &'a str {
        prompt
            .lines()
            .find_map(|line| line.strip_prefix(label))
            .map(str::trim)
            .unwrap_or_default()
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerativeModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let title = Self::field(prompt, "Title:");
        let summary: String = Self::field(prompt, "Abstract:")
            .split_whitespace()
            .take(20)
            .collect::<Vec<_>>()
            .join(" ");

        let payload = json!({
            "title_zh": title,
            "summary_zh": summary,
            "applications": [
                format!("{} at home", title),
                format!("{} at work", title),
                format!("{} on the go", title),
            ],
            "pitch": format!("{} is ready for market.", title),
        });
        Ok(format!("```json\n{}\n```", payload))
    }
}
