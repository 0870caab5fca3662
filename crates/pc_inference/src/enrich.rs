use std::sync::Arc;

use pc_core::{Enrichment, EnrichmentError, Error, GenerativeModel};
use serde::Deserialize;
use tracing::{debug, warn};

pub const APPLICATION_COUNT: usize = 3;

/// Longest slice of a bad response echoed into the logs.
const MAX_LOGGED_RESPONSE: usize = 500;

/// Turns a paper's title and abstract into an [`Enrichment`] with one call to
/// the generative-language service.
pub struct Enricher {
    model: Arc<dyn GenerativeModel>,
}

#[derive(Deserialize)]
struct Payload {
    title_zh: String,
    summary_zh: String,
    #[serde(default)]
    applications: Vec<String>,
    pitch: String,
}

impl Enricher {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub fn prompt(title: &str, abstract_text: &str) -> String {
        let abstract_text = abstract_text.split_whitespace().collect::<Vec<_>>().join(" ");
        format!(
            "Translate the following arXiv paper title and abstract into Traditional Chinese (Taiwan), then:\n\
             1. Condense the abstract into a short summary that is easy to follow when listened to.\n\
             2. Imagine three everyday application scenarios for the work.\n\
             3. Explain its potential commercial value from a venture capitalist's point of view.\n\
             \n\
             Title: {}\n\
             Abstract: {}\n\
             \n\
             Reply with a single JSON object and nothing else:\n\
             {{\"title_zh\": \"...\", \"summary_zh\": \"...\", \"applications\": [\"...\", \"...\", \"...\"], \"pitch\": \"...\"}}",
            title.trim(),
            abstract_text
        )
    }

    pub async fn enrich(&self, title: &str, abstract_text: &str) -> Result<Enrichment, EnrichmentError> {
        let prompt = Self::prompt(title, abstract_text);
        let response = self.model.generate(&prompt).await.map_err(|e| match e {
            Error::Enrichment(inner) => inner,
            other => EnrichmentError::Service(other.to_string()),
        })?;

        parse_enrichment(&response).map_err(|e| {
            let shown: String = response.chars().take(MAX_LOGGED_RESPONSE).collect();
            warn!("⚠️ Could not use {} response: {}", self.model.name(), e);
            debug!("Raw response:\n{}", shown);
            e
        })
    }
}

/// Removes a surrounding Markdown code fence, with or without a `json` tag.
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```JSON"))
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    text.trim().strip_suffix("```").unwrap_or(text).trim()
}

fn json_object(text: &str) -> Option<&str> {
    let text = strip_code_fences(text);
    if text.starts_with('{') {
        return Some(text);
    }
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

pub fn parse_enrichment(response: &str) -> Result<Enrichment, EnrichmentError> {
    let body = json_object(response)
        .ok_or_else(|| EnrichmentError::Shape("no JSON object in response".to_string()))?;
    let value: serde_json::Value = serde_json::from_str(body).map_err(EnrichmentError::InvalidJson)?;
    let payload: Payload =
        serde_json::from_value(value).map_err(|e| EnrichmentError::Shape(e.to_string()))?;

    let mut applications: Vec<String> = payload
        .applications
        .into_iter()
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .collect();
    if applications.len() < APPLICATION_COUNT {
        return Err(EnrichmentError::Shape(format!(
            "expected {} applications, got {}",
            APPLICATION_COUNT,
            applications.len()
        )));
    }
    applications.truncate(APPLICATION_COUNT);

    let enrichment = Enrichment {
        title_zh: payload.title_zh.trim().to_string(),
        summary_zh: payload.summary_zh.trim().to_string(),
        applications,
        pitch: payload.pitch.trim().to_string(),
    };
    for (field, value) in [
        ("title_zh", &enrichment.title_zh),
        ("summary_zh", &enrichment.summary_zh),
        ("pitch", &enrichment.pitch),
    ] {
        if value.is_empty() {
            return Err(EnrichmentError::Shape(format!("{} is empty", field)));
        }
    }
    Ok(enrichment)
}
