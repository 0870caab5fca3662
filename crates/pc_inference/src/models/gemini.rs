use std::fmt;

use async_trait::async_trait;
use pc_core::{EnrichmentError, Error, GenerativeModel, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ModelConfig;

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

pub struct GeminiModel {
    client: Client,
    api_key: String,
    model_name: String,
    base_url: String,
}

impl fmt::Debug for GeminiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GeminiModel {
    pub fn new(config: &ModelConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::Config("Gemini API key is required (set GEMINI_API_KEY)".to_string()))?;

        Ok(Self {
            client: Client::new(),
            api_key,
            model_name: config.model_name.clone(),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| GEMINI_API_URL.to_string()),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model_name
        )
    }
}

#[async_trait]
impl GenerativeModel for GeminiModel {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        debug!(model = %self.model_name, "Gemini generateContent request");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(EnrichmentError::Service(format!(
                "Gemini API error ({}): {}",
                status, error_text
            ))
            .into());
        }

        response
            .json::<GenerateResponse>()
            .await?
            .into_text()
            .ok_or_else(|| EnrichmentError::Service("Gemini returned no text".to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_requires_api_key() {
        let result = GeminiModel::new(&ModelConfig::default());
        assert!(matches!(result, Err(Error::Config(_))));

        let config = ModelConfig {
            api_key: Some("   ".to_string()),
            ..ModelConfig::default()
        };
        assert!(GeminiModel::new(&config).is_err());
    }

    #[test]
    fn test_endpoint() {
        let config = ModelConfig {
            api_key: Some("test-key".to_string()),
            base_url: Some("http://localhost:8080/v1beta/".to_string()),
            ..ModelConfig::default()
        };
        let model = GeminiModel::new(&config).unwrap();
        assert_eq!(
            model.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-2.0-flash:generateContent"
        );
        assert!(!format!("{:?}", model).contains("test-key"));
    }

    #[test]
    fn test_response_text_joins_parts() {
        let body = r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "```json\n{\"a\":"}, {"text": "1}\n```"}]},
                "finishReason": "STOP"
            }]
        }"#;
        let response: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.into_text().unwrap(), "```json\n{\"a\":1}\n```");
    }

    #[test]
    fn test_response_without_candidates() {
        let response: GenerateResponse = serde_json::from_str(r#"{"promptFeedback": {}}"#).unwrap();
        assert!(response.into_text().is_none());
    }
}
