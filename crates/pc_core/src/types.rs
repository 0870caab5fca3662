use std::collections::BTreeSet;

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Identifiers already processed by an earlier run. Ordered so that saving is deterministic.
pub type SeenIds = BTreeSet<String>;

/// A paper as returned by the search provider, tagged with the query that found it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub query: String,
    pub id: String,
    pub url: String,
    pub title: String,
    pub summary: String,
    pub authors: Vec<String>,
    pub published_date: NaiveDate,
}

/// Localized analysis produced by the generative-language service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrichment {
    pub title_zh: String,
    pub summary_zh: String,
    pub applications: Vec<String>,
    pub pitch: String,
}

/// One line of the news log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub article: ArticleRecord,
    #[serde(flatten)]
    pub enrichment: Enrichment,
    /// Audio file path relative to the document root, e.g. `audios/2401.00001v1.mp3`.
    pub audio: String,
    pub timestamp: DateTime<Local>,
}

impl EnrichedRecord {
    pub fn new(article: ArticleRecord, enrichment: Enrichment, audio: String) -> Self {
        Self {
            article,
            enrichment,
            audio,
            timestamp: Local::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.article.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_article() -> ArticleRecord {
        ArticleRecord {
            query: "AI".to_string(),
            id: "2401.00001v1".to_string(),
            url: "http://arxiv.org/abs/2401.00001v1".to_string(),
            title: "Test Paper".to_string(),
            summary: "We study things.".to_string(),
            authors: vec!["Ada Lovelace".to_string(), "Alan Turing".to_string()],
            published_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        }
    }

    fn sample_enrichment() -> Enrichment {
        Enrichment {
            title_zh: "測試論文".to_string(),
            summary_zh: "我們研究一些事情。".to_string(),
            applications: vec!["一".to_string(), "二".to_string(), "三".to_string()],
            pitch: "值得投資".to_string(),
        }
    }

    #[test]
    fn test_enriched_record_is_flat_json() {
        let record = EnrichedRecord::new(
            sample_article(),
            sample_enrichment(),
            "audios/2401.00001v1.mp3".to_string(),
        );
        let line = serde_json::to_string(&record).unwrap();

        // Non-ASCII stays readable.
        assert!(line.contains("測試論文"));
        assert!(line.contains("\"published_date\":\"2024-01-02\""));

        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        for key in [
            "query", "id", "url", "title", "summary", "authors", "published_date",
            "title_zh", "summary_zh", "applications", "pitch", "audio", "timestamp",
        ] {
            assert!(value.get(key).is_some(), "missing key {}", key);
        }
        assert_eq!(value["applications"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_enriched_record_reads_back() {
        let record = EnrichedRecord::new(
            sample_article(),
            sample_enrichment(),
            "audios/2401.00001v1.mp3".to_string(),
        );
        let line = serde_json::to_string(&record).unwrap();
        let parsed: EnrichedRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed.id(), "2401.00001v1");
        assert_eq!(parsed.article, record.article);
        assert_eq!(parsed.enrichment, record.enrichment);
    }
}
