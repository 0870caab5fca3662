use std::fmt;

use async_trait::async_trait;
use feed_rs::model::Entry;
use pc_core::{ArticleRecord, ArticleSource, Error, Result};
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

const ARXIV_API_URL: &str = "http://export.arxiv.org/api/query";

/// Search client for the arXiv Atom API.
pub struct ArxivSource {
    client: Client,
    base_url: String,
}

impl fmt::Debug for ArxivSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArxivSource")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Default for ArxivSource {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ArxivSource {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.unwrap_or_else(|| ARXIV_API_URL.to_string()),
        }
    }

    /// The query is phrase-quoted so multi-word topics match as a whole.
    fn search_url(&self, query: &str, max_results: usize) -> Result<Url> {
        Url::parse_with_params(
            &self.base_url,
            &[
                ("search_query", format!("\"{}\"", query)),
                ("sortBy", "submittedDate".to_string()),
                ("sortOrder", "descending".to_string()),
                ("start", "0".to_string()),
                ("max_results", max_results.to_string()),
            ],
        )
        .map_err(|e| Error::Config(format!("Invalid arXiv endpoint {}: {}", self.base_url, e)))
    }
}

#[async_trait]
impl ArticleSource for ArxivSource {
    fn name(&self) -> &str {
        "arXiv"
    }

    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<ArticleRecord>> {
        let url = self.search_url(query, max_results)?;
        debug!("arXiv search: {}", url);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(Error::Source(format!(
                "arXiv returned {} for query {:?}",
                response.status(),
                query
            )));
        }

        let bytes = response.bytes().await?;
        parse_feed(&bytes, query)
    }
}

/// Converts an arXiv Atom response into records, keeping feed order.
pub fn parse_feed(bytes: &[u8], query: &str) -> Result<Vec<ArticleRecord>> {
    let feed = feed_rs::parser::parse(bytes)
        .map_err(|e| Error::Source(format!("Failed to parse arXiv feed: {}", e)))?;

    Ok(feed
        .entries
        .into_iter()
        .filter_map(|entry| {
            let id = entry.id.clone();
            let record = to_record(entry, query);
            if record.is_none() {
                warn!("Skipping arXiv entry {:?}", id);
            }
            record
        })
        .collect())
}

/// `http://arxiv.org/abs/2401.00001v1` -> `2401.00001v1`
fn short_id(entry_id: &str) -> Option<&str> {
    entry_id
        .split_once("/abs/")
        .map(|(_, id)| id.trim_matches('/'))
        .filter(|id| !id.is_empty())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn to_record(entry: Entry, query: &str) -> Option<ArticleRecord> {
    let id = short_id(&entry.id)?.to_string();
    let published = entry.published.or(entry.updated)?;

    Some(ArticleRecord {
        query: query.to_string(),
        id,
        url: entry.id.clone(),
        title: entry
            .title
            .map(|t| collapse_whitespace(&t.content))
            .unwrap_or_default(),
        summary: entry
            .summary
            .map(|s| s.content.trim().to_string())
            .unwrap_or_default(),
        authors: entry.authors.into_iter().map(|a| a.name).collect(),
        published_date: published.date_naive(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <id>http://arxiv.org/api/query</id>
  <title type="html">ArXiv Query: search_query="AI"</title>
  <updated>2024-01-03T00:00:00-05:00</updated>
  <entry>
    <id>http://arxiv.org/abs/2401.00002v1</id>
    <updated>2024-01-02T18:59:59Z</updated>
    <published>2024-01-02T18:59:59Z</published>
    <title>Scaling   Laws for
      Tiny Models</title>
    <summary>  We find that small models
  scale.
</summary>
    <author><name>Ada Lovelace</name></author>
    <author><name>Alan Turing</name></author>
    <link href="http://arxiv.org/abs/2401.00002v1" rel="alternate" type="text/html"/>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2401.00001v2</id>
    <updated>2024-01-01T10:00:00Z</updated>
    <published>2024-01-01T10:00:00Z</published>
    <title>Older Paper</title>
    <summary>Abstract.</summary>
    <author><name>Grace Hopper</name></author>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_feed() {
        let records = parse_feed(FEED.as_bytes(), "AI").unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.id, "2401.00002v1");
        assert_eq!(first.url, "http://arxiv.org/abs/2401.00002v1");
        assert_eq!(first.title, "Scaling Laws for Tiny Models");
        assert!(first.summary.starts_with("We find that small models"));
        assert_eq!(first.authors, vec!["Ada Lovelace", "Alan Turing"]);
        assert_eq!(first.published_date.to_string(), "2024-01-02");
        assert_eq!(first.query, "AI");

        assert_eq!(records[1].id, "2401.00001v2");
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(parse_feed(b"not xml", "AI"), Err(Error::Source(_))));
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("http://arxiv.org/abs/2401.00001v1"), Some("2401.00001v1"));
        assert_eq!(short_id("http://arxiv.org/abs/hep-th/9901001v1"), Some("hep-th/9901001v1"));
        assert_eq!(short_id("http://arxiv.org/api/errors#incorrect_id_format"), None);
    }

    #[test]
    fn test_search_url() {
        let source = ArxivSource::default();
        let url = source.search_url("Diffusion Model", 50).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("search_query".to_string(), "\"Diffusion Model\"".to_string())));
        assert!(pairs.contains(&("sortBy".to_string(), "submittedDate".to_string())));
        assert!(pairs.contains(&("sortOrder".to_string(), "descending".to_string())));
        assert!(pairs.contains(&("max_results".to_string(), "50".to_string())));
    }
}
