use async_trait::async_trait;
use crate::types::ArticleRecord;
use crate::Result;

/// A scholarly-article search provider.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    fn name(&self) -> &str;

    /// Returns up to `max_results` records for `query`, most recently submitted first
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<ArticleRecord>>;
}
