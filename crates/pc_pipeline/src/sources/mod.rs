use pc_core::{ArticleRecord, ArticleSource, Result, SeenIds};

pub mod arxiv;

pub use arxiv::ArxivSource;

/// Scans up to `max_candidates` of the newest results for `query` and returns
/// the first one whose id is not in `excluded`. The caller records the id.
pub async fn fetch_one_new(
    source: &dyn ArticleSource,
    query: &str,
    excluded: &SeenIds,
    max_candidates: usize,
) -> Result<Option<ArticleRecord>> {
    let results = source.search(query, max_candidates).await?;
    Ok(results
        .into_iter()
        .take(max_candidates)
        .find(|article| !excluded.contains(&article.id)))
}
