use thiserror::Error;

/// Why a generative-language response could not become an enrichment.
#[derive(Error, Debug)]
pub enum EnrichmentError {
    #[error("Enrichment service error: {0}")]
    Service(String),

    #[error("Enrichment response is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Enrichment response has the wrong shape: {0}")]
    Shape(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Source error: {0}")]
    Source(String),

    #[error(transparent)]
    Enrichment(#[from] EnrichmentError),

    #[error("Synthesis error: {0}")]
    Synthesis(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// Failures that only cost the current article; the run goes on without it.
    pub fn is_article_scoped(&self) -> bool {
        matches!(self, Error::Enrichment(_) | Error::Synthesis(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_scoped_errors() {
        assert!(Error::Synthesis("503".to_string()).is_article_scoped());
        assert!(Error::from(EnrichmentError::Shape("no pitch".to_string())).is_article_scoped());

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        assert!(!Error::from(io).is_article_scoped());
        assert!(!Error::Storage("log".to_string()).is_article_scoped());
        assert!(!Error::Source("arxiv down".to_string()).is_article_scoped());
    }

    #[test]
    fn test_enrichment_error_message() {
        let err = Error::from(EnrichmentError::Shape("applications has 2 entries".to_string()));
        assert_eq!(
            err.to_string(),
            "Enrichment response has the wrong shape: applications has 2 entries"
        );
    }
}
