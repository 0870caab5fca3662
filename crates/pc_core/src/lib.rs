pub mod error;
pub mod models;
pub mod source;
pub mod speech;
pub mod types;

pub use error::{EnrichmentError, Error, Result};
pub use models::GenerativeModel;
pub use source::ArticleSource;
pub use speech::SpeechSynthesizer;
pub use types::{ArticleRecord, EnrichedRecord, Enrichment, SeenIds};
