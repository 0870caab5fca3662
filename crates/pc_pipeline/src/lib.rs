pub mod cli;
pub mod logging;
pub mod pipeline;
pub mod sources;

pub use cli::RunArgs;
pub use logging::{init_logging, Logger};
pub use pipeline::{Pipeline, PipelineConfig, RunReport, RunState, SeenPolicy};
pub use sources::{fetch_one_new, ArxivSource};

/// Topics searched on every run, in order.
pub const DEFAULT_QUERIES: [&str; 3] = ["AI", "Foundation Model", "Diffusion Model"];
/// How many of the newest results are scanned for an unseen paper.
pub const DEFAULT_MAX_CANDIDATES: usize = 50;
/// Records persisted per run at most.
pub const DEFAULT_RUN_CAP: usize = 5;

pub mod prelude {
    pub use super::{fetch_one_new, ArxivSource, Pipeline, PipelineConfig, RunReport, SeenPolicy};
    pub use pc_core::{ArticleRecord, ArticleSource, EnrichedRecord, Error, Result, SeenIds};
}
