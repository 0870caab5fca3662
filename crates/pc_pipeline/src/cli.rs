use std::path::PathBuf;

use clap::Args;
use pc_speech::DEFAULT_LANGUAGE;
use pc_storage::{StoragePaths, DEFAULT_AUDIO_DIR, DEFAULT_NEWS_PATH, DEFAULT_PROCESSED_IDS_PATH};

use crate::pipeline::{PipelineConfig, SeenPolicy};
use crate::{DEFAULT_MAX_CANDIDATES, DEFAULT_QUERIES, DEFAULT_RUN_CAP};

/// Policy overrides for a run. Defaults reproduce the daily job.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Topic to search for; repeat for several. Searched in the order given.
    #[arg(long = "query", value_name = "QUERY", default_values = DEFAULT_QUERIES)]
    pub queries: Vec<String>,

    /// How many of the newest results to scan per query
    #[arg(long, default_value_t = DEFAULT_MAX_CANDIDATES)]
    pub max_candidates: usize,

    /// Maximum number of records persisted per run
    #[arg(long, default_value_t = DEFAULT_RUN_CAP)]
    pub run_cap: usize,

    /// Language tag of the narration voice
    #[arg(long, default_value = DEFAULT_LANGUAGE)]
    pub language: String,

    /// When fetched ids are committed to the seen-id store
    #[arg(long, value_enum, default_value_t = SeenPolicy::MarkSeenOnFetch)]
    pub seen_policy: SeenPolicy,

    /// Newline-delimited JSON log of enriched records
    #[arg(long, default_value = DEFAULT_NEWS_PATH)]
    pub news_path: PathBuf,

    /// Seen-id file
    #[arg(long, default_value = DEFAULT_PROCESSED_IDS_PATH)]
    pub processed_ids_path: PathBuf,

    /// Directory for narration audio
    #[arg(long, default_value = DEFAULT_AUDIO_DIR)]
    pub audio_dir: PathBuf,
}

impl From<RunArgs> for PipelineConfig {
    fn from(args: RunArgs) -> Self {
        Self {
            queries: args.queries,
            max_candidates: args.max_candidates,
            run_cap: args.run_cap,
            language_tag: args.language,
            seen_policy: args.seen_policy,
            paths: StoragePaths {
                news_path: args.news_path,
                processed_ids_path: args.processed_ids_path,
                audio_dir: args.audio_dir,
            },
        }
    }
}
