use std::fmt;
use std::sync::Arc;

use clap::ValueEnum;
use pc_core::{ArticleRecord, ArticleSource, EnrichedRecord, Result, SeenIds};
use pc_inference::Enricher;
use pc_speech::{Narrator, DEFAULT_LANGUAGE};
use pc_storage::{AudioStore, NewsLog, SeenIdStore, StoragePaths};
use tracing::info;

use crate::logging::Logger;
use crate::sources::fetch_one_new;
use crate::{DEFAULT_MAX_CANDIDATES, DEFAULT_QUERIES, DEFAULT_RUN_CAP};

/// When a fetched id is written to the seen-id store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SeenPolicy {
    /// Every id fetched this run, including articles that later failed
    /// enrichment or synthesis. Failed articles are never retried.
    #[default]
    MarkSeenOnFetch,
    /// Only ids whose record reached the news log. Failed articles come back
    /// on a later run.
    MarkSeenOnPersist,
}

impl fmt::Display for SeenPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeenPolicy::MarkSeenOnFetch => write!(f, "mark-seen-on-fetch"),
            SeenPolicy::MarkSeenOnPersist => write!(f, "mark-seen-on-persist"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub queries: Vec<String>,
    /// Newest results scanned per query.
    pub max_candidates: usize,
    /// Successfully persisted records per run.
    pub run_cap: usize,
    pub language_tag: String,
    pub seen_policy: SeenPolicy,
    pub paths: StoragePaths,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            queries: DEFAULT_QUERIES.iter().map(|q| q.to_string()).collect(),
            max_candidates: DEFAULT_MAX_CANDIDATES,
            run_cap: DEFAULT_RUN_CAP,
            language_tag: DEFAULT_LANGUAGE.to_string(),
            seen_policy: SeenPolicy::default(),
            paths: StoragePaths::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Init,
    Fetching,
    Enriching,
    Done,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Candidates found across all queries.
    pub fetched: usize,
    pub enriched: usize,
    /// Candidates dropped because enrichment or synthesis failed.
    pub skipped: usize,
    /// Lines appended to the news log.
    pub persisted: usize,
    /// Ids added to the seen-id store.
    pub seen_committed: usize,
    pub cap_reached: bool,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fetched {}, enriched {}, skipped {}, persisted {}, newly seen {}",
            self.fetched, self.enriched, self.skipped, self.persisted, self.seen_committed
        )?;
        if self.cap_reached {
            write!(f, " (run cap reached)")?;
        }
        Ok(())
    }
}

/// One run: fetch one unseen paper per query, enrich, narrate, persist.
pub struct Pipeline {
    config: PipelineConfig,
    source: Arc<dyn ArticleSource>,
    enricher: Enricher,
    narrator: Narrator,
    seen_store: SeenIdStore,
    news_log: NewsLog,
    audio_store: AudioStore,
    state: RunState,
}

impl Pipeline {
    pub fn new(
        config: PipelineConfig,
        source: Arc<dyn ArticleSource>,
        enricher: Enricher,
        narrator: Narrator,
    ) -> Self {
        let seen_store = config.paths.seen_id_store();
        let news_log = config.paths.news_log();
        let audio_store = config.paths.audio_store();
        Self {
            config,
            source,
            enricher,
            narrator,
            seen_store,
            news_log,
            audio_store,
            state: RunState::Init,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Store-level I/O errors abort the run; a failed article only skips itself.
    pub async fn run(&mut self) -> Result<RunReport> {
        self.state = RunState::Init;
        let mut report = RunReport::default();
        self.audio_store.ensure_dir().await?;
        let loaded = self.seen_store.load().await?;
        info!("📂 {} ids already processed", loaded.len());

        self.state = RunState::Fetching;
        let (candidates, fetched_ids) = self.fetch_candidates(&loaded).await;
        report.fetched = candidates.len();
        info!("📚 Fetched {} new articles", candidates.len());

        if candidates.is_empty() {
            info!("⚠️ No new articles, nothing to update");
            self.state = RunState::Done;
            return Ok(report);
        }

        self.state = RunState::Enriching;
        let persisted_ids = self.enrich_candidates(candidates, &mut report).await?;

        let delta = match self.config.seen_policy {
            SeenPolicy::MarkSeenOnFetch => fetched_ids,
            SeenPolicy::MarkSeenOnPersist => persisted_ids,
        };
        report.seen_committed = delta.difference(&loaded).count();
        let mut committed = loaded;
        committed.extend(delta);
        self.seen_store.save(&committed).await?;

        self.state = RunState::Done;
        info!("✅ Run complete: {}", report);
        Ok(report)
    }

    /// At most one candidate per query. Ids are excluded for the rest of the run
    /// as soon as they are picked, whatever the seen policy.
    async fn fetch_candidates(&self, loaded: &SeenIds) -> (Vec<ArticleRecord>, SeenIds) {
        let mut seen = loaded.clone();
        let mut fetched_ids = SeenIds::new();
        let mut candidates = Vec::new();

        for query in &self.config.queries {
            let log = Logger::new().with_prefix(query.as_str());
            log.info(&format!("🦗 Searching {}", self.source.name()));

            match fetch_one_new(self.source.as_ref(), query, &seen, self.config.max_candidates).await {
                Ok(Some(article)) => {
                    log.info(&format!("🆕 {} ({})", article.title, article.id));
                    seen.insert(article.id.clone());
                    fetched_ids.insert(article.id.clone());
                    candidates.push(article);
                }
                Ok(None) => log.info("⏭️ No unseen articles among the latest results"),
                Err(e) => log.warn(&format!("⚠️ Search failed: {}", e)),
            }
        }

        (candidates, fetched_ids)
    }

    /// Returns the ids that made it into the news log.
    async fn enrich_candidates(
        &self,
        candidates: Vec<ArticleRecord>,
        report: &mut RunReport,
    ) -> Result<SeenIds> {
        let total = candidates.len();
        let mut persisted_ids = SeenIds::new();

        for (i, article) in candidates.into_iter().enumerate() {
            if report.persisted >= self.config.run_cap {
                report.cap_reached = true;
                info!("🚫 Reached the limit of {} records for this run", self.config.run_cap);
                break;
            }

            let log = Logger::new()
                .with_prefix(format!("{}/{}", i + 1, total))
                .with_prefix(article.id.as_str());
            log.info(&format!("🔄 {}", article.title));

            let enrichment = match self.enricher.enrich(&article.title, &article.summary).await {
                Ok(enrichment) => enrichment,
                Err(e) => {
                    log.warn(&format!("⚠️ Enrichment failed, skipping: {}", e));
                    report.skipped += 1;
                    continue;
                }
            };
            report.enriched += 1;

            let script = self.narrator.script(&enrichment);
            let destination = self.audio_store.path_for(&article.id);
            if let Err(e) = self
                .narrator
                .synthesize(&script, &self.config.language_tag, &destination)
                .await
            {
                if !e.is_article_scoped() {
                    return Err(e);
                }
                log.warn(&format!("⚠️ Narration failed, skipping: {}", e));
                report.skipped += 1;
                continue;
            }

            let audio = self.audio_store.relative_path_for(&article.id);
            let record = EnrichedRecord::new(article, enrichment, audio);
            self.news_log.append(&record).await?;
            persisted_ids.insert(record.id().to_string());
            report.persisted += 1;
            log.info(&format!("💾 Saved {}", record.audio));
        }

        if report.persisted >= self.config.run_cap {
            report.cap_reached = true;
        }
        Ok(persisted_ids)
    }
}
