use std::path::{Path, PathBuf};

pub mod audio;
pub mod news_log;
pub mod seen_ids;

pub use audio::AudioStore;
pub use news_log::NewsLog;
pub use seen_ids::SeenIdStore;

pub const DEFAULT_NEWS_PATH: &str = "docs/news.jsonl";
pub const DEFAULT_PROCESSED_IDS_PATH: &str = "processed_ids.txt";
pub const DEFAULT_AUDIO_DIR: &str = "docs/audios";

/// Where a run keeps its durable state.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    pub news_path: PathBuf,
    pub processed_ids_path: PathBuf,
    pub audio_dir: PathBuf,
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self {
            news_path: PathBuf::from(DEFAULT_NEWS_PATH),
            processed_ids_path: PathBuf::from(DEFAULT_PROCESSED_IDS_PATH),
            audio_dir: PathBuf::from(DEFAULT_AUDIO_DIR),
        }
    }
}

impl StoragePaths {
    /// Every path placed under `root`, keeping the default layout.
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            news_path: root.join(DEFAULT_NEWS_PATH),
            processed_ids_path: root.join(DEFAULT_PROCESSED_IDS_PATH),
            audio_dir: root.join(DEFAULT_AUDIO_DIR),
        }
    }

    /// The directory log records are served from; audio paths are written relative to it.
    pub fn doc_root(&self) -> &Path {
        self.news_path.parent().unwrap_or_else(|| Path::new(""))
    }

    pub fn seen_id_store(&self) -> SeenIdStore {
        SeenIdStore::new(&self.processed_ids_path)
    }

    pub fn news_log(&self) -> NewsLog {
        NewsLog::new(&self.news_path)
    }

    pub fn audio_store(&self) -> AudioStore {
        AudioStore::new(&self.audio_dir, self.doc_root())
    }
}

pub mod prelude {
    pub use super::{AudioStore, NewsLog, SeenIdStore, StoragePaths};
    pub use pc_core::{Error, Result, SeenIds};
}
