use std::path::{Path, PathBuf};

use pc_core::{EnrichedRecord, Error, Result};
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Append-only newline-delimited JSON log of enriched records.
#[derive(Debug, Clone)]
pub struct NewsLog {
    path: PathBuf,
}

impl NewsLog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens, appends one line and closes. Each call is durable on its own.
    pub async fn append(&self, record: &EnrichedRecord) -> Result<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        self.write_line(&line).await.map_err(|e| {
            Error::Storage(format!("cannot append to {}: {}", self.path.display(), e))
        })?;
        debug!("Appended {} to {}", record.id(), self.path.display());
        Ok(())
    }

    async fn write_line(&self, line: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await
    }

    /// All records currently in the log, in append order.
    pub async fn records(&self) -> Result<Vec<EnrichedRecord>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str::<EnrichedRecord>(line).map_err(Error::from))
            .collect()
    }
}
