use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use pc_core::{Error, Result, SeenIds};
use tracing::debug;

/// Plain-text set of processed identifiers, one per line, sorted.
#[derive(Debug, Clone)]
pub struct SeenIdStore {
    path: PathBuf,
}

impl SeenIdStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file means nothing has been processed yet.
    pub async fn load(&self) -> Result<SeenIds> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No seen-id file at {}, starting empty", self.path.display());
                return Ok(SeenIds::new());
            }
            Err(e) => {
                return Err(Error::Storage(format!(
                    "cannot read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        Ok(contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Replaces the stored set. The new contents land in a sibling file first and
    /// are renamed over the old one, so readers never see a half-written set.
    pub async fn save(&self, ids: &SeenIds) -> Result<()> {
        let mut contents = String::new();
        for id in ids {
            contents.push_str(id);
            contents.push('\n');
        }

        self.replace_contents(&contents).await.map_err(|e| {
            Error::Storage(format!("cannot write {}: {}", self.path.display(), e))
        })?;
        debug!("Saved {} seen ids to {}", ids.len(), self.path.display());
        Ok(())
    }

    async fn replace_contents(&self, contents: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, contents).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e);
        }
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
