use std::path::{Path, PathBuf};

use pc_core::Result;

pub const AUDIO_EXTENSION: &str = "mp3";

/// Directory of narration files, one per persisted record.
#[derive(Debug, Clone)]
pub struct AudioStore {
    dir: PathBuf,
    doc_root: PathBuf,
}

impl AudioStore {
    pub fn new(dir: impl AsRef<Path>, doc_root: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            doc_root: doc_root.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    fn file_name(id: &str) -> String {
        // arXiv ids of old-style papers carry a slash (e.g. `hep-th/9901001v1`).
        format!("{}.{}", id.replace('/', "_"), AUDIO_EXTENSION)
    }

    /// Where the narration for `id` is written.
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(Self::file_name(id))
    }

    /// The path recorded in the log: relative to the doc root, `/`-separated.
    pub fn relative_path_for(&self, id: &str) -> String {
        let file = Self::file_name(id);
        let rel_dir = self.dir.strip_prefix(&self.doc_root).unwrap_or(&self.dir);
        let mut parts: Vec<String> = rel_dir
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        parts.push(file);
        parts.join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_paths_under_doc_root() {
        let store = AudioStore::new("docs/audios", "docs");
        assert_eq!(store.path_for("2401.0001"), PathBuf::from("docs/audios/2401.0001.mp3"));
        assert_eq!(store.relative_path_for("2401.0001"), "audios/2401.0001.mp3");
    }

    #[test]
    fn test_old_style_ids_are_flattened() {
        let store = AudioStore::new("docs/audios", "docs");
        assert_eq!(store.relative_path_for("hep-th/9901001v1"), "audios/hep-th_9901001v1.mp3");
    }

    #[test]
    fn test_audio_dir_outside_doc_root() {
        let store = AudioStore::new("media", "docs");
        assert_eq!(store.relative_path_for("x"), "media/x.mp3");
    }

    #[tokio::test]
    async fn test_ensure_dir() {
        let dir = tempdir().unwrap();
        let store = AudioStore::new(dir.path().join("docs/audios"), dir.path().join("docs"));
        store.ensure_dir().await.unwrap();
        store.ensure_dir().await.unwrap();
        assert!(store.dir().is_dir());
    }
}
