use std::path::Path;
use std::sync::Arc;

use pc_core::{Enrichment, Error, Result, SpeechSynthesizer};
use tracing::debug;

/// Fixed spoken framing around an enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrationTemplate {
    pub applications_intro: String,
    pub ordinals: [String; 3],
    pub pitch_intro: String,
}

impl Default for NarrationTemplate {
    /// Taiwanese Mandarin, to match the default `zh-TW` voice.
    fn default() -> Self {
        Self {
            applications_intro: "這項技術有三個生活化的應用場景：".to_string(),
            ordinals: ["第一，".to_string(), "第二，".to_string(), "第三，".to_string()],
            pitch_intro: "向創投推銷的說法：".to_string(),
        }
    }
}

impl NarrationTemplate {
    /// Title, summary, the three applications in order, then the pitch.
    pub fn render(&self, enrichment: &Enrichment) -> String {
        let mut script = format!(
            "{}\n\n{}\n\n{}\n",
            enrichment.title_zh, enrichment.summary_zh, self.applications_intro
        );
        for (ordinal, application) in self.ordinals.iter().zip(&enrichment.applications) {
            script.push_str(ordinal);
            script.push_str(application);
            script.push('\n');
        }
        script.push('\n');
        script.push_str(&self.pitch_intro);
        script.push('\n');
        script.push_str(&enrichment.pitch);
        script
    }
}

pub struct Narrator {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    template: NarrationTemplate,
}

impl Narrator {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        Self::with_template(synthesizer, NarrationTemplate::default())
    }

    pub fn with_template(synthesizer: Arc<dyn SpeechSynthesizer>, template: NarrationTemplate) -> Self {
        Self { synthesizer, template }
    }

    pub fn script(&self, enrichment: &Enrichment) -> String {
        self.template.render(enrichment)
    }

    /// Renders `text` and writes the audio to `destination`.
    ///
    /// Any provider failure, transport errors included, comes back as
    /// [`Error::Synthesis`] and leaves nothing on disk. The bytes go to a
    /// sibling temp file that is renamed into place, so `destination` only ever
    /// holds a complete file. Filesystem failures are returned as [`Error::Io`].
    pub async fn synthesize(&self, text: &str, language_tag: &str, destination: &Path) -> Result<()> {
        let audio = self
            .synthesizer
            .synthesize(text, language_tag)
            .await
            .map_err(|e| match e {
                Error::Synthesis(message) => Error::Synthesis(message),
                other => Error::Synthesis(format!("{}: {}", self.synthesizer.name(), other)),
            })?;
        if audio.is_empty() {
            return Err(Error::Synthesis(format!(
                "{} returned no audio",
                self.synthesizer.name()
            )));
        }

        let tmp = destination.with_extension("part");
        if let Err(e) = tokio::fs::write(&tmp, &audio).await {
            // Best effort; the write may have failed before creating the file.
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        if let Err(e) = tokio::fs::rename(&tmp, destination).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        debug!("Wrote {} bytes of audio to {}", audio.len(), destination.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DummySpeech;
    use async_trait::async_trait;
    use tempfile::tempdir;

    struct FailingSpeech;

    #[async_trait]
    impl SpeechSynthesizer for FailingSpeech {
        fn name(&self) -> &str {
            "failing"
        }

        async fn synthesize(&self, _text: &str, _language_tag: &str) -> Result<Vec<u8>> {
            Err(Error::Synthesis("quota exceeded".to_string()))
        }
    }

    struct OfflineSpeech;

    #[async_trait]
    impl SpeechSynthesizer for OfflineSpeech {
        fn name(&self) -> &str {
            "offline"
        }

        async fn synthesize(&self, _text: &str, _language_tag: &str) -> Result<Vec<u8>> {
            Err(Error::Source("connection reset".to_string()))
        }
    }

    fn enrichment() -> Enrichment {
        Enrichment {
            title_zh: "擴散模型".to_string(),
            summary_zh: "一種生成模型。".to_string(),
            applications: vec!["修圖".to_string(), "配樂".to_string(), "設計".to_string()],
            pitch: "市場巨大".to_string(),
        }
    }

    #[test]
    fn test_render_script() {
        let script = NarrationTemplate::default().render(&enrichment());
        assert_eq!(
            script,
            "擴散模型\n\n一種生成模型。\n\n這項技術有三個生活化的應用場景：\n\
             第一，修圖\n第二，配樂\n第三，設計\n\n向創投推銷的說法：\n市場巨大"
        );
    }

    #[tokio::test]
    async fn test_synthesize_writes_file() {
        let dir = tempdir().unwrap();
        let destination = dir.path().join("2401.00001v1.mp3");
        let narrator = Narrator::new(Arc::new(DummySpeech));

        let script = narrator.script(&enrichment());
        narrator.synthesize(&script, "zh-TW", &destination).await.unwrap();

        assert!(std::fs::metadata(&destination).unwrap().len() > 0);
        assert!(!dir.path().join("2401.00001v1.part").exists());
    }

    #[tokio::test]
    async fn test_failed_synthesis_leaves_no_file() {
        let dir = tempdir().unwrap();
        let destination = dir.path().join("x.mp3");
        let narrator = Narrator::new(Arc::new(FailingSpeech));

        let err = narrator.synthesize("text", "zh-TW", &destination).await.unwrap_err();
        assert!(matches!(err, Error::Synthesis(_)));
        assert!(!destination.exists());
    }

    #[tokio::test]
    async fn test_transport_failure_is_reported_as_synthesis() {
        let dir = tempdir().unwrap();
        let destination = dir.path().join("x.mp3");
        let narrator = Narrator::new(Arc::new(OfflineSpeech));

        let err = narrator.synthesize("text", "zh-TW", &destination).await.unwrap_err();
        assert!(err.is_article_scoped());
        match err {
            Error::Synthesis(message) => assert!(message.contains("connection reset")),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!destination.exists());
    }

    #[tokio::test]
    async fn test_write_failure_is_io() {
        let dir = tempdir().unwrap();
        let destination = dir.path().join("missing").join("x.mp3");
        let narrator = Narrator::new(Arc::new(DummySpeech));

        let err = narrator.synthesize("text", "zh-TW", &destination).await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(!dir.path().join("missing").exists());
    }

    #[tokio::test]
    async fn test_rename_failure_removes_temp_file() {
        let dir = tempdir().unwrap();
        let destination = dir.path().join("x.mp3");
        std::fs::create_dir(&destination).unwrap();
        std::fs::write(destination.join("occupied"), b"").unwrap();
        let narrator = Narrator::new(Arc::new(DummySpeech));

        let err = narrator.synthesize("text", "zh-TW", &destination).await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(!dir.path().join("x.part").exists());
    }
}
