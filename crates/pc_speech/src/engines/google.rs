use std::fmt;

use async_trait::async_trait;
use pc_core::{Error, Result, SpeechSynthesizer};
use reqwest::Client;
use tracing::debug;
use url::Url;

const TRANSLATE_TTS_URL: &str = "https://translate.google.com/translate_tts";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) papercast/0.1";

/// The endpoint refuses text longer than this many characters per request.
pub const MAX_CHUNK_CHARS: usize = 100;

/// Characters after which a chunk may end.
const BREAKS: &[char] = &[
    '\n', '.', '!', '?', ';', ':', ',', '。', '！', '？', '；', '：', '，', '、',
];

/// The Google Translate speech endpoint. Long scripts are split into short
/// chunks and the returned MP3 streams are concatenated.
pub struct GoogleTranslateTts {
    client: Client,
    base_url: String,
}

impl fmt::Debug for GoogleTranslateTts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleTranslateTts")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GoogleTranslateTts {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.unwrap_or_else(|| TRANSLATE_TTS_URL.to_string()),
        }
    }

    fn chunk_url(&self, chunk: &str, language_tag: &str, idx: usize, total: usize) -> Result<Url> {
        Url::parse_with_params(
            &self.base_url,
            &[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language_tag),
                ("q", chunk),
                ("total", &total.to_string()),
                ("idx", &idx.to_string()),
                ("textlen", &chunk.chars().count().to_string()),
            ],
        )
        .map_err(|e| Error::Config(format!("Invalid speech endpoint {}: {}", self.base_url, e)))
    }

    async fn fetch_chunk(&self, url: Url) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| Error::Synthesis(format!("speech request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Synthesis(format!(
                "speech endpoint returned {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Synthesis(format!("speech response unreadable: {}", e)))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTranslateTts {
    fn name(&self) -> &str {
        "Google Translate TTS"
    }

    async fn synthesize(&self, text: &str, language_tag: &str) -> Result<Vec<u8>> {
        let chunks = split_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(Error::Synthesis("nothing to narrate".to_string()));
        }

        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            debug!("TTS chunk {}/{} ({} chars)", idx + 1, chunks.len(), chunk.chars().count());
            let url = self.chunk_url(chunk, language_tag, idx, chunks.len())?;
            audio.extend(self.fetch_chunk(url).await?);
        }
        Ok(audio)
    }
}

/// Splits `text` into chunks of at most `max_chars` characters, preferring to
/// break after punctuation, then at whitespace.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for clause in text.split_inclusive(BREAKS) {
        for part in wrap(clause, max_chars) {
            if current.chars().count() + part.chars().count() > max_chars {
                push_chunk(&mut chunks, &current);
                current.clear();
            }
            current.push_str(&part);
        }
    }
    push_chunk(&mut chunks, &current);
    chunks
}

fn push_chunk(chunks: &mut Vec<String>, chunk: &str) {
    let chunk = chunk.trim();
    if !chunk.is_empty() {
        chunks.push(chunk.to_string());
    }
}

/// Pieces of `clause` no longer than `max_chars`.
fn wrap(clause: &str, max_chars: usize) -> Vec<String> {
    if clause.chars().count() <= max_chars {
        return vec![clause.to_string()];
    }

    let mut pieces = Vec::new();
    let mut current = String::new();
    for word in clause.split_inclusive(char::is_whitespace) {
        let chars: Vec<char> = word.chars().collect();
        for part in chars.chunks(max_chars) {
            if current.chars().count() + part.len() > max_chars {
                pieces.push(std::mem::take(&mut current));
            }
            current.extend(part);
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}
