use async_trait::async_trait;
use pc_core::{Result, SpeechSynthesizer};

/// One silent MPEG-1 Layer III frame (128 kbit/s, 44.1 kHz).
const FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];
const FRAME_LEN: usize = 417;

/// Offline engine that renders every script as a single silent frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct DummySpeech;

#[async_trait]
impl SpeechSynthesizer for DummySpeech {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn synthesize(&self, _text: &str, _language_tag: &str) -> Result<Vec<u8>> {
        let mut frame = vec![0u8; FRAME_LEN];
        frame[..FRAME_HEADER.len()].copy_from_slice(&FRAME_HEADER);
        Ok(frame)
    }
}
