use std::path::Path;
use std::sync::Arc;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};

use super::fallback_chain::{FallbackChain, RunLog};

const STAGE: &str = "speech";

/// Primary transcription model with a single retry against a secondary one.
pub struct SpeechTranscriber {
    primary: Arc<dyn TranscriptionEngine>,
    secondary: Arc<dyn TranscriptionEngine>,
}

impl SpeechTranscriber {
    pub fn new(primary: Arc<dyn TranscriptionEngine>, secondary: Arc<dyn TranscriptionEngine>) -> Self {
        Self { primary, secondary }
    }

    /// Returns an empty string when both models fail or hear nothing.
    pub async fn transcribe(&self, audio_file: &Path, log: &RunLog) -> String {
        let audio = match tokio::fs::read(audio_file).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(path = %audio_file.display(), error = %e, "Could not read audio file");
                log.note(STAGE, "read-audio", format!("read failed: {e}")).await;
                return String::new();
            }
        };
        let file_name = audio_file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.m4a");

        tracing::debug!(bytes = audio.len(), file_name, "Transcribing downloaded audio");

        FallbackChain::new(log, STAGE)
            .attempt(self.primary.model(), || {
                transcribe_with(self.primary.as_ref(), &audio, file_name)
            })
            .await
            .attempt(self.secondary.model(), || {
                transcribe_with(self.secondary.as_ref(), &audio, file_name)
            })
            .await
            .into_option()
            .unwrap_or_default()
    }
}

async fn transcribe_with(
    engine: &dyn TranscriptionEngine,
    audio: &[u8],
    file_name: &str,
) -> Result<Option<String>, TranscriptionError> {
    let text = engine.transcribe(audio, file_name).await?;
    let text = text.trim();
    Ok((!text.is_empty()).then(|| text.to_string()))
}
