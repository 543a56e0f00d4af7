use async_trait::async_trait;

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    /// `file_name` carries the container extension the engine uses to pick a decoder.
    async fn transcribe(&self, audio_data: &[u8], file_name: &str)
    -> Result<String, TranscriptionError>;

    fn model(&self) -> &str;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
}
