mod artifact_store;
mod audio_downloader;
mod caption_service;
mod diagnostic_sink;
mod llm_client;
mod transcription_engine;

pub use artifact_store::{ArtifactStore, ArtifactStoreError};
pub use audio_downloader::{AudioDownloadError, AudioDownloader};
pub use caption_service::{
    CaptionEntry, CaptionError, CaptionService, CaptionTrack, TimedTextSource, TrackKind,
};
pub use diagnostic_sink::DiagnosticSink;
pub use llm_client::{LlmClient, LlmClientError};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
