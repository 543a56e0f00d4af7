mod openai_whisper_engine;
mod transcription_engine_factory;
mod yt_dlp_downloader;

pub use openai_whisper_engine::{
    DEFAULT_TRANSCRIPTION_URL, FALLBACK_MIME, OpenAiWhisperEngine, mime_for,
};
pub use transcription_engine_factory::{TranscriptionEngineFactory, TranscriptionEnginePair};
pub use yt_dlp_downloader::{DEFAULT_YT_DLP_PATH, YtDlpDownloader, newest_matching_file};
