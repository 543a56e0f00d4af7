use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use vid2mvp::application::ports::{
    AudioDownloadError, AudioDownloader, CaptionEntry, CaptionError, CaptionService,
    CaptionTrack, TimedTextSource, TrackKind, TranscriptionEngine, TranscriptionError,
};
use vid2mvp::application::services::{
    CaptionFetcher, HttpCaptionFallback, RunLog, SpeechPath, SpeechTranscriber,
    TranscriptOrchestrator,
};
use vid2mvp::domain::{RunId, TranscriptSource};
use vid2mvp::infrastructure::observability::InMemoryDiagnosticSink;

struct StaticCaptionService {
    with_track: bool,
}

#[async_trait::async_trait]
impl CaptionService for StaticCaptionService {
    async fn list_tracks(
        &self,
        _video_id: &vid2mvp::domain::VideoId,
    ) -> Result<Vec<CaptionTrack>, CaptionError> {
        if !self.with_track {
            return Err(CaptionError::Unavailable("disabled".to_string()));
        }
        Ok(vec![CaptionTrack {
            language_code: "en".to_string(),
            kind: TrackKind::Manual,
            name: Some("English".to_string()),
            url: "en".to_string(),
        }])
    }

    async fn fetch_track(&self, _track: &CaptionTrack) -> Result<Vec<CaptionEntry>, CaptionError> {
        Ok(vec![CaptionEntry {
            start_secs: 0.0,
            duration_secs: 2.0,
            text: "captioned words".to_string(),
        }])
    }
}

struct EmptyTimedText;

#[async_trait::async_trait]
impl TimedTextSource for EmptyTimedText {
    async fn fetch_lines(
        &self,
        _video_id: &vid2mvp::domain::VideoId,
        _language: &str,
        _kind: TrackKind,
    ) -> Result<Vec<String>, CaptionError> {
        Ok(Vec::new())
    }
}

struct FakeDownloader {
    fail: bool,
    calls: AtomicUsize,
    dest_dirs: Mutex<Vec<PathBuf>>,
}

impl FakeDownloader {
    fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            fail,
            calls: AtomicUsize::new(0),
            dest_dirs: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait::async_trait]
impl AudioDownloader for FakeDownloader {
    async fn download_audio(
        &self,
        _url: &str,
        dest_dir: &Path,
    ) -> Result<PathBuf, AudioDownloadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.dest_dirs.lock().unwrap().push(dest_dir.to_path_buf());
        if self.fail {
            return Err(AudioDownloadError::DownloadFailed("HTTP Error 403".to_string()));
        }
        let path = dest_dir.join("audio.webm");
        tokio::fs::write(&path, b"audio").await?;
        Ok(path)
    }
}

struct FixedEngine(&'static str);

#[async_trait::async_trait]
impl TranscriptionEngine for FixedEngine {
    async fn transcribe(
        &self,
        _audio_data: &[u8],
        _file_name: &str,
    ) -> Result<String, TranscriptionError> {
        Ok(self.0.to_string())
    }

    fn model(&self) -> &str {
        "fixed"
    }
}

fn caption_fetcher(with_track: bool) -> CaptionFetcher {
    CaptionFetcher::new(
        Arc::new(StaticCaptionService { with_track }),
        HttpCaptionFallback::new(Arc::new(EmptyTimedText)),
    )
}

fn speech_path(downloader: Arc<FakeDownloader>, text: &'static str, work_dir: &Path) -> SpeechPath {
    SpeechPath::new(
        downloader,
        SpeechTranscriber::new(Arc::new(FixedEngine(text)), Arc::new(FixedEngine(text))),
        work_dir.to_path_buf(),
    )
}

fn create_log() -> RunLog {
    RunLog::new(RunId::new(), Arc::new(InMemoryDiagnosticSink::new()))
}

#[tokio::test]
async fn given_unrecognized_url_and_no_credential_when_acquiring_then_returns_unknown_stub() {
    let orchestrator = TranscriptOrchestrator::new(caption_fetcher(true), None);

    let transcript = orchestrator
        .acquire_transcript("https://example.com/not-a-video", &create_log())
        .await;

    assert_eq!(transcript.source(), TranscriptSource::SyntheticStub);
    assert!(!transcript.text().trim().is_empty());
    assert!(transcript.text().contains("unknown"));
}

#[tokio::test]
async fn given_captions_available_when_acquiring_then_speech_path_is_not_used() {
    let work = tempfile::TempDir::new().unwrap();
    let downloader = FakeDownloader::new(false);
    let orchestrator = TranscriptOrchestrator::new(
        caption_fetcher(true),
        Some(speech_path(downloader.clone(), "spoken", work.path())),
    );

    let transcript = orchestrator
        .acquire_transcript("https://www.youtube.com/watch?v=dQw4w9WgXcQ", &create_log())
        .await;

    assert_eq!(transcript.source(), TranscriptSource::NativeCaptions);
    assert_eq!(transcript.text(), "captioned words");
    assert_eq!(downloader.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_no_captions_and_speech_configured_when_acquiring_then_uses_speech_and_cleans_up() {
    let work = tempfile::TempDir::new().unwrap();
    let downloader = FakeDownloader::new(false);
    let orchestrator = TranscriptOrchestrator::new(
        caption_fetcher(false),
        Some(speech_path(downloader.clone(), "spoken words", work.path())),
    );

    let transcript = orchestrator
        .acquire_transcript("https://youtu.be/dQw4w9WgXcQ", &create_log())
        .await;

    assert_eq!(transcript.source(), TranscriptSource::SpeechModel);
    assert_eq!(transcript.text(), "spoken words");

    let dest_dirs = downloader.dest_dirs.lock().unwrap().clone();
    assert_eq!(dest_dirs.len(), 1);
    assert!(dest_dirs[0].starts_with(work.path()));
    assert!(!dest_dirs[0].exists());
}

#[tokio::test]
async fn given_speech_returns_nothing_when_acquiring_then_falls_back_to_stub_with_id() {
    let work = tempfile::TempDir::new().unwrap();
    let orchestrator = TranscriptOrchestrator::new(
        caption_fetcher(false),
        Some(speech_path(FakeDownloader::new(false), "   ", work.path())),
    );

    let transcript = orchestrator
        .acquire_transcript("https://youtu.be/dQw4w9WgXcQ", &create_log())
        .await;

    assert_eq!(transcript.source(), TranscriptSource::SyntheticStub);
    assert!(transcript.text().contains("dQw4w9WgXcQ"));
}

#[tokio::test]
async fn given_download_fails_when_acquiring_then_falls_back_to_stub() {
    let work = tempfile::TempDir::new().unwrap();
    let orchestrator = TranscriptOrchestrator::new(
        caption_fetcher(false),
        Some(speech_path(FakeDownloader::new(true), "unused", work.path())),
    );

    let transcript = orchestrator
        .acquire_transcript("https://youtu.be/dQw4w9WgXcQ", &create_log())
        .await;

    assert_eq!(transcript.source(), TranscriptSource::SyntheticStub);
}

#[tokio::test]
async fn given_no_speech_credential_when_captions_missing_then_skip_is_logged() {
    let sink = Arc::new(InMemoryDiagnosticSink::new());
    let log = RunLog::new(RunId::new(), sink.clone());
    let orchestrator = TranscriptOrchestrator::new(caption_fetcher(false), None);

    let transcript = orchestrator
        .acquire_transcript("https://youtu.be/dQw4w9WgXcQ", &log)
        .await;

    assert_eq!(transcript.source(), TranscriptSource::SyntheticStub);
    assert!(sink.events().iter().any(|e| {
        e.strategy == "speech-model"
            && e.outcome.detail() == Some("skipped: no speech credential configured")
    }));
}
