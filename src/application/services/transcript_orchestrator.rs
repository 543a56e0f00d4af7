use std::convert::Infallible;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::ports::{AudioDownloadError, AudioDownloader};
use crate::domain::{Transcript, TranscriptSource, VideoId};

use super::caption_fetcher::CaptionFetcher;
use super::fallback_chain::{FallbackChain, RunLog};
use super::speech_transcriber::SpeechTranscriber;

const STAGE: &str = "transcript";

/// Audio download plus transcription. Only constructed when a speech
/// credential is configured.
pub struct SpeechPath {
    downloader: Arc<dyn AudioDownloader>,
    transcriber: SpeechTranscriber,
    work_dir: PathBuf,
}

impl SpeechPath {
    pub fn new(
        downloader: Arc<dyn AudioDownloader>,
        transcriber: SpeechTranscriber,
        work_dir: PathBuf,
    ) -> Self {
        Self {
            downloader,
            transcriber,
            work_dir,
        }
    }

    async fn transcribe_url(
        &self,
        url: &str,
        log: &RunLog,
    ) -> Result<Option<Transcript>, AudioDownloadError> {
        let dest_dir = self.work_dir.join(log.run_id().to_string());
        tokio::fs::create_dir_all(&dest_dir).await?;

        let result = self.download_and_transcribe(url, &dest_dir, log).await;

        if let Err(e) = tokio::fs::remove_dir_all(&dest_dir).await {
            tracing::debug!(path = %dest_dir.display(), error = %e, "Audio work dir not removed");
        }

        result
    }

    async fn download_and_transcribe(
        &self,
        url: &str,
        dest_dir: &Path,
        log: &RunLog,
    ) -> Result<Option<Transcript>, AudioDownloadError> {
        let audio_file = self.downloader.download_audio(url, dest_dir).await?;
        log.note(STAGE, "download-audio", audio_file.display().to_string())
            .await;

        let text = self.transcriber.transcribe(&audio_file, log).await;
        Ok(Transcript::new(text, TranscriptSource::SpeechModel))
    }
}

pub struct TranscriptOrchestrator {
    captions: CaptionFetcher,
    speech: Option<SpeechPath>,
}

impl TranscriptOrchestrator {
    pub fn new(captions: CaptionFetcher, speech: Option<SpeechPath>) -> Self {
        Self { captions, speech }
    }

    /// Never fails: captions, then speech, then a synthetic placeholder.
    pub async fn acquire_transcript(&self, raw_url: &str, log: &RunLog) -> Transcript {
        let video_id = VideoId::from_url(raw_url);

        match &video_id {
            Some(id) => log.note(STAGE, "extract-video-id", id.as_str()).await,
            None => {
                tracing::info!(url = raw_url, "No video id recognized in url");
                log.note(STAGE, "extract-video-id", "no recognizable video id")
                    .await
            }
        }

        let mut chain = FallbackChain::new(log, STAGE);

        match &video_id {
            Some(id) => {
                chain = chain
                    .attempt("captions", || async {
                        Ok::<_, Infallible>(self.captions.fetch_captions(id, log).await)
                    })
                    .await;

                chain = match &self.speech {
                    Some(speech) => {
                        chain
                            .attempt("speech-model", || speech.transcribe_url(raw_url, log))
                            .await
                    }
                    None => {
                        chain
                            .skip("speech-model", "no speech credential configured")
                            .await
                    }
                };
            }
            None => {
                chain = chain
                    .skip("captions", "no video id")
                    .await
                    .skip("speech-model", "no video id")
                    .await;
            }
        }

        let transcript = chain
            .finish("synthetic-stub", || Transcript::synthetic(video_id.as_ref()))
            .await;

        tracing::info!(
            source = %transcript.source(),
            words = transcript.word_count(),
            degraded = transcript.source().is_degraded(),
            "Transcript acquired"
        );

        transcript
    }
}
