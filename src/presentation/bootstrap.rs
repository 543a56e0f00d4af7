use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{
    ArtifactStoreError, CaptionError, DiagnosticSink, LlmClient, LlmClientError,
    TranscriptionError,
};
use crate::application::services::{
    CaptionFetcher, HttpCaptionFallback, ProjectPipeline, PrototypePackager, SpecSynthesizer,
    SpeechPath, SpeechTranscriber, TranscriptOrchestrator, ViabilityClassifier,
};
use crate::infrastructure::audio::{TranscriptionEngineFactory, YtDlpDownloader};
use crate::infrastructure::captions::{TimedTextClient, YouTubeCaptionService};
use crate::infrastructure::llm::{OpenAiClient, OpenAiClientConfig};
use crate::infrastructure::observability::FileDiagnosticSink;
use crate::infrastructure::storage::LocalArtifactStore;

use super::config::Settings;

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("caption client: {0}")]
    Captions(#[from] CaptionError),
    #[error("transcription client: {0}")]
    Transcription(#[from] TranscriptionError),
    #[error("llm client: {0}")]
    Llm(#[from] LlmClientError),
    #[error("artifact store: {0}")]
    Storage(#[from] ArtifactStoreError),
}

/// Generative client, present only with a generative credential.
pub fn build_llm_client(settings: &Settings) -> Result<Option<Arc<dyn LlmClient>>, BootstrapError> {
    let Some(api_key) = settings.pipeline.generative_credential() else {
        tracing::info!("No generative credential configured; using rule-based fallbacks");
        return Ok(None);
    };

    let client = OpenAiClient::new(OpenAiClientConfig {
        api_key: api_key.to_string(),
        model: settings.pipeline.generative_model_name.clone(),
        base_url: settings.llm.base_url.clone(),
        max_tokens: settings.llm.max_tokens,
        temperature: settings.llm.temperature,
        timeout: Duration::from_secs(settings.llm.timeout_secs),
    })?;

    Ok(Some(Arc::new(client)))
}

pub fn build_caption_fetcher(settings: &Settings) -> Result<CaptionFetcher, BootstrapError> {
    let timeout = Duration::from_secs(settings.captions.timeout_secs);

    let service = YouTubeCaptionService::new(
        settings.captions.watch_base_url.clone(),
        &settings.captions.user_agent,
        timeout,
    )?;
    let timed_text = TimedTextClient::new(
        settings.captions.timed_text_base_url.clone(),
        &settings.captions.user_agent,
        timeout,
    )?;

    Ok(CaptionFetcher::new(
        Arc::new(service),
        HttpCaptionFallback::new(Arc::new(timed_text)),
    ))
}

/// Download plus transcription, present only with a speech credential.
pub fn build_speech_path(settings: &Settings) -> Result<Option<SpeechPath>, BootstrapError> {
    let Some(api_key) = settings.pipeline.speech_credential() else {
        tracing::info!("No speech credential configured; speech transcription disabled");
        return Ok(None);
    };

    let engines = TranscriptionEngineFactory::create_pair(
        &settings.pipeline.primary_transcription_model,
        &settings.pipeline.fallback_transcription_model,
        Some(api_key.to_string()),
        settings.transcription.base_url.clone(),
        Duration::from_secs(settings.transcription.timeout_secs),
    )?;

    let downloader = YtDlpDownloader::new(
        settings.audio.yt_dlp_path.clone(),
        settings.pipeline.cookie_file_path.clone(),
        settings.audio.user_agent.clone(),
        Duration::from_secs(settings.audio.timeout_secs),
    );

    Ok(Some(SpeechPath::new(
        Arc::new(downloader),
        SpeechTranscriber::new(engines.primary, engines.secondary),
        settings.audio.work_dir.clone(),
    )))
}

pub fn build_pipeline(settings: &Settings) -> Result<ProjectPipeline, BootstrapError> {
    let llm = build_llm_client(settings)?;
    let orchestrator =
        TranscriptOrchestrator::new(build_caption_fetcher(settings)?, build_speech_path(settings)?);
    let store = LocalArtifactStore::new(settings.storage.artifacts_dir.clone())?;
    let diagnostics: Arc<dyn DiagnosticSink> =
        Arc::new(FileDiagnosticSink::new(settings.storage.diagnostics_dir.clone()));

    Ok(ProjectPipeline::new(
        orchestrator,
        SpecSynthesizer::new(llm.clone()),
        ViabilityClassifier::new(llm),
        PrototypePackager::default(),
        Arc::new(store),
        diagnostics,
    ))
}
