use std::sync::Arc;

use bytes::Bytes;
use tracing::Instrument;

use crate::application::ports::{ArtifactStore, ArtifactStoreError, DiagnosticSink};
use crate::domain::{
    ArtifactPath, ProjectSpec, PrototypeBundle, RunId, RunStatus, Transcript, ViabilityVerdict,
};

use super::fallback_chain::RunLog;
use super::prototype_packager::{PackagingError, PrototypePackager};
use super::spec_synthesizer::{DEFAULT_TITLE, SpecSynthesizer};
use super::transcript_orchestrator::TranscriptOrchestrator;
use super::viability_classifier::ViabilityClassifier;

const STAGE: &str = "pipeline";
const TRANSCRIPT_FILE: &str = "transcript.txt";
const SPEC_FILE: &str = "spec.json";

#[derive(Debug, Clone)]
pub struct PipelineRequest {
    pub url: String,
    pub title: Option<String>,
}

/// Where the run's artifacts were written.
#[derive(Debug, Clone)]
pub struct RunArtifacts {
    pub transcript: String,
    pub spec: String,
    pub prototype: String,
}

#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub run_id: RunId,
    pub transcript: Transcript,
    pub spec: ProjectSpec,
    pub verdict: ViabilityVerdict,
    pub bundle: PrototypeBundle,
    pub artifacts: RunArtifacts,
}

pub struct ProjectPipeline {
    orchestrator: TranscriptOrchestrator,
    synthesizer: SpecSynthesizer,
    classifier: ViabilityClassifier,
    packager: PrototypePackager,
    store: Arc<dyn ArtifactStore>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl ProjectPipeline {
    pub fn new(
        orchestrator: TranscriptOrchestrator,
        synthesizer: SpecSynthesizer,
        classifier: ViabilityClassifier,
        packager: PrototypePackager,
        store: Arc<dyn ArtifactStore>,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            orchestrator,
            synthesizer,
            classifier,
            packager,
            store,
            diagnostics,
        }
    }

    /// Runs one request end to end. Transcript, spec and verdict never fail;
    /// only writing artifacts can.
    pub async fn run(&self, request: PipelineRequest) -> Result<PipelineOutcome, PipelineError> {
        let run_id = RunId::new();
        let span = tracing::info_span!("pipeline_run", run_id = %run_id, url = %request.url);
        self.run_as(run_id, request).instrument(span).await
    }

    async fn run_as(
        &self,
        run_id: RunId,
        request: PipelineRequest,
    ) -> Result<PipelineOutcome, PipelineError> {
        let log = RunLog::new(run_id, Arc::clone(&self.diagnostics));

        log.note(STAGE, "status", RunStatus::Queued.as_str()).await;
        log.note(STAGE, "status", RunStatus::Processing.as_str()).await;

        match self.execute(&request, &log).await {
            Ok(outcome) => {
                log.note(STAGE, "status", RunStatus::Complete.as_str()).await;
                tracing::info!(
                    source = %outcome.transcript.source(),
                    viability = %outcome.verdict.category,
                    "Pipeline run complete"
                );
                Ok(outcome)
            }
            Err(e) => {
                tracing::error!(error = %e, "Pipeline run failed");
                log.note(
                    STAGE,
                    "status",
                    format!("{}: {}", RunStatus::Failed.as_str(), e),
                )
                .await;
                Err(e)
            }
        }
    }

    async fn execute(
        &self,
        request: &PipelineRequest,
        log: &RunLog,
    ) -> Result<PipelineOutcome, PipelineError> {
        let run_id = log.run_id();
        let title = request
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());

        let transcript = self.orchestrator.acquire_transcript(&request.url, log).await;
        let spec = self.synthesizer.synthesize(&transcript, title, log).await;
        let verdict = self
            .classifier
            .classify(title.unwrap_or(DEFAULT_TITLE), &transcript, log)
            .await;
        let bundle = self.packager.package(&spec)?;

        let transcript_path = ArtifactPath::new(&run_id, TRANSCRIPT_FILE);
        self.store
            .put(&transcript_path, Bytes::from(transcript.text().to_string()))
            .await?;

        let spec_path = ArtifactPath::new(&run_id, SPEC_FILE);
        self.store
            .put(&spec_path, Bytes::from(spec.to_json_pretty()?))
            .await?;

        let bundle_path = ArtifactPath::new(&run_id, PrototypeBundle::FILE_NAME);
        self.store
            .put(&bundle_path, Bytes::copy_from_slice(bundle.archive()))
            .await?;

        Ok(PipelineOutcome {
            run_id,
            artifacts: RunArtifacts {
                transcript: self.store.locate(&transcript_path),
                spec: self.store.locate(&spec_path),
                prototype: self.store.locate(&bundle_path),
            },
            transcript,
            spec,
            verdict,
            bundle,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("packaging: {0}")]
    Packaging(#[from] PackagingError),
    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("storage: {0}")]
    Storage(#[from] ArtifactStoreError),
}
