mod caption_fetcher;
mod fallback_chain;
mod http_caption_fallback;
mod model_output;
mod project_pipeline;
mod prototype_packager;
mod spec_synthesizer;
mod speech_transcriber;
mod transcript_orchestrator;
mod viability_classifier;

pub use caption_fetcher::{CaptionCandidate, CaptionFetcher, PREFERRED_LANGUAGES, candidate_plan};
pub use fallback_chain::{FallbackChain, RunLog};
pub use http_caption_fallback::{HttpCaptionFallback, TIMED_TEXT_LANGUAGES};
pub use model_output::{extract_json_object, truncate_chars};
pub use project_pipeline::{
    PipelineError, PipelineOutcome, PipelineRequest, ProjectPipeline, RunArtifacts,
};
pub use prototype_packager::{ENTRY_FILE, PackagingError, PrototypePackager, SPEC_FILE};
pub use spec_synthesizer::{DEFAULT_TITLE, SpecSynthesizer, synthesize_deterministic};
pub use speech_transcriber::SpeechTranscriber;
pub use transcript_orchestrator::{SpeechPath, TranscriptOrchestrator};
pub use viability_classifier::{
    MIN_WORDS, RuleSignals, ViabilityClassifier, classify_by_rules,
};
