mod artifact_path;
mod diagnostic_event;
mod project_spec;
mod prototype_bundle;
mod run_id;
mod run_status;
mod transcript;
mod transcript_source;
mod video_id;
mod viability;

pub use artifact_path::ArtifactPath;
pub use diagnostic_event::{DiagnosticEvent, DiagnosticOutcome};
pub use project_spec::{Branding, CallToAction, ProjectSpec, Section, SectionBody};
pub use prototype_bundle::{BundleEntry, PrototypeBundle};
pub use run_id::RunId;
pub use run_status::RunStatus;
pub use transcript::Transcript;
pub use transcript_source::TranscriptSource;
pub use video_id::VideoId;
pub use viability::{MAX_REASON_CHARS, VerdictOrigin, ViabilityCategory, ViabilityVerdict};
