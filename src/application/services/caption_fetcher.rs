use std::convert::Infallible;
use std::sync::Arc;

use crate::application::ports::{CaptionError, CaptionService, CaptionTrack, TrackKind};
use crate::domain::{Transcript, TranscriptSource, VideoId};

use super::fallback_chain::{FallbackChain, RunLog};
use super::http_caption_fallback::HttpCaptionFallback;

const STAGE: &str = "captions";

pub const PREFERRED_LANGUAGES: [&str; 3] = ["en", "en-US", "en-GB"];

/// One step of the caption tie-break policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptionCandidate {
    /// First track of `kind` whose language appears in `languages`,
    /// searched in `languages` order.
    Preferred {
        kind: TrackKind,
        languages: Vec<&'static str>,
    },
    FirstListed,
}

impl CaptionCandidate {
    pub fn label(&self) -> String {
        match self {
            CaptionCandidate::Preferred { kind, languages } => {
                let kind = match kind {
                    TrackKind::Manual => "manual",
                    TrackKind::AutoGenerated => "auto",
                };
                format!("{}[{}]", kind, languages.join(","))
            }
            CaptionCandidate::FirstListed => "first-listed".to_string(),
        }
    }

    pub fn select<'t>(&self, tracks: &'t [CaptionTrack]) -> Option<&'t CaptionTrack> {
        match self {
            CaptionCandidate::Preferred { kind, languages } => languages.iter().find_map(|lang| {
                tracks
                    .iter()
                    .find(|t| t.kind == *kind && t.language_code == *lang)
            }),
            CaptionCandidate::FirstListed => tracks.first(),
        }
    }
}

/// Manual tracks before auto-generated ones, the joint preferred set before
/// each language alone, then whatever the service lists first.
pub fn candidate_plan() -> Vec<CaptionCandidate> {
    let mut plan = Vec::with_capacity(9);
    for kind in [TrackKind::Manual, TrackKind::AutoGenerated] {
        plan.push(CaptionCandidate::Preferred {
            kind,
            languages: PREFERRED_LANGUAGES.to_vec(),
        });
        for lang in PREFERRED_LANGUAGES {
            plan.push(CaptionCandidate::Preferred {
                kind,
                languages: vec![lang],
            });
        }
    }
    plan.push(CaptionCandidate::FirstListed);
    plan
}

pub struct CaptionFetcher {
    service: Arc<dyn CaptionService>,
    http_fallback: HttpCaptionFallback,
}

impl CaptionFetcher {
    pub fn new(service: Arc<dyn CaptionService>, http_fallback: HttpCaptionFallback) -> Self {
        Self {
            service,
            http_fallback,
        }
    }

    pub async fn fetch_captions(&self, video_id: &VideoId, log: &RunLog) -> Option<Transcript> {
        let tracks = match self.service.list_tracks(video_id).await {
            Ok(tracks) => {
                log.note(STAGE, "list-tracks", format!("{} tracks listed", tracks.len()))
                    .await;
                tracks
            }
            Err(e) => {
                tracing::warn!(video_id = %video_id, error = %e, "Listing caption tracks failed");
                log.note(STAGE, "list-tracks", format!("listing failed: {e}"))
                    .await;
                Vec::new()
            }
        };

        let mut chain = FallbackChain::new(log, STAGE);
        for candidate in candidate_plan() {
            chain = chain
                .attempt(&candidate.label(), || self.try_candidate(&tracks, &candidate))
                .await;
        }

        chain
            .attempt("http-timed-text", || async {
                Ok::<_, Infallible>(self.http_fallback.fetch_captions_http(video_id, log).await)
            })
            .await
            .into_option()
    }

    async fn try_candidate(
        &self,
        tracks: &[CaptionTrack],
        candidate: &CaptionCandidate,
    ) -> Result<Option<Transcript>, CaptionError> {
        let Some(track) = candidate.select(tracks) else {
            return Ok(None);
        };

        let mut entries = self.service.fetch_track(track).await?;
        entries.sort_by(|a, b| a.start_secs.total_cmp(&b.start_secs));

        let transcript = Transcript::from_lines(
            entries.iter().map(|e| e.text.trim()),
            TranscriptSource::NativeCaptions,
        );

        if let Some(t) = &transcript {
            tracing::info!(
                language = %track.language_code,
                kind = ?track.kind,
                lines = t.lines().count(),
                "Native captions retrieved"
            );
        }

        Ok(transcript)
    }
}
