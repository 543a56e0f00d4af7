use std::sync::Arc;

use crate::application::ports::{CaptionError, TimedTextSource, TrackKind};
use crate::domain::{Transcript, TranscriptSource, VideoId};

use super::fallback_chain::{FallbackChain, RunLog};

const STAGE: &str = "http-captions";

pub const TIMED_TEXT_LANGUAGES: [&str; 5] = ["en", "en-US", "en-GB", "en-CA", "en-AU"];

pub struct HttpCaptionFallback {
    source: Arc<dyn TimedTextSource>,
}

impl HttpCaptionFallback {
    pub fn new(source: Arc<dyn TimedTextSource>) -> Self {
        Self { source }
    }

    /// One request per (language, kind) pair, language-major, manual first.
    pub async fn fetch_captions_http(&self, video_id: &VideoId, log: &RunLog) -> Option<Transcript> {
        let mut chain = FallbackChain::new(log, STAGE);

        for language in TIMED_TEXT_LANGUAGES {
            for kind in [TrackKind::Manual, TrackKind::AutoGenerated] {
                let label = match kind {
                    TrackKind::Manual => format!("{language}/manual"),
                    TrackKind::AutoGenerated => format!("{language}/asr"),
                };
                chain = chain
                    .attempt(&label, || async move {
                        let lines = self.source.fetch_lines(video_id, language, kind).await?;
                        Ok::<_, CaptionError>(Transcript::from_lines(
                            lines,
                            TranscriptSource::HttpCaptions,
                        ))
                    })
                    .await;
            }
        }

        chain.into_option()
    }
}
