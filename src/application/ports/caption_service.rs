use async_trait::async_trait;

use crate::domain::VideoId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKind {
    Manual,
    AutoGenerated,
}

/// A caption track advertised by the hosting service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionTrack {
    pub language_code: String,
    pub kind: TrackKind,
    pub name: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaptionEntry {
    pub start_secs: f64,
    pub duration_secs: f64,
    pub text: String,
}

#[async_trait]
pub trait CaptionService: Send + Sync {
    /// Tracks in the order the service lists them.
    async fn list_tracks(&self, video_id: &VideoId) -> Result<Vec<CaptionTrack>, CaptionError>;

    async fn fetch_track(&self, track: &CaptionTrack) -> Result<Vec<CaptionEntry>, CaptionError>;
}

/// Raw-protocol access to the public timed-text endpoint.
#[async_trait]
pub trait TimedTextSource: Send + Sync {
    /// Decoded, trimmed, non-empty text nodes in document order.
    async fn fetch_lines(
        &self,
        video_id: &VideoId,
        language: &str,
        kind: TrackKind,
    ) -> Result<Vec<String>, CaptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CaptionError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("captions unavailable: {0}")]
    Unavailable(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
