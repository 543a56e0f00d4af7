use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{
    CaptionEntry, CaptionError, CaptionService, CaptionTrack, TrackKind,
};
use crate::domain::VideoId;

use super::timed_text_parser::parse_timed_text;

pub const DEFAULT_WATCH_URL: &str = "https://www.youtube.com/watch";

const CAPTION_TRACKS_KEY: &str = "\"captionTracks\":";

/// Reads the caption track list embedded in the video watch page.
pub struct YouTubeCaptionService {
    client: Client,
    watch_url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCaptionTrack {
    base_url: String,
    language_code: String,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    name: Option<RawTrackName>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTrackName {
    #[serde(default)]
    simple_text: Option<String>,
    #[serde(default)]
    runs: Vec<RawTextRun>,
}

#[derive(Deserialize)]
struct RawTextRun {
    text: String,
}

impl RawCaptionTrack {
    fn into_track(self) -> CaptionTrack {
        let kind = match self.kind.as_deref() {
            Some("asr") => TrackKind::AutoGenerated,
            _ => TrackKind::Manual,
        };
        let name = self.name.and_then(|n| {
            n.simple_text.or_else(|| {
                let joined: String = n.runs.into_iter().map(|r| r.text).collect();
                (!joined.is_empty()).then_some(joined)
            })
        });
        CaptionTrack {
            language_code: self.language_code,
            kind,
            name,
            url: self.base_url,
        }
    }
}

impl YouTubeCaptionService {
    pub fn new(
        watch_url: Option<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, CaptionError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| CaptionError::ApiRequestFailed(format!("client: {}", e)))?;

        Ok(Self {
            client,
            watch_url: watch_url.unwrap_or_else(|| DEFAULT_WATCH_URL.to_string()),
        })
    }

    async fn get_text(&self, request: reqwest::RequestBuilder) -> Result<String, CaptionError> {
        let response = request
            .send()
            .await
            .map_err(|e| CaptionError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            return Err(CaptionError::ApiRequestFailed(format!(
                "status {}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| CaptionError::InvalidResponse(format!("body: {}", e)))
    }
}

/// Decodes the JSON array following `"captionTracks":` in a watch page.
pub fn extract_caption_tracks(page: &str) -> Result<Vec<CaptionTrack>, CaptionError> {
    let start = page
        .find(CAPTION_TRACKS_KEY)
        .ok_or_else(|| CaptionError::Unavailable("no caption tracks advertised".to_string()))?;
    let rest = &page[start + CAPTION_TRACKS_KEY.len()..];

    let raw: Vec<RawCaptionTrack> = serde_json::Deserializer::from_str(rest)
        .into_iter::<Vec<RawCaptionTrack>>()
        .next()
        .ok_or_else(|| CaptionError::InvalidResponse("empty caption track list".to_string()))?
        .map_err(|e| CaptionError::InvalidResponse(format!("caption tracks: {}", e)))?;

    Ok(raw.into_iter().map(RawCaptionTrack::into_track).collect())
}

#[async_trait]
impl CaptionService for YouTubeCaptionService {
    async fn list_tracks(&self, video_id: &VideoId) -> Result<Vec<CaptionTrack>, CaptionError> {
        let request = self
            .client
            .get(&self.watch_url)
            .query(&[("v", video_id.as_str()), ("hl", "en")])
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9");
        let page = self.get_text(request).await?;

        let tracks = extract_caption_tracks(&page)?;
        tracing::debug!(video_id = %video_id, tracks = tracks.len(), "Caption tracks listed");
        Ok(tracks)
    }

    async fn fetch_track(&self, track: &CaptionTrack) -> Result<Vec<CaptionEntry>, CaptionError> {
        let body = self.get_text(self.client.get(&track.url)).await?;

        let entries = parse_timed_text(&body)
            .into_iter()
            .map(|node| CaptionEntry {
                start_secs: node.start_secs,
                duration_secs: node.duration_secs,
                text: node.text,
            })
            .collect::<Vec<_>>();

        if entries.is_empty() {
            return Err(CaptionError::InvalidResponse(format!(
                "no caption entries in {} track",
                track.language_code
            )));
        }

        Ok(entries)
    }
}
