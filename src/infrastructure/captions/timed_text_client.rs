use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::application::ports::{CaptionError, TimedTextSource, TrackKind};
use crate::domain::VideoId;

use super::timed_text_parser::{non_empty_lines, parse_timed_text};

pub const DEFAULT_TIMED_TEXT_URL: &str = "https://www.youtube.com/api/timedtext";

/// Plain GETs against the public timed-text endpoint.
pub struct TimedTextClient {
    client: Client,
    base_url: String,
}

impl TimedTextClient {
    pub fn new(
        base_url: Option<String>,
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
            base_url: base_url.unwrap_or_else(|| DEFAULT_TIMED_TEXT_URL.to_string()),
        })
    }
}

#[async_trait]
impl TimedTextSource for TimedTextClient {
    async fn fetch_lines(
        &self,
        video_id: &VideoId,
        language: &str,
        kind: TrackKind,
    ) -> Result<Vec<String>, CaptionError> {
        let mut query = vec![("v", video_id.as_str()), ("lang", language)];
        if kind == TrackKind::AutoGenerated {
            query.push(("kind", "asr"));
        }

        tracing::debug!(video_id = %video_id, language, ?kind, "Requesting timed text");

        let response = self
            .client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await
            .map_err(|e| CaptionError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            return Err(CaptionError::ApiRequestFailed(format!(
                "status {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CaptionError::InvalidResponse(format!("body: {}", e)))?;

        Ok(non_empty_lines(parse_timed_text(&body)))
    }
}
