use super::{TranscriptSource, VideoId};

const UNKNOWN_VIDEO: &str = "unknown";

/// Non-empty transcript text tagged with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    text: String,
    source: TranscriptSource,
}

impl Transcript {
    /// Returns `None` when the text is blank; a transcript is never empty.
    pub fn new(text: impl Into<String>, source: TranscriptSource) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }
        Some(Self { text, source })
    }

    /// Joins lines with newlines, skipping blank ones.
    pub fn from_lines<I, S>(lines: I, source: TranscriptSource) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = lines
            .into_iter()
            .filter(|line| !line.as_ref().trim().is_empty())
            .map(|line| line.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        Self::new(joined, source)
    }

    /// Deterministic placeholder used when every acquisition strategy failed.
    pub fn synthetic(video_id: Option<&VideoId>) -> Self {
        let id = video_id.map(VideoId::as_str).unwrap_or(UNKNOWN_VIDEO);
        Self {
            text: format!(
                "No transcript could be retrieved for video {id}.\n\
                 This placeholder stands in for the spoken content so that a product \
                 specification and prototype can still be drafted.\n\
                 Replace it with a real transcript for video {id} to get a tailored result."
            ),
            source: TranscriptSource::SyntheticStub,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> TranscriptSource {
        self.source
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}
