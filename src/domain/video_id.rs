use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static VIDEO_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:[?&]v=|/v/|/embed/|/shorts/|youtu\.be/)([A-Za-z0-9_-]{6,})").unwrap()
});

/// Opaque identifier of a hosted video: at least six characters from
/// `[A-Za-z0-9_-]`, taken whole from the URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Extracts the identifier from any of the recognized URL shapes
    /// (`watch?v=`, `/v/`, `/embed/`, `/shorts/`, `youtu.be/`).
    pub fn from_url(url: &str) -> Option<Self> {
        VIDEO_ID_PATTERN
            .captures(url.trim())
            .and_then(|caps| caps.get(1))
            .map(|m| Self(m.as_str().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
