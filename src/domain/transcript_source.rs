use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which acquisition strategy produced a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TranscriptSource {
    NativeCaptions,
    HttpCaptions,
    SpeechModel,
    SyntheticStub,
}

impl TranscriptSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranscriptSource::NativeCaptions => "native-captions",
            TranscriptSource::HttpCaptions => "http-captions",
            TranscriptSource::SpeechModel => "speech-model",
            TranscriptSource::SyntheticStub => "synthetic-stub",
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, TranscriptSource::SyntheticStub)
    }
}

impl FromStr for TranscriptSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "native-captions" => Ok(TranscriptSource::NativeCaptions),
            "http-captions" => Ok(TranscriptSource::HttpCaptions),
            "speech-model" => Ok(TranscriptSource::SpeechModel),
            "synthetic-stub" => Ok(TranscriptSource::SyntheticStub),
            _ => Err(format!("Invalid transcript source: {}", s)),
        }
    }
}

impl fmt::Display for TranscriptSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
