use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const MAX_REASON_CHARS: usize = 280;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViabilityCategory {
    MvpReady,
    IdeaOnly,
    NotAProject,
}

impl ViabilityCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViabilityCategory::MvpReady => "mvp-ready",
            ViabilityCategory::IdeaOnly => "idea-only",
            ViabilityCategory::NotAProject => "not-a-project",
        }
    }
}

impl FromStr for ViabilityCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mvp-ready" => Ok(ViabilityCategory::MvpReady),
            "idea-only" => Ok(ViabilityCategory::IdeaOnly),
            "not-a-project" => Ok(ViabilityCategory::NotAProject),
            other => Err(format!("Invalid viability category: {}", other)),
        }
    }
}

impl fmt::Display for ViabilityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which classifier path produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictOrigin {
    Ai,
    Rules,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViabilityVerdict {
    pub category: ViabilityCategory,
    pub score: f32,
    pub reason: String,
    pub origin: VerdictOrigin,
}

impl ViabilityVerdict {
    /// Clamps `score` into `[0, 1]` and bounds `reason` to [`MAX_REASON_CHARS`].
    pub fn new(
        category: ViabilityCategory,
        score: f32,
        reason: impl Into<String>,
        origin: VerdictOrigin,
    ) -> Self {
        let score = if score.is_nan() {
            0.0
        } else {
            score.clamp(0.0, 1.0)
        };
        let reason: String = reason.into().trim().chars().take(MAX_REASON_CHARS).collect();
        Self {
            category,
            score,
            reason,
            origin,
        }
    }
}
