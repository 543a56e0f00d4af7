use chrono::{DateTime, Utc};

use super::RunId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticOutcome {
    Succeeded,
    Missed,
    Failed(String),
    Note(String),
}

impl DiagnosticOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticOutcome::Succeeded => "succeeded",
            DiagnosticOutcome::Missed => "missed",
            DiagnosticOutcome::Failed(_) => "failed",
            DiagnosticOutcome::Note(_) => "note",
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            DiagnosticOutcome::Failed(detail) | DiagnosticOutcome::Note(detail) => Some(detail),
            DiagnosticOutcome::Succeeded | DiagnosticOutcome::Missed => None,
        }
    }
}

/// One line of a run's append-only diagnostic log.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticEvent {
    pub run_id: RunId,
    pub stage: String,
    pub strategy: String,
    pub outcome: DiagnosticOutcome,
    pub recorded_at: DateTime<Utc>,
}

impl DiagnosticEvent {
    pub fn new(
        run_id: RunId,
        stage: impl Into<String>,
        strategy: impl Into<String>,
        outcome: DiagnosticOutcome,
    ) -> Self {
        Self {
            run_id,
            stage: stage.into(),
            strategy: strategy.into(),
            outcome,
            recorded_at: Utc::now(),
        }
    }

    pub fn to_json_line(&self) -> String {
        serde_json::json!({
            "run_id": self.run_id.to_string(),
            "stage": self.stage,
            "strategy": self.strategy,
            "outcome": self.outcome.as_str(),
            "detail": self.outcome.detail(),
            "recorded_at": self.recorded_at.to_rfc3339(),
        })
        .to_string()
    }
}
