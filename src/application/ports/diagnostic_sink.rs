use async_trait::async_trait;

use crate::domain::DiagnosticEvent;

/// Best-effort, append-only record of pipeline decisions.
///
/// Implementations swallow their own failures: recording never affects the
/// outcome of a run.
#[async_trait]
pub trait DiagnosticSink: Send + Sync {
    async fn record(&self, event: DiagnosticEvent);
}
