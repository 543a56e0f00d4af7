use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use crate::application::ports::DiagnosticSink;
use crate::domain::{DiagnosticEvent, DiagnosticOutcome, RunId};

/// Run-scoped handle onto a [`DiagnosticSink`].
#[derive(Clone)]
pub struct RunLog {
    run_id: RunId,
    sink: Arc<dyn DiagnosticSink>,
}

impl RunLog {
    pub fn new(run_id: RunId, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { run_id, sink }
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    pub async fn record(&self, stage: &str, strategy: &str, outcome: DiagnosticOutcome) {
        self.sink
            .record(DiagnosticEvent::new(self.run_id, stage, strategy, outcome))
            .await;
    }

    pub async fn note(&self, stage: &str, strategy: &str, detail: impl Into<String>) {
        self.record(stage, strategy, DiagnosticOutcome::Note(detail.into()))
            .await;
    }
}

/// Ordered list of fallible strategies where the first success wins.
///
/// Steps are awaited one after another. Once a step yields `Ok(Some(_))`
/// every later step is skipped without being run. Misses and errors are
/// recorded to the run log and never propagated.
///
/// ```ignore
/// let transcript = FallbackChain::new(&log, "transcript")
///     .attempt("captions", || fetch_captions(&id))
///     .await
///     .finish("synthetic-stub", || Transcript::synthetic(None))
///     .await;
/// ```
pub struct FallbackChain<'a, T> {
    log: &'a RunLog,
    stage: &'static str,
    resolved: Option<T>,
}

impl<'a, T> FallbackChain<'a, T> {
    pub fn new(log: &'a RunLog, stage: &'static str) -> Self {
        Self {
            log,
            stage,
            resolved: None,
        }
    }

    pub async fn attempt<F, Fut, E>(mut self, strategy: &str, step: F) -> Self
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<T>, E>>,
        E: Display,
    {
        if self.resolved.is_some() {
            return self;
        }

        match step().await {
            Ok(Some(value)) => {
                tracing::debug!(stage = self.stage, strategy, "Strategy succeeded");
                self.log
                    .record(self.stage, strategy, DiagnosticOutcome::Succeeded)
                    .await;
                self.resolved = Some(value);
            }
            Ok(None) => {
                tracing::debug!(stage = self.stage, strategy, "Strategy produced nothing");
                self.log
                    .record(self.stage, strategy, DiagnosticOutcome::Missed)
                    .await;
            }
            Err(e) => {
                tracing::warn!(stage = self.stage, strategy, error = %e, "Strategy failed");
                self.log
                    .record(self.stage, strategy, DiagnosticOutcome::Failed(e.to_string()))
                    .await;
            }
        }

        self
    }

    /// Records that `strategy` was not attempted.
    pub async fn skip(self, strategy: &str, reason: &str) -> Self {
        if self.resolved.is_none() {
            self.log.note(self.stage, strategy, format!("skipped: {reason}")).await;
        }
        self
    }

    /// Terminates the chain with a strategy that cannot fail.
    pub async fn finish<F>(self, strategy: &str, guaranteed: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self.resolved {
            Some(value) => value,
            None => {
                self.log
                    .record(self.stage, strategy, DiagnosticOutcome::Succeeded)
                    .await;
                guaranteed()
            }
        }
    }

    pub fn into_option(self) -> Option<T> {
        self.resolved
    }
}
