use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::DiagnosticSink;
use crate::domain::DiagnosticEvent;

/// Keeps events in memory, for one-off commands and tests.
#[derive(Default)]
pub struct InMemoryDiagnosticSink {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl InMemoryDiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DiagnosticSink for InMemoryDiagnosticSink {
    async fn record(&self, event: DiagnosticEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
