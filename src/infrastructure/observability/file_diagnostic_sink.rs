use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::application::ports::DiagnosticSink;
use crate::domain::{DiagnosticEvent, RunId};

/// Appends one JSON line per event to `<dir>/<run_id>.log`.
pub struct FileDiagnosticSink {
    dir: PathBuf,
}

impl FileDiagnosticSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn log_path(&self, run_id: &RunId) -> PathBuf {
        self.dir.join(format!("{}.log", run_id))
    }

    async fn append(&self, event: &DiagnosticEvent) -> Result<(), std::io::Error> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.log_path(&event.run_id))
            .await?;

        let mut line = event.to_json_line();
        line.push('\n');
        file.write_all(line.as_bytes()).await?;
        file.flush().await
    }
}

#[async_trait]
impl DiagnosticSink for FileDiagnosticSink {
    async fn record(&self, event: DiagnosticEvent) {
        if let Err(e) = self.append(&event).await {
            tracing::warn!(
                run_id = %event.run_id,
                stage = %event.stage,
                error = %e,
                "Failed to append diagnostic event"
            );
        }
    }
}
