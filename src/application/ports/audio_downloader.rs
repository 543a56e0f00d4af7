use std::path::{Path, PathBuf};

use async_trait::async_trait;

#[async_trait]
pub trait AudioDownloader: Send + Sync {
    /// Downloads the best audio-only stream for `url` into `dest_dir` and
    /// returns the path of the produced file.
    async fn download_audio(&self, url: &str, dest_dir: &Path)
    -> Result<PathBuf, AudioDownloadError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioDownloadError {
    #[error("downloader not available: {0}")]
    ToolMissing(String),
    #[error("download failed: {0}")]
    DownloadFailed(String),
    #[error("download timed out after {0} seconds")]
    TimedOut(u64),
    #[error("no audio file produced in {0}")]
    NoOutput(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
