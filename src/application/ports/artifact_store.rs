use std::io;

use bytes::Bytes;

use crate::domain::ArtifactPath;

#[async_trait::async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Writes the whole object, replacing any previous version.
    async fn put(&self, path: &ArtifactPath, data: Bytes) -> Result<u64, ArtifactStoreError>;

    async fn fetch(&self, path: &ArtifactPath) -> Result<Vec<u8>, ArtifactStoreError>;

    /// Location of the artifact as the caller should report it.
    fn locate(&self, path: &ArtifactPath) -> String;
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactStoreError {
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("download failed: {0}")]
    DownloadFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
