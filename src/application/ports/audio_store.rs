use std::io;
use std::path::PathBuf;

use bytes::Bytes;

use crate::domain::StoredFileName;

#[async_trait::async_trait]
pub trait AudioStore: Send + Sync {
    /// Writes `content` under `filename` and returns the full path of the new file.
    async fn store(
        &self,
        filename: &StoredFileName,
        content: Bytes,
    ) -> Result<PathBuf, AudioStoreError>;

    async fn delete(&self, filename: &StoredFileName) -> Result<(), AudioStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioStoreError {
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
