use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutMode, PutPayload};

use crate::application::ports::{AudioStore, AudioStoreError};
use crate::domain::StoredFileName;

/// Keeps uploads as flat files in one directory on local disk.
pub struct LocalAudioStore {
    inner: Arc<LocalFileSystem>,
    base_path: PathBuf,
}

impl LocalAudioStore {
    /// Creates `base_path` when missing.
    pub fn new(base_path: impl AsRef<Path>) -> Result<Self, AudioStoreError> {
        std::fs::create_dir_all(base_path.as_ref())?;
        let base_path = base_path.as_ref().canonicalize()?;
        let fs = LocalFileSystem::new_with_prefix(&base_path)
            .map_err(|e| AudioStoreError::WriteFailed(e.to_string()))?;

        tracing::info!(path = %base_path.display(), "Upload directory ready");

        Ok(Self {
            inner: Arc::new(fs),
            base_path,
        })
    }
}

#[async_trait::async_trait]
impl AudioStore for LocalAudioStore {
    async fn store(
        &self,
        filename: &StoredFileName,
        content: Bytes,
    ) -> Result<PathBuf, AudioStoreError> {
        let store_path = StorePath::from(filename.as_str());
        let size = content.len();

        // Create mode: a name collision is an error, never an overwrite.
        self.inner
            .put_opts(&store_path, PutPayload::from(content), PutMode::Create.into())
            .await
            .map_err(|e| AudioStoreError::WriteFailed(e.to_string()))?;

        tracing::debug!(filename = %filename, bytes = size, "Audio written to disk");

        Ok(self.base_path.join(filename.as_str()))
    }

    async fn delete(&self, filename: &StoredFileName) -> Result<(), AudioStoreError> {
        let store_path = StorePath::from(filename.as_str());
        self.inner
            .delete(&store_path)
            .await
            .map_err(|e| match e {
                object_store::Error::NotFound { .. } => {
                    AudioStoreError::NotFound(filename.to_string())
                }
                other => AudioStoreError::DeleteFailed(other.to_string()),
            })
    }
}
