use async_trait::async_trait;

use crate::domain::StoredAudio;

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(&self, audio: &StoredAudio) -> Result<String, TranscriptionError>;

    /// Model or deployment the engine transcribes with, for status reporting.
    fn model_name(&self) -> &str;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("could not read audio file: {0}")]
    Io(#[from] std::io::Error),
}
