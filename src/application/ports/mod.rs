mod audio_store;
mod llm_client;
mod transcription_engine;

pub use audio_store::{AudioStore, AudioStoreError};
pub use llm_client::{LlmClient, LlmClientError};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
