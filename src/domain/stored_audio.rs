use std::path::PathBuf;

use super::analysis_outcome::AnalysisOutcome;
use super::stored_file_name::StoredFileName;

#[derive(Debug, Clone, PartialEq)]
pub struct StoredAudio {
    pub filename: StoredFileName,
    pub path: PathBuf,
    pub content_type: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscribedAudio {
    pub audio: StoredAudio,
    pub transcription: String,
}

/// Everything one upload-and-analyze run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechReport {
    pub audio: StoredAudio,
    pub transcription: String,
    pub analysis: AnalysisOutcome,
}
