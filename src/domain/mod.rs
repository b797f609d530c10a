mod analysis;
mod analysis_outcome;
mod pipeline_stage;
mod stored_audio;
mod stored_file_name;
mod uploaded_audio;

pub use analysis::{
    AnalysisRequest, AnalysisResult, IncorrectWord, Score, UNPARSEABLE_ANALYSIS_NOTE,
};
pub use analysis_outcome::{ANALYSIS_FAILED_MARKER, AnalysisOutcome};
pub use pipeline_stage::PipelineStage;
pub use stored_audio::{SpeechReport, StoredAudio, TranscribedAudio};
pub use stored_file_name::StoredFileName;
pub use uploaded_audio::{UploadedAudio, is_audio_media_type};
