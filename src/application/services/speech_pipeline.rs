use std::sync::Arc;

use crate::application::ports::{
    AudioStore, AudioStoreError, LlmClient, LlmClientError, TranscriptionEngine,
    TranscriptionError,
};
use crate::domain::{
    AnalysisOutcome, AnalysisRequest, PipelineStage, SpeechReport, StoredAudio, StoredFileName,
    TranscribedAudio, UploadedAudio,
};
use crate::infrastructure::observability::sanitize_for_log;

use super::analysis_service::AnalysisService;

/// Sequences storage, transcription and the optional analysis for one upload.
///
/// Storage and transcription are mandatory: their failures abort the request.
/// Analysis runs only when a reference text was given and a generative model
/// is configured, and its failures are folded into the report.
pub struct SpeechPipeline {
    audio_store: Arc<dyn AudioStore>,
    transcription_engine: Arc<dyn TranscriptionEngine>,
    analysis_service: Option<AnalysisService>,
    cleanup_on_failure: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    pub analysis_configured: bool,
    pub analysis_model: Option<String>,
    pub transcription_model: String,
}

impl SpeechPipeline {
    pub fn new(
        audio_store: Arc<dyn AudioStore>,
        transcription_engine: Arc<dyn TranscriptionEngine>,
        llm_client: Option<Arc<dyn LlmClient>>,
    ) -> Self {
        Self {
            audio_store,
            transcription_engine,
            analysis_service: llm_client.map(AnalysisService::new),
            cleanup_on_failure: true,
        }
    }

    /// Whether a stored upload is deleted when its transcription fails.
    pub fn with_cleanup_on_failure(mut self, enabled: bool) -> Self {
        self.cleanup_on_failure = enabled;
        self
    }

    pub async fn store_upload(&self, upload: UploadedAudio) -> Result<StoredAudio, PipelineError> {
        tracing::debug!(
            stage = %PipelineStage::Received,
            original_filename = %upload.original_filename,
            content_type = %upload.content_type,
            bytes = upload.data.len(),
            "Upload received"
        );

        if !upload.is_audio() {
            tracing::warn!(content_type = %upload.content_type, "Rejected non-audio upload");
            return Err(PipelineError::InvalidMediaType(upload.content_type));
        }

        let filename = StoredFileName::generate(&upload.original_filename);
        let size_bytes = upload.size_bytes();

        let path = match self.audio_store.store(&filename, upload.data).await {
            Ok(path) => path,
            Err(e) => {
                tracing::error!(
                    stage = %PipelineStage::StorageFailed,
                    error = %e,
                    filename = %filename,
                    "Failed to store upload"
                );
                return Err(PipelineError::StorageFailed(e));
            }
        };

        tracing::debug!(
            stage = %PipelineStage::Stored,
            filename = %filename,
            format = filename.extension().unwrap_or("none"),
            path = %path.display(),
            "Upload stored"
        );

        Ok(StoredAudio {
            filename,
            path,
            content_type: upload.content_type,
            size_bytes,
        })
    }

    pub async fn transcribe_upload(
        &self,
        upload: UploadedAudio,
    ) -> Result<TranscribedAudio, PipelineError> {
        let audio = self.store_upload(upload).await?;
        let transcription = self.transcribe_stored(&audio).await?;
        Ok(TranscribedAudio {
            audio,
            transcription,
        })
    }

    /// Standalone analysis; unlike the combined pipeline, failures here are errors.
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisOutcome, PipelineError> {
        let service = self
            .analysis_service
            .as_ref()
            .ok_or(PipelineError::AnalysisServiceUnconfigured)?;

        tracing::debug!(
            original = %sanitize_for_log(&request.original_text),
            transcribed = %sanitize_for_log(&request.transcribed_text),
            "Analyzing speech"
        );

        service
            .analyze(request)
            .await
            .map_err(PipelineError::AnalysisFailed)
    }

    pub async fn upload_and_analyze(
        &self,
        upload: UploadedAudio,
        original_text: Option<&str>,
    ) -> Result<SpeechReport, PipelineError> {
        let TranscribedAudio {
            audio,
            transcription,
        } = self.transcribe_upload(upload).await?;

        let reference = original_text.map(str::trim).filter(|t| !t.is_empty());

        let analysis = match (reference, &self.analysis_service) {
            (Some(reference), Some(service)) => {
                let request = AnalysisRequest::new(reference, transcription.clone());
                match service.analyze(&request).await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            filename = %audio.filename,
                            "Analysis failed, continuing without it"
                        );
                        AnalysisOutcome::failed(e.to_string())
                    }
                }
            }
            (None, _) => {
                tracing::debug!(filename = %audio.filename, "No reference text supplied");
                AnalysisOutcome::Skipped
            }
            (Some(_), None) => {
                tracing::debug!(filename = %audio.filename, "Analysis service not configured");
                AnalysisOutcome::Skipped
            }
        };

        tracing::debug!(
            stage = %PipelineStage::from(&analysis),
            filename = %audio.filename,
            overall_score = analysis.result().map(|r| r.overall_score.value()),
            "Analysis step finished"
        );
        tracing::info!(
            stage = %PipelineStage::Completed,
            filename = %audio.filename,
            transcription_chars = transcription.len(),
            "Upload analyzed"
        );

        Ok(SpeechReport {
            audio,
            transcription,
            analysis,
        })
    }

    pub async fn generate_text(&self, prompt: &str) -> Result<String, PipelineError> {
        let service = self
            .analysis_service
            .as_ref()
            .ok_or(PipelineError::AnalysisServiceUnconfigured)?;

        service
            .generate(prompt)
            .await
            .map_err(PipelineError::GenerationFailed)
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            analysis_configured: self.analysis_service.is_some(),
            analysis_model: self
                .analysis_service
                .as_ref()
                .map(|s| s.model_name().to_string()),
            transcription_model: self.transcription_engine.model_name().to_string(),
        }
    }

    async fn transcribe_stored(&self, audio: &StoredAudio) -> Result<String, PipelineError> {
        match self.transcription_engine.transcribe(audio).await {
            Ok(text) => {
                tracing::debug!(
                    stage = %PipelineStage::Transcribed,
                    filename = %audio.filename,
                    chars = text.len(),
                    "Upload transcribed"
                );
                Ok(text)
            }
            Err(e) => {
                tracing::error!(
                    stage = %PipelineStage::TranscriptionFailed,
                    error = %e,
                    filename = %audio.filename,
                    "Transcription failed"
                );
                if self.cleanup_on_failure {
                    self.discard(audio).await;
                }
                Err(PipelineError::TranscriptionFailed(e))
            }
        }
    }

    async fn discard(&self, audio: &StoredAudio) {
        if let Err(e) = self.audio_store.delete(&audio.filename).await {
            tracing::warn!(
                error = %e,
                filename = %audio.filename,
                "Failed to remove upload after transcription failure"
            );
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File must be audio")]
    InvalidMediaType(String),
    #[error("Storage failed: {0}")]
    StorageFailed(#[source] AudioStoreError),
    #[error("Transcription failed: {0}")]
    TranscriptionFailed(#[source] TranscriptionError),
    #[error("Gemini API key not configured")]
    AnalysisServiceUnconfigured,
    #[error("Analysis failed: {0}")]
    AnalysisFailed(#[source] LlmClientError),
    #[error("Error calling Gemini API: {0}")]
    GenerationFailed(#[source] LlmClientError),
}
