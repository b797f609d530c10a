use std::sync::Arc;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::presentation::config::{TranscriptionProviderSetting, TranscriptionSettings};

use super::candle_whisper_engine::CandleWhisperEngine;
use super::openai_whisper_engine::OpenAiWhisperEngine;

pub struct TranscriptionEngineFactory;

impl TranscriptionEngineFactory {
    /// Builds the configured engine. Loading a local model is blocking work.
    pub fn create(
        settings: &TranscriptionSettings,
    ) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> {
        match settings.provider {
            TranscriptionProviderSetting::Local => {
                let engine = CandleWhisperEngine::new(&settings.model, &settings.language)?;
                Ok(Arc::new(engine))
            }
            TranscriptionProviderSetting::OpenAi => {
                let key = settings
                    .api_key
                    .clone()
                    .filter(|key| !key.trim().is_empty())
                    .ok_or_else(|| {
                        TranscriptionError::ModelLoadFailed(
                            "transcription.api_key is required for the openai provider"
                                .to_string(),
                        )
                    })?;
                let engine = OpenAiWhisperEngine::new(
                    key,
                    settings.base_url.clone(),
                    settings.api_model.clone(),
                    settings.language.clone(),
                );
                Ok(Arc::new(engine))
            }
        }
    }
}
