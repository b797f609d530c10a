use std::sync::Arc;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::presentation::config::LlmSettings;

use super::gemini_client::GeminiClient;

pub struct LlmClientFactory;

impl LlmClientFactory {
    /// `None` when no API key is configured; analysis is then unavailable.
    pub fn create(settings: &LlmSettings) -> Result<Option<Arc<dyn LlmClient>>, LlmClientError> {
        let Some(api_key) = settings.api_key() else {
            tracing::warn!("GEMINI_API_KEY not set, speech analysis is disabled");
            return Ok(None);
        };

        let client = GeminiClient::new(api_key.to_string(), settings)?;
        tracing::info!(model = %settings.model, "Gemini client configured");
        Ok(Some(Arc::new(client)))
    }
}
