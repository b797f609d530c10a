use std::sync::Arc;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::{AnalysisOutcome, AnalysisRequest};

use super::analysis_prompt::build_analysis_prompt;
use super::response_parser::parse_analysis;

pub struct AnalysisService {
    llm_client: Arc<dyn LlmClient>,
}

impl AnalysisService {
    pub fn new(llm_client: Arc<dyn LlmClient>) -> Self {
        Self { llm_client }
    }

    /// Scores a transcription against its reference text.
    ///
    /// Only the model call can fail; unparseable output comes back as
    /// [`AnalysisOutcome::Degraded`].
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisOutcome, LlmClientError> {
        let prompt = build_analysis_prompt(request);
        let response = self.llm_client.complete(&prompt).await?;

        let outcome = parse_analysis(&response);
        tracing::info!(
            model = self.llm_client.model_name(),
            degraded = outcome.is_degraded(),
            "Speech analysis completed"
        );
        Ok(outcome)
    }

    pub async fn generate(&self, prompt: &str) -> Result<String, LlmClientError> {
        self.llm_client.complete(prompt).await
    }

    pub fn model_name(&self) -> &str {
        self.llm_client.model_name()
    }
}
