use std::sync::Arc;

use crate::application::services::SpeechPipeline;
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<SpeechPipeline>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(pipeline: SpeechPipeline, settings: Settings) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            settings: Arc::new(settings),
        }
    }
}
