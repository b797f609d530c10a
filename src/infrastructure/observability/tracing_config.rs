use crate::presentation::config::{Environment, LoggingSettings};

const DEFAULT_DIRECTIVES: &str = "speech_lab=debug,tower_http=debug";

#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: Environment,
    pub level: String,
    pub json_format: bool,
}

impl TracingConfig {
    pub fn new(environment: Environment, logging: &LoggingSettings) -> Self {
        Self {
            environment,
            level: logging.level.clone(),
            json_format: logging.json_format,
        }
    }

    /// Filter used when `RUST_LOG` is not set.
    pub fn default_filter(&self) -> String {
        let level = self.level.trim();
        let level = if level.is_empty() { "info" } else { level };
        format!("{},{}", level, DEFAULT_DIRECTIVES)
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::new(Environment::Local, &LoggingSettings::default())
    }
}
