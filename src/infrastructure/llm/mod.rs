mod gemini_client;
mod llm_client_factory;

pub use gemini_client::GeminiClient;
pub use llm_client_factory::LlmClientFactory;
